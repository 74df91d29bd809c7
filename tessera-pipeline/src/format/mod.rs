//! Format serializer: renders a transformed document to text.
//!
//! Rendering first filters tokens with `props_filter`, then maps each
//! survivor with `props_map`, then hands the ordered list to the renderer
//! selected by the format type.

mod javascript;
mod json;
mod stylesheet;

use std::str::FromStr;

use tracing::debug;

use crate::{
    Error, FormatOptions, Result,
    transform::{Token, TransformedDocument},
};

/// A built-in output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `module.exports = { ... };`
    CommonJs,
    /// One `export const` per token.
    ModuleJs,
    /// Flat `{ "name": value }` JSON.
    Json,
    /// The whole transformed document as JSON.
    RawJson,
    Scss,
    Sass,
    Less,
    /// `:root { --name: value; }`
    CustomProperties,
}

impl Format {
    /// All formats, in display order.
    pub const ALL: [Format; 8] = [
        Self::CommonJs,
        Self::ModuleJs,
        Self::Json,
        Self::RawJson,
        Self::Scss,
        Self::Sass,
        Self::Less,
        Self::CustomProperties,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CommonJs => "common.js",
            Self::ModuleJs => "module.js",
            Self::Json => "json",
            Self::RawJson => "raw.json",
            Self::Scss => "scss",
            Self::Sass => "sass",
            Self::Less => "less",
            Self::CustomProperties => "custom-properties.css",
        }
    }

    /// Conventional file extension for the output.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::CommonJs | Self::ModuleJs => "js",
            Self::Json | Self::RawJson => "json",
            Self::Scss => "scss",
            Self::Sass => "sass",
            Self::Less => "less",
            Self::CustomProperties => "css",
        }
    }

    /// Render an already filtered and mapped token list.
    pub fn render_tokens(&self, tokens: &[Token], doc: &TransformedDocument) -> String {
        match self {
            Self::CommonJs => javascript::common_js(tokens),
            Self::ModuleJs => javascript::module_js(tokens),
            Self::Json => json::flat(tokens),
            Self::RawJson => json::raw(tokens, doc),
            Self::Scss => stylesheet::scss(tokens),
            Self::Sass => stylesheet::sass(tokens),
            Self::Less => stylesheet::less(tokens),
            Self::CustomProperties => stylesheet::custom_properties(tokens),
        }
    }
}

impl FromStr for Format {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                Box::new(Error::UnknownFormat {
                    name: s.to_string(),
                    valid: Self::ALL.map(|f| f.name()).join(", "),
                })
            })
    }
}

/// Render `doc` according to `options`.
pub fn render(doc: &TransformedDocument, options: &FormatOptions) -> Result<String> {
    let format: Format = options.format_type.parse()?;

    let tokens: Vec<Token> = doc
        .tokens
        .iter()
        .filter(|token| options.props_filter.as_ref().is_none_or(|f| f(*token)))
        .cloned()
        .map(|token| match &options.props_map {
            Some(map) => map(token),
            None => token,
        })
        .collect();

    debug!(
        format = format.name(),
        kept = tokens.len(),
        total = doc.tokens.len(),
        "rendering tokens"
    );
    Ok(format.render_tokens(&tokens, doc))
}
