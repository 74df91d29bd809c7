//! Per-run options and the hooks callers can plug in.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use tessera_document::MergedDocument;
use url::form_urlencoded;

use crate::transform::Token;

/// Runs once over the merged document before any value is transformed.
pub type Preprocess = Arc<dyn Fn(&mut MergedDocument) + Send + Sync>;
/// Keeps a token in the output when it returns `true`.
pub type PropsFilter = Arc<dyn Fn(&Token) -> bool + Send + Sync>;
/// Rewrites each surviving token before rendering.
pub type PropsMap = Arc<dyn Fn(Token) -> Token + Send + Sync>;
/// Receives the effective options and returns the ones to run with.
pub type GetOptions = Arc<dyn Fn(Options) -> Options + Send + Sync>;

pub const DEFAULT_TRANSFORM: &str = "web";
pub const DEFAULT_FORMAT: &str = "common.js";

/// Transform selection.
#[derive(Clone)]
pub struct TransformOptions {
    /// Registered transform name.
    pub name: String,
    pub preprocess: Option<Preprocess>,
}

impl TransformOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preprocess: None,
        }
    }

    pub fn preprocess(mut self, f: impl Fn(&mut MergedDocument) + Send + Sync + 'static) -> Self {
        self.preprocess = Some(Arc::new(f));
        self
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFORM)
    }
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field("name", &self.name)
            .field("preprocess", &self.preprocess.is_some())
            .finish()
    }
}

/// Format selection with optional selection and projection hooks.
#[derive(Clone)]
pub struct FormatOptions {
    /// Registered format name.
    pub format_type: String,
    pub props_filter: Option<PropsFilter>,
    pub props_map: Option<PropsMap>,
}

impl FormatOptions {
    pub fn new(format_type: impl Into<String>) -> Self {
        Self {
            format_type: format_type.into(),
            props_filter: None,
            props_map: None,
        }
    }

    pub fn props_filter(mut self, f: impl Fn(&Token) -> bool + Send + Sync + 'static) -> Self {
        self.props_filter = Some(Arc::new(f));
        self
    }

    pub fn props_map(mut self, f: impl Fn(Token) -> Token + Send + Sync + 'static) -> Self {
        self.props_map = Some(Arc::new(f));
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl fmt::Debug for FormatOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOptions")
            .field("format_type", &self.format_type)
            .field("props_filter", &self.props_filter.is_some())
            .field("props_map", &self.props_map.is_some())
            .finish()
    }
}

/// Everything one pipeline run is configured with.
///
/// # Example
///
/// ```
/// use tessera_pipeline::Options;
///
/// let options = Options::new()
///     .with_query("format=raw.json&propToDelete=three")
///     .get_options(|mut options| {
///         let name = options.params.get("propToDelete").cloned();
///         options.transform = options.transform.preprocess(move |doc| {
///             if let Some(name) = &name {
///                 doc.remove_property(name);
///             }
///         });
///         options
///     });
///
/// assert_eq!(options.format.format_type, "raw.json");
/// ```
#[derive(Clone, Default)]
pub struct Options {
    pub transform: TransformOptions,
    pub format: FormatOptions,
    pub get_options: Option<GetOptions>,
    /// Request-scoped parameters, e.g. from a query string.
    pub params: IndexMap<String, String>,
}

impl Options {
    /// Options with the default transform and format.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(mut self, name: impl Into<String>) -> Self {
        self.transform.name = name.into();
        self
    }

    pub fn format(mut self, format: impl Into<FormatOptions>) -> Self {
        self.format = format.into();
        self
    }

    pub fn preprocess(mut self, f: impl Fn(&mut MergedDocument) + Send + Sync + 'static) -> Self {
        self.transform = self.transform.preprocess(f);
        self
    }

    pub fn get_options(mut self, f: impl Fn(Options) -> Options + Send + Sync + 'static) -> Self {
        self.get_options = Some(Arc::new(f));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Apply a URL query string such as `transform=ios&format=scss&theme=dark`.
    ///
    /// `transform` and `format` replace the selected names (keeping any
    /// hooks); every other key is stored in `params`.
    pub fn with_query(mut self, query: &str) -> Self {
        for (key, value) in parse_query(query) {
            match key.as_str() {
                "transform" => self.transform.name = value,
                "format" => self.format.format_type = value,
                _ => {
                    self.params.insert(key, value);
                }
            }
        }
        self
    }

    /// Run the `get_options` hook, if any, and return the options to use.
    ///
    /// The hook is consumed so it runs exactly once.
    pub fn resolve(mut self) -> Options {
        match self.get_options.take() {
            Some(hook) => hook(self),
            None => self,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("transform", &self.transform)
            .field("format", &self.format)
            .field("get_options", &self.get_options.is_some())
            .field("params", &self.params)
            .finish()
    }
}

impl From<&str> for FormatOptions {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FormatOptions {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}
