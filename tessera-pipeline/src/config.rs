//! `tessera.toml`: declarative defaults for command-line runs.
//!
//! ```toml
//! transform = "web"
//!
//! [format]
//! type = "common.js"
//! categories = ["color"]   # keep only these categories
//! prefix = "PREFIX_"       # prepend to every token name
//!
//! [params]
//! theme = "dark"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::{FormatOptions, Options};

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(tessera::config_io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tessera.toml")]
    #[diagnostic(code(tessera::config_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of a `tessera.toml` file. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transform: Option<String>,
    #[serde(default)]
    pub format: Option<FormatConfig>,
    #[serde(default)]
    pub params: IndexMap<String, String>,
}

/// A format given by name, or as a table with declarative hooks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormatConfig {
    Name(String),
    Detailed {
        #[serde(rename = "type")]
        format_type: String,
        /// Keep only tokens in these categories (or with these types).
        #[serde(default)]
        categories: Vec<String>,
        /// Prepended to every token name.
        #[serde(default)]
        prefix: Option<String>,
    },
}

impl FormatConfig {
    fn into_options(self) -> FormatOptions {
        match self {
            Self::Name(name) => FormatOptions::new(name),
            Self::Detailed {
                format_type,
                categories,
                prefix,
            } => {
                let mut options = FormatOptions::new(format_type);
                if !categories.is_empty() {
                    options = options.props_filter(move |token| {
                        categories
                            .iter()
                            .any(|c| c == token.kind() || *c == token.category)
                    });
                }
                if let Some(prefix) = prefix {
                    options = options.props_map(move |mut token| {
                        token.name = format!("{}{}", prefix, token.name);
                        token
                    });
                }
                options
            }
        }
    }
}

impl Config {
    /// Read a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<ConfigError>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse config text, naming `filename` in errors.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self, Box<ConfigError>> {
        toml::from_str(content).map_err(|source: toml::de::Error| {
            Box::new(ConfigError::Parse {
                src: NamedSource::new(filename, content.to_string()),
                span: source.span().map(SourceSpan::from),
                source,
            })
        })
    }

    /// Layer this config onto `options`.
    pub fn apply(self, mut options: Options) -> Options {
        if let Some(transform) = self.transform {
            options.transform.name = transform;
        }
        if let Some(format) = self.format {
            options.format = format.into_options();
        }
        options.params.extend(self.params);
        options
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transform::Token;

    fn parse(content: &str) -> Config {
        Config::from_str_with_filename(content, "tessera.toml").expect("valid config")
    }

    #[test]
    fn test_format_by_name() {
        let options = parse("transform = \"ios\"\nformat = \"scss\"\n").apply(Options::new());
        assert_eq!(options.transform.name, "ios");
        assert_eq!(options.format.format_type, "scss");
        assert!(options.format.props_filter.is_none());
    }

    #[test]
    fn test_declarative_hooks() {
        let config = parse(
            r#"
            [format]
            type = "common.js"
            categories = ["color"]
            prefix = "PREFIX_"

            [params]
            theme = "dark"
            "#,
        );
        let options = config.apply(Options::new());

        let filter = options.format.props_filter.as_ref().unwrap();
        assert!(filter(&Token::new("a", json!(1), "color")));
        assert!(!filter(&Token::new("b", json!(1), "size")));

        let map = options.format.props_map.as_ref().unwrap();
        assert_eq!(map(Token::new("five", json!(1), "color")).name, "PREFIX_five");
        assert_eq!(options.params["theme"], "dark");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse("unrelated = 1\n");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Config::from_str_with_filename("transform = ", "tessera.toml").unwrap_err();
        match *err {
            ConfigError::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here/tessera.toml").unwrap_err();
        assert!(matches!(*err, ConfigError::Io { .. }));
    }
}
