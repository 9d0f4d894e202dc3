//! Output options for the command-line tool
//!
//! A small TOML file can preset what the CLI would otherwise take as
//! flags: the output serialization, the constrained property, and
//! whether diagnostics are printed. Flags always win over the file.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::OutputFormat;

/// Errors that can occur when loading or parsing an options file
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("failed to read options file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse options TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Resolved options for one CLI invocation
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Serialization to emit.
    pub format: OutputFormat,
    /// Constrained property id, e.g. `P30`.
    pub property: Option<String>,
    /// Print parse diagnostics for malformed constraint values.
    pub diagnostics: bool,
}

/// TOML structure for deserializing options files
#[derive(Deserialize)]
struct TomlOptions {
    output: Option<TomlOutput>,
}

#[derive(Deserialize)]
struct TomlOutput {
    format: Option<OutputFormat>,
    property: Option<String>,
    diagnostics: Option<bool>,
}

impl OutputOptions {
    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load options from a TOML string
    pub fn from_str(content: &str) -> Result<Self, OptionsError> {
        let parsed: TomlOptions = toml::from_str(content)?;
        let defaults = Self::default();
        let output = parsed.output;

        Ok(Self {
            format: output
                .as_ref()
                .and_then(|o| o.format)
                .unwrap_or(defaults.format),
            property: output.as_ref().and_then(|o| o.property.clone()),
            diagnostics: output
                .as_ref()
                .and_then(|o| o.diagnostics)
                .unwrap_or(defaults.diagnostics),
        })
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Owl2,
            property: None,
            diagnostics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OutputOptions::default();
        assert_eq!(options.format, OutputFormat::Owl2);
        assert_eq!(options.property, None);
        assert!(options.diagnostics);
    }

    #[test]
    fn test_parse_full_file() {
        let options = OutputOptions::from_str(
            r#"
[output]
format = "rdf"
property = "P30"
diagnostics = false
"#,
        )
        .expect("should parse");
        assert_eq!(options.format, OutputFormat::Rdf);
        assert_eq!(options.property.as_deref(), Some("P30"));
        assert!(!options.diagnostics);
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let options = OutputOptions::from_str("").expect("should parse");
        assert_eq!(options.format, OutputFormat::Owl2);
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(OutputOptions::from_str("not toml {{").is_err());
    }

    #[test]
    fn test_unknown_format_is_error() {
        assert!(OutputOptions::from_str("[output]\nformat = \"xml\"").is_err());
    }
}
