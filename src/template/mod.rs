//! Template extraction from wiki markup
//!
//! This module pulls `{{Name|params}}` template invocations out of
//! surrounding wiki text. Everything outside a template is ignored;
//! malformed or unbalanced brace sequences yield no template for that
//! span rather than an error, since the source text is uncurated wiki
//! content.
//!
//! # Example
//!
//! ```rust
//! use wikibase_constraints::template::extract_templates;
//!
//! let templates = extract_templates("{{Constraint:One of|values=Q1,Q2}}");
//! assert_eq!(templates[0].name(), "Constraint:One of");
//! assert_eq!(templates[0].named_value("values"), Some("Q1,Q2"));
//! ```

pub mod lexer;
mod scan;

pub use scan::extract_templates;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A single template parameter: positional (value only) or named
/// (key + value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter key, if the parameter was written `key=value`.
    pub name: Option<String>,
    /// Parameter value, trimmed, with nested markup kept verbatim.
    pub value: String,
    /// Span of the parameter text in the original source.
    pub span: Span,
}

/// A `{{Name|params}}` invocation extracted from wiki text.
///
/// Parameter order is preserved: some constraint grammars are positional.
/// The name is kept as written (trimmed); normalization is the parser
/// registry's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    parameters: Vec<Parameter>,
    span: Span,
}

impl Template {
    pub(crate) fn new(name: String, parameters: Vec<Parameter>, span: Span) -> Self {
        Self {
            name,
            parameters,
            span,
        }
    }

    /// The template name as written, trimmed. Never empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All parameters in source order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Span of the whole `{{...}}` invocation in the source.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Look up a named parameter by key (exact match on the trimmed key).
    pub fn named(&self, key: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name.as_deref() == Some(key))
    }

    /// Value of a named parameter, if present.
    pub fn named_value(&self, key: &str) -> Option<&str> {
        self.named(key).map(|p| p.value.as_str())
    }

    /// Value of the nth positional (unnamed) parameter.
    pub fn positional_value(&self, index: usize) -> Option<&str> {
        self.parameters
            .iter()
            .filter(|p| p.name.is_none())
            .nth(index)
            .map(|p| p.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        let t = Template::new(
            "Constraint:Format".to_string(),
            vec![
                Parameter {
                    name: Some("pattern".to_string()),
                    value: "[0-9]+".to_string(),
                    span: 0..0,
                },
                Parameter {
                    name: None,
                    value: "extra".to_string(),
                    span: 0..0,
                },
            ],
            0..0,
        );
        assert_eq!(t.named_value("pattern"), Some("[0-9]+"));
        assert_eq!(t.named_value("missing"), None);
        assert_eq!(t.positional_value(0), Some("extra"));
        assert_eq!(t.positional_value(1), None);
    }
}
