//! Constraint parser registry
//!
//! Maps normalized template names to one of the 19 per-kind parsing
//! strategies. Normalization is deliberately forgiving: wiki authors
//! write `{{Constraint:single_VALUE}}` and expect it to mean
//! `{{Constraint:Single value}}`, so names are trimmed, lowercased,
//! underscore-mapped and re-capitalized before lookup.

mod kinds;
mod values;

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::error::ConstraintParseError;
use crate::model::{Constraint, PropertyId};
use crate::template::Template;

use kinds::KindParser;

/// Template-name prefix shared by every constraint template.
pub const CONSTRAINT_PREFIX: &str = "Constraint:";

/// The 19 supported constraint kinds, keyed by their canonical template
/// name (normalized at registry construction).
const PARSERS: [(&str, KindParser); 19] = [
    ("Single value", kinds::single_value),
    ("Unique value", kinds::unique_value),
    ("Format", kinds::format),
    ("One of", kinds::one_of),
    ("Symmetric", kinds::symmetric),
    ("Inverse", kinds::inverse),
    ("Existing file", kinds::existing_file),
    ("Target required claim", kinds::target_required_claim),
    ("Item", kinds::item),
    ("Type", kinds::type_),
    ("Value type", kinds::value_type),
    ("Range", kinds::range),
    ("Diff within range", kinds::diff_within_range),
    ("Multi value", kinds::multi_value),
    ("Conflicts with", kinds::conflicts_with),
    ("Qualifiers", kinds::qualifiers),
    ("Qualifier", kinds::qualifier),
    ("Person", kinds::person),
    ("Taxon", kinds::taxon),
];

/// Normalize a template name for registry lookup: trim, lowercase, map
/// underscores to spaces, capitalize the first letter.
pub fn normalize(name: &str) -> String {
    let lowered = name.trim().to_lowercase().replace('_', " ");
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The name→parser table, built once and read-only afterwards.
fn registry() -> &'static HashMap<String, KindParser> {
    static REGISTRY: OnceLock<HashMap<String, KindParser>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        PARSERS
            .iter()
            .map(|(name, parser)| (normalize(name), *parser))
            .collect()
    })
}

/// Parse a template into a constraint on the given property.
///
/// Returns `Ok(None)` when the template is not a recognized constraint:
/// an unrelated name, a name outside the `Constraint:` prefix, or a
/// matched kind missing a required parameter. Most wiki templates are
/// unrelated annotations, so `None` is the common, non-error outcome.
/// A malformed value inside a present parameter is reported as an error
/// local to this one parse.
pub fn parse(
    property: &PropertyId,
    template: &Template,
) -> Result<Option<Constraint>, ConstraintParseError> {
    let template_id = normalize(template.name());
    let prefix = normalize(CONSTRAINT_PREFIX);
    let Some(rest) = template_id.strip_prefix(&prefix) else {
        trace!(name = template.name(), "not a constraint template");
        return Ok(None);
    };
    let kind_token = normalize(rest);
    let Some(kind_parser) = registry().get(&kind_token) else {
        trace!(kind = %kind_token, "unknown constraint kind");
        return Ok(None);
    };
    debug!(kind = %kind_token, property = %property, "matched constraint template");
    Ok(kind_parser(template)?.map(|kind| Constraint::new(property.clone(), kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstraintKind;
    use crate::template::extract_templates;

    fn parse_one(property: &str, text: &str) -> Option<Constraint> {
        let property = PropertyId::new(property).unwrap();
        let templates = extract_templates(text);
        assert_eq!(templates.len(), 1, "expected one template in {text:?}");
        parse(&property, &templates[0]).unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  single_VALUE "), "Single value");
        assert_eq!(normalize("CONSTRAINT:Single value"), "Constraint:single value");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_registry_has_all_kinds() {
        assert_eq!(registry().len(), 19);
    }

    #[test]
    fn test_unrelated_template_is_none() {
        assert!(parse_one("P30", "{{Citation needed}}").is_none());
    }

    #[test]
    fn test_unknown_constraint_kind_is_none() {
        assert!(parse_one("P30", "{{Constraint:Frobnicate|x=1}}").is_none());
    }

    #[test]
    fn test_missing_required_parameter_is_none() {
        assert!(parse_one("P30", "{{Constraint:Format}}").is_none());
        assert!(parse_one("P30", "{{Constraint:Inverse}}").is_none());
        assert!(parse_one("P30", "{{Constraint:Range|min=1}}").is_none());
    }

    #[test]
    fn test_case_and_underscore_variance_resolves() {
        let canonical = parse_one("P30", "{{Constraint:Single value}}").unwrap();
        let variant = parse_one("P30", "{{constraint:single_VALUE}}").unwrap();
        assert_eq!(canonical, variant);
        assert_eq!(*variant.kind(), ConstraintKind::SingleValue);
    }

    #[test]
    fn test_malformed_value_is_reported() {
        let property = PropertyId::new("P30").unwrap();
        let templates = extract_templates("{{Constraint:Range|min=zero|max=10}}");
        assert!(parse(&property, &templates[0]).is_err());
    }
}
