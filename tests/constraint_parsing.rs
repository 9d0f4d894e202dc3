//! Parsing tests across all 19 constraint kinds
//!
//! Covers the minimal valid template of every kind, the forgiving name
//! normalization, the three-state PropertyValues invariant, and the
//! deliberate asymmetry of the quantity-list parser.

use pretty_assertions::assert_eq;

use wikibase_constraints::{
    extract_templates, parse_constraints, parse_first_constraint, Constraint, ConstraintKind,
    PropertyId, RangeEndpoint, Relation,
};

fn p30() -> PropertyId {
    PropertyId::new("P30").unwrap()
}

fn parse(text: &str) -> Option<Constraint> {
    parse_first_constraint(&p30(), text)
}

/// Minimal valid template of every kind, with the slug it must parse to.
const MINIMAL_TEMPLATES: [(&str, &str); 19] = [
    ("{{Constraint:Single value}}", "SingleValue"),
    ("{{Constraint:Unique value}}", "UniqueValue"),
    ("{{Constraint:Format|pattern=[0-9]+}}", "Format"),
    ("{{Constraint:One of|values=Q1,Q2}}", "OneOf"),
    ("{{Constraint:Symmetric}}", "Symmetric"),
    ("{{Constraint:Inverse|property=P155}}", "Inverse"),
    ("{{Constraint:Existing file}}", "ExistingFile"),
    (
        "{{Constraint:Target required claim|property=P21|items=Q6581097}}",
        "TargetRequiredClaim",
    ),
    ("{{Constraint:Item|property=P17}}", "Item"),
    ("{{Constraint:Type|class=Q5|relation=instance}}", "Type"),
    (
        "{{Constraint:Value type|classes=Q5,Q95074|relation=subclass}}",
        "ValueType",
    ),
    ("{{Constraint:Range|min=0|max=2000}}", "Range"),
    (
        "{{Constraint:Diff within range|base_property=P569|min=0|max=150}}",
        "DiffWithinRange",
    ),
    ("{{Constraint:Multi value}}", "MultiValue"),
    (
        "{{Constraint:Conflicts with|list=P21:Q6581097;P27}}",
        "ConflictsWith",
    ),
    ("{{Constraint:Qualifiers|list=P580,P582}}", "Qualifiers"),
    ("{{Constraint:Qualifier}}", "Qualifier"),
    ("{{Constraint:Person}}", "Person"),
    ("{{Constraint:Taxon}}", "Taxon"),
];

#[test]
fn every_kind_parses_from_its_minimal_template() {
    for (text, slug) in MINIMAL_TEMPLATES {
        let constraint = parse(text).unwrap_or_else(|| panic!("no constraint parsed from {text}"));
        assert_eq!(constraint.kind().slug(), slug, "wrong kind for {text}");
        assert_eq!(constraint.property(), &p30());
    }
}

#[test]
fn unknown_template_names_parse_to_none() {
    for text in [
        "{{Infobox person|name=X}}",
        "{{Constraint:Does not exist}}",
        "{{Single value}}", // missing the Constraint: prefix
        "plain prose without templates",
    ] {
        assert_eq!(parse(text), None, "unexpected constraint from {text}");
    }
}

#[test]
fn name_normalization_is_case_and_underscore_insensitive() {
    let canonical = parse("{{Constraint:Single value}}").unwrap();
    for variant in [
        "{{Constraint:single_VALUE}}",
        "{{constraint:SINGLE VALUE}}",
        "{{ Constraint:single value }}",
    ] {
        assert_eq!(parse(variant).as_ref(), Some(&canonical), "variant {variant}");
    }
}

#[test]
fn conflicts_with_keeps_restriction_states_distinct() {
    let constraint = parse("{{Constraint:Conflicts with|list=P21:Q6581097;P27;P19:}}").unwrap();
    let ConstraintKind::ConflictsWith { list } = constraint.kind() else {
        panic!("expected ConflictsWith, got {:?}", constraint.kind());
    };
    assert_eq!(list.len(), 3);

    assert_eq!(list[0].property.as_str(), "P21");
    let restricted: Vec<_> = list[0]
        .values
        .as_ref()
        .expect("P21 is restricted")
        .iter()
        .map(|item| item.as_str())
        .collect();
    assert_eq!(restricted, vec!["Q6581097"]);

    assert_eq!(list[1].property.as_str(), "P27");
    assert_eq!(list[1].values, None, "P27 is unrestricted");

    assert_eq!(list[2].property.as_str(), "P19");
    assert_eq!(list[2].values, Some(vec![]), "P19 excludes every value");
}

#[test]
fn one_of_parses_items_and_preserves_order() {
    let constraint = parse("{{Constraint:One of|values=[[Q68947]], [[q7432]]}}").unwrap();
    let ConstraintKind::OneOf { values } = constraint.kind() else {
        panic!("expected OneOf");
    };
    let wikibase_constraints::model::OneOfValues::Items(items) = values else {
        panic!("expected item values");
    };
    let ids: Vec<_> = items.iter().map(|item| item.as_str()).collect();
    assert_eq!(ids, vec!["Q68947", "Q7432"]);
}

#[test]
fn one_of_parses_bare_integers_as_quantities() {
    let constraint = parse("{{Constraint:One of|values=1,2,3}}").unwrap();
    let ConstraintKind::OneOf { values } = constraint.kind() else {
        panic!("expected OneOf");
    };
    assert_eq!(
        *values,
        wikibase_constraints::model::OneOfValues::Quantities(vec![1, 2, 3])
    );
}

#[test]
fn quantity_failure_is_reported_not_silent() {
    // A malformed token in a present quantity list is a hard, reported
    // error...
    let (constraints, errors) = parse_constraints(&p30(), "{{Constraint:One of|values=1,2,x}}");
    assert!(constraints.is_empty());
    assert_eq!(errors.len(), 1);

    // ...whereas a missing required parameter is silently not recognized.
    let (constraints, errors) = parse_constraints(&p30(), "{{Constraint:One of}}");
    assert!(constraints.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn range_bounds_parse_numbers_and_now() {
    let constraint = parse("{{Constraint:Range|min=0|max=now}}").unwrap();
    assert_eq!(
        *constraint.kind(),
        ConstraintKind::Range {
            min: RangeEndpoint::Number(0.0),
            max: RangeEndpoint::Now,
        }
    );
}

#[test]
fn malformed_range_bound_is_a_local_error() {
    let text = "{{Constraint:Range|min=early|max=2000}} {{Constraint:Symmetric}}";
    let (constraints, errors) = parse_constraints(&p30(), text);
    assert_eq!(errors.len(), 1);
    assert_eq!(constraints.len(), 1);
    assert_eq!(*constraints[0].kind(), ConstraintKind::Symmetric);
}

#[test]
fn type_defaults_to_instance_relation() {
    let constraint = parse("{{Constraint:Type|class=Q1048835}}").unwrap();
    let ConstraintKind::Type { relation, .. } = constraint.kind() else {
        panic!("expected Type");
    };
    assert_eq!(*relation, Relation::Instance);
}

#[test]
fn item_accepts_single_item_parameter() {
    let constraint = parse("{{Constraint:Item|property=P17|item=Q30}}").unwrap();
    let ConstraintKind::Item { property, items } = constraint.kind() else {
        panic!("expected Item");
    };
    assert_eq!(property.as_str(), "P17");
    let ids: Vec<_> = items.as_ref().unwrap().iter().map(|i| i.as_str()).collect();
    assert_eq!(ids, vec!["Q30"]);
}

#[test]
fn unbalanced_templates_yield_nothing_but_do_not_poison_the_text() {
    let text = "{{Constraint:Single value}} {{Constraint:Broken|x=";
    let (constraints, errors) = parse_constraints(&p30(), text);
    assert!(errors.is_empty());
    assert_eq!(constraints.len(), 1);
    assert_eq!(*constraints[0].kind(), ConstraintKind::SingleValue);
}

#[test]
fn parameters_keep_source_order() {
    let templates = extract_templates("{{Constraint:One of|values=Q1|pattern=x}}");
    let keys: Vec<_> = templates[0]
        .parameters()
        .iter()
        .map(|param| param.name.as_deref())
        .collect();
    assert_eq!(keys, vec![Some("values"), Some("pattern")]);
}
