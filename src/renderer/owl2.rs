//! OWL2 functional-syntax renderer backend
//!
//! Emits line-oriented axioms to an `io::Write` sink. Output is
//! byte-for-byte deterministic: axioms appear in a fixed per-variant
//! order, every IRI is written in full angle-bracket form, and every
//! axiom line ends in exactly one newline. Compatibility with stored
//! expected-output fixtures depends on this determinism.

use std::io::Write;

use oxrdf::vocab::xsd;

use crate::error::RenderError;
use crate::model::{
    Constraint, ConstraintKind, ItemId, OneOfValues, PropertyId, PropertyValues, RangeEndpoint,
};

use super::vocab::{self, owl, xsd_facet};
use super::{endpoint_is_time, endpoint_lexical, RendererFormat};

/// Renderer backend writing OWL2 functional-syntax axiom lines.
pub struct Owl2FunctionalRendererFormat<W: Write> {
    out: W,
}

impl<W: Write> Owl2FunctionalRendererFormat<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer and hand the sink back.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn axiom(&mut self, line: &str) -> Result<(), RenderError> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn declare_object_property(&mut self, property: &PropertyId) -> Result<(), RenderError> {
        self.axiom(&format!("Declaration(ObjectProperty({}))", iri(&property.iri())))
    }

    fn declare_data_property(&mut self, property: &PropertyId) -> Result<(), RenderError> {
        self.axiom(&format!("Declaration(DataProperty({}))", iri(&property.iri())))
    }

    fn some_values_from(&self, property: &PropertyId, filler: &str) -> String {
        format!("ObjectSomeValuesFrom({} {})", iri(&property.iri()), filler)
    }

    /// Class expression of an optional restriction list: absent means
    /// any value, empty means none.
    fn restriction_class(&self, items: &Option<Vec<ItemId>>) -> String {
        match items {
            None => iri(owl::THING.as_str()),
            Some(items) => enumeration_class(items),
        }
    }

    fn range_restriction(&self, min: &RangeEndpoint, max: &RangeEndpoint) -> String {
        let datatype = if endpoint_is_time(min) || endpoint_is_time(max) {
            xsd::DATE_TIME
        } else {
            xsd::DECIMAL
        };
        format!(
            "DatatypeRestriction({} {} {} {} {})",
            iri(datatype.as_str()),
            iri(xsd_facet::MIN_INCLUSIVE),
            typed_literal(&endpoint_lexical(min), datatype.as_str()),
            iri(xsd_facet::MAX_INCLUSIVE),
            typed_literal(&endpoint_lexical(max), datatype.as_str()),
        )
    }
}

fn iri(value: &str) -> String {
    format!("<{value}>")
}

fn item_iri(item: &ItemId) -> String {
    iri(&item.iri())
}

fn typed_literal(lexical: &str, datatype: &str) -> String {
    format!("\"{}\"^^{}", escape_literal(lexical), iri(datatype))
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `ObjectOneOf` of a concrete item list; the empty list is `owl:Nothing`
/// (an empty enumeration is not well-formed functional syntax).
fn enumeration_class(items: &[ItemId]) -> String {
    if items.is_empty() {
        return iri(owl::NOTHING.as_str());
    }
    let members: Vec<String> = items.iter().map(item_iri).collect();
    format!("ObjectOneOf({})", members.join(" "))
}

/// Single class, union of several, or `owl:Nothing` for none.
fn class_or_union(classes: &[ItemId]) -> String {
    match classes {
        [] => iri(owl::NOTHING.as_str()),
        [single] => item_iri(single),
        _ => {
            let members: Vec<String> = classes.iter().map(item_iri).collect();
            format!("ObjectUnionOf({})", members.join(" "))
        }
    }
}

impl<W: Write> RendererFormat for Owl2FunctionalRendererFormat<W> {
    fn start(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn render_constraint(&mut self, constraint: &Constraint) -> Result<(), RenderError> {
        let property = constraint.property();
        let p = iri(&property.iri());

        match constraint.kind() {
            ConstraintKind::SingleValue => {
                self.declare_object_property(property)?;
                self.axiom(&format!("FunctionalObjectProperty({p})"))?;
            }

            ConstraintKind::UniqueValue => {
                self.declare_object_property(property)?;
                self.axiom(&format!("InverseFunctionalObjectProperty({p})"))?;
            }

            ConstraintKind::Format { pattern } => {
                self.declare_data_property(property)?;
                let restriction = format!(
                    "DatatypeRestriction({} {} {})",
                    iri(xsd::STRING.as_str()),
                    iri(xsd_facet::PATTERN),
                    typed_literal(pattern, xsd::STRING.as_str()),
                );
                self.axiom(&format!("DataPropertyRange({p} {restriction})"))?;
            }

            ConstraintKind::OneOf { values } => match values {
                OneOfValues::Items(items) => {
                    self.declare_object_property(property)?;
                    let class = enumeration_class(items);
                    self.axiom(&format!("ObjectPropertyRange({p} {class})"))?;
                }
                OneOfValues::Quantities(quantities) => {
                    self.declare_data_property(property)?;
                    let members: Vec<String> = quantities
                        .iter()
                        .map(|q| typed_literal(&q.to_string(), xsd::INTEGER.as_str()))
                        .collect();
                    self.axiom(&format!(
                        "DataPropertyRange({p} DataOneOf({}))",
                        members.join(" ")
                    ))?;
                }
            },

            ConstraintKind::Symmetric => {
                self.declare_object_property(property)?;
                self.axiom(&format!("SymmetricObjectProperty({p})"))?;
            }

            ConstraintKind::Inverse { property: target } => {
                self.declare_object_property(property)?;
                self.declare_object_property(target)?;
                self.axiom(&format!(
                    "InverseObjectProperties({p} {})",
                    iri(&target.iri())
                ))?;
            }

            ConstraintKind::ExistingFile => {
                self.declare_object_property(property)?;
                self.axiom(&format!(
                    "ObjectPropertyRange({p} {})",
                    iri(vocab::EXISTING_FILE.as_str())
                ))?;
            }

            ConstraintKind::TargetRequiredClaim {
                property: target,
                items,
            } => {
                self.declare_object_property(property)?;
                self.declare_object_property(target)?;
                let filler = self.restriction_class(items);
                let claim = self.some_values_from(target, &filler);
                self.axiom(&format!("ObjectPropertyRange({p} {claim})"))?;
            }

            ConstraintKind::Item {
                property: target,
                items,
            } => {
                self.declare_object_property(property)?;
                self.declare_object_property(target)?;
                let filler = self.restriction_class(items);
                let claim = self.some_values_from(target, &filler);
                self.axiom(&format!("ObjectPropertyDomain({p} {claim})"))?;
            }

            ConstraintKind::Type { classes, relation } => {
                self.declare_object_property(property)?;
                let class = format!(
                    "ObjectSomeValuesFrom({} {})",
                    iri(relation_property(*relation)),
                    class_or_union(classes)
                );
                self.axiom(&format!("ObjectPropertyDomain({p} {class})"))?;
            }

            ConstraintKind::ValueType { classes, relation } => {
                self.declare_object_property(property)?;
                let class = format!(
                    "ObjectSomeValuesFrom({} {})",
                    iri(relation_property(*relation)),
                    class_or_union(classes)
                );
                self.axiom(&format!("ObjectPropertyRange({p} {class})"))?;
            }

            ConstraintKind::Range { min, max } => {
                self.declare_data_property(property)?;
                let restriction = self.range_restriction(min, max);
                self.axiom(&format!("DataPropertyRange({p} {restriction})"))?;
            }

            ConstraintKind::DiffWithinRange {
                base_property,
                min,
                max,
            } => {
                self.declare_data_property(property)?;
                self.declare_data_property(base_property)?;
                // The bound on a difference of two properties has no OWL
                // class-axiom form; the annotation keeps it attributable.
                let bound = format!(
                    "{} [{}, {}]",
                    base_property,
                    endpoint_lexical(min),
                    endpoint_lexical(max)
                );
                self.axiom(&format!(
                    "AnnotationAssertion({} {p} {})",
                    iri(vocab::DIFF_WITHIN_RANGE.as_str()),
                    typed_literal(&bound, xsd::STRING.as_str()),
                ))?;
            }

            ConstraintKind::MultiValue => {
                self.declare_object_property(property)?;
                self.axiom(&format!(
                    "ObjectPropertyDomain({p} ObjectMinCardinality(2 {p}))"
                ))?;
            }

            ConstraintKind::ConflictsWith { list } => {
                self.declare_object_property(property)?;
                for pv in list {
                    self.conflicting_claim(&p, pv)?;
                }
            }

            ConstraintKind::Qualifiers { properties } => {
                self.declare_object_property(property)?;
                for qualifier in properties {
                    self.axiom(&format!(
                        "AnnotationAssertion({} {p} {})",
                        iri(vocab::ALLOWED_QUALIFIER.as_str()),
                        iri(&qualifier.iri())
                    ))?;
                }
            }

            ConstraintKind::Qualifier => {
                self.declare_object_property(property)?;
                self.axiom(&format!(
                    "ObjectPropertyDomain({p} {})",
                    iri(owl::NOTHING.as_str())
                ))?;
            }

            ConstraintKind::Person => {
                self.declare_object_property(property)?;
                let person = format!("{}{}", vocab::ENTITY_PREFIX, vocab::PERSON_CLASS);
                let class = format!(
                    "ObjectSomeValuesFrom({} {})",
                    iri(vocab::INSTANCE_OF.as_str()),
                    iri(&person)
                );
                self.axiom(&format!("ObjectPropertyRange({p} {class})"))?;
            }

            ConstraintKind::Taxon => {
                self.declare_object_property(property)?;
                let taxon = format!("{}{}", vocab::ENTITY_PREFIX, vocab::TAXON_CLASS);
                let class = format!(
                    "ObjectSomeValuesFrom({} {})",
                    iri(vocab::INSTANCE_OF.as_str()),
                    iri(&taxon)
                );
                self.axiom(&format!("ObjectPropertyRange({p} {class})"))?;
            }
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Owl2FunctionalRendererFormat<W> {
    fn conflicting_claim(&mut self, p: &str, pv: &PropertyValues) -> Result<(), RenderError> {
        self.declare_object_property(&pv.property)?;
        let filler = self.restriction_class(&pv.values);
        let claim = self.some_values_from(&pv.property, &filler);
        self.axiom(&format!(
            "ObjectPropertyDomain({p} ObjectComplementOf({claim}))"
        ))
    }
}

fn relation_property(relation: crate::model::Relation) -> &'static str {
    match relation {
        crate::model::Relation::Instance => vocab::INSTANCE_OF.as_str(),
        crate::model::Relation::Subclass => vocab::SUBCLASS_OF.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyId, Relation};
    use crate::renderer::render;

    fn p(id: &str) -> PropertyId {
        PropertyId::new(id).unwrap()
    }

    fn q(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    fn render_to_string(constraint: &Constraint) -> String {
        let mut out = Vec::new();
        let mut format = Owl2FunctionalRendererFormat::new(&mut out);
        render(constraint, &mut format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_value() {
        let constraint = Constraint::new(p("P30"), ConstraintKind::SingleValue);
        insta::assert_snapshot!(render_to_string(&constraint), @r###"
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P30>))
        FunctionalObjectProperty(<http://www.wikidata.org/entity/P30>)
        "###);
    }

    #[test]
    fn test_one_of_items() {
        let constraint = Constraint::new(
            p("P105"),
            ConstraintKind::OneOf {
                values: OneOfValues::Items(vec![q("Q7432"), q("Q68947")]),
            },
        );
        insta::assert_snapshot!(render_to_string(&constraint), @r###"
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P105>))
        ObjectPropertyRange(<http://www.wikidata.org/entity/P105> ObjectOneOf(<http://www.wikidata.org/entity/Q7432> <http://www.wikidata.org/entity/Q68947>))
        "###);
    }

    #[test]
    fn test_one_of_quantities() {
        let constraint = Constraint::new(
            p("P1114"),
            ConstraintKind::OneOf {
                values: OneOfValues::Quantities(vec![1, 2]),
            },
        );
        insta::assert_snapshot!(render_to_string(&constraint), @r###"
        Declaration(DataProperty(<http://www.wikidata.org/entity/P1114>))
        DataPropertyRange(<http://www.wikidata.org/entity/P1114> DataOneOf("1"^^<http://www.w3.org/2001/XMLSchema#integer> "2"^^<http://www.w3.org/2001/XMLSchema#integer>))
        "###);
    }

    #[test]
    fn test_range_with_now_sentinel() {
        let constraint = Constraint::new(
            p("P570"),
            ConstraintKind::Range {
                min: RangeEndpoint::Number(1200.0),
                max: RangeEndpoint::Now,
            },
        );
        insta::assert_snapshot!(render_to_string(&constraint), @r###"
        Declaration(DataProperty(<http://www.wikidata.org/entity/P570>))
        DataPropertyRange(<http://www.wikidata.org/entity/P570> DatatypeRestriction(<http://www.w3.org/2001/XMLSchema#dateTime> <http://www.w3.org/2001/XMLSchema#minInclusive> "1200"^^<http://www.w3.org/2001/XMLSchema#dateTime> <http://www.w3.org/2001/XMLSchema#maxInclusive> "now"^^<http://www.w3.org/2001/XMLSchema#dateTime>))
        "###);
    }

    #[test]
    fn test_conflicts_with_distinguishes_restriction_states() {
        let constraint = Constraint::new(
            p("P30"),
            ConstraintKind::ConflictsWith {
                list: vec![
                    PropertyValues::restricted(p("P21"), vec![q("Q6581097")]),
                    PropertyValues::any(p("P27")),
                    PropertyValues::restricted(p("P31"), vec![]),
                ],
            },
        );
        insta::assert_snapshot!(render_to_string(&constraint), @r###"
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P30>))
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P21>))
        ObjectPropertyDomain(<http://www.wikidata.org/entity/P30> ObjectComplementOf(ObjectSomeValuesFrom(<http://www.wikidata.org/entity/P21> ObjectOneOf(<http://www.wikidata.org/entity/Q6581097>))))
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P27>))
        ObjectPropertyDomain(<http://www.wikidata.org/entity/P30> ObjectComplementOf(ObjectSomeValuesFrom(<http://www.wikidata.org/entity/P27> <http://www.w3.org/2002/07/owl#Thing>)))
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P31>))
        ObjectPropertyDomain(<http://www.wikidata.org/entity/P30> ObjectComplementOf(ObjectSomeValuesFrom(<http://www.wikidata.org/entity/P31> <http://www.w3.org/2002/07/owl#Nothing>)))
        "###);
    }

    #[test]
    fn test_type_subclass_relation() {
        let constraint = Constraint::new(
            p("P279"),
            ConstraintKind::Type {
                classes: vec![q("Q16521")],
                relation: Relation::Subclass,
            },
        );
        insta::assert_snapshot!(render_to_string(&constraint), @r###"
        Declaration(ObjectProperty(<http://www.wikidata.org/entity/P279>))
        ObjectPropertyDomain(<http://www.wikidata.org/entity/P279> ObjectSomeValuesFrom(<http://www.wikidata.org/ontology#subclassOf> <http://www.wikidata.org/entity/Q16521>))
        "###);
    }

    #[test]
    fn test_format_escapes_pattern() {
        let constraint = Constraint::new(
            p("P212"),
            ConstraintKind::Format {
                pattern: r#"97[89]-\d+"#.to_string(),
            },
        );
        let output = render_to_string(&constraint);
        assert!(output.contains(r#""97[89]-\\d+"^^"#));
    }

    #[test]
    fn test_output_is_newline_terminated() {
        let constraint = Constraint::new(p("P30"), ConstraintKind::Symmetric);
        let output = render_to_string(&constraint);
        assert!(output.ends_with('\n'));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_rendering_twice_is_byte_identical() {
        let constraint = Constraint::new(
            p("P40"),
            ConstraintKind::TargetRequiredClaim {
                property: p("P21"),
                items: Some(vec![q("Q6581097"), q("Q6581072")]),
            },
        );
        assert_eq!(render_to_string(&constraint), render_to_string(&constraint));
    }
}
