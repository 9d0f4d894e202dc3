//! RDF renderer backend
//!
//! Emits each constraint as a set of triples rooted at a constraint
//! resource (`<entity-base><KindSlug>-<propertyId>`). Ordered lists —
//! OneOf values, Type classes, restriction lists — become RDF
//! collections, which keeps both their order and the three-way
//! absent/empty/populated distinction of [`PropertyValues`] intact:
//! no triple at all, `rdf:nil`, or a collection.
//!
//! The sink is a caller-supplied [`oxrdf::Graph`]; triple insertion
//! cannot fail, so the lifecycle hooks only exist to satisfy the sink
//! contract. Blank nodes are numbered sequentially per renderer, making
//! output deterministic up to graph isomorphism.

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Graph, Literal, NamedNode, Subject, Term, Triple};

use crate::error::RenderError;
use crate::model::{
    Constraint, ConstraintKind, ItemId, OneOfValues, PropertyValues, RangeEndpoint, Relation,
};

use super::vocab::{self, item_node, property_node};
use super::{endpoint_is_time, endpoint_lexical, RendererFormat};

/// Renderer backend asserting triples into a borrowed graph.
pub struct RdfRendererFormat<'a> {
    graph: &'a mut Graph,
    next_blank: usize,
}

impl<'a> RdfRendererFormat<'a> {
    pub fn new(graph: &'a mut Graph) -> Self {
        Self {
            graph,
            next_blank: 0,
        }
    }

    fn emit(
        &mut self,
        subject: impl Into<Subject>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
    ) {
        let triple = Triple::new(subject, predicate, object);
        self.graph.insert(&triple);
    }

    fn blank(&mut self) -> BlankNode {
        let node = BlankNode::new_unchecked(format!("c{}", self.next_blank));
        self.next_blank += 1;
        node
    }

    /// Emit an RDF collection and return its head term (`rdf:nil` when
    /// the list is empty).
    fn collection(&mut self, items: Vec<Term>) -> Term {
        let mut head: Term = rdf::NIL.into_owned().into();
        for item in items.into_iter().rev() {
            let node = self.blank();
            self.emit(node.clone(), rdf::FIRST.into_owned(), item);
            self.emit(node.clone(), rdf::REST.into_owned(), head);
            head = node.into();
        }
        head
    }

    fn item_collection(&mut self, items: &[ItemId]) -> Term {
        let terms = items.iter().map(|i| item_node(i).into()).collect();
        self.collection(terms)
    }

    fn endpoint_literal(&self, endpoint: &RangeEndpoint) -> Literal {
        let datatype = if endpoint_is_time(endpoint) {
            xsd::DATE_TIME
        } else {
            xsd::DECIMAL
        };
        Literal::new_typed_literal(endpoint_lexical(endpoint), datatype)
    }

    fn relation_term(&self, relation: Relation) -> Term {
        match relation {
            Relation::Instance => vocab::INSTANCE_OF.into_owned().into(),
            Relation::Subclass => vocab::SUBCLASS_OF.into_owned().into(),
        }
    }

    fn conflicting_claim(&mut self, subject: &NamedNode, pv: &PropertyValues) {
        let node = self.blank();
        self.emit(subject.clone(), vocab::CONFLICTS_WITH, node.clone());
        self.emit(node.clone(), vocab::PROPERTY, property_node(&pv.property));
        if let Some(values) = &pv.values {
            let head = self.item_collection(values);
            self.emit(node, vocab::ALLOWED_VALUES, head);
        }
    }
}

impl RendererFormat for RdfRendererFormat<'_> {
    fn start(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn render_constraint(&mut self, constraint: &Constraint) -> Result<(), RenderError> {
        let subject = NamedNode::new_unchecked(constraint.resource_iri());
        let kind = constraint.kind();

        self.emit(
            subject.clone(),
            rdf::TYPE.into_owned(),
            vocab::constraint_class(kind.slug()),
        );
        self.emit(
            subject.clone(),
            vocab::CONSTRAINED_PROPERTY,
            property_node(constraint.property()),
        );

        match kind {
            ConstraintKind::SingleValue
            | ConstraintKind::UniqueValue
            | ConstraintKind::Symmetric
            | ConstraintKind::ExistingFile
            | ConstraintKind::MultiValue
            | ConstraintKind::Qualifier => {}

            ConstraintKind::Format { pattern } => {
                self.emit(
                    subject,
                    vocab::PATTERN,
                    Literal::new_simple_literal(pattern),
                );
            }

            ConstraintKind::OneOf { values } => match values {
                OneOfValues::Items(items) => {
                    let head = self.item_collection(items);
                    self.emit(subject, vocab::ALLOWED_VALUES, head);
                }
                OneOfValues::Quantities(quantities) => {
                    let terms = quantities
                        .iter()
                        .map(|q| Literal::new_typed_literal(q.to_string(), xsd::INTEGER).into())
                        .collect();
                    let head = self.collection(terms);
                    self.emit(subject, vocab::ALLOWED_QUANTITIES, head);
                }
            },

            ConstraintKind::Inverse { property } => {
                self.emit(subject, vocab::TARGET_PROPERTY, property_node(property));
            }

            ConstraintKind::TargetRequiredClaim { property, items }
            | ConstraintKind::Item { property, items } => {
                self.emit(
                    subject.clone(),
                    vocab::TARGET_PROPERTY,
                    property_node(property),
                );
                if let Some(items) = items {
                    let head = self.item_collection(items);
                    self.emit(subject, vocab::ALLOWED_VALUES, head);
                }
            }

            ConstraintKind::Type { classes, relation }
            | ConstraintKind::ValueType { classes, relation } => {
                let head = self.item_collection(classes);
                self.emit(subject.clone(), vocab::CLASSES, head);
                let relation = self.relation_term(*relation);
                self.emit(subject, vocab::RELATION, relation);
            }

            ConstraintKind::Range { min, max } => {
                let min = self.endpoint_literal(min);
                let max = self.endpoint_literal(max);
                self.emit(subject.clone(), vocab::MIN_VALUE, min);
                self.emit(subject, vocab::MAX_VALUE, max);
            }

            ConstraintKind::DiffWithinRange {
                base_property,
                min,
                max,
            } => {
                let min = self.endpoint_literal(min);
                let max = self.endpoint_literal(max);
                self.emit(
                    subject.clone(),
                    vocab::BASE_PROPERTY,
                    property_node(base_property),
                );
                self.emit(subject.clone(), vocab::MIN_VALUE, min);
                self.emit(subject, vocab::MAX_VALUE, max);
            }

            ConstraintKind::ConflictsWith { list } => {
                for pv in list {
                    self.conflicting_claim(&subject, pv);
                }
            }

            ConstraintKind::Qualifiers { properties } => {
                let terms = properties.iter().map(|p| property_node(p).into()).collect();
                let head = self.collection(terms);
                self.emit(subject, vocab::QUALIFIER_PROPERTIES, head);
            }

            ConstraintKind::Person => {
                let person = NamedNode::new_unchecked(format!(
                    "{}{}",
                    vocab::ENTITY_PREFIX,
                    vocab::PERSON_CLASS
                ));
                self.emit(subject, vocab::VALUE_CLASS, person);
            }

            ConstraintKind::Taxon => {
                let taxon = NamedNode::new_unchecked(format!(
                    "{}{}",
                    vocab::ENTITY_PREFIX,
                    vocab::TAXON_CLASS
                ));
                self.emit(subject, vocab::VALUE_CLASS, taxon);
            }
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
