//! Wikibase constraint templates, parsed and rendered as formal logic
//!
//! This library extracts `{{Constraint:...}}` template invocations from
//! wiki markup, parses them into a closed, typed model of constraint
//! variants, and renders each constraint as RDF triples or OWL2
//! functional-syntax axioms.
//!
//! # Example
//!
//! ```rust
//! use wikibase_constraints::{parse_and_render, OutputFormat, PropertyId};
//!
//! let property = PropertyId::new("P30").unwrap();
//! let owl = parse_and_render(&property, "{{Constraint:Single value}}", OutputFormat::Owl2)
//!     .unwrap()
//!     .expect("a constraint was recognized");
//! assert!(owl.contains("FunctionalObjectProperty"));
//! ```

pub mod error;
pub mod model;
pub mod options;
pub mod parser;
pub mod renderer;
pub mod template;

pub use error::{ConstraintParseError, RenderError};
pub use model::{
    Constraint, ConstraintKind, ItemId, PropertyId, PropertyValues, RangeEndpoint, Relation,
};
pub use options::{OptionsError, OutputOptions};
pub use renderer::{
    render, Owl2FunctionalRendererFormat, OutputFormat, RdfRendererFormat, RendererFormat,
};
pub use template::{extract_templates, Template};

use std::io::Write;

use oxrdf::Graph;
use tracing::warn;

/// Parse every recognized constraint on `property` out of wiki text.
///
/// Unrecognized templates are skipped silently (the normal case for most
/// wiki text); malformed values inside recognized constraint templates
/// are collected without aborting the remaining templates.
pub fn parse_constraints(
    property: &PropertyId,
    text: &str,
) -> (Vec<Constraint>, Vec<ConstraintParseError>) {
    let mut constraints = Vec::new();
    let mut errors = Vec::new();
    for template in template::extract_templates(text) {
        match parser::parse(property, &template) {
            Ok(Some(constraint)) => constraints.push(constraint),
            Ok(None) => {}
            Err(error) => {
                warn!(template = template.name(), %error, "malformed constraint value");
                errors.push(error);
            }
        }
    }
    (constraints, errors)
}

/// Parse the first recognized constraint in the text, ignoring errors.
pub fn parse_first_constraint(property: &PropertyId, text: &str) -> Option<Constraint> {
    parse_constraints(property, text).0.into_iter().next()
}

/// Render one constraint into a caller-supplied RDF graph.
pub fn render_rdf(constraint: &Constraint, graph: &mut Graph) -> Result<(), RenderError> {
    let mut format = RdfRendererFormat::new(graph);
    render(constraint, &mut format)
}

/// Render one constraint as OWL2 functional-syntax lines.
pub fn render_owl2<W: Write>(constraint: &Constraint, out: &mut W) -> Result<(), RenderError> {
    let mut format = Owl2FunctionalRendererFormat::new(out);
    render(constraint, &mut format)
}

/// Render a batch of constraints into one output document.
pub fn render_document(
    constraints: &[Constraint],
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Owl2 => {
            let mut out = Vec::new();
            for constraint in constraints {
                render_owl2(constraint, &mut out)?;
            }
            Ok(String::from_utf8(out).expect("axiom lines are UTF-8"))
        }
        OutputFormat::Rdf => {
            let mut graph = Graph::new();
            for constraint in constraints {
                render_rdf(constraint, &mut graph)?;
            }
            Ok(ntriples(&graph))
        }
    }
}

/// Parse wiki text and render every recognized constraint.
///
/// Returns `Ok(None)` when no template in the text matched a known
/// constraint kind — the normal case for most wiki text, not an error.
pub fn parse_and_render(
    property: &PropertyId,
    text: &str,
    format: OutputFormat,
) -> Result<Option<String>, RenderError> {
    let (constraints, _errors) = parse_constraints(property, text);
    if constraints.is_empty() {
        return Ok(None);
    }
    render_document(&constraints, format).map(Some)
}

/// N-Triples serialization of a graph, one statement per line.
fn ntriples(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph.iter() {
        out.push_str(&format!("{triple} .\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p30() -> PropertyId {
        PropertyId::new("P30").unwrap()
    }

    #[test]
    fn test_parse_and_render_owl2() {
        let output = parse_and_render(&p30(), "{{Constraint:Single value}}", OutputFormat::Owl2)
            .unwrap()
            .unwrap();
        assert!(output.contains("FunctionalObjectProperty"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_parse_and_render_rdf() {
        let output = parse_and_render(&p30(), "{{Constraint:Single value}}", OutputFormat::Rdf)
            .unwrap()
            .unwrap();
        assert!(output.contains("<http://www.wikidata.org/entity/SingleValue-P30>"));
    }

    #[test]
    fn test_unrelated_text_renders_nothing() {
        let output =
            parse_and_render(&p30(), "just prose, {{Infobox|x=1}}", OutputFormat::Owl2).unwrap();
        assert!(output.is_none());
    }

    #[test]
    fn test_errors_do_not_abort_other_templates() {
        let text = "{{Constraint:Range|min=a|max=b}} {{Constraint:Single value}}";
        let (constraints, errors) = parse_constraints(&p30(), text);
        assert_eq!(constraints.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(*constraints[0].kind(), ConstraintKind::SingleValue);
    }

    #[test]
    fn test_multiple_constraints_render_into_one_document() {
        let text = "{{Constraint:Single value}} {{Constraint:Symmetric}}";
        let (constraints, _) = parse_constraints(&p30(), text);
        let doc = render_document(&constraints, OutputFormat::Owl2).unwrap();
        assert!(doc.contains("FunctionalObjectProperty"));
        assert!(doc.contains("SymmetricObjectProperty"));
    }
}
