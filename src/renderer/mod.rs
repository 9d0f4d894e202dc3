//! Rendering framework: one trait, two backends
//!
//! A [`RendererFormat`] is a per-invocation output sink with a
//! `start()` → emit → `finish()` lifecycle. Dispatch over constraint
//! variants is an exhaustive `match` inside each backend, so the
//! compiler guarantees every new constraint kind is handled everywhere.

pub mod owl2;
pub mod rdf;
pub mod vocab;

use serde::Deserialize;

pub use owl2::Owl2FunctionalRendererFormat;
pub use rdf::RdfRendererFormat;

use crate::error::RenderError;
use crate::model::{Constraint, RangeEndpoint};

/// The available output serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// RDF triples (serialized as N-Triples by the CLI).
    Rdf,
    /// OWL2 functional-syntax axioms, one per line.
    Owl2,
}

/// An output sink for rendered constraints.
///
/// Not reentrant: one `start()`/`finish()` bracket at a time per
/// instance. The sink itself (graph, writer) is supplied by the caller
/// and never retained beyond `finish()`.
pub trait RendererFormat {
    fn start(&mut self) -> Result<(), RenderError>;

    /// Emit one constraint in this backend's serialization.
    fn render_constraint(&mut self, constraint: &Constraint) -> Result<(), RenderError>;

    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Render a single constraint through the full sink lifecycle.
pub fn render(
    constraint: &Constraint,
    format: &mut dyn RendererFormat,
) -> Result<(), RenderError> {
    format.start()?;
    format.render_constraint(constraint)?;
    format.finish()
}

/// Deterministic lexical form of a range endpoint, shared by both
/// backends so their literals agree: integral numbers print without a
/// fraction, the `now` sentinel keeps the template's own token.
pub(crate) fn endpoint_lexical(endpoint: &RangeEndpoint) -> String {
    match endpoint {
        RangeEndpoint::Now => "now".to_string(),
        RangeEndpoint::Number(value) => format_number(*value),
    }
}

pub(crate) fn endpoint_is_time(endpoint: &RangeEndpoint) -> bool {
    matches!(endpoint, RangeEndpoint::Now)
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(150.0), "150");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(1.5), "1.5");
    }

    #[test]
    fn test_endpoint_lexical() {
        assert_eq!(endpoint_lexical(&RangeEndpoint::Now), "now");
        assert_eq!(endpoint_lexical(&RangeEndpoint::Number(2000.0)), "2000");
    }
}
