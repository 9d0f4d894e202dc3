//! Error types for constraint parsing and rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::template::Span;

/// A malformed value inside a present parameter of a recognized
/// constraint template.
///
/// These are data-quality failures local to one constraint parse: they
/// are reported once, attributed to the offending template, and never
/// abort processing of the other templates in the same text. Templates
/// that are simply not recognized (unknown name, missing required
/// parameter) do not produce an error at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstraintParseError {
    #[error("invalid quantity `{token}` in parameter `{parameter}` of {{{{{template}}}}}")]
    InvalidQuantity {
        template: String,
        parameter: String,
        token: String,
        span: Span,
    },

    #[error("invalid range bound `{token}` in parameter `{parameter}` of {{{{{template}}}}}")]
    InvalidRangeBound {
        template: String,
        parameter: String,
        token: String,
        span: Span,
    },

    #[error("invalid entity id `{token}` in parameter `{parameter}` of {{{{{template}}}}}")]
    InvalidId {
        template: String,
        parameter: String,
        token: String,
        span: Span,
    },

    #[error("unknown relation `{token}` in parameter `{parameter}` of {{{{{template}}}}}")]
    InvalidRelation {
        template: String,
        parameter: String,
        token: String,
        span: Span,
    },
}

impl ConstraintParseError {
    /// Span of the offending parameter in the original source text.
    pub fn span(&self) -> Span {
        match self {
            ConstraintParseError::InvalidQuantity { span, .. }
            | ConstraintParseError::InvalidRangeBound { span, .. }
            | ConstraintParseError::InvalidId { span, .. }
            | ConstraintParseError::InvalidRelation { span, .. } => span.clone(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("ariadne output is UTF-8")
    }
}

/// Errors surfaced by the rendering framework.
///
/// Only the output sink can fail; rendering of the current constraint is
/// abandoned and partial output is not rolled back (the caller owns the
/// sink lifecycle).
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("output sink error: {0}")]
    Io(#[from] std::io::Error),
}
