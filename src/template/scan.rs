//! Depth-tracking scanner that assembles templates from the token stream
//!
//! Wiki text is an island grammar: templates float in arbitrary prose and
//! are themselves allowed to contain nested `{{ }}` and `[[ ]]` spans
//! that must be kept verbatim. The scanner walks the lexed tokens once,
//! splitting parameters only at the top nesting level and dropping any
//! candidate that never closes.

use tracing::{debug, trace};

use super::lexer::{lex, Token};
use super::{Parameter, Template};

/// One `|`-separated section of a template under construction.
struct RawSection {
    key: Option<String>,
    buf: String,
    saw_nested: bool,
    start: usize,
    end: usize,
}

impl RawSection {
    fn new(start: usize) -> Self {
        Self {
            key: None,
            buf: String::new(),
            saw_nested: false,
            start,
            end: start,
        }
    }

    fn push(&mut self, text: &str, end: usize) {
        self.buf.push_str(text);
        self.end = end;
    }
}

/// A top-level `{{` candidate being assembled.
struct Candidate {
    start: usize,
    depth: usize,
    link_depth: usize,
    sections: Vec<RawSection>,
}

impl Candidate {
    fn new(start: usize, first_section_start: usize) -> Self {
        Self {
            start,
            depth: 1,
            link_depth: 0,
            sections: vec![RawSection::new(first_section_start)],
        }
    }

    fn current(&mut self) -> &mut RawSection {
        self.sections.last_mut().expect("candidate has a section")
    }

    /// True while separators apply: top template level, outside links.
    fn at_top_level(&self) -> bool {
        self.depth == 1 && self.link_depth == 0
    }

    fn into_template(self, end: usize) -> Option<Template> {
        let mut sections = self.sections.into_iter();
        let name_section = sections.next()?;
        let name = name_section.buf.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let parameters = sections
            .map(|s| Parameter {
                name: s.key,
                value: s.buf.trim().to_string(),
                span: s.start..s.end,
            })
            .collect();
        Some(Template::new(name, parameters, self.start..end))
    }
}

/// Extract all top-level template invocations from wiki source text.
///
/// Nested templates stay verbatim inside the enclosing parameter value;
/// unbalanced spans are skipped without error.
pub fn extract_templates(source: &str) -> Vec<Template> {
    let mut templates = Vec::new();
    let mut candidate: Option<Candidate> = None;

    for (token, span) in lex(source) {
        let Some(current) = candidate.as_mut() else {
            // Outside any template only an opener matters.
            if token == Token::OpenTemplate {
                candidate = Some(Candidate::new(span.start, span.end));
            }
            continue;
        };

        match token {
            Token::OpenTemplate => {
                current.depth += 1;
                current.current().saw_nested = true;
                current.current().push("{{", span.end);
            }
            Token::CloseTemplate => {
                if current.depth > 1 {
                    current.depth -= 1;
                    current.current().push("}}", span.end);
                } else {
                    // Top-level close, even inside an unclosed link.
                    let finished = candidate.take().expect("candidate is set");
                    if let Some(template) = finished.into_template(span.end) {
                        trace!(name = template.name(), "extracted template");
                        templates.push(template);
                    }
                }
            }
            Token::OpenLink => {
                current.link_depth += 1;
                current.current().saw_nested = true;
                current.current().push("[[", span.end);
            }
            Token::CloseLink => {
                if current.link_depth > 0 {
                    current.link_depth -= 1;
                }
                current.current().push("]]", span.end);
            }
            Token::Pipe if current.at_top_level() => {
                let next = RawSection::new(span.end);
                current.sections.push(next);
            }
            Token::Equals if current.at_top_level() => {
                // First top-level `=` of a parameter section names it,
                // unless nested markup already appeared in the section.
                let is_parameter = current.sections.len() > 1;
                let section = current.current();
                if is_parameter && section.key.is_none() && !section.saw_nested {
                    section.key = Some(section.buf.trim().to_string());
                    section.buf.clear();
                    section.end = span.end;
                } else {
                    section.push("=", span.end);
                }
            }
            Token::Pipe => current.current().push("|", span.end),
            Token::Equals => current.current().push("=", span.end),
            Token::Text | Token::Stray => {
                current.current().push(&source[span.start..span.end], span.end);
            }
        }
    }

    if let Some(unclosed) = candidate {
        debug!(start = unclosed.start, "dropping unclosed template span");
    }

    templates
}
