//! Lexer for the wiki template microsyntax using logos
//!
//! The token set is deliberately tiny: only the delimiters that matter
//! for template extraction are distinguished, everything else is a text
//! run. Whitespace is significant inside parameter values, so nothing is
//! skipped.

use logos::Logos;

use super::Span;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Paired delimiters (two-character forms match before the singles)
    #[token("{{")]
    OpenTemplate,
    #[token("}}")]
    CloseTemplate,
    #[token("[[")]
    OpenLink,
    #[token("]]")]
    CloseLink,

    // Top-level separators inside a template
    #[token("|")]
    Pipe,
    #[token("=")]
    Equals,

    /// A run of characters containing no delimiter
    #[regex(r"[^{}\[\]|=]+")]
    Text,

    /// A lone brace or bracket that is not part of a pair
    #[regex(r"[{}\[\]]")]
    Stray,
}

/// Lex input into tokens with spans.
///
/// The token set covers every input byte, so lexing never fails; the
/// `filter_map` only drops the impossible error case.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
