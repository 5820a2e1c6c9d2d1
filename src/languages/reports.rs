//! Dolmen reports (`.reports`).
//!
//! Reports are the diagnostics Dolmen prints about lexer and parser descriptions:
//! locations (`File "x.jl", line 3, characters 4-10:`) followed by a severity and a
//! message. A single flat state, no nesting.
//!
//! Rule order matters here: `Warning:` is both a keyword and a severity. The keyword rule
//! comes first and requires word boundaries on both sides; since `:` is not a word
//! character, it only wins when a word character follows immediately (`Warning:x`). A
//! regular `Warning: ...` line reaches the severity rule.

use crate::rules;
use crate::scanner::{literal, regex, words, StateTable, TableError};
use crate::token::TokenKind;
use once_cell::sync::Lazy;

/// Noteworthy words of location lines.
pub const KEYWORDS: &[&str] = &["File", "line", "characters", "Warning:"];

pub(crate) static TABLE: Lazy<StateTable> =
    Lazy::new(|| table().expect("the reports table is well formed"));

/// Build the reports table.
pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder("DolmenReports")
        .state(
            "root",
            rules![
                regex(r#""[^"]*""#, TokenKind::String),
                regex("'[^']+'", TokenKind::StringChar),
                regex("[0-9]+", TokenKind::Number),
                words(KEYWORDS, TokenKind::Keyword),
                literal("Error:", TokenKind::NameException),
                literal("Warning:", TokenKind::NameLabel),
                literal("Log:", TokenKind::NameOther),
                literal("-", TokenKind::Operator),
                literal(",", TokenKind::Operator),
                literal("...", TokenKind::Operator),
                regex(".", TokenKind::Text),
            ],
        )
        .build()
}
