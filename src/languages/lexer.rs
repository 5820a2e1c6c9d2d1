//! Dolmen lexer descriptions (`.jl`).
//!
//! A lexer description is a list of rules made of regular expressions over characters,
//! each followed by a semantic action written in Java between braces. Actions nest
//! braces freely; the `action` state pushes itself on every `{` and pops on every `}`.

use super::common::{java_code, DSL, JAVA};
use crate::rules;
use crate::scanner::{include, literal, regex, words, Entry, StateTable, TableError};
use crate::token::TokenKind;
use once_cell::sync::Lazy;

/// Reserved words of the lexer description language.
pub const KEYWORDS: &[&str] = &[
    "as", "eof", "import", "orelse", "private", "public", "rule", "shortest", "static",
];

const OPERATORS: &[&str] = &["+", "*", "?", "^", "|", "#", "-", "_", "="];
const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "<", ">", ",", ";"];

pub(crate) static TABLE: Lazy<StateTable> =
    Lazy::new(|| table().expect("the lexer description table is well formed"));

/// Build the lexer description table.
pub fn table() -> Result<StateTable, TableError> {
    let mut root = rules![
        include(DSL.comments()),
        literal("{", TokenKind::Generic).push("action"),
        literal("\"", TokenKind::String).push(DSL.string()),
        literal("'", TokenKind::StringChar).push(DSL.character()),
        regex("[0-9]+", TokenKind::Number),
        words(KEYWORDS, TokenKind::Keyword),
        regex("[_a-zA-Z][_a-zA-Z0-9]*", TokenKind::NameFunction),
    ];
    // `_` can never be reached as an operator: identifiers claim it first.
    root.extend(OPERATORS.iter().map(|op| Entry::from(literal(*op, TokenKind::Operator))));
    root.extend(PUNCTUATION.iter().map(|p| Entry::from(literal(*p, TokenKind::Punctuation))));
    root.push(Entry::from(regex(".", TokenKind::Text)));

    let mut action = rules![
        literal("}", TokenKind::Generic).pop(),
        literal("{", TokenKind::Generic).push("action"),
    ];
    action.extend(java_code(false));

    let builder = StateTable::builder("DolmenLexer")
        .state("root", root)
        .state("action", action);
    JAVA.add_states(DSL.add_states(builder)).build()
}
