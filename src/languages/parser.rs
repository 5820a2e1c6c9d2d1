//! Dolmen parser descriptions (`.jg`).
//!
//! Besides brace-delimited actions, parser descriptions pass Java expressions as
//! arguments between parentheses. Both regions share the same Java rules, which also know
//! about holes: `#name` placeholders substituted by the parser generator.
//!
//! Naming conventions carry meaning in parser descriptions: terminals are written in
//! upper case (`INT`, `LPAREN`), non-terminals start with a lower-case letter. The table
//! tells them apart purely by spelling.

use super::common::{java_code, DSL, JAVA};
use crate::rules;
use crate::scanner::{include, literal, regex, words, Entry, StateTable, TableError};
use crate::token::TokenKind;
use once_cell::sync::Lazy;

/// Reserved words of the parser description language.
pub const KEYWORDS: &[&str] = &[
    "continue", "import", "private", "public", "rule", "static", "token",
];

const OPERATORS: &[&str] = &["^", "|", "="];
const PUNCTUATION: &[&str] = &["<", ">", "[", "]", ",", ";"];

pub(crate) static TABLE: Lazy<StateTable> =
    Lazy::new(|| table().expect("the parser description table is well formed"));

/// Build the parser description table.
pub fn table() -> Result<StateTable, TableError> {
    let mut root = rules![
        include(DSL.comments()),
        literal("{", TokenKind::Generic).push("action"),
        literal("(", TokenKind::Generic).push("argument"),
        literal("\"", TokenKind::String).push(DSL.string()),
        words(KEYWORDS, TokenKind::Keyword),
        regex(r"[A-Z][A-Z_0-9]*\b", TokenKind::NameDecorator),
        regex("[_a-zA-Z][_a-zA-Z0-9]*", TokenKind::NameFunction),
    ];
    root.extend(OPERATORS.iter().map(|op| Entry::from(literal(*op, TokenKind::Operator))));
    root.extend(PUNCTUATION.iter().map(|p| Entry::from(literal(*p, TokenKind::Punctuation))));
    root.push(Entry::from(regex(".", TokenKind::Text)));

    let builder = StateTable::builder("DolmenParser")
        .state("root", root)
        .state(
            "action",
            rules![
                literal("}", TokenKind::Generic).pop(),
                literal("{", TokenKind::Generic).push("action"),
                include("_java"),
            ],
        )
        .state(
            "argument",
            rules![
                literal(")", TokenKind::Generic).pop(),
                literal("(", TokenKind::Generic).push("argument"),
                include("_java"),
            ],
        )
        .state("_java", java_code(true));
    JAVA.add_states(DSL.add_states(builder)).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(TokenKind, &str)> {
        crate::token::coalesce(TABLE.scan(text))
            .map(|token| (token.kind, token.text(text)))
            .collect()
    }

    #[test]
    fn test_action_and_argument_share_java_rules() {
        let action = TABLE.get("action").unwrap().rules().len();
        let argument = TABLE.get("argument").unwrap().rules().len();
        let java = TABLE.get("_java").unwrap().rules().len();
        assert_eq!(action, java + 2);
        assert_eq!(argument, java + 2);
    }

    #[test]
    fn test_terminals_and_rules() {
        assert_eq!(
            kinds("token INT"),
            vec![
                (TokenKind::Keyword, "token"),
                (TokenKind::Text, " "),
                (TokenKind::NameDecorator, "INT"),
            ]
        );
        assert_eq!(kinds("Int"), vec![(TokenKind::NameFunction, "Int")]);
        assert_eq!(kinds("expr_1"), vec![(TokenKind::NameFunction, "expr_1")]);
        assert_eq!(kinds("ID_2"), vec![(TokenKind::NameDecorator, "ID_2")]);
    }

    #[test]
    fn test_no_character_literals_at_top_level() {
        // Only strings open a literal in `root`; a quote is plain text.
        assert_eq!(
            kinds("'a'"),
            vec![
                (TokenKind::Text, "'"),
                (TokenKind::NameFunction, "a"),
                (TokenKind::Text, "'"),
            ]
        );
    }
}
