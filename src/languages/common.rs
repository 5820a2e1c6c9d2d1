//! Rule groups shared by the lexer and parser description tables.
//!
//! Both description languages quote the same things: C-style comments, string and
//! character literals with Java escape sequences. They appear twice in each table, once in
//! the description language itself and once inside embedded Java code, with different
//! token kinds. A [`Flavour`] names the states and picks the kinds for one of the two.

use crate::rules;
use crate::scanner::{include, literal, regex, words, Entry, TableBuilder};
use crate::token::TokenKind;

/// Java reserved words, highlighted inside semantic actions and arguments.
///
/// `false`, `null` and `true` are reserved literals rather than keywords but read the same.
pub const JAVA_KEYWORDS: &[&str] = &[
    "false", "null", "true", //
    "abstract", "continue", "for", "new", "switch", //
    "assert", "default", "if", "package", "synchronized", //
    "boolean", "do", "goto", "private", "this", //
    "break", "double", "implements", "protected", "throw", //
    "byte", "else", "import", "public", "throws", //
    "case", "enum", "instanceof", "return", "transient", //
    "catch", "extends", "int", "short", "try", //
    "char", "final", "interface", "static", "void", //
    "class", "finally", "long", "strictfp", "volatile", //
    "const", "float", "native", "super", "while",
];

/// Escape sequences after a backslash: single characters, three digits, Unicode escapes.
const ESCAPES: [&str; 3] = [r#"\\|'|"|r|n|b|t|f"#, "[0-9]{3}", "u+[0-9a-fA-F]{4}"];

/// Naming and token kinds for one family of comment and literal states.
#[derive(Debug, Clone, Copy)]
pub struct Flavour {
    prefix: &'static str,
    string_kind: TokenKind,
    char_kind: TokenKind,
    block_comment_kind: TokenKind,
    line_comment_kind: TokenKind,
}

/// Comments and literals of the description language itself.
pub const DSL: Flavour = Flavour {
    prefix: "",
    string_kind: TokenKind::String,
    char_kind: TokenKind::StringChar,
    block_comment_kind: TokenKind::CommentMultiline,
    line_comment_kind: TokenKind::CommentSingleline,
};

/// Comments and literals inside embedded Java code.
pub const JAVA: Flavour = Flavour {
    prefix: "java_",
    string_kind: TokenKind::GenericStrong,
    char_kind: TokenKind::GenericStrong,
    block_comment_kind: TokenKind::GenericDeleted,
    line_comment_kind: TokenKind::GenericDeleted,
};

impl Flavour {
    pub fn string(&self) -> String {
        format!("{}string", self.prefix)
    }

    pub fn character(&self) -> String {
        format!("{}character", self.prefix)
    }

    pub fn end_character(&self) -> String {
        format!("{}endCharacter", self.prefix)
    }

    pub fn escape_sequence(&self) -> String {
        format!("{}escapeSequence", self.prefix)
    }

    /// The include-only group holding the comment openers.
    pub fn comments(&self) -> String {
        format!("_{}comments", self.prefix)
    }

    pub fn multiline_comment(&self) -> String {
        format!("{}mlcomment", self.prefix)
    }

    /// Add the comment and literal states of this flavour to `builder`.
    pub fn add_states(&self, builder: TableBuilder) -> TableBuilder {
        let escape = self.escape_sequence();
        let end_character = self.end_character();
        let mlcomment = self.multiline_comment();

        builder
            .state(
                self.string(),
                rules![
                    literal("\"", self.string_kind).pop(),
                    regex(r#"[^"\\]"#, self.string_kind),
                    literal("\\", self.string_kind).push(&escape),
                ],
            )
            .state(
                self.character(),
                rules![
                    regex(r"[^'\\]", self.char_kind).replace([&end_character]),
                    literal("\\", self.char_kind).replace([&end_character, &escape]),
                ],
            )
            .state(
                &end_character,
                rules![literal("'", self.char_kind).pop()],
            )
            .state(
                &escape,
                ESCAPES
                    .iter()
                    .map(|source| Entry::from(regex(*source, self.string_kind).pop()))
                    .collect(),
            )
            .state(
                self.comments(),
                rules![
                    literal("/*", self.block_comment_kind).push(&mlcomment),
                    regex("//.*?$", self.line_comment_kind),
                ],
            )
            .state(
                &mlcomment,
                rules![
                    literal("*/", self.block_comment_kind).pop(),
                    regex("[^*]", self.block_comment_kind),
                    literal("*", self.block_comment_kind),
                ],
            )
    }
}

/// Java code shared by actions and arguments: comments, reserved words, literals, and
/// optionally parser holes. Ends with a catch-all so embedded code is always `Generic`.
pub fn java_code(holes: bool) -> Vec<Entry> {
    let mut entries = rules![
        include(JAVA.comments()),
        words(JAVA_KEYWORDS, TokenKind::GenericEmph),
        literal("\"", TokenKind::GenericStrong).push(JAVA.string()),
        literal("'", TokenKind::GenericStrong).push(JAVA.character()),
    ];
    if holes {
        entries.push(Entry::from(regex("#[_a-z][_a-zA-Z0-9]*", TokenKind::GenericInserted)));
    }
    entries.push(Entry::from(regex(".", TokenKind::Generic)));
    entries
}
