//! Languages
//!
//! The state tables for the three Dolmen formats:
//!     - [`lexer`]: lexer descriptions, with Java semantic actions.
//!     - [`parser`]: parser descriptions, with Java actions, arguments and holes.
//!     - [`reports`]: diagnostics printed by Dolmen.
//!
//! Tables are compiled on first use and shared for the lifetime of the process. The
//! comment, literal and Java rule groups both description languages rely on live in
//! [`common`].

pub mod common;
pub mod lexer;
pub mod parser;
pub mod reports;

use crate::scanner::{StateTable, Tokens};
use std::fmt;

/// One of the Dolmen formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Lexer,
    Parser,
    Reports,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Lexer, Language::Parser, Language::Reports];

    pub fn name(self) -> &'static str {
        match self {
            Language::Lexer => "DolmenLexer",
            Language::Parser => "DolmenParser",
            Language::Reports => "DolmenReports",
        }
    }

    /// The compiled table, built on first access.
    pub fn table(self) -> &'static StateTable {
        match self {
            Language::Lexer => &lexer::TABLE,
            Language::Parser => &parser::TABLE,
            Language::Reports => &reports::TABLE,
        }
    }

    /// Scan `text` from the `root` state.
    pub fn scan(self, text: &str) -> Tokens<'_> {
        self.table().scan(text)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
