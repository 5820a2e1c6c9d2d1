//! # dolmen-syntax
//!
//! Syntax highlighting for the Dolmen parser generator: lexer descriptions (`.jl`),
//! parser descriptions (`.jg`) and the `.reports` diagnostics Dolmen prints.
//!
//! The crate is split in three layers:
//!     - [`scanner`]: a generic table-driven scanner. Named states hold ordered regex
//!       rules; a stack of states tracks nesting (comments, literals, Java blocks).
//!     - [`languages`]: the three Dolmen state tables.
//!     - [`theme`]: the style table mapping token kinds to terminal styles.
//!
//! ```ignore
//! use dolmen_syntax::{coalesce, Language, Theme};
//!
//! let source = "rule main = | _ { return; }";
//! let theme = Theme::dolmen();
//! for token in coalesce(Language::Lexer.scan(source)) {
//!     let style = theme.style_for(token.kind);
//!     println!("{:?} {:?}", token.text(source), style);
//! }
//! ```

pub mod languages;
pub mod scanner;
pub mod theme;
pub mod token;

pub use languages::Language;
pub use scanner::{scan, ScanError, StateTable, TableError, Tokens};
pub use theme::{Theme, ThemeError};
pub use token::{coalesce, Token, TokenKind};
