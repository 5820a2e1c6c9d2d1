//! Scanner
//!
//! A table-driven, stack-based scanner in the style of Pygments' `RegexLexer`.
//!
//! Structure:
//!     A [`StateTable`] holds named states, each with an ordered list of rules. A rule pairs
//!     a pattern with a token kind and a [`StateAction`]. At every step the scanner tries
//!     the rules of the current state in order; the first one matching at the cursor wins,
//!     its match becomes a token and its action updates the state stack.
//!
//! Guarantees:
//!     - Total: when no rule matches, exactly one character is emitted as
//!       [`TokenKind::Text`] and the state is left unchanged. Nothing ever fails.
//!     - Terminating: every step consumes at least one character.
//!     - Tiling: tokens are contiguous, non-overlapping and cover the whole input.
//!     - Never empty: popping the last state on the stack is a no-op.
//!
//! Tokens are produced lazily, one per call to `next`, so a consumer can stop early (for
//! example once the visible part of a document has been highlighted). Each [`Tokens`]
//! owns its own cursor and stack; tables are shared read-only.

pub mod error;
pub mod rule;
pub mod table;

pub use error::{ScanError, TableError};
pub use rule::{
    include, literal, regex, words, Entry, Pattern, PatternDef, RuleDef, StateAction, WordSet,
};
pub use table::{Rule, State, StateId, StateTable, TableBuilder, ROOT};

use crate::token::{Token, TokenKind};
use std::iter::FusedIterator;
use tracing::trace;

/// Scan `text` with `table`, starting in the state named `start`.
pub fn scan<'t>(
    text: &'t str,
    table: &'t StateTable,
    start: &str,
) -> Result<Tokens<'t>, ScanError> {
    table.scan_from(text, start)
}

/// Lazy token stream over one input.
#[derive(Debug, Clone)]
pub struct Tokens<'t> {
    text: &'t str,
    table: &'t StateTable,
    position: usize,
    current: StateId,
    /// States below `current`, bottom first.
    saved: Vec<StateId>,
}

impl<'t> Tokens<'t> {
    pub(crate) fn new(text: &'t str, table: &'t StateTable, start: StateId) -> Self {
        Tokens {
            text,
            table,
            position: 0,
            current: start,
            saved: Vec::new(),
        }
    }

    /// Byte offset of the next token.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Name of the state the next token will be scanned in.
    pub fn state_name(&self) -> &'t str {
        let table: &'t StateTable = self.table;
        table.resolve(self.current).name()
    }

    /// Number of states on the stack, always at least one.
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }

    /// State names from the bottom of the stack to the current state.
    pub fn stack(&self) -> Vec<&'t str> {
        let table: &'t StateTable = self.table;
        self.saved
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|id| table.resolve(*id).name())
            .collect()
    }

    fn apply(&mut self, action: &StateAction) {
        match action {
            StateAction::Stay => return,
            StateAction::Push(state) => self.push(*state),
            StateAction::Pop => self.pop(),
            StateAction::Replace(states) => {
                self.pop();
                for state in states {
                    self.push(*state);
                }
            }
        }
        trace!(state = self.state_name(), depth = self.depth(), "transition");
    }

    fn push(&mut self, state: StateId) {
        self.saved.push(self.current);
        self.current = state;
    }

    fn pop(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (text, table) = (self.text, self.table);
        let start = self.position;
        let rest = text.get(start..).filter(|rest| !rest.is_empty())?;

        let state = table.resolve(self.current);
        match state.match_at(text, start) {
            Some((rule, end)) => {
                self.position = end;
                self.apply(&rule.action);
                Some(Token::new(rule.kind, start..end))
            }
            None => {
                let width = rest.chars().next().map_or(1, char::len_utf8);
                trace!(state = state.name(), position = start, "no rule matched");
                self.position = start + width;
                Some(Token::new(TokenKind::Text, start..start + width))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len().saturating_sub(self.position);
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Tokens<'_> {}
