//! Errors raised while building tables or starting a scan.
//!
//! Scanning itself has no error path: anything the rules do not recognize comes out as
//! plain text.

use thiserror::Error;

/// A table definition that cannot be compiled.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("state table `{table}` has no `root` state")]
    MissingRoot { table: String },

    #[error("state `{name}` is defined more than once")]
    DuplicateState { name: String },

    #[error("state `{state}` refers to unknown state `{target}`")]
    UnknownState { state: String, target: String },

    #[error("include cycle: {}", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },

    #[error("invalid pattern {pattern:?} in state `{state}`")]
    InvalidPattern {
        state: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("state table `{table}` has no state named `{state}`")]
    UnknownState { table: String, state: String },
}
