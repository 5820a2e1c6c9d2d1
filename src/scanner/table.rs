//! State tables.
//!
//! A table is a set of named states, each holding an ordered list of rules. Tables are
//! described with a [`TableBuilder`] and compiled once: includes are flattened into each
//! state's rule list, state names are resolved to [`StateId`]s and patterns are compiled.
//! The result is immutable and can be shared freely between scans and threads.

use super::error::{ScanError, TableError};
use super::rule::{Entry, Pattern, PatternDef, RuleDef, StateAction, WordSet};
use super::Tokens;
use crate::token::TokenKind;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use tracing::debug;

/// Name of the state every table must define and where [`StateTable::scan`] starts.
pub const ROOT: &str = "root";

/// Index of a state inside the table that issued it. Ids are meaningless for any other
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub kind: TokenKind,
    pub action: StateAction,
}

/// A compiled state: its name and flattened rule list.
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    rules: Vec<Rule>,
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule matching at `pos`, with the end of its match.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<(&Rule, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.pattern.match_at(text, pos).map(|end| (rule, end)))
    }
}

/// Immutable, compiled set of states driving the scanner.
#[derive(Debug, Clone)]
pub struct StateTable {
    name: String,
    states: Vec<State>,
    index: HashMap<String, StateId>,
    root: StateId,
}

impl StateTable {
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    /// The state behind `id`, or `None` when `id` is out of range for this table.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    /// State behind an id this table issued itself.
    pub(crate) fn resolve(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// Look a state up by name.
    pub fn get(&self, name: &str) -> Option<&State> {
        self.state_id(name).map(|id| self.resolve(id))
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn root(&self) -> StateId {
        self.root
    }

    /// Scan `text` starting in the `root` state.
    pub fn scan<'t>(&'t self, text: &'t str) -> Tokens<'t> {
        Tokens::new(text, self, self.root)
    }

    /// Scan `text` starting in the state called `start`.
    pub fn scan_from<'t>(&'t self, text: &'t str, start: &str) -> Result<Tokens<'t>, ScanError> {
        let id = self.state_id(start).ok_or_else(|| ScanError::UnknownState {
            table: self.name.clone(),
            state: start.to_string(),
        })?;
        Ok(Tokens::new(text, self, id))
    }
}

/// Describes a table state by state, then compiles it with [`TableBuilder::build`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    states: Vec<(String, Vec<Entry>)>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        TableBuilder {
            name: name.into(),
            states: Vec::new(),
        }
    }

    /// Define a state. Entries keep their order; includes are spliced in place.
    pub fn state(mut self, name: impl Into<String>, entries: Vec<Entry>) -> Self {
        self.states.push((name.into(), entries));
        self
    }

    pub fn build(self) -> Result<StateTable, TableError> {
        let mut index = HashMap::new();
        for (position, (name, _)) in self.states.iter().enumerate() {
            if index.insert(name.clone(), StateId(position)).is_some() {
                return Err(TableError::DuplicateState { name: name.clone() });
            }
        }
        let root = *index.get(ROOT).ok_or_else(|| TableError::MissingRoot {
            table: self.name.clone(),
        })?;

        let definitions: HashMap<&str, &[Entry]> = self
            .states
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
            .collect();

        let mut compiler = Compiler {
            index: &index,
            regexes: HashMap::new(),
        };
        let mut states = Vec::with_capacity(self.states.len());
        for (name, _) in &self.states {
            let mut flat = Vec::new();
            flatten(name, &definitions, &mut Vec::new(), &mut flat)?;
            let rules = flat
                .into_iter()
                .map(|rule| compiler.compile(name, rule))
                .collect::<Result<Vec<_>, _>>()?;
            states.push(State {
                name: name.clone(),
                rules,
            });
        }

        debug!(
            table = %self.name,
            states = states.len(),
            rules = states.iter().map(|s| s.rules.len()).sum::<usize>(),
            "built state table"
        );

        Ok(StateTable {
            name: self.name,
            states,
            index,
            root,
        })
    }
}

/// Append the rules of `state` to `out`, expanding includes depth first.
fn flatten<'d>(
    state: &'d str,
    definitions: &HashMap<&'d str, &'d [Entry]>,
    chain: &mut Vec<&'d str>,
    out: &mut Vec<&'d RuleDef>,
) -> Result<(), TableError> {
    if chain.contains(&state) {
        let mut cycle: Vec<String> = chain.iter().map(|s| s.to_string()).collect();
        cycle.push(state.to_string());
        return Err(TableError::IncludeCycle { chain: cycle });
    }
    let entries = definitions
        .get(state)
        .ok_or_else(|| TableError::UnknownState {
            state: chain.last().copied().unwrap_or(state).to_string(),
            target: state.to_string(),
        })?;

    chain.push(state);
    for entry in *entries {
        match entry {
            Entry::Rule(rule) => out.push(rule),
            Entry::Include(target) => flatten(target, definitions, chain, out)?,
        }
    }
    chain.pop();
    Ok(())
}

struct Compiler<'a> {
    index: &'a HashMap<String, StateId>,
    /// Included groups are compiled once per table, not once per including state.
    regexes: HashMap<String, Regex>,
}

impl Compiler<'_> {
    fn compile(&mut self, state: &str, rule: &RuleDef) -> Result<Rule, TableError> {
        let pattern = match &rule.pattern {
            PatternDef::Literal(text) => Pattern::Literal(text.clone()),
            PatternDef::Regex(source) => Pattern::Regex(self.regex(state, source)?),
            PatternDef::Words {
                words,
                boundary_before,
                boundary_after,
            } => Pattern::Words(WordSet::new(
                words.clone(),
                *boundary_before,
                *boundary_after,
            )),
        };
        let action = rule.action.try_map(|target| {
            self.index
                .get(target)
                .copied()
                .ok_or_else(|| TableError::UnknownState {
                    state: state.to_string(),
                    target: target.clone(),
                })
        })?;
        Ok(Rule {
            pattern,
            kind: rule.kind,
            action,
        })
    }

    fn regex(&mut self, state: &str, source: &str) -> Result<Regex, TableError> {
        if let Some(regex) = self.regexes.get(source) {
            return Ok(regex.clone());
        }
        let regex = RegexBuilder::new(&format!(r"\A(?:{source})"))
            .multi_line(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source_error| TableError::InvalidPattern {
                state: state.to_string(),
                pattern: source.to_string(),
                source: source_error,
            })?;
        self.regexes.insert(source.to_string(), regex.clone());
        Ok(regex)
    }
}
