//! Rules, patterns and state transitions.
//!
//! Rules are written as data with the helper constructors below ([`literal`], [`regex`],
//! [`words`], [`include`]) and the [`rules!`](crate::rules) macro, then compiled by the
//! [`TableBuilder`](super::TableBuilder). Compilation turns state names into
//! [`StateId`]s and pattern sources into matchers, so the scanning loop never looks
//! anything up by name.

use super::table::StateId;
use crate::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// What happens to the state stack after a rule matched.
///
/// `S` is the state reference: names while a table is being defined, [`StateId`]s once it
/// is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateAction<S = StateId> {
    /// Remain in the current state.
    Stay,
    /// Enter a state; a later `Pop` returns to the current one.
    Push(S),
    /// Leave the current state. Popping the last remaining state does nothing.
    Pop,
    /// Pop, then push every listed state in order. The last one becomes current.
    Replace(Vec<S>),
}

impl<S> StateAction<S> {
    /// Resolve every state reference with `resolve`.
    pub fn try_map<T, E>(
        &self,
        mut resolve: impl FnMut(&S) -> Result<T, E>,
    ) -> Result<StateAction<T>, E> {
        Ok(match self {
            StateAction::Stay => StateAction::Stay,
            StateAction::Push(state) => StateAction::Push(resolve(state)?),
            StateAction::Pop => StateAction::Pop,
            StateAction::Replace(states) => StateAction::Replace(
                states.iter().map(&mut resolve).collect::<Result<_, _>>()?,
            ),
        })
    }
}

/// Source form of a pattern, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternDef {
    /// Exact text.
    Literal(String),
    /// Regular expression, anchored at the scan position. `.` matches newlines and `$`
    /// matches at the end of every line.
    Regex(String),
    /// Any of the listed words. Word boundaries are checked against the whole input.
    Words {
        words: Vec<String>,
        boundary_before: bool,
        boundary_after: bool,
    },
}

/// A rule as written in a table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub pattern: PatternDef,
    pub kind: TokenKind,
    pub action: StateAction<String>,
}

impl RuleDef {
    pub fn new(pattern: PatternDef, kind: TokenKind) -> Self {
        RuleDef {
            pattern,
            kind,
            action: StateAction::Stay,
        }
    }

    /// Enter `state` after matching.
    pub fn push(mut self, state: impl Into<String>) -> Self {
        self.action = StateAction::Push(state.into());
        self
    }

    /// Leave the current state after matching.
    pub fn pop(mut self) -> Self {
        self.action = StateAction::Pop;
        self
    }

    /// Swap the current state for `states` after matching.
    pub fn replace<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action = StateAction::Replace(states.into_iter().map(Into::into).collect());
        self
    }
}

/// One line of a state definition: a rule, or the rules of another state spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Rule(RuleDef),
    Include(String),
}

impl From<RuleDef> for Entry {
    fn from(rule: RuleDef) -> Self {
        Entry::Rule(rule)
    }
}

/// Match `text` exactly.
pub fn literal(text: impl Into<String>, kind: TokenKind) -> RuleDef {
    RuleDef::new(PatternDef::Literal(text.into()), kind)
}

/// Match a regular expression at the scan position.
pub fn regex(source: impl Into<String>, kind: TokenKind) -> RuleDef {
    RuleDef::new(PatternDef::Regex(source.into()), kind)
}

/// Match one of `list` as a whole word (word boundaries on both sides).
pub fn words(list: &[&str], kind: TokenKind) -> RuleDef {
    RuleDef::new(
        PatternDef::Words {
            words: list.iter().map(|word| word.to_string()).collect(),
            boundary_before: true,
            boundary_after: true,
        },
        kind,
    )
}

/// Splice the rules of `state` at this position.
pub fn include(state: impl Into<String>) -> Entry {
    Entry::Include(state.into())
}

/// Build a `Vec<Entry>` from rules and includes.
///
/// ```ignore
/// rules![
///     include("_comments"),
///     literal("{", TokenKind::Generic).push("action"),
///     regex(".", TokenKind::Text),
/// ]
/// ```
#[macro_export]
macro_rules! rules {
    ($($entry:expr),* $(,)?) => {
        vec![$($crate::scanner::Entry::from($entry)),*]
    };
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
    Words(WordSet),
}

impl Pattern {
    /// End offset of a match starting exactly at `pos`, if any.
    ///
    /// Empty matches are reported as no match so that every applied rule moves the cursor.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<usize> {
        let rest = &text[pos..];
        let len = match self {
            Pattern::Literal(literal) => rest.starts_with(literal.as_str()).then(|| literal.len()),
            Pattern::Regex(regex) => regex.find(rest).map(|m| m.end()),
            Pattern::Words(set) => set.match_at(text, pos),
        }?;
        (len > 0).then_some(pos + len)
    }
}

/// Word alternatives, longest first so that the first hit is the longest one.
#[derive(Debug, Clone)]
pub struct WordSet {
    words: Vec<String>,
    boundary_before: bool,
    boundary_after: bool,
}

impl WordSet {
    pub fn new(mut words: Vec<String>, boundary_before: bool, boundary_after: bool) -> Self {
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();
        WordSet {
            words,
            boundary_before,
            boundary_after,
        }
    }

    fn match_at(&self, text: &str, pos: usize) -> Option<usize> {
        if self.boundary_before && !is_boundary(text, pos) {
            return None;
        }
        let rest = &text[pos..];
        self.words
            .iter()
            .filter(|word| !word.is_empty() && rest.starts_with(word.as_str()))
            .find(|word| !self.boundary_after || is_boundary(text, pos + word.len()))
            .map(|word| word.len())
    }
}

/// A single Unicode word character, as `\w` in rule patterns.
static WORD_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\w\z").expect("word character class compiles"));

fn is_word_char(c: char) -> bool {
    WORD_CHAR.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Same semantics as the regex `\b` assertion at byte offset `pos` of `text`.
pub(crate) fn is_boundary(text: &str, pos: usize) -> bool {
    let before = text[..pos].chars().next_back().is_some_and(is_word_char);
    let after = text[pos..].chars().next().is_some_and(is_word_char);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_set(list: &[&str]) -> Pattern {
        Pattern::Words(WordSet::new(
            list.iter().map(|w| w.to_string()).collect(),
            true,
            true,
        ))
    }

    #[test]
    fn test_boundaries() {
        assert!(is_boundary("rule", 0));
        assert!(is_boundary("rule", 4));
        assert!(!is_boundary("rule", 2));
        assert!(!is_boundary("0rule", 1));
        assert!(!is_boundary("", 0));
        assert!(is_boundary("a:", 1));
        assert!(!is_boundary(": ", 1));
    }

    #[test]
    fn test_word_chars_follow_regex_classes() {
        for c in ['a', 'Z', '_', '7', 'é', '\u{301}', '\u{663}'] {
            assert!(is_word_char(c), "{c:?}");
        }
        for c in [' ', ':', '-', '\n', '\u{a0}'] {
            assert!(!is_word_char(c), "{c:?}");
        }
    }

    #[test]
    fn test_combining_mark_blocks_keyword() {
        // A trailing combining mark continues the word, as it does for `\b` in regexes.
        assert!(!is_boundary("rule\u{301}", 4));
        assert_eq!(word_set(&["rule"]).match_at("rule\u{301}", 0), None);
    }

    #[test]
    fn test_words_respect_preceding_context() {
        let pattern = word_set(&["rule"]);
        assert_eq!(pattern.match_at("rule x", 0), Some(4));
        assert_eq!(pattern.match_at("x rule", 2), Some(6));
        assert_eq!(pattern.match_at("0rule", 1), None);
        assert_eq!(pattern.match_at("rules", 0), None);
    }

    #[test]
    fn test_words_prefer_longest() {
        let pattern = word_set(&["in", "int", "instanceof"]);
        assert_eq!(pattern.match_at("int x", 0), Some(3));
        assert_eq!(pattern.match_at("in x", 0), Some(2));
        assert_eq!(pattern.match_at("instanceof", 0), Some(10));
    }

    #[test]
    fn test_words_ending_in_punctuation() {
        let pattern = word_set(&["Warning:"]);
        // A boundary after ':' only exists if a word character follows.
        assert_eq!(pattern.match_at("Warning: 3", 0), None);
        assert_eq!(pattern.match_at("Warning:x", 0), Some(8));
    }

    #[test]
    fn test_literal_and_regex() {
        let literal = Pattern::Literal("/*".to_string());
        assert_eq!(literal.match_at("a/*", 1), Some(3));
        assert_eq!(literal.match_at("a/", 1), None);

        let regex = Pattern::Regex(Regex::new(r"\A(?:[0-9]+)").unwrap());
        assert_eq!(regex.match_at("x42y", 1), Some(3));
        assert_eq!(regex.match_at("x42y", 0), None);
    }

    #[test]
    fn test_empty_matches_are_ignored() {
        let regex = Pattern::Regex(Regex::new(r"\A(?:[0-9]*)").unwrap());
        assert_eq!(regex.match_at("abc", 0), None);
        assert_eq!(Pattern::Literal(String::new()).match_at("abc", 0), None);
    }

    #[test]
    fn test_action_resolution() {
        let action = StateAction::Replace(vec!["a".to_string(), "b".to_string()]);
        let resolved: Result<StateAction<usize>, ()> = action.try_map(|name| match name.as_str() {
            "a" => Ok(1),
            "b" => Ok(2),
            _ => Err(()),
        });
        assert_eq!(resolved, Ok(StateAction::Replace(vec![1, 2])));

        let unknown: Result<StateAction<usize>, String> =
            StateAction::Push("zzz".to_string()).try_map(|name| Err(name.clone()));
        assert_eq!(unknown, Err("zzz".to_string()));
    }

    #[test]
    fn test_rule_def_builders() {
        let rule = literal("'", TokenKind::StringChar).replace(["endCharacter", "escapeSequence"]);
        assert_eq!(
            rule.action,
            StateAction::Replace(vec!["endCharacter".to_string(), "escapeSequence".to_string()])
        );
        assert_eq!(literal("}", TokenKind::Generic).pop().action, StateAction::Pop);
    }
}
