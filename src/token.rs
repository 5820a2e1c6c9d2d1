//! Token kinds and tokens produced by the scanner.
//!
//!     Token kinds form a small hierarchy in the Pygments tradition: every kind has a dotted
//!     name (`Comment.Multiline`, `Generic.Emph`, ...) and, except for the roots, a parent.
//!     Styles are resolved through that hierarchy, so a theme only needs to style the kinds
//!     it cares about.
//!
//!     The `Generic` family is reserved for the embedded Java code of semantic actions and
//!     arguments:
//!         - Generic          plain Java text
//!         - Generic.Emph     Java reserved words
//!         - Generic.Strong   Java string and character literals
//!         - Generic.Deleted  Java comments
//!         - Generic.Inserted parser holes (`#name`)

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// Classification attached to a span of text for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Text,
    Comment,
    CommentMultiline,
    CommentSingleline,
    Keyword,
    Name,
    NameFunction,
    NameDecorator,
    NameException,
    NameLabel,
    NameOther,
    Literal,
    Number,
    String,
    StringChar,
    Operator,
    Punctuation,
    Generic,
    GenericEmph,
    GenericStrong,
    GenericDeleted,
    GenericInserted,
}

impl TokenKind {
    /// Every token kind, parents before children.
    pub const ALL: [TokenKind; 22] = [
        TokenKind::Text,
        TokenKind::Comment,
        TokenKind::CommentMultiline,
        TokenKind::CommentSingleline,
        TokenKind::Keyword,
        TokenKind::Name,
        TokenKind::NameFunction,
        TokenKind::NameDecorator,
        TokenKind::NameException,
        TokenKind::NameLabel,
        TokenKind::NameOther,
        TokenKind::Literal,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::StringChar,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Generic,
        TokenKind::GenericEmph,
        TokenKind::GenericStrong,
        TokenKind::GenericDeleted,
        TokenKind::GenericInserted,
    ];

    /// Dotted name of the kind, e.g. `Literal.String.Char`.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Text => "Text",
            TokenKind::Comment => "Comment",
            TokenKind::CommentMultiline => "Comment.Multiline",
            TokenKind::CommentSingleline => "Comment.Singleline",
            TokenKind::Keyword => "Keyword",
            TokenKind::Name => "Name",
            TokenKind::NameFunction => "Name.Function",
            TokenKind::NameDecorator => "Name.Decorator",
            TokenKind::NameException => "Name.Exception",
            TokenKind::NameLabel => "Name.Label",
            TokenKind::NameOther => "Name.Other",
            TokenKind::Literal => "Literal",
            TokenKind::Number => "Literal.Number",
            TokenKind::String => "Literal.String",
            TokenKind::StringChar => "Literal.String.Char",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Generic => "Generic",
            TokenKind::GenericEmph => "Generic.Emph",
            TokenKind::GenericStrong => "Generic.Strong",
            TokenKind::GenericDeleted => "Generic.Deleted",
            TokenKind::GenericInserted => "Generic.Inserted",
        }
    }

    /// The kind this one specializes, if any.
    pub fn parent(self) -> Option<TokenKind> {
        match self {
            TokenKind::CommentMultiline | TokenKind::CommentSingleline => Some(TokenKind::Comment),
            TokenKind::NameFunction
            | TokenKind::NameDecorator
            | TokenKind::NameException
            | TokenKind::NameLabel
            | TokenKind::NameOther => Some(TokenKind::Name),
            TokenKind::Number | TokenKind::String => Some(TokenKind::Literal),
            TokenKind::StringChar => Some(TokenKind::String),
            TokenKind::GenericEmph
            | TokenKind::GenericStrong
            | TokenKind::GenericDeleted
            | TokenKind::GenericInserted => Some(TokenKind::Generic),
            TokenKind::Text
            | TokenKind::Comment
            | TokenKind::Keyword
            | TokenKind::Name
            | TokenKind::Literal
            | TokenKind::Operator
            | TokenKind::Punctuation
            | TokenKind::Generic => None,
        }
    }

    /// This kind followed by its parents, most specific first.
    pub fn ancestors(self) -> impl Iterator<Item = TokenKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// Whether `self` is `other` or one of its descendants.
    pub fn is_a(self, other: TokenKind) -> bool {
        self.ancestors().any(|kind| kind == other)
    }

    /// Whether this kind belongs to embedded Java code.
    pub fn is_generic(self) -> bool {
        self.is_a(TokenKind::Generic)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dotted name does not denote a token kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown token kind `{0}`")]
pub struct ParseTokenKindError(pub String);

impl FromStr for TokenKind {
    type Err = ParseTokenKindError;

    /// Accepts the full dotted name as well as the Pygments short aliases
    /// `String`, `String.Char` and `Number`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let alias = match name {
            "String" => Some(TokenKind::String),
            "String.Char" => Some(TokenKind::StringChar),
            "Number" => Some(TokenKind::Number),
            _ => None,
        };
        alias
            .or_else(|| TokenKind::ALL.into_iter().find(|kind| kind.as_str() == name))
            .ok_or_else(|| ParseTokenKindError(name.to_string()))
    }
}

/// A classified span of the scanned text.
///
/// Spans are byte offsets into the source and always fall on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Token { kind, span }
    }

    /// The slice of `source` covered by this token
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

/// Merge runs of adjacent tokens sharing the same kind.
///
/// The scanner emits many one-character tokens (comment bodies, string contents, Java
/// code); highlighters usually want one span per run. Tiling is preserved.
pub fn coalesce<I>(tokens: I) -> Coalesce<I::IntoIter>
where
    I: IntoIterator<Item = Token>,
{
    Coalesce {
        inner: tokens.into_iter(),
        pending: None,
    }
}

/// Iterator returned by [`coalesce`].
#[derive(Debug, Clone)]
pub struct Coalesce<I> {
    inner: I,
    pending: Option<Token>,
}

impl<I> Iterator for Coalesce<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut run = self.pending.take().or_else(|| self.inner.next())?;
        for token in self.inner.by_ref() {
            if token.kind == run.kind && token.span.start == run.span.end {
                run.span.end = token.span.end;
            } else {
                self.pending = Some(token);
                break;
            }
        }
        Some(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chain() {
        assert_eq!(TokenKind::StringChar.parent(), Some(TokenKind::String));
        assert_eq!(TokenKind::String.parent(), Some(TokenKind::Literal));
        assert_eq!(TokenKind::Literal.parent(), None);

        let chain: Vec<_> = TokenKind::StringChar.ancestors().collect();
        assert_eq!(
            chain,
            vec![TokenKind::StringChar, TokenKind::String, TokenKind::Literal]
        );
    }

    #[test]
    fn test_generic_family() {
        assert!(TokenKind::Generic.is_generic());
        assert!(TokenKind::GenericInserted.is_generic());
        assert!(!TokenKind::Text.is_generic());
        assert!(!TokenKind::CommentMultiline.is_generic());
    }

    #[test]
    fn test_names_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(kind.as_str().parse::<TokenKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_pygments_aliases() {
        assert_eq!("String".parse::<TokenKind>(), Ok(TokenKind::String));
        assert_eq!("String.Char".parse::<TokenKind>(), Ok(TokenKind::StringChar));
        assert_eq!(" Number ".parse::<TokenKind>(), Ok(TokenKind::Number));
        assert_eq!(
            "Name.Builtin".parse::<TokenKind>(),
            Err(ParseTokenKindError("Name.Builtin".to_string()))
        );
    }

    #[test]
    fn test_parents_precede_children_in_all() {
        for (index, kind) in TokenKind::ALL.iter().enumerate() {
            if let Some(parent) = kind.parent() {
                let parent_index = TokenKind::ALL.iter().position(|k| *k == parent).unwrap();
                assert!(parent_index < index, "{kind} listed before {parent}");
            }
        }
    }

    #[test]
    fn test_coalesce_merges_runs() {
        let tokens = vec![
            Token::new(TokenKind::Generic, 0..1),
            Token::new(TokenKind::Generic, 1..2),
            Token::new(TokenKind::GenericEmph, 2..5),
            Token::new(TokenKind::Generic, 5..6),
        ];
        let merged: Vec<_> = coalesce(tokens).collect();
        assert_eq!(
            merged,
            vec![
                Token::new(TokenKind::Generic, 0..2),
                Token::new(TokenKind::GenericEmph, 2..5),
                Token::new(TokenKind::Generic, 5..6),
            ]
        );
    }

    #[test]
    fn test_coalesce_keeps_gaps_apart() {
        let tokens = vec![
            Token::new(TokenKind::Text, 0..1),
            Token::new(TokenKind::Text, 2..3),
        ];
        assert_eq!(coalesce(tokens).count(), 2);
    }

    #[test]
    fn test_coalesce_empty() {
        assert_eq!(coalesce(Vec::new()).next(), None);
    }

    #[test]
    fn test_token_text() {
        let source = "rule main";
        let token = Token::new(TokenKind::Keyword, 0..4);
        assert_eq!(token.text(source), "rule");
        assert_eq!(token.len(), 4);
        assert!(!token.is_empty());
    }
}
