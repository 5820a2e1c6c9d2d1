//! Style table for rendering tokens.
//!
//! A [`Theme`] maps token kinds to ratatui [`Style`]s. Lookups walk the kind hierarchy
//! the way Pygments styles do: the style of `Generic.Emph` is the theme default, patched
//! with the style of `Generic`, patched with the style of `Generic.Emph`. A theme therefore
//! only lists the kinds it wants to distinguish.
//!
//! **Built-in theme:** [`Theme::dolmen`] is the Dolmen colour scheme: a light, tango-like
//! palette in which embedded Java code sits on its own background.
//!
//! **YAML configuration:** [`Theme::from_yaml`] and [`Theme::from_yaml_file`] layer a
//! YAML file over the built-in theme. See [`config`] for the format.

pub mod config;

pub use config::{StyleConfig, StyleValue, ThemeConfig};

use crate::token::{ParseTokenKindError, TokenKind};
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    UnknownKind(#[from] ParseTokenKindError),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("unknown style attribute `{0}`")]
    UnknownAttribute(String),
}

/// Token kind to style mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    background: Option<Color>,
    default_style: Style,
    styles: HashMap<TokenKind, Style>,
}

/// The Dolmen colour scheme, in Pygments style-string notation.
const DOLMEN_STYLES: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, "italic #8f5902"),
    (TokenKind::CommentMultiline, "italic #8f5902"),
    (TokenKind::Keyword, "bold #204a87"),
    (TokenKind::Operator, "bold #ce5c00"),
    (TokenKind::Punctuation, "bold #000000"),
    (TokenKind::Name, "#000000"),
    (TokenKind::NameDecorator, "bold #5c35cc"),
    (TokenKind::NameException, "bold #cc0000"),
    (TokenKind::NameFunction, "#000000"),
    (TokenKind::NameLabel, "bold #f57900"),
    (TokenKind::NameOther, "bold #4eba06"),
    (TokenKind::Literal, "#000000"),
    (TokenKind::Number, "bold #0000cf"),
    (TokenKind::String, "#4e9a06"),
    (TokenKind::StringChar, "#4e9a06"),
    // Java actions and arguments
    (TokenKind::Generic, "#000000 bg:#e8e8f8"),
    (TokenKind::GenericEmph, "bold #204a87"),
    (TokenKind::GenericStrong, "#4e9a06"),
    (TokenKind::GenericDeleted, "italic #8f5902"),
    (TokenKind::GenericInserted, "bold #800080"),
];

impl Theme {
    /// A theme with no styles at all.
    pub fn empty() -> Self {
        Theme {
            background: None,
            default_style: Style::default(),
            styles: HashMap::new(),
        }
    }

    /// The built-in Dolmen theme.
    pub fn dolmen() -> Self {
        let mut theme = Theme::empty();
        theme.background = Some(Color::Rgb(0xf8, 0xf8, 0xf8));
        for (kind, spec) in DOLMEN_STYLES {
            let style = parse_style(spec).expect("built-in styles are well formed");
            theme.styles.insert(*kind, style);
        }
        theme
    }

    /// Resolved style for `kind`: the default style patched by each ancestor, outermost
    /// first, then by the kind itself.
    pub fn style_for(&self, kind: TokenKind) -> Style {
        let mut lineage: Vec<TokenKind> = kind.ancestors().collect();
        lineage.reverse();
        lineage
            .into_iter()
            .filter_map(|kind| self.styles.get(&kind))
            .fold(self.default_style, |style, own| style.patch(*own))
    }

    /// Style set for exactly `kind`, without inheritance.
    pub fn own_style(&self, kind: TokenKind) -> Option<Style> {
        self.styles.get(&kind).copied()
    }

    pub fn set_style(&mut self, kind: TokenKind, style: Style) {
        self.styles.insert(kind, style);
    }

    pub fn remove_style(&mut self, kind: TokenKind) -> Option<Style> {
        self.styles.remove(&kind)
    }

    pub fn default_style(&self) -> Style {
        self.default_style
    }

    pub fn set_default_style(&mut self, style: Style) {
        self.default_style = style;
    }

    /// Page background behind all tokens.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Load a theme from a YAML string, layered over [`Theme::dolmen`].
    pub fn from_yaml(yaml_str: &str) -> Result<Self, ThemeError> {
        let config: ThemeConfig = serde_yaml::from_str(yaml_str)?;
        config.apply(Theme::dolmen())
    }

    /// Load a theme from a YAML file, layered over [`Theme::dolmen`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dolmen()
    }
}

/// Parse a Pygments style string such as `"bold italic #8f5902 bg:#e8e8f8"`.
///
/// Supported attributes: `bold`, `italic`, `underline` and their `no` forms, a foreground
/// colour, `bg:<color>`. `border:<color>` is accepted and ignored since terminal styles
/// have no borders.
pub fn parse_style(spec: &str) -> Result<Style, ThemeError> {
    let mut style = Style::default();
    for word in spec.split_whitespace() {
        style = match word {
            "bold" => style.add_modifier(Modifier::BOLD),
            "nobold" => style.remove_modifier(Modifier::BOLD),
            "italic" => style.add_modifier(Modifier::ITALIC),
            "noitalic" => style.remove_modifier(Modifier::ITALIC),
            "underline" => style.add_modifier(Modifier::UNDERLINED),
            "nounderline" => style.remove_modifier(Modifier::UNDERLINED),
            _ => {
                if let Some(color) = word.strip_prefix("bg:") {
                    style.bg(parse_color(color)?)
                } else if let Some(color) = word.strip_prefix("border:") {
                    parse_color(color)?;
                    style
                } else if word.starts_with('#') {
                    style.fg(parse_color(word)?)
                } else {
                    return Err(ThemeError::UnknownAttribute(word.to_string()));
                }
            }
        };
    }
    Ok(style)
}

/// Parse a colour name or hex code into a ratatui Color
///
/// Supports:
/// - Named colors: "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray", "dark_gray"
/// - Indexed colors: "color0" through "color255"
/// - RGB hex: "#FF0000" or "#fff"
pub fn parse_color(color_str: &str) -> Result<Color, ThemeError> {
    let lower = color_str.trim().to_lowercase();
    let invalid = || ThemeError::InvalidColor(color_str.to_string());

    let named = match lower.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" => Some(Color::Gray),
        "dark_gray" => Some(Color::DarkGray),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    if let Some(index) = lower.strip_prefix("color") {
        return index.parse::<u8>().map(Color::Indexed).map_err(|_| invalid());
    }

    let hex = lower.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // Short form: #fff -> #ffffff
        3 => Ok(Color::Rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        _ => Err(invalid()),
    }
}

/// Parse a modifier name into a ratatui Modifier
pub fn parse_modifier(modifier_str: &str) -> Result<Modifier, ThemeError> {
    match modifier_str.to_lowercase().as_str() {
        "bold" => Ok(Modifier::BOLD),
        "dim" => Ok(Modifier::DIM),
        "italic" => Ok(Modifier::ITALIC),
        "underline" => Ok(Modifier::UNDERLINED),
        "reverse" => Ok(Modifier::REVERSED),
        "crossed_out" => Ok(Modifier::CROSSED_OUT),
        _ => Err(ThemeError::UnknownAttribute(modifier_str.to_string())),
    }
}
