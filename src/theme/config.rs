//! YAML theme configuration.
//!
//! ```yaml
//! background: "#ffffff"
//! default: "#333333"
//! styles:
//!   Keyword: "bold #0000aa"
//!   Generic.Emph:
//!     fg: "#aa0000"
//!     bg: color254
//!     modifiers: [bold, underline]
//! ```
//!
//! Keys of `styles` are token kind names as printed by [`TokenKind`]. Values are either a
//! Pygments style string (see [`parse_style`]) or a map with `fg`, `bg` and `modifiers`.
//! Every entry replaces the corresponding entry of the theme it is applied to.

use super::{parse_color, parse_modifier, parse_style, Theme, ThemeError};
use crate::token::TokenKind;
use ratatui::style::Style;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// YAML-deserializable theme configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Page background colour
    pub background: Option<String>,

    /// Base style every token style is patched onto
    pub default: Option<StyleValue>,

    /// Styles by token kind name
    #[serde(default)]
    pub styles: BTreeMap<String, StyleValue>,
}

/// One style, in either notation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Spec(String),
    Config(StyleConfig),
}

/// Individual style configuration from YAML
///
/// Represents the customizable aspects of a ratatui Style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Foreground color (e.g., "red", "blue", "#FF0000")
    pub fg: Option<String>,

    /// Background color (e.g., "red", "blue", "#FF0000")
    pub bg: Option<String>,

    /// Text modifiers (e.g., "bold", "italic", "underline")
    pub modifiers: Option<Vec<String>>,
}

impl ThemeConfig {
    /// Whether applying this configuration leaves a theme unchanged.
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.default.is_none() && self.styles.is_empty()
    }

    /// Layer this configuration over `theme`.
    pub fn apply(self, mut theme: Theme) -> Result<Theme, ThemeError> {
        if let Some(background) = &self.background {
            theme.set_background(Some(parse_color(background)?));
        }
        if let Some(default) = &self.default {
            theme.set_default_style(default.to_style()?);
        }
        if self.is_empty() {
            warn!("theme configuration overrides nothing");
        }
        for (name, value) in &self.styles {
            let kind: TokenKind = name.parse()?;
            theme.set_style(kind, value.to_style()?);
        }
        debug!(styles = self.styles.len(), "applied theme configuration");
        Ok(theme)
    }
}

impl StyleValue {
    pub fn to_style(&self) -> Result<Style, ThemeError> {
        match self {
            StyleValue::Spec(spec) => parse_style(spec),
            StyleValue::Config(config) => config.to_style(),
        }
    }
}

impl StyleConfig {
    /// Convert a StyleConfig into a ratatui Style
    pub fn to_style(&self) -> Result<Style, ThemeError> {
        let mut style = Style::default();

        if let Some(fg) = &self.fg {
            style = style.fg(parse_color(fg)?);
        }

        if let Some(bg) = &self.bg {
            style = style.bg(parse_color(bg)?);
        }

        for modifier in self.modifiers.iter().flatten() {
            style = style.add_modifier(parse_modifier(modifier)?);
        }

        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn test_yaml_minimal_theme() {
        let yaml = r#"
styles:
  Keyword: "bold #0000aa"
"#;
        let theme = Theme::from_yaml(yaml).expect("Should parse valid YAML");
        let keyword = theme.style_for(TokenKind::Keyword);
        assert_eq!(keyword.fg, Some(Color::Rgb(0, 0, 0xaa)));
        assert!(keyword.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_yaml_with_modifiers() {
        let yaml = r#"
styles:
  Generic.Emph:
    fg: red
    modifiers: [underline, italic]
"#;
        let theme = Theme::from_yaml(yaml).expect("Should parse valid YAML");
        let emph = theme.own_style(TokenKind::GenericEmph).unwrap();
        assert_eq!(emph.fg, Some(Color::Red));
        assert!(emph
            .add_modifier
            .contains(Modifier::UNDERLINED | Modifier::ITALIC));
        // The override replaces the built-in entry, so it is no longer bold.
        assert!(!emph.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r##"
background: "#ffffff"
default: "#333333"
styles:
  Literal.String: "#aa0000"
"##;
        let theme = Theme::from_yaml(yaml).expect("Should parse valid YAML");
        let dolmen = Theme::dolmen();
        assert_eq!(theme.background(), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(theme.style_for(TokenKind::Text).fg, Some(Color::Rgb(0x33, 0x33, 0x33)));
        assert_eq!(
            theme.own_style(TokenKind::String).and_then(|s| s.fg),
            Some(Color::Rgb(0xaa, 0, 0))
        );
        assert_eq!(
            theme.own_style(TokenKind::Keyword),
            dolmen.own_style(TokenKind::Keyword)
        );
    }

    #[test]
    fn test_yaml_kind_aliases() {
        let yaml = "styles:\n  String.Char: italic\n  Number: \"#010203\"\n";
        let theme = Theme::from_yaml(yaml).expect("Should parse valid YAML");
        assert!(theme
            .own_style(TokenKind::StringChar)
            .unwrap()
            .add_modifier
            .contains(Modifier::ITALIC));
        assert_eq!(
            theme.own_style(TokenKind::Number).and_then(|s| s.fg),
            Some(Color::Rgb(1, 2, 3))
        );
    }

    #[test]
    fn test_yaml_empty_keeps_builtin() {
        let theme = Theme::from_yaml("{}").expect("Should parse valid YAML");
        assert_eq!(theme, Theme::dolmen());
    }

    #[test]
    fn test_config_emptiness() {
        let parse = |yaml: &str| serde_yaml::from_str::<ThemeConfig>(yaml).unwrap();
        assert!(parse("{}").is_empty());
        assert!(parse("styles: {}").is_empty());
        assert!(!parse("background: white").is_empty());
        assert!(!parse("default: bold").is_empty());
        assert!(!parse("styles:\n  Keyword: bold\n").is_empty());
    }

    #[test]
    fn test_yaml_invalid_syntax() {
        let yaml = "{ invalid: yaml: content";
        assert!(matches!(Theme::from_yaml(yaml), Err(ThemeError::Yaml(_))));
    }

    #[test]
    fn test_yaml_unknown_kind() {
        let yaml = "styles:\n  Name.Builtin: bold\n";
        assert!(matches!(
            Theme::from_yaml(yaml),
            Err(ThemeError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_yaml_invalid_values() {
        let yaml = "styles:\n  Keyword: { fg: not-a-color }\n";
        assert!(matches!(
            Theme::from_yaml(yaml),
            Err(ThemeError::InvalidColor(_))
        ));
        let yaml = "styles:\n  Keyword: { modifiers: [sparkle] }\n";
        assert!(matches!(
            Theme::from_yaml(yaml),
            Err(ThemeError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_style_config_to_style() {
        let config = StyleConfig {
            fg: Some("blue".to_string()),
            bg: Some("#000000".to_string()),
            modifiers: Some(vec!["bold".to_string(), "dim".to_string()]),
        };
        let style = config.to_style().unwrap();
        assert_eq!(style.fg, Some(Color::Blue));
        assert_eq!(style.bg, Some(Color::Rgb(0, 0, 0)));
        assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::DIM));
        assert_eq!(StyleConfig::default().to_style().unwrap(), Style::default());
    }
}
