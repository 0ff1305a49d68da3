//! Presentation themes.
//!
//! A [`Theme`] is a plain record of copy, labels and colors. Every visual
//! variant goes through the same renderer; nothing in here knows about the
//! countdown arithmetic.
//!
//! Custom themes are TOML files in the themes directory
//! (`~/.config/launchclock/themes/*.toml` by default). A custom theme whose
//! `id` matches a built-in replaces it.

mod builtin;
mod registry;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::countdown::TimeUnit;
use crate::error::{CoreError, ThemeError};

pub use builtin::builtin_themes;
pub use registry::ThemeRegistry;

/// 24-bit color parsed from a `#rrggbb` palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn parse_hex(field: &str, value: &str) -> Result<Self, ThemeError> {
        let invalid = || ThemeError::InvalidColor {
            field: field.to_string(),
            value: value.to_string(),
        };
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_muted")]
    pub muted: String,
    #[serde(default = "default_digits")]
    pub digits: String,
}

fn default_background() -> String {
    "#000000".into()
}
fn default_primary() -> String {
    "#3b82f6".into()
}
fn default_accent() -> String {
    "#f59e0b".into()
}
fn default_muted() -> String {
    "#6b7280".into()
}
fn default_digits() -> String {
    "#ffffff".into()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: default_background(),
            primary: default_primary(),
            accent: default_accent(),
            muted: default_muted(),
            digits: default_digits(),
        }
    }
}

impl Palette {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("background", &self.background),
            ("primary", &self.primary),
            ("accent", &self.accent),
            ("muted", &self.muted),
            ("digits", &self.digits),
        ]
    }

    pub fn validate(&self) -> Result<(), ThemeError> {
        for (field, value) in self.entries() {
            Rgb::parse_hex(field, value)?;
        }
        Ok(())
    }

    pub fn background(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse_hex("background", &self.background)
    }

    pub fn primary(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse_hex("primary", &self.primary)
    }

    pub fn accent(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse_hex("accent", &self.accent)
    }

    pub fn muted(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse_hex("muted", &self.muted)
    }

    pub fn digits(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse_hex("digits", &self.digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self {
            days: "DAYS".into(),
            hours: "HOURS".into(),
            minutes: "MINUTES".into(),
            seconds: "SECONDS".into(),
        }
    }
}

impl UnitLabels {
    pub fn get(&self, unit: TimeUnit) -> &str {
        match unit {
            TimeUnit::Days => &self.days,
            TimeUnit::Hours => &self.hours,
            TimeUnit::Minutes => &self.minutes,
            TimeUnit::Seconds => &self.seconds,
        }
    }
}

/// Copy for the panel shown once the target is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Label of the single action offered on the panel.
    pub action_label: String,
}

impl Default for Celebration {
    fn default() -> Self {
        Self {
            title: "IT'S TIME".into(),
            message: String::new(),
            action_label: "CONTINUE".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    /// Small tag shown above the headline.
    #[serde(default)]
    pub badge: String,
    pub headline: String,
    pub reached_headline: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub labels: UnitLabels,
    #[serde(default)]
    pub celebration: Celebration,
    #[serde(default)]
    pub palette: Palette,
    /// ASCII-art logo block.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub footer: Vec<String>,
}

impl Theme {
    /// Parse and validate a theme from TOML. `path` is only used in errors.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ThemeError> {
        let theme: Theme = toml::from_str(content).map_err(|e| ThemeError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        theme.validate()?;
        Ok(theme)
    }

    /// Serialize as a theme file, the same shape [`Theme::from_toml_str`] reads.
    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.id.trim().is_empty() {
            return Err(ThemeError::EmptyId);
        }
        self.palette.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn builtin_theme_exports_as_loadable_file() {
        let registry = ThemeRegistry::new();
        let eco = registry.get("eco").unwrap();
        let content = eco.to_toml_string().unwrap();
        assert!(content.contains("id = \"eco\""));
        assert!(content.contains("[palette]"));

        let parsed = Theme::from_toml_str(&content, Path::new("eco.toml")).unwrap();
        assert_eq!(parsed.id, "eco");
        assert_eq!(parsed.palette.background, eco.palette.background);
        assert_eq!(parsed.celebration.action_label, eco.celebration.action_label);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            Rgb::parse_hex("primary", "#d4af37").unwrap(),
            Rgb { r: 0xd4, g: 0xaf, b: 0x37 }
        );
        assert!(Rgb::parse_hex("primary", "d4af37").is_err());
        assert!(Rgb::parse_hex("primary", "#d4af3").is_err());
        assert!(Rgb::parse_hex("primary", "#zzzzzz").is_err());
    }

    #[test]
    fn minimal_theme_file_fills_defaults() {
        let toml_str = indoc! {r##"
            id = "launch"
            name = "Product Launch"
            headline = "LAUNCHING SOON"
            reached_headline = "WE ARE LIVE"

            [palette]
            primary = "#ff0066"
        "##};
        let theme = Theme::from_toml_str(toml_str, Path::new("launch.toml")).unwrap();
        assert_eq!(theme.labels.get(TimeUnit::Days), "DAYS");
        assert_eq!(theme.palette.primary, "#ff0066");
        assert_eq!(theme.palette.digits, "#ffffff");
        assert_eq!(theme.celebration.action_label, "CONTINUE");
        assert!(theme.footer.is_empty());
    }

    #[test]
    fn bad_palette_is_rejected() {
        let toml_str = indoc! {r##"
            id = "broken"
            name = "Broken"
            headline = "X"
            reached_headline = "Y"

            [palette]
            accent = "orange"
        "##};
        let err = Theme::from_toml_str(toml_str, Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { ref field, .. } if field == "accent"));
    }

    #[test]
    fn missing_required_fields_fail_to_parse() {
        let err = Theme::from_toml_str("id = \"x\"", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ThemeError::ParseFailed { .. }));
    }
}
