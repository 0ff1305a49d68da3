use std::path::Path;

use tracing::{debug, warn};

use super::builtin::{builtin_themes, DEFAULT_THEME_ID};
use super::Theme;
use crate::error::ThemeError;

/// Built-in themes plus any loaded from disk, keyed by id.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self {
            themes: builtin_themes(),
        }
    }

    pub fn default_id() -> &'static str {
        DEFAULT_THEME_ID
    }

    /// Add a theme, replacing any existing one with the same id.
    pub fn insert(&mut self, theme: Theme) -> Result<Option<Theme>, ThemeError> {
        theme.validate()?;
        match self.themes.iter_mut().find(|t| t.id == theme.id) {
            Some(existing) => Ok(Some(std::mem::replace(existing, theme))),
            None => {
                self.themes.push(theme);
                Ok(None)
            }
        }
    }

    /// Load every `*.toml` file in `dir`. A missing directory loads nothing.
    ///
    /// Returns the number of themes loaded. The first malformed file aborts
    /// the load with its error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ThemeError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => {
                debug!(dir = %dir.display(), "no custom themes directory");
                return Ok(0);
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let content = std::fs::read_to_string(&path).map_err(|e| ThemeError::ParseFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let theme = Theme::from_toml_str(&content, &path)?;
            let id = theme.id.clone();
            if self.insert(theme)?.is_some() {
                warn!(theme = %id, path = %path.display(), "custom theme overrides existing theme");
            }
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn get(&self, id: &str) -> Result<&Theme, ThemeError> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ThemeError::NotFound {
                id: id.to_string(),
                available: self.ids().join(", "),
            })
    }

    pub fn ids(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_four_builtins() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.ids(), vec!["cyberpunk", "black-gold", "eco", "tech"]);
        assert_eq!(registry.get("eco").unwrap().name, "Eco Marathon");
    }

    #[test]
    fn unknown_id_lists_available() {
        let registry = ThemeRegistry::new();
        let err = registry.get("vaporwave").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("vaporwave"));
        assert!(msg.contains("black-gold"));
    }

    #[test]
    fn load_dir_adds_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("launch.toml"),
            "id = \"launch\"\nname = \"Launch\"\nheadline = \"SOON\"\nreached_headline = \"LIVE\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("tech.toml"),
            "id = \"tech\"\nname = \"Tech (custom)\"\nheadline = \"H\"\nreached_headline = \"R\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = ThemeRegistry::new();
        assert_eq!(registry.load_dir(dir.path()).unwrap(), 2);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("tech").unwrap().name, "Tech (custom)");
        assert!(registry.get("launch").is_ok());
    }

    #[test]
    fn load_dir_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ThemeRegistry::new();
        assert_eq!(registry.load_dir(&dir.path().join("nope")).unwrap(), 0);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn load_dir_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.toml"), "id = ").unwrap();
        let mut registry = ThemeRegistry::new();
        assert!(matches!(
            registry.load_dir(dir.path()),
            Err(ThemeError::ParseFailed { .. })
        ));
    }
}
