use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::theme::{Font, Theme};

pub const DEFAULT_WORD_COUNT: usize = 50;

/// Largest word count accepted from the command line or the preferences file
pub const MAX_WORD_COUNT: usize = 10_000;

/// Word counts offered as presets in the header
pub const WORD_COUNT_PRESETS: [usize; 6] = [10, 25, 50, 75, 100, 150];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("preferences i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences encoding: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub font: Font,
    pub count: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::system_default(),
            font: Font::default(),
            count: DEFAULT_WORD_COUNT,
        }
    }
}

/// On-disk shape: every value is a string, and any of them may be missing or
/// malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct StoredPreferences {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    font: Option<String>,
    #[serde(default)]
    count: Option<String>,
}

impl StoredPreferences {
    fn into_preferences(self) -> Preferences {
        let defaults = Preferences::default();
        Preferences {
            theme: self
                .theme
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.theme),
            font: self
                .font
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.font),
            count: self
                .count
                .as_deref()
                .and_then(parse_count)
                .unwrap_or(defaults.count),
        }
    }

    fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            theme: Some(prefs.theme.to_string()),
            font: Some(prefs.font.to_string()),
            count: Some(prefs.count.to_string()),
        }
    }
}

/// Word count in `1..=MAX_WORD_COUNT`, `None` for anything else
pub fn parse_count(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_WORD_COUNT).contains(n))
}

pub trait ConfigStore {
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::preferences_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Preferences {
        let stored = fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<StoredPreferences>(&bytes).ok())
            .unwrap_or_default();
        stored.into_preferences()
    }

    fn save(&self, prefs: &Preferences) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&StoredPreferences::from_preferences(prefs))?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Keeps preferences in memory only
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    saved: std::cell::RefCell<Option<Preferences>>,
}

impl MemoryConfigStore {
    pub fn last_saved(&self) -> Option<Preferences> {
        *self.saved.borrow()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Preferences {
        self.last_saved().unwrap_or_default()
    }

    fn save(&self, prefs: &Preferences) -> Result<(), ConfigError> {
        *self.saved.borrow_mut() = Some(*prefs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_preferences() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("preferences.json"));
        let prefs = Preferences::default();
        store.save(&prefs).unwrap();
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn save_and_load_custom_preferences() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested/preferences.json"));
        let prefs = Preferences {
            theme: Theme::Dracula,
            font: Font::FiraCode,
            count: 75,
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn values_are_stored_as_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let store = FileConfigStore::with_path(&path);
        store
            .save(&Preferences {
                theme: Theme::Nord,
                font: Font::Lexend,
                count: 25,
            })
            .unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "nord");
        assert_eq!(raw["font"], "Lexend");
        assert_eq!(raw["count"], "25");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Preferences::default());
    }

    #[test]
    fn malformed_fields_fall_back_individually() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(
            &path,
            br#"{"theme": "neon", "font": "Merriweather", "count": "lots"}"#,
        )
        .unwrap();

        let prefs = FileConfigStore::with_path(&path).load();
        assert_eq!(prefs.theme, Theme::system_default());
        assert_eq!(prefs.font, Font::Merriweather);
        assert_eq!(prefs.count, DEFAULT_WORD_COUNT);
    }

    #[test]
    fn oversized_stored_count_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, br#"{"count": "100000000000"}"#).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load().count, DEFAULT_WORD_COUNT);
    }

    #[test]
    fn parse_count_rejects_zero_and_negative() {
        assert_eq!(parse_count("100"), Some(100));
        assert_eq!(parse_count(" 10 "), Some(10));
        assert_eq!(parse_count("0"), None);
        assert_eq!(parse_count("-5"), None);
        assert_eq!(parse_count("ten"), None);
        assert_eq!(parse_count("10000"), Some(MAX_WORD_COUNT));
        assert_eq!(parse_count("10001"), None);
        assert_eq!(parse_count("100000000000"), None);
    }

    #[test]
    fn memory_store_keeps_last_write() {
        let store = MemoryConfigStore::default();
        assert_eq!(store.last_saved(), None);

        let mut prefs = Preferences::default();
        store.save(&prefs).unwrap();
        prefs.count = 10;
        store.save(&prefs).unwrap();
        assert_eq!(store.load().count, 10);
    }
}
