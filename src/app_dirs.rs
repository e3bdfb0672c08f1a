use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "highkey")
    }

    pub fn preferences_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("highkey_preferences.json"))
    }

    /// Where log files go; the terminal itself belongs to the UI.
    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("highkey")
        } else {
            Self::project()
                .map(|pd| pd.data_local_dir().to_path_buf())
                .unwrap_or_else(std::env::temp_dir)
        }
    }
}
