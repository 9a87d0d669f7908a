use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "recall";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    /// $HOME/.local/state/recall, falling back to the platform data dir
    pub fn state_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else if let Some(pd) = Self::project() {
            pd.data_local_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn config_path() -> PathBuf {
        match Self::project() {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("recall_config.json"),
        }
    }

    pub fn vocabulary_path() -> PathBuf {
        match Self::project() {
            Some(pd) => pd.data_dir().join("vocabulary.json"),
            None => PathBuf::from("recall_vocabulary.json"),
        }
    }

    pub fn history_path() -> PathBuf {
        Self::state_dir().join("history.csv")
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir().join("recall.log")
    }
}
