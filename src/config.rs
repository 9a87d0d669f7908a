use crate::app_dirs::AppDirs;
use crate::session::{CategoryFilter, SessionConfig, ALL_CATEGORIES};
use crate::vocab::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted session defaults; command line flags override them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub source_language: String,
    pub target_language: String,
    pub word_count: usize,
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: "fr".to_string(),
            target_language: "kr".to_string(),
            word_count: 5,
            categories: vec![ALL_CATEGORIES.to_string()],
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            source_language: Language::new(cfg.source_language.clone()),
            target_language: Language::new(cfg.target_language.clone()),
            word_count: cfg.word_count,
            categories: CategoryFilter::from_names(&cfg.categories),
        }
    }
}

impl From<&SessionConfig> for Config {
    fn from(sc: &SessionConfig) -> Self {
        Self {
            source_language: sc.source_language.to_string(),
            target_language: sc.target_language.to_string(),
            word_count: sc.word_count,
            categories: sc.categories.names(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("Ignoring unreadable config {}: {}", self.path.display(), e),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
