use crate::error::Result;
use crate::session::{SessionConfig, SessionState};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// One row of the session log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub finished_at: DateTime<Local>,
    pub source_language: String,
    pub target_language: String,
    pub requested: usize,
    pub played: usize,
    pub untranslated: usize,
    pub categories: String,
}

impl SessionRecord {
    pub fn new(config: &SessionConfig, state: &SessionState, finished_at: DateTime<Local>) -> Self {
        Self {
            finished_at,
            source_language: config.source_language.to_string(),
            target_language: config.target_language.to_string(),
            requested: config.word_count,
            played: state.total(),
            untranslated: state
                .pairs
                .iter()
                .filter(|pair| pair.target.is_placeholder())
                .count(),
            categories: config.categories.names().join(" "),
        }
    }
}

/// Append-only CSV log of finished sessions
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
}

impl History {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // A missing or empty log needs a header row
        let needs_header = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    pub fn records(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CategoryFilter, SessionWordPair};
    use crate::vocab::{Category, Language, Word};
    use tempfile::tempdir;

    fn finished_session() -> (SessionConfig, SessionState) {
        let config = SessionConfig {
            source_language: Language::new("fr"),
            target_language: Language::new("en"),
            word_count: 3,
            categories: CategoryFilter::from_names(["FRUIT", "ACTION"]),
        };
        let source = Word::new("pomme", Language::new("fr"), Category::new("FRUIT"));
        let pairs = vec![
            SessionWordPair {
                target: Word::new("apple", Language::new("en"), Category::new("FRUIT")),
                source: source.clone(),
            },
            SessionWordPair {
                target: Word::placeholder(&source, &Language::new("en")),
                source,
            },
        ];
        let mut state = SessionState::new(pairs);
        state.running = false;
        (config, state)
    }

    #[test]
    fn test_record_counts() {
        let (config, state) = finished_session();
        let record = SessionRecord::new(&config, &state, Local::now());
        assert_eq!(record.requested, 3);
        assert_eq!(record.played, 2);
        assert_eq!(record.untranslated, 1);
        assert_eq!(record.categories, "ACTION FRUIT");
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("history.csv");
        let history = History::with_path(&path);
        let (config, state) = finished_session();

        history.append(&SessionRecord::new(&config, &state, Local::now())).unwrap();
        history.append(&SessionRecord::new(&config, &state, Local::now())).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("finished_at").count(), 1);

        let records = history.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_language, "fr");
        assert_eq!(records[1].played, 2);
    }

    #[test]
    fn test_append_to_empty_log_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "").unwrap();
        let history = History::with_path(&path);
        let (config, state) = finished_session();

        history.append(&SessionRecord::new(&config, &state, Local::now())).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("finished_at,"));
        let records = history.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].untranslated, 1);
    }

    #[test]
    fn test_missing_log_has_no_records() {
        let dir = tempdir().unwrap();
        let history = History::with_path(dir.path().join("none.csv"));
        assert!(history.records().unwrap().is_empty());
    }
}
