use super::core::{materialize, Category, Language, TranslationGroup};
use crate::error::{Result, StoreError};
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

const DEFAULT_VOCABULARY_FILE: &str = "default_vocabulary.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDefinition {
    pub id: Language,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: Category,
    pub label: String,
}

/// The persisted vocabulary document: known languages plus translation groups
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    pub languages: Vec<LanguageDefinition>,
    pub groups: Vec<TranslationGroup>,
}

impl Vocabulary {
    /// The sample vocabulary compiled into the binary
    pub fn builtin() -> Self {
        // The file is part of the crate sources; failing here is a build defect.
        let file = DATA_DIR
            .get_file(DEFAULT_VOCABULARY_FILE)
            .expect("default vocabulary file not embedded");
        let json = file
            .contents_utf8()
            .expect("default vocabulary is not valid UTF-8");
        serde_json::from_str(json).expect("default vocabulary is not valid JSON")
    }

    /// Drop groups that have no non-empty translation. Returns how many were dropped.
    pub fn validate(&mut self) -> usize {
        let before = self.groups.len();
        self.groups.retain(|group| {
            let keep = group.has_any_translation();
            if !keep {
                log::warn!("Dropping translation group {} with no translations", group.id);
            }
            keep
        });
        before - self.groups.len()
    }

    pub fn language(&self, id: &Language) -> Option<&LanguageDefinition> {
        self.languages.iter().find(|lang| &lang.id == id)
    }

    pub fn require_language(&self, id: &Language) -> Result<&LanguageDefinition> {
        self.language(id)
            .ok_or_else(|| StoreError::UnknownLanguage(id.to_string()))
    }

    pub fn language_label(&self, id: &Language) -> String {
        self.language(id)
            .map(|lang| lang.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<CategoryInfo> {
        self.groups
            .iter()
            .map(|group| &group.category)
            .unique()
            .map(|id| CategoryInfo {
                id: id.clone(),
                label: category_label(id),
            })
            .collect()
    }

    /// Number of materialized words per known language
    pub fn word_counts(&self) -> Vec<(LanguageDefinition, usize)> {
        let (words, _) = materialize(&self.groups);
        let counts = words.iter().counts_by(|word| word.language.clone());
        self.languages
            .iter()
            .map(|lang| (lang.clone(), counts.get(&lang.id).copied().unwrap_or(0)))
            .collect()
    }
}

/// Human readable label for a category id
pub fn category_label(category: &Category) -> String {
    match category.as_str() {
        "CORPS_HUMAIN" => "Corps Humain".to_string(),
        "FRUIT" => "Fruit".to_string(),
        "ACTION" => "Action".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => {
                    let rest = chars.as_str().to_lowercase().replace('_', " ");
                    format!("{}{}", first.to_uppercase(), rest)
                }
                None => String::new(),
            }
        }
    }
}

pub trait VocabularyStore {
    fn load(&self) -> Result<Vocabulary>;
    fn save(&self, vocabulary: &Vocabulary) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileVocabularyStore {
    path: PathBuf,
}

impl FileVocabularyStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularyStore for FileVocabularyStore {
    /// A missing file yields the builtin vocabulary; a corrupt one is an error
    fn load(&self) -> Result<Vocabulary> {
        if !self.path.exists() {
            log::info!(
                "No vocabulary at {}, using builtin sample",
                self.path.display()
            );
            return Ok(Vocabulary::builtin());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut vocabulary: Vocabulary = serde_json::from_str(&content)?;
        vocabulary.validate();
        Ok(vocabulary)
    }

    fn save(&self, vocabulary: &Vocabulary) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(vocabulary)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_vocabulary() {
        let vocabulary = Vocabulary::builtin();
        assert_eq!(vocabulary.languages.len(), 3);
        assert!(!vocabulary.groups.is_empty());
        assert!(vocabulary.groups.iter().all(|g| g.has_any_translation()));
        assert_eq!(vocabulary.language_label(&Language::new("kr")), "Korean");
    }

    #[test]
    fn test_categories_first_seen_order() {
        let vocabulary = Vocabulary::builtin();
        let ids: Vec<_> = vocabulary
            .categories()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["CORPS_HUMAIN", "FRUIT", "ACTION"]);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label(&Category::new("CORPS_HUMAIN")), "Corps Humain");
        assert_eq!(category_label(&Category::new("MOYENS_DE_TRANSPORT")), "Moyens de transport");
        assert_eq!(category_label(&Category::new("")), "");
    }

    #[test]
    fn test_word_counts_skip_missing_entries() {
        let vocabulary = Vocabulary::builtin();
        let counts = vocabulary.word_counts();
        let fr = counts.iter().find(|(l, _)| l.id.as_str() == "fr").unwrap().1;
        let kr = counts.iter().find(|(l, _)| l.id.as_str() == "kr").unwrap().1;
        // "clean" has no French entry
        assert_eq!(kr, fr + 1);
    }

    #[test]
    fn test_require_language() {
        let vocabulary = Vocabulary::builtin();
        assert!(vocabulary.require_language(&Language::new("fr")).is_ok());
        assert_matches!(
            vocabulary.require_language(&Language::new("de")),
            Err(StoreError::UnknownLanguage(id)) if id == "de"
        );
    }

    #[test]
    fn test_validate_drops_empty_groups() {
        let mut vocabulary = Vocabulary {
            languages: vec![],
            groups: vec![
                TranslationGroup::new("a", "X", [(Language::new("fr"), "oui".to_string())]),
                TranslationGroup::new("b", "X", [(Language::new("fr"), "  ".to_string())]),
            ],
        };
        assert_eq!(vocabulary.validate(), 1);
        assert_eq!(vocabulary.groups.len(), 1);
        assert_eq!(vocabulary.groups[0].id, "a");
    }

    #[test]
    fn test_missing_file_loads_builtin() {
        let dir = tempdir().unwrap();
        let store = FileVocabularyStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load().unwrap(), Vocabulary::builtin());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileVocabularyStore::with_path(dir.path().join("nested").join("vocab.json"));
        let vocabulary = Vocabulary::builtin();
        store.save(&vocabulary).unwrap();
        assert_eq!(store.load().unwrap(), vocabulary);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileVocabularyStore::with_path(&path);
        assert_matches!(store.load(), Err(StoreError::Json(_)));
    }
}
