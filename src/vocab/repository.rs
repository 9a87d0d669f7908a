use super::core::{materialize, Language, TranslationGroup, TranslationPair, Word, WordId};
use crate::session::CategoryFilter;
use std::collections::{HashMap, HashSet};

/// Read-only queries the session builder needs from the vocabulary
pub trait WordRepository {
    /// Every word in `language`, one entry per group it appears in. Equal
    /// text in two groups yields two words sharing one id.
    fn words_by_language(&self, language: &Language) -> Vec<Word>;

    /// The translation of `word_id` into `target`, if the vocabulary has one
    fn resolve_translation(&self, word_id: &WordId, target: &Language) -> Option<Word>;

    /// Words of `language` admitted by `filter`, each id at most once.
    /// The filter runs first so a shared id stays eligible in every category
    /// it appears in.
    fn words_in_categories(&self, language: &Language, filter: &CategoryFilter) -> Vec<Word> {
        let mut seen = HashSet::new();
        self.words_by_language(language)
            .into_iter()
            .filter(|word| filter.admits(&word.category))
            .filter(|word| seen.insert(word.id.clone()))
            .collect()
    }
}

/// In-memory snapshot of a vocabulary, indexed for pair lookups
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    words: Vec<Word>,
    pairs: Vec<TranslationPair>,
    // word id -> indices into `pairs`, in materialization order
    pair_index: HashMap<WordId, Vec<usize>>,
    // word id -> first word carrying it (text and category come from here)
    by_id: HashMap<WordId, usize>,
}

impl MemoryRepository {
    pub fn new(groups: &[TranslationGroup]) -> Self {
        let (words, pairs) = materialize(groups);

        let mut pair_index: HashMap<WordId, Vec<usize>> = HashMap::new();
        for (idx, pair) in pairs.iter().enumerate() {
            pair_index.entry(pair.first.clone()).or_default().push(idx);
            pair_index.entry(pair.second.clone()).or_default().push(idx);
        }

        let mut by_id = HashMap::new();
        for (idx, word) in words.iter().enumerate() {
            by_id.entry(word.id.clone()).or_insert(idx);
        }

        Self {
            words,
            pairs,
            pair_index,
            by_id,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    fn word(&self, id: &WordId) -> Option<&Word> {
        self.by_id.get(id).map(|&idx| &self.words[idx])
    }
}

impl WordRepository for MemoryRepository {
    fn words_by_language(&self, language: &Language) -> Vec<Word> {
        self.words
            .iter()
            .filter(|word| &word.language == language)
            .cloned()
            .collect()
    }

    fn resolve_translation(&self, word_id: &WordId, target: &Language) -> Option<Word> {
        self.word(word_id)?;

        self.pair_index
            .get(word_id)?
            .iter()
            .filter_map(|&idx| self.pairs[idx].counterpart(word_id))
            .filter_map(|other| self.word(other))
            .find(|word| &word.language == target)
            .cloned()
    }
}
