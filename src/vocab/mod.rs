pub mod core;
pub mod interchange;
pub mod repository;
pub mod store;

pub use core::{
    fallback_id, materialize, word_id, Category, Language, TranslationGroup, TranslationPair,
    Word, WordId, MISSING_TRANSLATION_TEXT,
};
pub use repository::{MemoryRepository, WordRepository};
pub use store::{
    category_label, CategoryInfo, FileVocabularyStore, LanguageDefinition, Vocabulary,
    VocabularyStore,
};
