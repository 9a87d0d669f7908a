use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Text shown in place of a translation the vocabulary does not have
pub const MISSING_TRANSLATION_TEXT: &str = "Translation unavailable";

/// Identifier of a human language ("fr", "kr", "en", ...). The set of valid
/// languages is configuration, so this is an open newtype rather than an enum.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Semantic grouping of words ("CORPS_HUMAIN", "FRUIT", ...)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Category {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Deterministic word identifier derived from (language, normalized text)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Id of a word: identical text in the same language always yields the same id,
/// even across groups or categories.
pub fn word_id(language: &Language, text: &str) -> WordId {
    WordId(format!("{}_{}", language, normalize(text)))
}

/// Id of the placeholder standing in for a missing translation of `source_text`
pub fn fallback_id(language: &Language, source_text: &str) -> WordId {
    WordId(format!("fallback_{}_{}", language, normalize(source_text)))
}

/// Unit of authoring: one meaning expressed in several languages
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationGroup {
    pub id: String,
    pub category: Category,
    pub translations: BTreeMap<Language, String>,
}

impl TranslationGroup {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<Category>,
        translations: impl IntoIterator<Item = (Language, String)>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            translations: translations.into_iter().collect(),
        }
    }

    /// Language entries with non-blank text, in language order
    pub fn populated(&self) -> impl Iterator<Item = (&Language, &str)> {
        self.translations
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(lang, text)| (lang, text.as_str()))
    }

    pub fn has_any_translation(&self) -> bool {
        self.populated().next().is_some()
    }
}

/// A single word materialized from one populated entry of a group
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub language: Language,
    pub category: Category,
}

impl Word {
    pub fn new(text: impl Into<String>, language: Language, category: Category) -> Self {
        let text = text.into();
        Self {
            id: word_id(&language, &text),
            text,
            language,
            category,
        }
    }

    /// Stand-in target for `source` when no translation into `language` exists
    pub fn placeholder(source: &Word, language: &Language) -> Self {
        Self {
            id: fallback_id(language, &source.text),
            text: MISSING_TRANSLATION_TEXT.to_string(),
            language: language.clone(),
            category: source.category.clone(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.as_str().starts_with("fallback_")
    }
}

/// Unordered link between two words of the same group
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationPair {
    pub id: String,
    pub first: WordId,
    pub second: WordId,
}

impl TranslationPair {
    pub fn counterpart(&self, id: &WordId) -> Option<&WordId> {
        if &self.first == id {
            Some(&self.second)
        } else if &self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Flatten groups into words plus one pair per combination of a group's words
pub fn materialize(groups: &[TranslationGroup]) -> (Vec<Word>, Vec<TranslationPair>) {
    let mut words = Vec::new();
    let mut pairs = Vec::new();

    for group in groups {
        let in_group: Vec<Word> = group
            .populated()
            .map(|(lang, text)| Word::new(text, lang.clone(), group.category.clone()))
            .collect();

        for i in 0..in_group.len() {
            for j in (i + 1)..in_group.len() {
                pairs.push(TranslationPair {
                    id: format!("{}_{}_{}", group.id, i, j),
                    first: in_group[i].id.clone(),
                    second: in_group[j].id.clone(),
                });
            }
        }

        words.extend(in_group);
    }

    (words, pairs)
}
