use crate::vocab::{Category, Language, Word};
use std::collections::BTreeSet;

/// Seconds a learner sees only the source word
pub const MEMORIZE_SECS: u32 = 10;
/// Seconds the translation stays on screen before auto-advance
pub const REVEAL_SECS: u32 = 5;

/// Category value that disables filtering
pub const ALL_CATEGORIES: &str = "all";

/// The two halves of one per-word cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Memorize,
    Reveal,
}

impl Phase {
    pub fn duration_secs(self) -> u32 {
        match self {
            Phase::Memorize => MEMORIZE_SECS,
            Phase::Reveal => REVEAL_SECS,
        }
    }
}

/// Which categories a session draws from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(BTreeSet<Category>),
}

impl CategoryFilter {
    /// An empty list or one containing the `all` sentinel means no filtering
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.eq_ignore_ascii_case(ALL_CATEGORIES) {
                return CategoryFilter::All;
            }
            if !name.is_empty() {
                set.insert(Category::new(name));
            }
        }

        if set.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(set)
        }
    }

    pub fn admits(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(set) => set.contains(category),
        }
    }

    pub fn names(&self) -> Vec<String> {
        match self {
            CategoryFilter::All => vec![ALL_CATEGORIES.to_string()],
            CategoryFilter::Only(set) => set.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Parameters fixed for the lifetime of one session (and its restarts)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub source_language: Language,
    pub target_language: Language,
    pub word_count: usize,
    pub categories: CategoryFilter,
}

/// One session entry: a source word and its resolved (or placeholder) translation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionWordPair {
    pub source: Word,
    pub target: Word,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub pairs: Vec<SessionWordPair>,
    pub index: usize,
    /// true once the current pair's translation is showing
    pub revealed: bool,
    pub paused: bool,
    pub countdown: u32,
    pub running: bool,
}

impl SessionState {
    pub fn new(pairs: Vec<SessionWordPair>) -> Self {
        Self {
            pairs,
            index: 0,
            revealed: false,
            paused: false,
            countdown: MEMORIZE_SECS,
            running: true,
        }
    }

    pub fn total(&self) -> usize {
        self.pairs.len()
    }

    /// Zero pairs: there is nothing to play and the clock must not be driven
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn phase(&self) -> Phase {
        if self.revealed {
            Phase::Reveal
        } else {
            Phase::Memorize
        }
    }

    pub fn current_pair(&self) -> Option<&SessionWordPair> {
        self.pairs.get(self.index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_durations() {
        assert_eq!(Phase::Memorize.duration_secs(), 10);
        assert_eq!(Phase::Reveal.duration_secs(), 5);
        assert_eq!(Phase::Reveal.to_string(), "Reveal");
    }

    #[test]
    fn test_filter_all_sentinel_wins() {
        let filter = CategoryFilter::from_names(["FRUIT", "all"]);
        assert_eq!(filter, CategoryFilter::All);
        assert!(filter.admits(&Category::new("ANYTHING")));
    }

    #[test]
    fn test_filter_empty_means_all() {
        let names: [&str; 0] = [];
        assert_eq!(CategoryFilter::from_names(names), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_names(["", " "]), CategoryFilter::All);
    }

    #[test]
    fn test_filter_only_listed() {
        let filter = CategoryFilter::from_names(["FRUIT", "ACTION"]);
        assert!(filter.admits(&Category::new("FRUIT")));
        assert!(!filter.admits(&Category::new("CORPS_HUMAIN")));
        assert_eq!(filter.names(), vec!["ACTION", "FRUIT"]);
    }

    #[test]
    fn test_new_state_starts_in_memorize() {
        let state = SessionState::new(vec![]);
        assert_eq!(state.index, 0);
        assert_eq!(state.countdown, MEMORIZE_SECS);
        assert_eq!(state.phase(), Phase::Memorize);
        assert!(state.running);
        assert!(!state.paused);
        assert!(state.is_empty());
        assert!(state.current_pair().is_none());
    }
}
