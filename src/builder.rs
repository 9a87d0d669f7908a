use crate::{
    session::{SessionConfig, SessionState, SessionWordPair},
    vocab::{Word, WordRepository},
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Selects and pairs the words for one session
pub struct SessionBuilder;

impl SessionBuilder {
    /// Build a fresh session with the thread-local RNG
    pub fn build<W: WordRepository + ?Sized>(config: &SessionConfig, repository: &W) -> SessionState {
        Self::build_with_rng(config, repository, &mut rand::thread_rng())
    }

    /// Build a session drawing the shuffle from `rng`; the shuffle is the only
    /// source of randomness, so a seeded rng gives a reproducible session.
    pub fn build_with_rng<W, R>(config: &SessionConfig, repository: &W, rng: &mut R) -> SessionState
    where
        W: WordRepository + ?Sized,
        R: Rng + ?Sized,
    {
        let mut words =
            repository.words_in_categories(&config.source_language, &config.categories);
        let available = words.len();

        words.shuffle(rng);
        words.truncate(config.word_count);

        let pairs: Vec<SessionWordPair> = words
            .into_iter()
            .map(|source| pair_with_translation(source, config, repository))
            .collect();

        log::info!(
            "Built {} -> {} session: {} pairs ({} requested, {} available)",
            config.source_language,
            config.target_language,
            pairs.len(),
            config.word_count,
            available
        );

        SessionState::new(pairs)
    }
}

fn pair_with_translation<W: WordRepository + ?Sized>(
    source: Word,
    config: &SessionConfig,
    repository: &W,
) -> SessionWordPair {
    let target = match repository.resolve_translation(&source.id, &config.target_language) {
        Some(word) => word,
        None => {
            log::warn!(
                "No {} translation for {}, using placeholder",
                config.target_language,
                source.id
            );
            Word::placeholder(&source, &config.target_language)
        }
    };

    SessionWordPair { source, target }
}
