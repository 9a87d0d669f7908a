use crate::session::{Phase, SessionConfig, SessionState, SessionWordPair};
use crate::vocab::Language;

/// Presentation-ready snapshot of a session. Re-derivable at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub source_language: &'a Language,
    pub target_language: &'a Language,
    /// None when there is nothing to play
    pub current: Option<&'a SessionWordPair>,
    pub index: usize,
    pub total: usize,
    pub phase: Phase,
    pub revealed: bool,
    pub paused: bool,
    pub countdown: u32,
    pub finished: bool,
    /// index / total
    pub progress: f64,
    /// countdown / duration of the current phase
    pub time_remaining: f64,
    /// every visited pair, available once finished
    pub recap: Option<&'a [SessionWordPair]>,
}

impl ViewModel<'_> {
    pub fn nothing_to_play(&self) -> bool {
        self.total == 0
    }
}

pub fn project<'a>(state: &'a SessionState, config: &'a SessionConfig) -> ViewModel<'a> {
    let total = state.total();
    let phase = state.phase();
    let finished = total > 0 && !state.running;

    let progress = if total == 0 {
        0.0
    } else {
        state.index as f64 / total as f64
    };
    let time_remaining = state.countdown as f64 / phase.duration_secs() as f64;

    let recap = if finished {
        let visited = (state.index + 1).min(total);
        Some(&state.pairs[..visited])
    } else {
        None
    };

    ViewModel {
        source_language: &config.source_language,
        target_language: &config.target_language,
        current: state.current_pair(),
        index: state.index,
        total,
        phase,
        revealed: state.revealed,
        paused: state.paused,
        countdown: state.countdown,
        finished,
        progress,
        time_remaining,
        recap,
    }
}
