use crate::{
    builder::SessionBuilder,
    session::{Phase, SessionConfig, SessionState, REVEAL_SECS},
    vocab::WordRepository,
};
use rand::Rng;

/// Externally visible state of the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum ClockState {
    Memorizing,
    Revealing,
    Paused(Phase),
    Finished,
    /// Built from an empty word supply; never driven
    Empty,
}

/// Drives one session through its pairs on one-second ticks.
///
/// The clock is the only writer of its [`SessionState`]. Every intent is
/// infallible: intents that make no sense in the current state are no-ops.
#[derive(Debug, Clone)]
pub struct GameClock {
    config: SessionConfig,
    state: SessionState,
}

impl GameClock {
    pub fn new(config: SessionConfig, state: SessionState) -> Self {
        Self { config, state }
    }

    /// Build the first session for `config` and wrap it in a clock
    pub fn start<W: WordRepository + ?Sized>(config: SessionConfig, repository: &W) -> Self {
        let state = SessionBuilder::build(&config, repository);
        Self::new(config, state)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> ClockState {
        let state = &self.state;
        if state.is_empty() {
            ClockState::Empty
        } else if !state.running {
            ClockState::Finished
        } else if state.paused {
            ClockState::Paused(state.phase())
        } else {
            match state.phase() {
                Phase::Memorize => ClockState::Memorizing,
                Phase::Reveal => ClockState::Revealing,
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.running && !self.state.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.status() == ClockState::Finished
    }

    /// One elapsed second. Ignored while paused, finished or empty.
    pub fn tick(&mut self) {
        if !self.is_playing() || self.state.paused {
            return;
        }

        self.state.countdown = self.state.countdown.saturating_sub(1);
        if self.state.countdown > 0 {
            return;
        }

        match self.state.phase() {
            Phase::Memorize => {
                self.state.revealed = true;
                self.state.countdown = REVEAL_SECS;
                log::debug!("Revealing pair {}", self.state.index);
            }
            Phase::Reveal => self.advance(),
        }
    }

    /// Move to the next pair, or finish after the last one
    pub fn advance(&mut self) {
        if !self.is_playing() {
            return;
        }

        if self.state.is_last() {
            self.state.running = false;
            self.state.paused = false;
            log::info!("Session finished after {} pairs", self.state.total());
        } else {
            self.state.index += 1;
            self.state.revealed = false;
            self.state.countdown = Phase::Memorize.duration_secs();
            self.state.paused = false;
            log::debug!("Advanced to pair {}", self.state.index);
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.state.paused = !self.state.paused;
        log::debug!("Paused: {}", self.state.paused);
    }

    /// Discard the current session and draw a new one from the same config
    pub fn restart<W: WordRepository + ?Sized>(&mut self, repository: &W) {
        self.state = SessionBuilder::build(&self.config, repository);
    }

    pub fn restart_with_rng<W, R>(&mut self, repository: &W, rng: &mut R)
    where
        W: WordRepository + ?Sized,
        R: Rng + ?Sized,
    {
        self.state = SessionBuilder::build_with_rng(&self.config, repository, rng);
    }
}
