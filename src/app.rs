use crate::{
    clock::{ClockState, GameClock},
    history::{History, SessionRecord},
    runtime::SessionTimer,
    session::SessionConfig,
    view_model::{project, ViewModel},
    vocab::{MemoryRepository, Vocabulary},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// What the event loop should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// User intents, decoded from key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Advance,
    TogglePause,
    Restart,
    Quit,
}

impl Intent {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Intent::Quit);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Quit),
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Intent::TogglePause),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') => Some(Intent::Advance),
            KeyCode::Char('r') => Some(Intent::Restart),
            _ => None,
        }
    }
}

/// Owns the running session, its timer and the vocabulary it was drawn from
pub struct App {
    pub vocabulary: Vocabulary,
    repository: MemoryRepository,
    clock: GameClock,
    timer: SessionTimer,
    history: Option<History>,
}

impl App {
    pub fn new(config: SessionConfig, vocabulary: Vocabulary, history: Option<History>) -> Self {
        let repository = MemoryRepository::new(&vocabulary.groups);
        let clock = GameClock::start(config, &repository);

        let mut app = Self {
            vocabulary,
            repository,
            clock,
            timer: SessionTimer::default(),
            history,
        };
        app.arm_timer(Instant::now());
        app
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn timer_mut(&mut self) -> &mut SessionTimer {
        &mut self.timer
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        project(self.clock.state(), self.clock.config())
    }

    // An empty session never acquires the timer
    fn arm_timer(&mut self, now: Instant) {
        if self.clock.is_playing() {
            self.timer.start(now);
        } else {
            self.timer.stop();
        }
    }

    pub fn on_tick(&mut self) {
        let was_finished = self.clock.is_finished();
        self.clock.tick();
        self.after_transition(was_finished);
    }

    pub fn apply(&mut self, intent: Intent) -> Control {
        match intent {
            Intent::Quit => {
                self.timer.stop();
                return Control::Quit;
            }
            Intent::Advance => {
                let was_finished = self.clock.is_finished();
                self.clock.advance();
                self.after_transition(was_finished);
            }
            Intent::TogglePause => self.clock.toggle_pause(),
            Intent::Restart => self.restart(),
        }
        Control::Continue
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        match Intent::from_key(key) {
            Some(intent) => self.apply(intent),
            None => Control::Continue,
        }
    }

    /// Stop the old timer before the new session exists, then re-arm for it
    pub fn restart(&mut self) {
        self.timer.stop();
        self.clock.restart(&self.repository);
        self.arm_timer(Instant::now());
    }

    fn after_transition(&mut self, was_finished: bool) {
        if was_finished || self.clock.status() != ClockState::Finished {
            return;
        }

        self.timer.stop();
        if let Some(history) = &self.history {
            let record = SessionRecord::new(
                self.clock.config(),
                self.clock.state(),
                chrono::Local::now(),
            );
            if let Err(e) = history.append(&record) {
                log::warn!("Failed to record session history: {}", e);
            }
        }
    }
}
