use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Interval between session ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long the runner waits for input while no timer is running
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// One timer interval elapsed
    Tick,
    /// The event source is gone and no timer is running
    Disconnected,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Deadline based wall-clock timer for one session.
///
/// The timer keeps firing while a session is paused; it is the tick handler
/// that ignores ticks. Deadlines advance by exactly one interval per tick, so
/// a late poll never drops or merges seconds.
#[derive(Clone, Debug)]
pub struct SessionTimer {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl SessionTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
        }
    }

    /// (Re)arm the timer; the first tick is due one interval after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume at most one due tick
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_deadline {
            Some(deadline) if now >= deadline => {
                self.next_deadline = Some(deadline + self.interval);
                true
            }
            _ => false,
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks until the next input event or the timer's next tick, whichever
    /// comes first. Without a running timer only input events are returned.
    pub fn step(&self, timer: &mut SessionTimer) -> AppEvent {
        loop {
            let now = Instant::now();
            if timer.poll(now) {
                return AppEvent::Tick;
            }

            let wait = timer.time_until_next(now).unwrap_or(IDLE_POLL);
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if !timer.is_running() {
                        return AppEvent::Disconnected;
                    }
                    std::thread::sleep(wait);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn timer_fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = SessionTimer::new(Duration::from_secs(1));
        timer.start(start);

        assert!(!timer.poll(start + Duration::from_millis(999)));
        assert!(timer.poll(start + Duration::from_secs(1)));
        assert!(!timer.poll(start + Duration::from_millis(1500)));
        assert!(timer.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn late_poll_drains_backlog_one_tick_at_a_time() {
        let start = Instant::now();
        let mut timer = SessionTimer::new(Duration::from_secs(1));
        timer.start(start);

        let late = start + Duration::from_millis(3500);
        let fired = (0..10).filter(|_| timer.poll(late)).count();
        assert_eq!(fired, 3);
    }

    #[test]
    fn stopped_timer_never_fires() {
        let start = Instant::now();
        let mut timer = SessionTimer::new(Duration::from_secs(1));
        timer.start(start);
        timer.stop();

        assert!(!timer.is_running());
        assert!(!timer.poll(start + Duration::from_secs(10)));
        assert_eq!(timer.time_until_next(start), None);
    }

    #[test]
    fn restart_rearms_from_new_origin() {
        let start = Instant::now();
        let mut timer = SessionTimer::new(Duration::from_secs(1));
        timer.start(start);

        let later = start + Duration::from_millis(800);
        timer.stop();
        timer.start(later);
        assert!(!timer.poll(start + Duration::from_secs(1)));
        assert!(timer.poll(later + Duration::from_secs(1)));
    }

    #[test]
    fn step_returns_tick_when_deadline_passes() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx));
        let mut timer = SessionTimer::new(Duration::from_millis(1));
        timer.start(Instant::now());

        match runner.step(&mut timer) {
            AppEvent::Tick => {}
            other => panic!("expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)))
            .unwrap();
        let runner = Runner::new(TestEventSource::new(rx));
        let mut timer = SessionTimer::new(Duration::from_secs(60));
        timer.start(Instant::now());

        match runner.step(&mut timer) {
            AppEvent::Key(key) => assert_eq!(key.code, KeyCode::Char(' ')),
            other => panic!("expected Key event, got {other:?}"),
        }
    }

    #[test]
    fn step_reports_disconnect_without_timer() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));
        let mut timer = SessionTimer::default();

        match runner.step(&mut timer) {
            AppEvent::Disconnected => {}
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }
}
