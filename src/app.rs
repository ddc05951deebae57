use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::{
    config::Config,
    error::ConfigError,
    metronome::Metronome,
    session::{Session, TapOutcome},
    summary::SessionSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Ready,
    Tapping,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Set when a new metronome beat was reached on this tick.
    pub beat: Option<u64>,
    /// Set when the session ran out of time on this tick.
    pub finished: bool,
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub session: Session,
    pub metronome: Metronome,
    pub state: AppState,
    pub summary: Option<SessionSummary>,
    pub last_outcome: Option<TapOutcome>,
    clock: Instant,
}

impl App {
    pub fn new(config: Config, now: Instant) -> Result<Self, ConfigError> {
        let session = Session::new(config.session_config()?);
        let metronome = Metronome::new(session.target_interval_ms());
        Ok(Self {
            config,
            session,
            metronome,
            state: AppState::Ready,
            summary: None,
            last_outcome: None,
            clock: now,
        })
    }

    /// Time of the latest event, used when rendering.
    pub fn clock(&self) -> Instant {
        self.clock
    }

    pub fn elapsed_ms(&self) -> Option<f64> {
        self.session.elapsed_ms(self.clock)
    }

    pub fn seconds_remaining(&self) -> Option<f64> {
        self.session.seconds_remaining(self.clock)
    }

    pub fn start(&mut self, now: Instant) {
        self.clock = now;
        self.session.start(now);
        self.metronome = Metronome::new(self.session.target_interval_ms());
        self.summary = None;
        self.last_outcome = None;
        self.state = AppState::Tapping;
    }

    pub fn finish(&mut self) {
        self.summary = Some(self.session.finish());
        self.state = AppState::Results;
    }

    pub fn back_to_ready(&mut self) {
        self.session.reset();
        self.metronome.reset();
        self.summary = None;
        self.last_outcome = None;
        self.state = AppState::Ready;
    }

    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        self.clock = now;
        if self.state != AppState::Tapping {
            return TickOutcome::default();
        }

        let beat = self
            .session
            .elapsed_ms(now)
            .and_then(|elapsed| self.metronome.poll(elapsed));

        let finished = self.session.is_expired(now);
        if finished {
            self.finish();
        }
        TickOutcome { beat, finished }
    }

    pub fn tap(&mut self, now: Instant) -> TapOutcome {
        self.clock = now;
        let outcome = self.session.tap_at(now);
        self.last_outcome = Some(outcome);
        outcome
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        self.clock = now;
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match self.state {
            AppState::Ready => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
                KeyCode::Enter | KeyCode::Char(' ') => self.start(now),
                KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => self.adjust_bpm(-10),
                KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => self.adjust_bpm(10),
                KeyCode::Left | KeyCode::Char('-') => self.adjust_bpm(-1),
                KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_bpm(1),
                KeyCode::PageDown => self.adjust_bpm(-10),
                KeyCode::PageUp => self.adjust_bpm(10),
                KeyCode::Up => self.adjust_duration(5),
                KeyCode::Down => self.adjust_duration(-5),
                _ => {}
            },
            AppState::Tapping => match key.code {
                KeyCode::Esc => self.finish(),
                KeyCode::Char(_) | KeyCode::Enter => {
                    self.tap(now);
                }
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
                KeyCode::Char('r') => self.start(now),
                KeyCode::Char('n') => self.back_to_ready(),
                _ => {}
            },
        }

        KeyAction::Continue
    }

    fn adjust_bpm(&mut self, delta: i32) {
        self.config.adjust_bpm(delta);
        match self.session.set_target_bpm(self.config.bpm as f64) {
            Ok(()) => {
                self.metronome = Metronome::new(self.session.target_interval_ms());
                info!(bpm = self.config.bpm, "tempo changed");
            }
            Err(err) => warn!(error = %err, "tempo change rejected"),
        }
    }

    fn adjust_duration(&mut self, delta: i64) {
        self.config.adjust_duration(delta);
        if let Err(err) = self.session.set_duration_secs(self.config.duration_secs) {
            warn!(error = %err, "duration change rejected");
        }
    }
}
