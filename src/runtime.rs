use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Fine enough for the beat pulse to look in time at 240 bpm.
pub const TICK_RATE_MS: u64 = 20;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TapEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TapEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TapEvent, RecvTimeoutError>;
}

/// Production event source: a reader thread forwarding crossterm events.
pub struct CrosstermEventSource {
    rx: Receiver<TapEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // key repeats count as taps, releases do not
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(TapEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(TapEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if forwarded.is_err() {
                break;
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

impl TapEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TapEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for tests and headless drivers
pub struct TestEventSource {
    rx: Receiver<TapEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TapEvent>) -> Self {
        Self { rx }
    }
}

impl TapEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TapEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event or tick at a time
pub struct Runner<E: TapEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TapEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to one tick interval; a timeout or closed source is a Tick.
    pub fn step(&self) -> TapEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => TapEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        assert!(matches!(runner.step(), TapEvent::Tick));
    }

    #[test]
    fn step_returns_tick_when_source_closes() {
        let (tx, rx) = mpsc::channel::<TapEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::default());

        assert!(matches!(runner.step(), TapEvent::Tick));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TapEvent::Key(KeyEvent::new(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(TapEvent::Resize).unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        match runner.step() {
            TapEvent::Key(key) => assert_eq!(key.code, KeyCode::Char(' ')),
            other => panic!("expected key event, got {other:?}"),
        }
        assert!(matches!(runner.step(), TapEvent::Resize));
    }

    #[test]
    fn default_ticker_uses_tick_rate() {
        assert_eq!(
            FixedTicker::default().interval(),
            Duration::from_millis(TICK_RATE_MS)
        );
    }
}
