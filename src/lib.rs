// Library surface: the tempo analysis engine plus the terminal front end,
// kept here so headless and integration tests can drive it without a TTY.
pub mod accuracy;
pub mod app;
pub mod app_dirs;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod metronome;
pub mod pid;
pub mod runtime;
pub mod session;
pub mod summary;
pub mod taps;
pub mod time_series;
pub mod ui;
pub mod util;

pub use app::{App, AppState};
pub use session::{Session, SessionConfig, TapOutcome};
