use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    accuracy::AccuracyScorer,
    classifier::{classify, TempoStatus},
    error::ConfigError,
    pid::{signed_error, PidEstimator, PidTerms},
    summary::SessionSummary,
    taps::TapLog,
    time_series::TimingPoint,
};

/// Validated tempo and length of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    bpm: f64,
    duration_secs: u64,
}

impl SessionConfig {
    pub fn new(bpm: f64, duration_secs: u64) -> Result<Self, ConfigError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ConfigError::InvalidBpm(bpm));
        }
        if duration_secs == 0 {
            return Err(ConfigError::InvalidDuration(duration_secs));
        }
        Ok(Self { bpm, duration_secs })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Milliseconds between ideal taps.
    pub fn target_interval_ms(&self) -> f64 {
        60_000.0 / self.bpm
    }
}

/// Everything produced by a single tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapOutcome {
    pub interval_ms: Option<f64>,
    pub error_ms: Option<f64>,
    pub pid: PidTerms,
    pub accuracy: Option<f64>,
    pub status: TempoStatus,
}

/// One practice run: configuration, the tap log and the analysis state
/// derived from it.
///
/// [`Session::advance`] is the only operation that moves the analysis
/// forward. The remaining accessors are pure reads and may be polled as
/// often as the display needs.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    taps: TapLog,
    pid: PidEstimator,
    accuracy: AccuracyScorer,
    running: bool,
    started_at: Option<Instant>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            taps: TapLog::new(),
            pid: PidEstimator::default(),
            accuracy: AccuracyScorer::new(),
            running: false,
            started_at: None,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn target_interval_ms(&self) -> f64 {
        self.config.target_interval_ms()
    }

    /// Change the tempo. Recorded taps were made against the old tempo, so
    /// the session is reset.
    pub fn set_target_bpm(&mut self, bpm: f64) -> Result<(), ConfigError> {
        self.config = SessionConfig::new(bpm, self.config.duration_secs)?;
        self.reset();
        Ok(())
    }

    pub fn set_duration_secs(&mut self, duration_secs: u64) -> Result<(), ConfigError> {
        self.config = SessionConfig::new(self.config.bpm, duration_secs)?;
        Ok(())
    }

    /// Discard taps, accuracy history and controller state.
    pub fn reset(&mut self) {
        self.taps.clear();
        self.pid.reset();
        self.accuracy.reset();
        self.running = false;
        self.started_at = None;
        debug!("session reset");
    }

    pub fn start(&mut self, now: Instant) {
        self.reset();
        self.running = true;
        self.started_at = Some(now);
        info!(
            bpm = self.config.bpm,
            duration_secs = self.config.duration_secs,
            "session started"
        );
    }

    /// Stop accepting taps from the front end and summarise the run.
    pub fn finish(&mut self) -> SessionSummary {
        self.running = false;
        let summary = self.summary();
        info!(
            taps = summary.tap_count,
            accuracy = summary.accuracy,
            consistency = summary.consistency,
            best_run = summary.best_run,
            "session finished"
        );
        summary
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed_ms(&self, now: Instant) -> Option<f64> {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64() * 1000.0)
    }

    pub fn seconds_remaining(&self, now: Instant) -> Option<f64> {
        self.elapsed_ms(now)
            .map(|elapsed| (self.config.duration_secs as f64 - elapsed / 1000.0).max(0.0))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.seconds_remaining(now)
            .is_some_and(|remaining| remaining <= 0.0)
    }

    /// Record a tap at `now`, measured from the session start. A session
    /// that was never started begins with this tap.
    pub fn tap_at(&mut self, now: Instant) -> TapOutcome {
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.running = true;
        }
        let timestamp_ms = self.elapsed_ms(now).unwrap_or_default();
        self.advance(timestamp_ms)
    }

    /// Record a tap and run one step of the analysis.
    pub fn advance(&mut self, timestamp_ms: f64) -> TapOutcome {
        let target_ms = self.target_interval_ms();
        let interval_ms = self.taps.add_tap(timestamp_ms);

        let (error_ms, pid, accuracy) = match interval_ms {
            Some(interval) => {
                let error = signed_error(interval, target_ms);
                let pid = self.pid.update(error);
                let accuracy = self.accuracy.record(interval, target_ms);
                (Some(error), pid, Some(accuracy))
            }
            None => (None, self.pid.peek(), None),
        };

        let status = self.status();
        debug!(
            timestamp_ms,
            interval_ms,
            error_ms,
            p = pid.p,
            i = pid.i,
            d = pid.d,
            accuracy,
            status = %status.state,
            "tap"
        );

        TapOutcome {
            interval_ms,
            error_ms,
            pid,
            accuracy,
            status,
        }
    }

    pub fn taps(&self) -> &TapLog {
        &self.taps
    }

    pub fn last_interval(&self) -> Option<f64> {
        self.taps.last_interval()
    }

    pub fn last_error(&self) -> Option<f64> {
        self.last_interval()
            .map(|interval| signed_error(interval, self.target_interval_ms()))
    }

    /// Controller terms from the latest interval; all zero before one exists.
    pub fn pid(&self) -> PidTerms {
        self.pid.peek()
    }

    pub fn last_accuracy(&self) -> Option<f64> {
        self.accuracy.last()
    }

    pub fn running_accuracy(&self) -> Option<f64> {
        self.accuracy.running()
    }

    pub fn accuracy_history(&self) -> &[f64] {
        self.accuracy.history()
    }

    pub fn status(&self) -> TempoStatus {
        classify(
            self.taps.interval_count(),
            self.last_error().unwrap_or_default(),
            &self.pid.peek(),
            self.target_interval_ms(),
        )
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_log(&self.taps, self.target_interval_ms())
    }

    pub fn timing_points(&self) -> Vec<TimingPoint> {
        TimingPoint::from_intervals(self.taps.intervals(), self.target_interval_ms())
    }
}
