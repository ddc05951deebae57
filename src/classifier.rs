//! Qualitative tempo feedback derived from the latest interval error and the
//! controller terms.
//!
//! All thresholds are fractions of the target interval.

use crate::pid::PidTerms;

pub const PERFECT_THRESHOLD: f64 = 0.02;
pub const GOOD_THRESHOLD: f64 = 0.05;
/// Not consulted by [`classify`]; kept for coarser visual grading.
pub const ACCEPTABLE_THRESHOLD: f64 = 0.10;

/// Integral magnitude, relative to target, above which a bias is reported.
pub const BIAS_THRESHOLD: f64 = 0.10;
/// Derivative magnitude, relative to target, above which a trend is reported.
pub const TREND_THRESHOLD: f64 = 0.05;

/// Intervals needed before the classifier gives an opinion.
pub const MIN_INTERVALS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TempoState {
    WarmingUp,
    OnTime,
    Rushing,
    Dragging,
    Accelerating,
    Decelerating,
}

/// Display grouping for a status, independent of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusClass {
    Neutral,
    Perfect,
    /// sustained drift picked up by the integral term
    Bias,
    /// rate of change picked up by the derivative term
    Trend,
    /// single-tap miss
    Slight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoStatus {
    pub state: TempoState,
    pub text: &'static str,
    pub class: StatusClass,
}

impl TempoStatus {
    const fn new(state: TempoState, text: &'static str, class: StatusClass) -> Self {
        Self { state, text, class }
    }

    pub const WARMING_UP: TempoStatus =
        TempoStatus::new(TempoState::WarmingUp, "Warming up...", StatusClass::Neutral);
}

/// Map the latest error and controller terms to a tempo status.
///
/// First match wins: too little data, on-time, sustained bias (integral),
/// trend (derivative), then the sign of the raw error.
pub fn classify(interval_count: usize, error: f64, pid: &PidTerms, target_ms: f64) -> TempoStatus {
    use StatusClass::*;
    use TempoState::*;

    if interval_count < MIN_INTERVALS {
        return TempoStatus::WARMING_UP;
    }

    if error.abs() / target_ms < PERFECT_THRESHOLD {
        return TempoStatus::new(OnTime, "Perfect timing!", Perfect);
    }

    if pid.i.abs() > target_ms * BIAS_THRESHOLD {
        return if pid.i < 0.0 {
            TempoStatus::new(Rushing, "Rushing: consistently ahead of the beat", Bias)
        } else {
            TempoStatus::new(Dragging, "Dragging: consistently behind the beat", Bias)
        };
    }

    if pid.d.abs() > target_ms * TREND_THRESHOLD {
        return if pid.d < 0.0 {
            TempoStatus::new(Accelerating, "Accelerating: taps are speeding up", Trend)
        } else {
            TempoStatus::new(Decelerating, "Decelerating: taps are slowing down", Trend)
        };
    }

    if error < 0.0 {
        TempoStatus::new(Rushing, "Slightly rushing", Slight)
    } else {
        TempoStatus::new(Dragging, "Slightly dragging", Slight)
    }
}

/// Per-interval grade used to colour and size the tap dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TimingBucket {
    Perfect,
    Good,
    Off,
}

impl TimingBucket {
    pub fn of(interval_ms: f64, target_ms: f64) -> Self {
        let error_percent = (interval_ms - target_ms).abs() / target_ms;
        if error_percent < PERFECT_THRESHOLD {
            TimingBucket::Perfect
        } else if error_percent < GOOD_THRESHOLD {
            TimingBucket::Good
        } else {
            TimingBucket::Off
        }
    }
}
