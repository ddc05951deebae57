//! End-of-session statistics. Everything here is a pure function of the tap
//! log and the target interval.

use std::fmt;

use crate::{
    accuracy::interval_accuracy,
    classifier::PERFECT_THRESHOLD,
    pid::signed_error,
    taps::TapLog,
    util::{mean, mean_abs_step, std_dev},
};

/// Mean signed error below this fraction of the target counts as balanced.
pub const BALANCED_THRESHOLD: f64 = PERFECT_THRESHOLD;
pub const VERY_STABLE_THRESHOLD: f64 = 0.05;
pub const MODERATELY_STABLE_THRESHOLD: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tendency {
    Balanced,
    Rushing { avg_ms: f64 },
    Dragging { avg_ms: f64 },
}

impl Tendency {
    pub fn from_mean_error(mean_error_ms: f64, target_ms: f64) -> Self {
        if mean_error_ms.abs() / target_ms < BALANCED_THRESHOLD {
            Tendency::Balanced
        } else if mean_error_ms < 0.0 {
            Tendency::Rushing {
                avg_ms: mean_error_ms.abs(),
            }
        } else {
            Tendency::Dragging {
                avg_ms: mean_error_ms,
            }
        }
    }
}

impl fmt::Display for Tendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tendency::Balanced => write!(f, "balanced"),
            Tendency::Rushing { avg_ms } => write!(f, "rushing (avg {}ms early)", avg_ms.round()),
            Tendency::Dragging { avg_ms } => write!(f, "dragging (avg {}ms late)", avg_ms.round()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StabilityTier {
    #[strum(serialize = "very stable")]
    VeryStable,
    #[strum(serialize = "moderately stable")]
    ModeratelyStable,
    #[strum(serialize = "inconsistent")]
    Inconsistent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stability {
    /// Mean absolute change between neighbouring intervals.
    pub mean_step_ms: f64,
    pub tier: StabilityTier,
}

impl Stability {
    pub fn from_mean_step(mean_step_ms: f64, target_ms: f64) -> Self {
        let ratio = mean_step_ms / target_ms;
        let tier = if ratio < VERY_STABLE_THRESHOLD {
            StabilityTier::VeryStable
        } else if ratio < MODERATELY_STABLE_THRESHOLD {
            StabilityTier::ModeratelyStable
        } else {
            StabilityTier::Inconsistent
        };
        Self { mean_step_ms, tier }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
pub enum Verdict {
    #[strum(serialize = "Outstanding! Metronome-like precision")]
    Outstanding,
    #[strum(serialize = "Excellent timing, just a hair off the grid")]
    Excellent,
    #[strum(serialize = "Great job, your pulse is solid")]
    Great,
    #[strum(serialize = "Good effort, keep locking in with the click")]
    Good,
    #[strum(serialize = "Needs practice: slow down and focus on the beat")]
    NeedsPractice,
}

impl Verdict {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 98.0 {
            Verdict::Outstanding
        } else if accuracy >= 95.0 {
            Verdict::Excellent
        } else if accuracy >= 90.0 {
            Verdict::Great
        } else if accuracy >= 80.0 {
            Verdict::Good
        } else {
            Verdict::NeedsPractice
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub target_ms: f64,
    pub tap_count: usize,
    /// Cumulative mean of the per-tap accuracy scores.
    pub accuracy: Option<f64>,
    pub consistency: Option<f64>,
    pub mean_error_ms: Option<f64>,
    pub tendency: Option<Tendency>,
    pub stability: Option<Stability>,
    pub best_run: usize,
    pub verdict: Option<Verdict>,
}

impl SessionSummary {
    pub fn from_log(log: &TapLog, target_ms: f64) -> Self {
        let intervals = log.intervals();

        let accuracy = running_accuracy(intervals, target_ms);
        let mean_error_ms = mean_error(intervals, target_ms);

        Self {
            target_ms,
            tap_count: log.tap_count(),
            accuracy,
            consistency: consistency(intervals, target_ms),
            mean_error_ms,
            tendency: mean_error_ms.map(|e| Tendency::from_mean_error(e, target_ms)),
            stability: mean_abs_step(intervals).map(|s| Stability::from_mean_step(s, target_ms)),
            best_run: best_run(intervals, target_ms),
            verdict: accuracy.map(Verdict::from_accuracy),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.accuracy.is_none()
    }
}

pub fn running_accuracy(intervals: &[f64], target_ms: f64) -> Option<f64> {
    let scores = intervals
        .iter()
        .map(|interval| interval_accuracy(*interval, target_ms))
        .collect::<Vec<f64>>();
    mean(&scores)
}

/// `100 - stddev / target * 100`, floored at zero. Needs two intervals.
pub fn consistency(intervals: &[f64], target_ms: f64) -> Option<f64> {
    if intervals.len() < 2 {
        return None;
    }
    std_dev(intervals).map(|sd| (100.0 - sd / target_ms * 100.0).max(0.0))
}

pub fn mean_error(intervals: &[f64], target_ms: f64) -> Option<f64> {
    let errors = intervals
        .iter()
        .map(|interval| signed_error(*interval, target_ms))
        .collect::<Vec<f64>>();
    mean(&errors)
}

/// Longest streak of intervals inside the perfect window.
pub fn best_run(intervals: &[f64], target_ms: f64) -> usize {
    crate::util::longest_run(intervals, |interval| {
        (interval - target_ms).abs() / target_ms < PERFECT_THRESHOLD
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = 500.0;

    fn log_from_intervals(intervals: &[f64]) -> TapLog {
        let mut ts = 0.0;
        let mut log = TapLog::new();
        log.add_tap(ts);
        for interval in intervals {
            ts += interval;
            log.add_tap(ts);
        }
        log
    }

    #[test]
    fn test_empty_log() {
        let summary = SessionSummary::from_log(&TapLog::new(), T);
        assert!(summary.is_empty());
        assert_eq!(summary.tap_count, 0);
        assert_eq!(summary.consistency, None);
        assert_eq!(summary.tendency, None);
        assert_eq!(summary.stability, None);
        assert_eq!(summary.best_run, 0);
        assert_eq!(summary.verdict, None);
    }

    #[test]
    fn test_single_interval() {
        let summary = SessionSummary::from_log(&log_from_intervals(&[500.0]), T);
        assert_eq!(summary.tap_count, 2);
        assert_eq!(summary.accuracy, Some(100.0));
        assert_eq!(summary.consistency, None);
        assert_eq!(summary.tendency, Some(Tendency::Balanced));
        assert_eq!(summary.stability, None);
        assert_eq!(summary.best_run, 1);
        assert_eq!(summary.verdict, Some(Verdict::Outstanding));
    }

    #[test]
    fn test_consistency_perfect_when_identical() {
        assert_eq!(consistency(&[500.0, 500.0, 500.0], T), Some(100.0));
    }

    #[test]
    fn test_consistency_decreases_with_variance() {
        let tight = consistency(&[490.0, 510.0], T).unwrap();
        let loose = consistency(&[480.0, 520.0], T).unwrap();
        let wild = consistency(&[300.0, 700.0], T).unwrap();

        assert!((tight - 98.0).abs() < 1e-9);
        assert!((loose - 96.0).abs() < 1e-9);
        assert!(tight > loose && loose > wild);
        assert_eq!(consistency(&[0.0, 2000.0], T), Some(0.0));
    }

    #[test]
    fn test_tendency() {
        assert_eq!(
            Tendency::from_mean_error(-2.5, T),
            Tendency::Balanced
        );
        let rushing = Tendency::from_mean_error(-15.4, T);
        assert_eq!(rushing.to_string(), "rushing (avg 15ms early)");
        let dragging = Tendency::from_mean_error(22.6, T);
        assert_eq!(dragging.to_string(), "dragging (avg 23ms late)");
        assert_eq!(Tendency::Balanced.to_string(), "balanced");
    }

    #[test]
    fn test_tendency_boundary_is_not_balanced() {
        assert_eq!(
            Tendency::from_mean_error(10.0, T),
            Tendency::Dragging { avg_ms: 10.0 }
        );
    }

    #[test]
    fn test_stability_tiers() {
        assert_eq!(
            Stability::from_mean_step(10.0, T).tier,
            StabilityTier::VeryStable
        );
        assert_eq!(
            Stability::from_mean_step(40.0, T).tier,
            StabilityTier::ModeratelyStable
        );
        assert_eq!(
            Stability::from_mean_step(100.0, T).tier,
            StabilityTier::Inconsistent
        );
        assert_eq!(StabilityTier::VeryStable.to_string(), "very stable");
    }

    #[test]
    fn test_best_run_stops_at_a_miss() {
        assert_eq!(best_run(&[T, T, T * 1.5, T, T], T), 2);
        assert_eq!(best_run(&[T, T, T * 1.5, T, T, T], T), 3);
        assert_eq!(best_run(&[T * 1.5, 400.0], T), 0);
    }

    #[test]
    fn test_verdict_tiers() {
        assert_eq!(Verdict::from_accuracy(100.0), Verdict::Outstanding);
        assert_eq!(Verdict::from_accuracy(98.0), Verdict::Outstanding);
        assert_eq!(Verdict::from_accuracy(97.9), Verdict::Excellent);
        assert_eq!(Verdict::from_accuracy(95.0), Verdict::Excellent);
        assert_eq!(Verdict::from_accuracy(90.0), Verdict::Great);
        assert_eq!(Verdict::from_accuracy(80.0), Verdict::Good);
        assert_eq!(Verdict::from_accuracy(79.99), Verdict::NeedsPractice);
        assert_eq!(Verdict::from_accuracy(0.0), Verdict::NeedsPractice);
    }

    #[test]
    fn test_summary_of_rushed_session() {
        let summary = SessionSummary::from_log(&log_from_intervals(&[480.0, 470.0, 490.0]), T);
        assert_eq!(summary.tap_count, 4);
        assert_eq!(summary.mean_error_ms, Some(-20.0));
        assert_eq!(summary.tendency, Some(Tendency::Rushing { avg_ms: 20.0 }));
        assert_eq!(summary.best_run, 0);
        let stability = summary.stability.unwrap();
        assert_eq!(stability.mean_step_ms, 15.0);
        assert_eq!(stability.tier, StabilityTier::VeryStable);
        assert_eq!(summary.verdict, Some(Verdict::Excellent));
    }
}
