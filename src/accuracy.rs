use crate::util::mean;

/// Accuracy of one interval as a percentage in `[0, 100]`.
///
/// An interval that misses the target by a full target interval or more
/// scores zero.
pub fn interval_accuracy(interval_ms: f64, target_ms: f64) -> f64 {
    let error_percent = (interval_ms - target_ms).abs() / target_ms;
    ((1.0 - error_percent).max(0.0) * 100.0).clamp(0.0, 100.0)
}

/// Per-tap accuracy history with a full-session cumulative mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracyScorer {
    history: Vec<f64>,
}

impl AccuracyScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score an interval and append it to the history. One call per tap.
    pub fn record(&mut self, interval_ms: f64, target_ms: f64) -> f64 {
        let accuracy = interval_accuracy(interval_ms, target_ms);
        self.history.push(accuracy);
        accuracy
    }

    pub fn last(&self) -> Option<f64> {
        self.history.last().copied()
    }

    /// Mean of every score recorded this session.
    pub fn running(&self) -> Option<f64> {
        mean(&self.history)
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_exact_interval_is_perfect() {
        assert_eq!(interval_accuracy(500.0, 500.0), 100.0);
    }

    #[test]
    fn test_accuracy_is_symmetric() {
        assert!(approx(interval_accuracy(510.0, 500.0), 98.0));
        assert!(approx(interval_accuracy(490.0, 500.0), 98.0));
        assert!(approx(interval_accuracy(250.0, 500.0), 50.0));
    }

    #[test]
    fn test_accuracy_floors_at_zero() {
        assert_eq!(interval_accuracy(1000.0, 500.0), 0.0);
        assert_eq!(interval_accuracy(1700.0, 500.0), 0.0);
        assert_eq!(interval_accuracy(-200.0, 500.0), 0.0);
    }

    #[test]
    fn test_empty_scorer_has_no_data() {
        let scorer = AccuracyScorer::new();
        assert_eq!(scorer.last(), None);
        assert_eq!(scorer.running(), None);
    }

    #[test]
    fn test_running_is_cumulative_mean() {
        let mut scorer = AccuracyScorer::new();
        scorer.record(500.0, 500.0);
        scorer.record(250.0, 500.0);
        assert!(approx(scorer.running().unwrap(), 75.0));

        scorer.record(500.0, 500.0);
        scorer.record(500.0, 500.0);
        assert!(approx(scorer.running().unwrap(), 87.5));
        assert_eq!(scorer.history().len(), 4);
        assert_eq!(scorer.last(), Some(100.0));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut scorer = AccuracyScorer::new();
        scorer.record(520.0, 500.0);
        scorer.reset();
        assert!(scorer.history().is_empty());
        assert_eq!(scorer.running(), None);
    }
}
