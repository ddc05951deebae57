/// Append-only record of tap timestamps (milliseconds) and the intervals
/// between consecutive taps.
///
/// `intervals[i] == taps[i + 1] - taps[i]` always holds. Timestamps are not
/// validated: the clock feeding the log is trusted to be non-decreasing, and
/// an out-of-order tap simply produces a negative interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TapLog {
    taps: Vec<f64>,
    intervals: Vec<f64>,
}

impl TapLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap. Returns the interval it completed, if any.
    pub fn add_tap(&mut self, timestamp_ms: f64) -> Option<f64> {
        let interval = self.taps.last().map(|prev| timestamp_ms - prev);
        self.taps.push(timestamp_ms);
        if let Some(interval) = interval {
            self.intervals.push(interval);
        }
        interval
    }

    pub fn last_interval(&self) -> Option<f64> {
        self.intervals.last().copied()
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    pub fn tap_count(&self) -> usize {
        self.taps.len()
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn clear(&mut self) {
        self.taps.clear();
        self.intervals.clear();
    }
}

impl FromIterator<f64> for TapLog {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut log = TapLog::new();
        for ts in iter {
            log.add_tap(ts);
        }
        log
    }
}
