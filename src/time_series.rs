/// Signed deviation of one interval from the target, indexed by tap number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPoint {
    pub tap: f64,
    pub deviation_ms: f64,
}

impl TimingPoint {
    pub fn new(tap: f64, deviation_ms: f64) -> Self {
        Self { tap, deviation_ms }
    }

    /// The first interval ends on the second tap, so indices start at 2.
    pub fn from_intervals(intervals: &[f64], target_ms: f64) -> Vec<TimingPoint> {
        intervals
            .iter()
            .enumerate()
            .map(|(i, interval)| TimingPoint::new((i + 2) as f64, interval - target_ms))
            .collect()
    }
}

impl From<(f64, f64)> for TimingPoint {
    fn from(v: (f64, f64)) -> Self {
        TimingPoint {
            tap: v.0,
            deviation_ms: v.1,
        }
    }
}

impl From<TimingPoint> for (f64, f64) {
    fn from(p: TimingPoint) -> Self {
        (p.tap, p.deviation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_intervals() {
        let points = TimingPoint::from_intervals(&[500.0, 480.0, 530.0], 500.0);
        assert_eq!(
            points,
            vec![
                TimingPoint::new(2.0, 0.0),
                TimingPoint::new(3.0, -20.0),
                TimingPoint::new(4.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_tuple_conversion() {
        let p: TimingPoint = (3.0, -12.5).into();
        let t: (f64, f64) = p.into();
        assert_eq!(t, (3.0, -12.5));
    }
}
