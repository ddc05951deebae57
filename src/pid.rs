/// Controller gains applied to the tap-interval error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.3,
            kd: 0.5,
        }
    }
}

/// Weighted error terms for one interval, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidTerms {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub total: f64,
}

/// Signed error of an interval: positive when late (dragging), negative when
/// early (rushing).
pub fn signed_error(interval_ms: f64, target_ms: f64) -> f64 {
    interval_ms - target_ms
}

/// Proportional/integral/derivative analysis of tap timing.
///
/// The integral is a plain running sum with no clamping or decay; it only
/// returns to zero on [`PidEstimator::reset`]. Each call to
/// [`PidEstimator::update`] is a state transition and must happen exactly
/// once per completed interval. Use [`PidEstimator::peek`] for repeated reads.
#[derive(Debug, Clone, Default)]
pub struct PidEstimator {
    gains: PidGains,
    error_integral: f64,
    previous_error: f64,
    last: PidTerms,
}

impl PidEstimator {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            ..Self::default()
        }
    }

    pub fn update(&mut self, error: f64) -> PidTerms {
        self.error_integral += error;

        let p = error * self.gains.kp;
        let i = self.error_integral * self.gains.ki;
        let d = (error - self.previous_error) * self.gains.kd;
        self.previous_error = error;

        self.last = PidTerms {
            p,
            i,
            d,
            total: p + i + d,
        };
        self.last
    }

    /// Terms produced by the latest update, or all zero before the first.
    pub fn peek(&self) -> PidTerms {
        self.last
    }

    pub fn error_integral(&self) -> f64 {
        self.error_integral
    }

    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn reset(&mut self) {
        self.error_integral = 0.0;
        self.previous_error = 0.0;
        self.last = PidTerms::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gains() {
        let gains = PidGains::default();
        assert_eq!(gains.kp, 1.0);
        assert_eq!(gains.ki, 0.3);
        assert_eq!(gains.kd, 0.5);
    }

    #[test]
    fn test_signed_error_direction() {
        assert_eq!(signed_error(520.0, 500.0), 20.0);
        assert_eq!(signed_error(480.0, 500.0), -20.0);
        assert_eq!(signed_error(500.0, 500.0), 0.0);
    }

    #[test]
    fn test_peek_before_update_is_zero() {
        let pid = PidEstimator::default();
        assert_eq!(pid.peek(), PidTerms::default());
    }

    #[test]
    fn test_first_update() {
        let mut pid = PidEstimator::default();
        let terms = pid.update(-20.0);

        assert_eq!(terms.p, -20.0);
        assert_eq!(terms.i, -6.0);
        assert_eq!(terms.d, -10.0);
        assert_eq!(terms.total, -36.0);
        assert_eq!(pid.previous_error(), -20.0);
    }

    #[test]
    fn test_derivative_uses_previous_error() {
        let mut pid = PidEstimator::default();
        pid.update(0.0);
        let terms = pid.update(-60.0);
        assert_eq!(terms.d, -30.0);

        let terms = pid.update(-60.0);
        assert_eq!(terms.d, 0.0);
    }

    #[test]
    fn test_integral_accumulates_without_bound() {
        let mut pid = PidEstimator::default();
        let mut previous = 0.0;
        for _ in 0..100 {
            let terms = pid.update(-20.0);
            assert!(terms.i < previous);
            previous = terms.i;
        }
        assert_eq!(pid.error_integral(), -2000.0);
    }

    #[test]
    fn test_peek_does_not_accumulate() {
        let mut pid = PidEstimator::default();
        let terms = pid.update(10.0);
        assert_eq!(pid.peek(), terms);
        assert_eq!(pid.peek(), terms);
        assert_eq!(pid.error_integral(), 10.0);
    }

    #[test]
    fn test_reset_zeroes_state() {
        let mut pid = PidEstimator::default();
        pid.update(35.0);
        pid.update(12.0);
        pid.reset();

        assert_eq!(pid.error_integral(), 0.0);
        assert_eq!(pid.previous_error(), 0.0);
        assert_eq!(pid.peek(), PidTerms::default());
    }

    #[test]
    fn test_custom_gains() {
        let mut pid = PidEstimator::new(PidGains {
            kp: 2.0,
            ki: 0.0,
            kd: 0.0,
        });
        let terms = pid.update(5.0);
        assert_eq!(terms.total, 10.0);
        assert_eq!(pid.gains().kp, 2.0);
    }
}
