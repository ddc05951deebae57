use crate::{classifier::GOOD_THRESHOLD, time_series::TimingPoint};

/// X bound (last tap index) and symmetric Y bound (ms) for the deviation
/// chart. The Y range never shrinks below the "good" window so a clean
/// session does not get magnified into noise.
pub fn compute_chart_params(points: &[TimingPoint], target_ms: f64) -> (f64, f64) {
    let widest = points
        .iter()
        .map(|p| p.deviation_ms.abs())
        .fold(target_ms * GOOD_THRESHOLD, f64::max);

    let last_tap = match points.last() {
        Some(p) if p.tap > 2.0 => p.tap,
        _ => 3.0,
    };

    (last_tap, widest.ceil())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

pub fn format_signed_ms(val: f64) -> String {
    format!("{val:+.0}")
}
