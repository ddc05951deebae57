use itertools::Itertools;

pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Mean absolute difference between neighbouring values. Needs two values.
pub fn mean_abs_step(data: &[f64]) -> Option<f64> {
    let steps = data
        .iter()
        .tuple_windows()
        .map(|(prev, next)| (next - prev).abs())
        .collect::<Vec<f64>>();

    mean(&steps)
}

/// Length of the longest run of consecutive items satisfying `pred`.
pub fn longest_run<T>(data: &[T], pred: impl Fn(&T) -> bool) -> usize {
    data.iter()
        .fold((0usize, 0usize), |(best, current), item| {
            if pred(item) {
                (best.max(current + 1), current + 1)
            } else {
                (best, 0)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[500., 510., 490.]), Some(500.0));
        assert_eq!(mean(&[15., 7., 55., 12., 4.]), Some(18.6));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_negative_values() {
        assert_eq!(mean(&[-5.0, -10.0, -15.0]), Some(-10.0));
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(
            std_dev(&[100., 120., 90., 102., 94.]),
            Some(10.322790320451151)
        );
        assert_eq!(std_dev(&[490., 510.]), Some(10.0));
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev(&[42.0]), Some(0.0));
    }

    #[test]
    fn test_std_dev_empty_slice() {
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_std_dev_identical_values() {
        assert_eq!(std_dev(&[500.0, 500.0, 500.0, 500.0]), Some(0.0));
    }

    #[test]
    fn test_mean_abs_step() {
        assert_eq!(mean_abs_step(&[500., 510., 500.]), Some(10.0));
        assert_eq!(mean_abs_step(&[500., 540., 520.]), Some(30.0));
    }

    #[test]
    fn test_mean_abs_step_needs_two_values() {
        assert_eq!(mean_abs_step(&[]), None);
        assert_eq!(mean_abs_step(&[500.]), None);
    }

    #[test]
    fn test_longest_run() {
        let data = [1, 1, 0, 1, 1, 1, 0];
        assert_eq!(longest_run(&data, |v| *v == 1), 3);
        assert_eq!(longest_run(&data, |v| *v == 2), 0);
        assert_eq!(longest_run::<i32>(&[], |_| true), 0);
    }
}
