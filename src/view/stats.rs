/// Small numeric helpers for the view: correlation, percent strings and
/// axis ticks.

/// Pearson correlation of `xs` against `ys`.
///
/// Pairs where either side is NaN are skipped. Returns `None` when fewer
/// than two pairs remain or either column has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    if pairs.len() < 2 {
        return None;
    }
    // Checked on the raw values: a mean of repeated inexact values can be
    // off by an ulp and leave a spurious nonzero variance behind.
    if is_constant(pairs.iter().map(|p| p.0)) || is_constant(pairs.iter().map(|p| p.1)) {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// Share as a one-decimal percentage, e.g. 0.1234 → "12.3%".
///
/// Rounds half to even on the exact binary value of `fraction * 100`.
pub fn format_percent(fraction: f64) -> String {
    if fraction.is_nan() {
        return "nan%".to_string();
    }
    format!("{:.1}%", fraction * 100.0)
}

/// The correlation readout line
pub fn format_correlation(r: Option<f64>) -> String {
    match r {
        Some(r) => format!("Correlation = {:.3}", r),
        None => "Correlation = undefined".to_string(),
    }
}

/// Whole-number percent tick label, e.g. 0.5 → "50%"
pub fn format_axis_percent(value: f64) -> String {
    // + 0.0 turns -0 into 0
    format!("{:.0}%", (value * 100.0).round() + 0.0)
}

/// Evenly spaced "nice" tick positions (1, 2 or 5 × 10^k apart) inside
/// `[lo, hi]`, aiming for about `target` ticks.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() || hi <= lo || target == 0 {
        return Vec::new();
    }
    let raw_step = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Axis extent around the data, padded by 5% of the span on each side.
///
/// Empty data falls back to `[0, 1]`; a single value gets a fixed pad.
pub fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span == 0.0 {
        return (min - 0.05, max + 0.05);
    }
    (min - span * 0.05, max + span * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_relationship_is_one() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64 / 100.0).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 0.3 + 2.0 * x).collect();
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-9);

        let ys_neg: Vec<f64> = xs.iter().map(|x| 0.9 - x).collect();
        assert!((pearson(&xs, &ys_neg).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_is_undefined() {
        let xs = [0.2, 0.2, 0.2, 0.2];
        let ys = [0.1, 0.4, 0.6, 0.9];
        assert_eq!(pearson(&xs, &ys), None);
    }

    #[test]
    fn test_inexact_constant_column_is_undefined() {
        // 0.1 * 3 / 3 != 0.1 in binary
        let r = pearson(&[0.1, 0.1, 0.1], &[0.2, 0.5, 0.9]);
        assert_eq!(r, None);
        assert_eq!(format_correlation(r), "Correlation = undefined");
        assert_eq!(pearson(&[0.2, 0.5, 0.9], &[0.3; 3]), None);
        // Constant once NaN pairs are dropped
        assert_eq!(pearson(&[0.1, 0.7, 0.1], &[0.2, f64::NAN, 0.9]), None);
    }

    #[test]
    fn test_too_few_rows_is_undefined() {
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[0.1], &[0.5]), None);
        // NaN pairs do not count
        assert_eq!(pearson(&[0.1, f64::NAN], &[0.5, 0.6]), None);
    }

    #[test]
    fn test_nan_pairs_skipped() {
        let xs = [0.1, 0.2, f64::NAN, 0.3];
        let ys = [0.2, 0.4, 0.5, 0.6];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.12345), "12.3%");
        assert_eq!(format_percent(0.1234), "12.3%");
        assert_eq!(format_percent(0.005), "0.5%");
        assert_eq!(format_percent(0.0004), "0.0%");
        assert_eq!(format_percent(0.0996), "10.0%");
        assert_eq!(format_percent(f64::NAN), "nan%");
    }

    #[test]
    fn test_correlation_text() {
        assert_eq!(format_correlation(Some(0.123456)), "Correlation = 0.123");
        assert_eq!(format_correlation(Some(-0.5)), "Correlation = -0.500");
        assert_eq!(format_correlation(None), "Correlation = undefined");
    }

    #[test]
    fn test_axis_percent() {
        assert_eq!(format_axis_percent(0.5), "50%");
        assert_eq!(format_axis_percent(0.0), "0%");
        assert_eq!(format_axis_percent(-0.001), "0%");
        assert_eq!(format_axis_percent(1.0), "100%");
        assert_eq!(format_axis_percent(0.02), "2%");
    }

    #[test]
    fn test_nice_ticks() {
        let ticks = nice_ticks(0.0, 1.0, 5);
        assert_eq!(ticks.len(), 6);
        assert!((ticks[1] - 0.2).abs() < 1e-12);
        assert!((ticks[5] - 1.0).abs() < 1e-12);

        let ticks = nice_ticks(0.013, 0.087, 5);
        assert!(ticks.iter().all(|t| *t >= 0.013 && *t <= 0.087));
        assert!(!ticks.is_empty());

        assert!(nice_ticks(1.0, 1.0, 5).is_empty());
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([0.0, 1.0].into_iter());
        assert!((lo + 0.05).abs() < 1e-12);
        assert!((hi - 1.05).abs() < 1e-12);
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = padded_range([0.3].into_iter());
        assert!(lo < 0.3 && hi > 0.3);
    }
}
