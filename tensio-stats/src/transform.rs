//! Smoothing transforms: moving average, exponential moving average

/// Sliding-window mean. Output has `n - window + 1` points; a zero window
/// or one longer than the input yields an empty vector.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(values.len() - window + 1);
    let mut acc: f64 = values[..window].iter().sum();
    result.push(acc / window as f64);

    for i in window..values.len() {
        acc += values[i] - values[i - window];
        result.push(acc / window as f64);
    }

    result
}

/// Exponential smoothing: `EMA[0] = v[0]`, `EMA[i] = α·v[i] + (1-α)·EMA[i-1]`.
///
/// `alpha` is clamped to `[0, 1]`.
pub fn exponential_moving_average(values: &[f64], alpha: f64) -> Vec<f64> {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(v) => *v,
        None => return result,
    };
    result.push(prev);

    for v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(ma, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_moving_average_edges() {
        assert!(moving_average(&[1.0, 2.0], 0).is_empty());
        assert!(moving_average(&[1.0, 2.0], 3).is_empty());
        assert_eq!(moving_average(&[1.0, 2.0], 2), vec![1.5]);
    }

    #[test]
    fn test_ema() {
        let ema = exponential_moving_average(&[10.0, 20.0, 30.0], 0.5);
        assert_eq!(ema, vec![10.0, 15.0, 22.5]);
    }

    #[test]
    fn test_ema_edges() {
        assert!(exponential_moving_average(&[], 0.3).is_empty());
        assert_eq!(exponential_moving_average(&[4.0, 8.0], 1.0), vec![4.0, 8.0]);
        assert_eq!(exponential_moving_average(&[4.0, 8.0], 0.0), vec![4.0, 4.0]);
    }
}
