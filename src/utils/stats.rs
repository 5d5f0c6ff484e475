//! Null-aware statistics
//!
//! Missing values (`None`) are skipped. An empty population has no mean or
//! median: callers receive `None` rather than 0 or NaN.

/// Arithmetic mean of the present values
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values.into_iter().flatten() {
        if v.is_nan() {
            continue;
        }
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Median of the present values (average of the two middle values for even counts)
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut present: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Replace each missing value with the most recent present value
///
/// Leading missing values stay missing.
pub fn forward_fill<T: Copy>(values: &[Option<T>]) -> Vec<Option<T>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_skips_missing() {
        let m = mean(vec![Some(1.0), None, Some(3.0)]).unwrap();
        assert_relative_eq!(m, 2.0);
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
        assert_eq!(mean(vec![None, None]), None);
    }

    #[test]
    fn test_median_excludes_missing() {
        let m = median(vec![Some(1000.0), None, Some(3000.0)]).unwrap();
        assert_relative_eq!(m, 2000.0);

        let m = median(vec![Some(5.0), Some(1.0), Some(3.0)]).unwrap();
        assert_relative_eq!(m, 3.0);

        assert_eq!(median(vec![None]), None);
    }

    #[test]
    fn test_forward_fill() {
        let filled = forward_fill(&[None, Some(1), None, None, Some(4), None]);
        assert_eq!(filled, vec![None, Some(1), Some(1), Some(1), Some(4), Some(4)]);
    }
}
