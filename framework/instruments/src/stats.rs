use crosswind_summary_model::StatSummary;

/// Outlier removal only kicks in for sample sets larger than this.
pub const OUTLIER_MIN_SAMPLES: usize = 4;

/// Multiplier applied to the interquartile range to get the outlier fences.
const IQR_FENCE: f64 = 1.5;

/// Reduce raw latency samples, in seconds, to summary statistics.
///
/// When `remove_outliers` is set and there are more than [OUTLIER_MIN_SAMPLES] samples, anything
/// outside `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]` is dropped before the statistics are computed.
///
/// Returns `None` if there is nothing left to summarise. The order of `samples` does not affect the
/// result.
pub fn reduce(samples: &[f64], remove_outliers: bool) -> Option<StatSummary> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let retained = if remove_outliers && sorted.len() > OUTLIER_MIN_SAMPLES {
        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower = q1 - IQR_FENCE * iqr;
        let upper = q3 + IQR_FENCE * iqr;

        sorted
            .iter()
            .copied()
            .filter(|v| *v >= lower && *v <= upper)
            .collect::<Vec<_>>()
    } else {
        sorted.clone()
    };

    if retained.is_empty() {
        return None;
    }

    let count = retained.len();
    let min = retained[0];
    let max = retained[count - 1];
    // Summing in sorted order keeps the result independent of the input order. Rounding can push
    // the mean of identical values just past them, hence the clamp.
    let mean = (retained.iter().sum::<f64>() / count as f64).clamp(min, max);
    let variance = retained.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Some(StatSummary {
        count,
        outliers_removed: sorted.len() - count,
        min,
        max,
        mean,
        median: percentile(&retained, 50.0),
        p95: percentile(&retained, 95.0),
        p99: percentile(&retained, 99.0),
        std_dev: variance.sqrt(),
        is_winner: false,
    })
}

/// Percentile of an ascending slice, interpolating linearly between the closest ranks.
///
/// `p` is in the range `0.0..=100.0`. Returns `NaN` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let (a, b) = (sorted[lower], sorted[upper]);

    (a + (b - a) * (rank - lower as f64)).clamp(a, b)
}
