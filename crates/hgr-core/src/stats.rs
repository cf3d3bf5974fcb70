//! Descriptive statistics over value samples.

use serde::{Deserialize, Serialize};

/// Arithmetic mean; `0.0` for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; `0.0` for an empty sample.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Relative deviation `|mean - value| / mean` of `value` from the sample mean.
///
/// A zero mean yields `0.0` when `value` is zero too and infinity otherwise.
pub fn imbalance_ratio(value: f64, values: &[f64]) -> f64 {
    let mean = mean(values);
    let deviation = (mean - value).abs();
    if mean == 0.0 {
        if deviation == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        deviation / mean.abs()
    }
}

/// Compact distribution summary of a value sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Number of samples.
    pub count: usize,
    /// Smallest sample, `0.0` when empty.
    pub min: f64,
    /// Largest sample, `0.0` when empty.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Equal-width histogram between `min` and `max`, present on request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<Bucket>>,
}

/// One bucket of a [`Distribution`] histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound; inclusive for the last bucket only.
    pub upper: f64,
    /// Number of samples falling in the bucket.
    pub count: usize,
}

impl Distribution {
    /// Summarizes `values` without a histogram.
    pub fn of(values: &[f64]) -> Self {
        let (min, max) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(*v), hi.max(*v))
                })
        };
        Self {
            count: values.len(),
            min,
            max,
            mean: mean(values),
            std_dev: std_dev(values),
            histogram: None,
        }
    }

    /// Summarizes `values` and attaches a histogram with `buckets` equal-width buckets.
    pub fn with_histogram(values: &[f64], buckets: usize) -> Self {
        let mut dist = Self::of(values);
        let buckets = buckets.max(1);
        let width = (dist.max - dist.min) / buckets as f64;
        let mut histogram: Vec<Bucket> = (0..buckets)
            .map(|idx| Bucket {
                lower: dist.min + width * idx as f64,
                upper: dist.min + width * (idx + 1) as f64,
                count: 0,
            })
            .collect();
        for value in values {
            let idx = if width > 0.0 {
                (((value - dist.min) / width) as usize).min(buckets - 1)
            } else {
                0
            };
            histogram[idx].count += 1;
        }
        dist.histogram = Some(histogram);
        dist
    }
}
