//! Aggregation Metrics
//!
//! Latency statistics over the per-request timings, majority vote over
//! the per-request predicted classes, and accuracy against a known
//! target label.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Latency statistics over a set of request timings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Mean latency in milliseconds
    pub mean_ms: f64,
    /// Standard deviation in milliseconds
    pub std_ms: f64,
    /// Minimum latency
    pub min_ms: f64,
    /// Maximum latency
    pub max_ms: f64,
    /// Median (50th percentile)
    pub p50_ms: f64,
    /// 95th percentile
    pub p95_ms: f64,
    /// 99th percentile
    pub p99_ms: f64,
}

impl LatencyStats {
    /// Calculate statistics from a list of request durations
    pub fn from_durations(durations: &[Duration]) -> Self {
        let times_ms: Vec<f64> = durations
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .collect();
        Self::from_millis(&times_ms)
    }

    /// Calculate statistics from latencies already in milliseconds
    pub fn from_millis(times_ms: &[f64]) -> Self {
        if times_ms.is_empty() {
            return Self::default();
        }

        let mut sorted = times_ms.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n as f64;

        Self {
            mean_ms: mean,
            std_ms: variance.sqrt(),
            min_ms: sorted[0],
            max_ms: sorted[n - 1],
            p50_ms: percentile(&sorted, 50.0),
            p95_ms: percentile(&sorted, 95.0),
            p99_ms: percentile(&sorted, 99.0),
        }
    }
}

/// Calculate a percentile from sorted data
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Mode of the per-request predicted classes
///
/// Ties resolve to the smallest class id. Returns `None` for an empty
/// slice.
pub fn majority_vote(classes: &[usize]) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &class in classes {
        *counts.entry(class).or_insert(0) += 1;
    }

    let mut best: Option<(usize, usize)> = None;
    for (class, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((class, count)),
        }
    }
    best.map(|(class, _)| class)
}

/// Fraction of per-request predictions equal to the target label
pub fn accuracy_against(classes: &[usize], target: usize) -> f64 {
    if classes.is_empty() {
        return 0.0;
    }

    let correct = classes.iter().filter(|&&class| class == target).count();
    correct as f64 / classes.len() as f64
}
