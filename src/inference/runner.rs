//! Inference Runner
//!
//! Issues the predict request N times sequentially against the serving
//! endpoint, collecting per-request latency and predicted class, then
//! aggregates everything into a report.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::envelope::PredictRequest;
use crate::client::serving::ServingClient;
use crate::config::RequestOptions;
use crate::inference::metrics::{accuracy_against, majority_vote, LatencyStats};
use crate::utils::error::{ClientError, Result};

/// Aggregated result of one inference run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceReport {
    /// Majority-vote class over all timed requests
    pub prediction: usize,

    /// Latency statistics over the timed requests
    pub latency: LatencyStats,

    /// Fraction of per-request predictions matching the target label,
    /// present only when a target was supplied
    pub accuracy: Option<f64>,

    /// Predicted class of each timed request, in request order
    pub per_request_classes: Vec<usize>,

    /// Latency of each timed request in milliseconds, in request order
    pub per_request_ms: Vec<f64>,

    /// Number of timed requests issued
    pub num_requests: usize,

    /// Number of warmup requests issued before measurement
    pub warmup_requests: usize,

    /// Predict endpoint the run was measured against
    pub endpoint: String,

    /// RFC 3339 timestamp of when the run finished
    pub timestamp: String,
}

impl InferenceReport {
    /// Aggregate collected per-request samples into a report
    pub fn from_samples(
        endpoint: &str,
        classes: &[usize],
        timings: &[Duration],
        target: Option<usize>,
        warmup_requests: usize,
    ) -> Result<Self> {
        let prediction = majority_vote(classes).ok_or_else(|| {
            ClientError::InvalidInput("No predictions were collected".to_string())
        })?;

        Ok(Self {
            prediction,
            latency: LatencyStats::from_durations(timings),
            accuracy: target.map(|t| accuracy_against(classes, t)),
            per_request_classes: classes.to_vec(),
            per_request_ms: timings
                .iter()
                .map(|d| d.as_secs_f64() * 1000.0)
                .collect(),
            num_requests: classes.len(),
            warmup_requests,
            endpoint: endpoint.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Save the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl std::fmt::Display for InferenceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction class: {}", self.prediction)?;
        writeln!(
            f,
            "Latency: {:.3} ms (mean) ± {:.3} ms over {} requests",
            self.latency.mean_ms, self.latency.std_ms, self.num_requests
        )?;
        writeln!(
            f,
            "  P50/P95/P99: {:.2}/{:.2}/{:.2} ms | Min/Max: {:.2}/{:.2} ms",
            self.latency.p50_ms,
            self.latency.p95_ms,
            self.latency.p99_ms,
            self.latency.min_ms,
            self.latency.max_ms
        )?;
        if let Some(accuracy) = self.accuracy {
            writeln!(f, "Accuracy against target: {accuracy}")?;
        }
        Ok(())
    }
}

/// Runs the sequential request loop against a serving endpoint
pub struct InferenceRunner {
    client: ServingClient,
    options: RequestOptions,
}

impl InferenceRunner {
    /// Create a runner from a client and loop options
    pub fn new(client: ServingClient, options: RequestOptions) -> Self {
        Self { client, options }
    }

    /// Run warmup plus the timed request loop and aggregate the result
    ///
    /// Every request must succeed; the first transport or serving error
    /// aborts the run.
    pub fn run(
        &self,
        request: &PredictRequest,
        target: Option<usize>,
    ) -> Result<InferenceReport> {
        self.options.validate()?;

        if self.options.warmup_requests > 0 {
            info!(
                "Warming up with {} requests",
                self.options.warmup_requests
            );
            self.client.warm_up(request, self.options.warmup_requests)?;
        }

        info!(
            "Issuing {} sequential requests to {}",
            self.options.num_requests,
            self.client.predict_url()
        );

        let mut classes = Vec::with_capacity(self.options.num_requests);
        let mut timings = Vec::with_capacity(self.options.num_requests);

        for i in 0..self.options.num_requests {
            let timed = self.client.predict(request)?;
            debug!(
                "Request {}/{}: class {} in {:.2} ms",
                i + 1,
                self.options.num_requests,
                timed.class,
                timed.latency.as_secs_f64() * 1000.0
            );
            classes.push(timed.class);
            timings.push(timed.latency);
        }

        InferenceReport::from_samples(
            self.client.predict_url(),
            &classes,
            &timings,
            target,
            self.options.warmup_requests,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timings() -> Vec<Duration> {
        vec![
            Duration::from_millis(20),
            Duration::from_millis(22),
            Duration::from_millis(21),
            Duration::from_millis(25),
        ]
    }

    #[test]
    fn test_report_aggregation() {
        let classes = vec![281, 281, 285, 281];
        let report = InferenceReport::from_samples(
            "http://localhost:8501/v1/models/resnet:predict",
            &classes,
            &sample_timings(),
            None,
            3,
        )
        .unwrap();

        assert_eq!(report.prediction, 281);
        assert_eq!(report.num_requests, 4);
        assert_eq!(report.warmup_requests, 3);
        assert!(report.accuracy.is_none());
        assert!((report.latency.mean_ms - 22.0).abs() < 0.1);
        assert_eq!(report.per_request_classes, classes);
        assert_eq!(report.per_request_ms.len(), 4);
    }

    #[test]
    fn test_report_accuracy_with_target() {
        let classes = vec![281, 281, 285, 281];
        let report = InferenceReport::from_samples(
            "http://localhost:8501/v1/models/resnet:predict",
            &classes,
            &sample_timings(),
            Some(281),
            0,
        )
        .unwrap();

        assert_eq!(report.accuracy, Some(0.75));
    }

    #[test]
    fn test_report_rejects_empty_run() {
        let result = InferenceReport::from_samples("http://x", &[], &[], None, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_display_mentions_prediction() {
        let report = InferenceReport::from_samples(
            "http://localhost:8501/v1/models/resnet:predict",
            &[7, 7, 7],
            &sample_timings()[..3],
            Some(7),
            0,
        )
        .unwrap();

        let rendered = report.to_string();
        assert!(rendered.contains("Prediction class: 7"));
        assert!(rendered.contains("Accuracy against target: 1"));
    }

    #[test]
    fn test_report_save_roundtrip() {
        let report = InferenceReport::from_samples(
            "http://localhost:8501/v1/models/resnet:predict",
            &[1, 1],
            &sample_timings()[..2],
            None,
            0,
        )
        .unwrap();

        let path = std::env::temp_dir().join("resnet_client_report_test.json");
        report.save(&path).unwrap();

        let loaded: InferenceReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.prediction, 1);
        assert_eq!(loaded.num_requests, 2);

        let _ = std::fs::remove_file(&path);
    }
}
