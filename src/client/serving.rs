//! Serving Client
//!
//! Blocking HTTP client for the model serving endpoint. Every call is a
//! single synchronous request; the request loop lives in
//! `inference::runner`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::client::envelope::{PredictRequest, PredictResponse};
use crate::config::ServerConfig;
use crate::utils::error::Result;

/// Outcome of one timed predict call
#[derive(Debug, Clone)]
pub struct TimedPrediction {
    /// Argmax class id of the response's first prediction row
    pub class: usize,
    /// Wall-clock time from sending the request to receiving the response
    pub latency: Duration,
}

/// Blocking client for the serving endpoint
#[derive(Debug, Clone)]
pub struct ServingClient {
    predict_url: String,
    status_url: String,
    http: reqwest::blocking::Client,
}

impl ServingClient {
    /// Create a client for the given server with a per-request timeout
    pub fn new(server: &ServerConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            predict_url: server.predict_url(),
            status_url: server.status_url(),
            http,
        })
    }

    /// URL of the predict endpoint this client posts to
    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    /// Issue one predict call, measuring its wall-clock latency
    ///
    /// Latency covers the blocking send up to the response headers; body
    /// parsing is excluded so the number tracks the server round trip.
    pub fn predict(&self, request: &PredictRequest) -> Result<TimedPrediction> {
        let started = Instant::now();
        let response = self
            .http
            .post(&self.predict_url)
            .json(request)
            .send()?
            .error_for_status()?;
        let latency = started.elapsed();

        let parsed: PredictResponse = response.json()?;
        let class = parsed.predicted_class()?;

        debug!(
            "Predict call answered class {} in {:.2} ms",
            class,
            latency.as_secs_f64() * 1000.0
        );

        Ok(TimedPrediction { class, latency })
    }

    /// Issue untimed warmup calls so server-side caches and weights are
    /// ready before measurement starts
    pub fn warm_up(&self, request: &PredictRequest, count: usize) -> Result<()> {
        for i in 0..count {
            debug!("Warmup request {}/{}", i + 1, count);
            self.http
                .post(&self.predict_url)
                .json(request)
                .send()?
                .error_for_status()?;
        }
        Ok(())
    }

    /// Query the model status endpoint and return its raw JSON
    pub fn status(&self) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(&self.status_url)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls_follow_config() {
        let server = ServerConfig {
            base_url: "http://10.42.0.10".to_string(),
            port: 8501,
            model_path: "v1/models/resnet".to_string(),
        };

        let client = ServingClient::new(&server, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.predict_url(),
            "http://10.42.0.10:8501/v1/models/resnet:predict"
        );
    }

    #[test]
    fn test_unreachable_server_is_an_error() {
        // Reserved TEST-NET-1 address, nothing listens there
        let server = ServerConfig {
            base_url: "http://192.0.2.1".to_string(),
            port: 9,
            model_path: "v1/models/resnet".to_string(),
        };

        let client = ServingClient::new(&server, Duration::from_millis(200)).unwrap();
        let request = PredictRequest::single(vec![vec![[0.0, 0.0, 0.0]]]);
        assert!(client.predict(&request).is_err());
    }
}
