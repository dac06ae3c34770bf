//! HTTP client for the model serving endpoint
//!
//! This module provides:
//! - The JSON request/response envelope of the serving predict API
//! - A blocking client issuing predict, warmup, and status calls

pub mod envelope;
pub mod serving;

// Re-export main types for convenience
pub use envelope::{argmax, ImageInstance, PredictRequest, PredictResponse};
pub use serving::{ServingClient, TimedPrediction};
