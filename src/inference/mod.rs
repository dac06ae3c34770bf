//! Inference module: the request loop and result aggregation
//!
//! This module provides:
//! - The sequential request loop against the predict endpoint
//! - Latency statistics over the collected per-request timings
//! - Prediction aggregation by majority vote and optional accuracy

pub mod metrics;
pub mod runner;

// Re-export main types for convenience
pub use metrics::{accuracy_against, majority_vote, LatencyStats};
pub use runner::{InferenceReport, InferenceRunner};
