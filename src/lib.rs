//! # ResNet Serving Client
//!
//! A Rust client library for an image classification model (ResNet) hosted
//! behind a TensorFlow-Serving style REST endpoint.
//!
//! ## Features
//!
//! - **Source resolution** for inputs given as URLs or local file paths
//! - **Image preprocessing** (decode, RGB conversion, pixel scaling) into the
//!   serving API's `instances` JSON envelope
//! - **Repeated sequential requests** against the predict endpoint to collect
//!   a latency distribution
//! - **Prediction aggregation** by majority vote, with optional accuracy
//!   against a known target label
//!
//! ## Modules
//!
//! - `client`: the HTTP serving client and the request/response envelope
//! - `config`: server endpoint and request-loop configuration
//! - `inference`: the request loop, latency statistics, and aggregation
//! - `input`: image source resolution and preprocessing
//! - `utils`: logging and error handling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resnet_client::{ClientConfig, ImageSource, ImageTensor};
//! use resnet_client::{InferenceRunner, PredictRequest, ServingClient};
//!
//! let config = ClientConfig::default();
//! let source = ImageSource::resolve("plants.jpg");
//! let bytes = source.read(config.request.timeout())?;
//! let tensor = ImageTensor::from_bytes(&bytes)?;
//!
//! let client = ServingClient::new(&config.server, config.request.timeout())?;
//! let runner = InferenceRunner::new(client, config.request.clone());
//! let report = runner.run(&PredictRequest::single(tensor.to_instance()), None)?;
//! println!("{report}");
//! ```

pub mod client;
pub mod config;
pub mod inference;
pub mod input;
pub mod utils;

// Re-export commonly used items for convenience
pub use client::envelope::{ImageInstance, PredictRequest, PredictResponse};
pub use client::serving::{ServingClient, TimedPrediction};
pub use config::{ClientConfig, RequestOptions, ServerConfig};
pub use inference::metrics::LatencyStats;
pub use inference::runner::{InferenceReport, InferenceRunner};
pub use input::preprocess::ImageTensor;
pub use input::source::ImageSource;
pub use utils::error::{ClientError, Result};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
