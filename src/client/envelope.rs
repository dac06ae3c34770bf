//! Serving API JSON Envelope
//!
//! The predict endpoint accepts `{"instances": [...]}` where each instance
//! is a HWC-nested image, and answers `{"predictions": [...]}` with one
//! score row per instance. These types define that envelope and the
//! argmax step that turns a score row into a class id.

use serde::{Deserialize, Serialize};

use crate::utils::error::{ClientError, Result};

/// One image as nested rows of RGB pixels: `rows -> cols -> [r, g, b]`
pub type ImageInstance = Vec<Vec<[f32; 3]>>;

/// Request body for the predict endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    /// Batch of images; this client always sends a single-image batch
    pub instances: Vec<ImageInstance>,
}

impl PredictRequest {
    /// Wrap a single image as a one-element batch
    pub fn single(instance: ImageInstance) -> Self {
        Self {
            instances: vec![instance],
        }
    }
}

/// Response body of the predict endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    /// One score row per instance in the request batch
    pub predictions: Vec<Vec<f32>>,
}

impl PredictResponse {
    /// Score row for the first (and only) instance
    pub fn class_scores(&self) -> Result<&[f32]> {
        self.predictions
            .first()
            .map(|row| row.as_slice())
            .ok_or_else(|| ClientError::Serving("Response contained no predictions".to_string()))
    }

    /// Predicted class id: argmax over the first score row
    pub fn predicted_class(&self) -> Result<usize> {
        let scores = self.class_scores()?;
        argmax(scores)
            .ok_or_else(|| ClientError::Serving("Prediction row was empty".to_string()))
    }
}

/// Index of the largest score; ties resolve to the first occurrence
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}
