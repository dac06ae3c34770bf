//! Input handling: source resolution and image preprocessing
//!
//! This module provides:
//! - Classification of an input string as a URL or a local file path
//! - Fetching raw image bytes from either source
//! - Decoding and scaling pixels into the tensor layout the serving
//!   API expects

pub mod preprocess;
pub mod source;

// Re-export main types for convenience
pub use preprocess::ImageTensor;
pub use source::ImageSource;
