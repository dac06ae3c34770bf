//! Image Source Resolution
//!
//! An input given on the command line is either a URL or a local file
//! path. URLs are recognized by scheme prefix; everything else is
//! treated as a path.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::utils::error::{ClientError, Result};

/// Scheme prefixes recognized as URLs
const URL_SCHEMES: [&str; 4] = ["http://", "https://", "ftp://", "ftps://"];

/// A resolved image input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image, fetched over HTTP
    Url(String),
    /// Local image file
    File(PathBuf),
}

impl ImageSource {
    /// Classify a raw input string as a URL or a file path
    pub fn resolve(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        if URL_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
            ImageSource::Url(raw.to_string())
        } else {
            ImageSource::File(PathBuf::from(raw))
        }
    }

    /// Whether this source is remote
    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }

    /// Read the raw image bytes from this source
    ///
    /// URLs are fetched with a blocking GET using the given timeout;
    /// file paths are read from disk.
    pub fn read(&self, timeout: Duration) -> Result<Vec<u8>> {
        match self {
            ImageSource::Url(url) => fetch_url(url, timeout),
            ImageSource::File(path) => read_file(path),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => write!(f, "{url}"),
            ImageSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch image bytes from a URL with a blocking GET
fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidInput(format!(
            "Only http(s) URLs can be fetched, got '{url}'"
        )));
    }

    debug!("Fetching image from {url}");

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;

    debug!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Read image bytes from a local file
fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(ClientError::PathNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_urls() {
        assert_eq!(
            ImageSource::resolve("http://example.org/cat.jpg"),
            ImageSource::Url("http://example.org/cat.jpg".to_string())
        );
        assert_eq!(
            ImageSource::resolve("https://example.org/cat.jpg"),
            ImageSource::Url("https://example.org/cat.jpg".to_string())
        );
        assert!(ImageSource::resolve("ftp://example.org/cat.jpg").is_remote());
        assert!(ImageSource::resolve("HTTPS://EXAMPLE.ORG/cat.jpg").is_remote());
    }

    #[test]
    fn test_resolve_paths() {
        assert_eq!(
            ImageSource::resolve("images/cat.jpg"),
            ImageSource::File(PathBuf::from("images/cat.jpg"))
        );
        // A path that merely mentions a scheme is still a path
        assert!(!ImageSource::resolve("my-http://notes.jpg/").is_remote());
        assert!(!ImageSource::resolve("/tmp/http_dump.png").is_remote());
    }

    #[test]
    fn test_ftp_fetch_is_unsupported() {
        let source = ImageSource::resolve("ftp://example.org/cat.jpg");
        let result = source.read(Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let source = ImageSource::resolve("/definitely/not/here.png");
        let result = source.read(Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::PathNotFound(_))));
    }

    #[test]
    fn test_read_local_file() {
        let path = std::env::temp_dir().join("resnet_client_source_test.bin");
        fs::write(&path, b"not really an image").unwrap();

        let source = ImageSource::resolve(path.to_str().unwrap());
        let bytes = source.read(Duration::from_secs(1)).unwrap();
        assert_eq!(bytes, b"not really an image");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_display() {
        let source = ImageSource::resolve("http://example.org/cat.jpg");
        assert_eq!(source.to_string(), "http://example.org/cat.jpg");
    }
}
