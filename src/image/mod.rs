//! Camera images and the cat classifier interface.
//!
//! Images are opaque to this crate; they are never decoded here. A
//! classifier decides whether an image shows a cat above a confidence
//! threshold.

pub mod fake;

pub use fake::FakeImageClassifier;

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Confidence (percent) the alarm controller requires before treating an
/// image as containing a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// A single camera frame.
#[derive(Debug, Clone, Default)]
pub struct CameraImage {
    data: Vec<u8>,
    source: Option<String>,
}

impl CameraImage {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, source: None }
    }

    /// Read a frame from disk as raw bytes.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(Self {
            data,
            source: Some(path.display().to_string()),
        })
    }

    /// Label the frame with where it came from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Capability that reports whether an image contains a cat.
pub trait ImageClassifier: Send + Sync {
    /// `confidence_threshold` is a percentage in `0.0..=100.0`.
    fn contains_cat(&self, image: &CameraImage, confidence_threshold: f32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_keeps_bytes_and_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let image = CameraImage::from_file(&path).unwrap();
        assert_eq!(image.data(), &[0xFF, 0xD8, 0xFF]);
        assert_eq!(image.len(), 3);
        assert!(image.source().unwrap().ends_with("frame.jpg"));
    }

    #[test]
    fn test_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CameraImage::from_file(&dir.path().join("missing.png")).is_err());
    }
}
