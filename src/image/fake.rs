//! Stand-in classifier for development without a real vision backend.

use super::{CameraImage, ImageClassifier};
use log::debug;
use rand::Rng;

/// Classifier that answers at random, or with a fixed verdict.
///
/// A frame with no data never contains a cat. The confidence threshold is
/// accepted but not used.
pub struct FakeImageClassifier {
    cat_probability: f64,
}

impl FakeImageClassifier {
    /// `cat_probability` is clamped to `0.0..=1.0`; NaN falls back to 0.5.
    pub fn new(cat_probability: f64) -> Self {
        let cat_probability = if cat_probability.is_nan() {
            0.5
        } else {
            cat_probability.clamp(0.0, 1.0)
        };
        Self { cat_probability }
    }

    /// Always report `cat`.
    pub fn with_verdict(cat: bool) -> Self {
        Self::new(if cat { 1.0 } else { 0.0 })
    }

    pub fn cat_probability(&self) -> f64 {
        self.cat_probability
    }
}

impl Default for FakeImageClassifier {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ImageClassifier for FakeImageClassifier {
    fn contains_cat(&self, image: &CameraImage, confidence_threshold: f32) -> bool {
        let cat = !image.data().is_empty() && rand::thread_rng().gen_bool(self.cat_probability);
        debug!(
            "[Camera] Fake classifier: {} bytes from {}, threshold {:.1}% -> {}",
            image.len(),
            image.source().unwrap_or("memory"),
            confidence_threshold,
            cat
        );
        cat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_verdicts() {
        let image = CameraImage::new(vec![1, 2, 3]);
        let always = FakeImageClassifier::with_verdict(true);
        let never = FakeImageClassifier::with_verdict(false);
        for _ in 0..20 {
            assert!(always.contains_cat(&image, 50.0));
            assert!(!never.contains_cat(&image, 50.0));
        }
    }

    #[test]
    fn test_empty_frame_has_no_cat() {
        let always = FakeImageClassifier::with_verdict(true);
        assert!(!always.contains_cat(&CameraImage::default(), 50.0));
    }

    #[test]
    fn test_probability_is_clamped() {
        assert_eq!(FakeImageClassifier::new(3.0).cat_probability(), 1.0);
        assert_eq!(FakeImageClassifier::new(-1.0).cat_probability(), 0.0);
        assert_eq!(FakeImageClassifier::new(f64::NAN).cat_probability(), 0.5);
        assert_eq!(FakeImageClassifier::default().cat_probability(), 0.5);
    }
}
