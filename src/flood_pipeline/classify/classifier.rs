use crate::flood_pipeline::color::{Hsv, rgb_to_hsv};

/// One pixel as seen by a classifier: the raw channels plus their HSV form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hsv: Hsv,
}

impl PixelSample {
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, hsv: rgb_to_hsv(r, g, b) }
    }

    /// `|r - g|`
    #[inline]
    pub fn rg_diff(&self) -> i32 {
        (self.r as i32 - self.g as i32).abs()
    }

    /// `r - b`, negative when blue dominates red.
    #[inline]
    pub fn rb_diff(&self) -> i32 {
        self.r as i32 - self.b as i32
    }

    /// `g - b`, negative when blue dominates green.
    #[inline]
    pub fn gb_diff(&self) -> i32 {
        self.g as i32 - self.b as i32
    }

    /// Euclidean magnitude of the (r - b, g - b) difference vector.
    #[inline]
    pub fn chrominance(&self) -> f64 {
        let rb = self.rb_diff() as f64;
        let gb = self.gb_diff() as f64;
        (rb * rb + gb * gb).sqrt()
    }
}

/// Decides water / non-water for a single pixel.
///
/// Implementations must be pure: the answer depends on the sample only.
pub trait PixelClassifier {
    fn is_water(&self, sample: &PixelSample) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_metrics() {
        let sample = PixelSample::from_rgb(180, 140, 90);
        assert_eq!(sample.rg_diff(), 40);
        assert_eq!(sample.rb_diff(), 90);
        assert_eq!(sample.gb_diff(), 50);
        assert!((sample.chrominance() - (90.0f64 * 90.0 + 50.0 * 50.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_differences() {
        let sample = PixelSample::from_rgb(10, 40, 200);
        assert_eq!(sample.rg_diff(), 30);
        assert_eq!(sample.rb_diff(), -190);
        assert_eq!(sample.gb_diff(), -160);
    }
}
