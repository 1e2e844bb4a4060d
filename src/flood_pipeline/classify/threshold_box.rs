use serde::{Deserialize, Serialize};

use crate::flood_pipeline::classify::classifier::{PixelClassifier, PixelSample};
use crate::flood_pipeline::common::error::{Result, SegmentationError};

/// Inclusive HSV box. A pixel is water iff all three components fall inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBox {
    pub h_min: f64,
    pub h_max: f64,
    pub s_min: f64,
    pub s_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl Default for ThresholdBox {
    /// Calibrated for clear, blue water reflectance.
    fn default() -> Self {
        Self {
            h_min: 0.063,
            h_max: 0.212,
            s_min: 0.021,
            s_max: 0.408,
            v_min: 0.623,
            v_max: 1.0,
        }
    }
}

impl ThresholdBox {
    /// Builds a validated box. Bounds are never clamped.
    pub fn new(h_min: f64, h_max: f64, s_min: f64, s_max: f64, v_min: f64, v_max: f64) -> Result<Self> {
        let threshold_box = Self { h_min, h_max, s_min, s_max, v_min, v_max };
        threshold_box.validate()?;
        Ok(threshold_box)
    }

    /// Checks every bound lies in [0, 1] and each min <= max.
    pub fn validate(&self) -> Result<()> {
        let pairs = [
            ("hue", self.h_min, self.h_max),
            ("saturation", self.s_min, self.s_max),
            ("value", self.v_min, self.v_max),
        ];

        for (name, min, max) in pairs {
            for (label, bound) in [("min", min), ("max", max)] {
                if !bound.is_finite() || !(0.0..=1.0).contains(&bound) {
                    return Err(SegmentationError::Configuration(format!(
                        "{name} {label} bound {bound} is outside [0, 1]"
                    )));
                }
            }
            if min > max {
                return Err(SegmentationError::Configuration(format!(
                    "{name} bounds are inverted: min {min} > max {max}"
                )));
            }
        }

        Ok(())
    }
}

impl PixelClassifier for ThresholdBox {
    #[inline]
    fn is_water(&self, sample: &PixelSample) -> bool {
        let hsv = sample.hsv;
        hsv.h >= self.h_min
            && hsv.h <= self.h_max
            && hsv.s >= self.s_min
            && hsv.s <= self.s_max
            && hsv.v >= self.v_min
            && hsv.v <= self.v_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood_pipeline::common::error::ErrorKind;

    #[test]
    fn test_default_box_is_valid() {
        assert!(ThresholdBox::default().validate().is_ok());
    }

    #[test]
    fn test_default_box_classification() {
        let classifier = ThresholdBox::default();
        // h = 0.125, s = 0.2, v = 0.78
        assert!(classifier.is_water(&PixelSample::from_rgb(200, 190, 160)));
        assert!(!classifier.is_water(&PixelSample::from_rgb(10, 10, 200)));
        assert!(!classifier.is_water(&PixelSample::from_rgb(0, 0, 0)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let hsv = PixelSample::from_rgb(128, 128, 128).hsv;
        let exact = ThresholdBox::new(0.0, 0.0, 0.0, 0.0, hsv.v, hsv.v).unwrap();
        assert!(exact.is_water(&PixelSample::from_rgb(128, 128, 128)));
        assert!(!exact.is_water(&PixelSample::from_rgb(129, 129, 129)));
    }

    #[test]
    fn test_out_of_range_bound_rejected() {
        let err = ThresholdBox::new(0.0, 1.2, 0.0, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = ThresholdBox::new(-0.1, 0.5, 0.0, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        assert!(ThresholdBox::new(0.0, 0.5, 0.0, 1.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = ThresholdBox::new(0.0, 1.0, 0.6, 0.4, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, SegmentationError::Configuration(msg) if msg.contains("saturation")));
    }

    #[test]
    fn test_full_box_accepts_everything() {
        let full = ThresholdBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0).unwrap();
        for v in [0u8, 17, 90, 180, 255] {
            assert!(full.is_water(&PixelSample::from_rgb(v, 255 - v, v / 2)));
        }
    }
}
