use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flood_pipeline::classify::classifier::{PixelClassifier, PixelSample};
use crate::flood_pipeline::classify::multi_criteria::MultiCriteria;
use crate::flood_pipeline::classify::threshold_box::ThresholdBox;
use crate::flood_pipeline::common::error::{Result, SegmentationError};

/// Classification policy chosen by the caller for one segmentation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClassificationPolicy {
    /// Simple inclusive HSV box.
    ThresholdBox(ThresholdBox),
    /// Muddy-water heuristic, the default.
    MultiCriteria,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self::MultiCriteria
    }
}

impl ClassificationPolicy {
    pub fn threshold_box(threshold_box: ThresholdBox) -> Result<Self> {
        threshold_box.validate()?;
        Ok(Self::ThresholdBox(threshold_box))
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ThresholdBox(threshold_box) => threshold_box.validate(),
            Self::MultiCriteria => Ok(()),
        }
    }

    /// Switches to the kind named by `selector`. Selecting the kind already in
    /// use keeps the current parameters.
    pub fn reselect(self, selector: ClassificationPolicy) -> Self {
        match (self, selector) {
            (Self::ThresholdBox(current), Self::ThresholdBox(_)) => Self::ThresholdBox(current),
            (_, selector) => selector,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ThresholdBox(_) => "threshold-box",
            Self::MultiCriteria => "multi-criteria",
        }
    }
}

impl PixelClassifier for ClassificationPolicy {
    #[inline]
    fn is_water(&self, sample: &PixelSample) -> bool {
        match self {
            Self::ThresholdBox(threshold_box) => threshold_box.is_water(sample),
            Self::MultiCriteria => MultiCriteria.is_water(sample),
        }
    }
}

impl fmt::Display for ClassificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a policy selector. `threshold-box` yields the default box.
impl FromStr for ClassificationPolicy {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "threshold-box" | "threshold" | "simple" => Ok(Self::ThresholdBox(ThresholdBox::default())),
            "multi-criteria" | "muddy" | "advanced" => Ok(Self::MultiCriteria),
            other => Err(SegmentationError::Configuration(format!(
                "unknown classification policy '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood_pipeline::common::error::ErrorKind;

    #[test]
    fn test_default_is_multi_criteria() {
        assert_eq!(ClassificationPolicy::default(), ClassificationPolicy::MultiCriteria);
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!("muddy".parse::<ClassificationPolicy>().unwrap(), ClassificationPolicy::MultiCriteria);
        assert_eq!(
            "Threshold-Box".parse::<ClassificationPolicy>().unwrap(),
            ClassificationPolicy::ThresholdBox(ThresholdBox::default())
        );
    }

    #[test]
    fn test_unknown_selector_is_configuration_error() {
        let err = "kmeans".parse::<ClassificationPolicy>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_dispatch_matches_underlying_policy() {
        let muddy = PixelSample::from_rgb(180, 140, 90);
        let clear = PixelSample::from_rgb(200, 190, 160);

        let multi = ClassificationPolicy::MultiCriteria;
        let simple = ClassificationPolicy::ThresholdBox(ThresholdBox::default());

        assert_eq!(multi.is_water(&muddy), MultiCriteria.is_water(&muddy));
        assert_eq!(simple.is_water(&clear), ThresholdBox::default().is_water(&clear));
        assert!(simple.is_water(&clear));
    }

    #[test]
    fn test_reselect_same_kind_keeps_box() {
        let custom = ClassificationPolicy::ThresholdBox(ThresholdBox::new(0.05, 0.25, 0.0, 0.5, 0.5, 1.0).unwrap());
        let selector = "threshold-box".parse::<ClassificationPolicy>().unwrap();

        assert_eq!(custom.reselect(selector), custom);
        assert_eq!(
            ClassificationPolicy::MultiCriteria.reselect(selector),
            ClassificationPolicy::ThresholdBox(ThresholdBox::default())
        );
        assert_eq!(custom.reselect(ClassificationPolicy::MultiCriteria), ClassificationPolicy::MultiCriteria);
    }

    #[test]
    fn test_threshold_box_constructor_validates() {
        let inverted = ThresholdBox { h_min: 0.5, h_max: 0.1, ..ThresholdBox::default() };
        assert!(ClassificationPolicy::threshold_box(inverted).is_err());
        assert!(ClassificationPolicy::threshold_box(ThresholdBox::default()).is_ok());
    }

    #[test]
    fn test_serde_tagged_form() {
        let json = serde_json::to_string(&ClassificationPolicy::MultiCriteria).unwrap();
        assert_eq!(json, r#"{"kind":"multi-criteria"}"#);

        let parsed: ClassificationPolicy = serde_json::from_str(
            r#"{"kind":"threshold-box","h_min":0.1,"h_max":0.2,"s_min":0.0,"s_max":1.0,"v_min":0.5,"v_max":1.0}"#,
        )
        .unwrap();
        assert_eq!(parsed, ClassificationPolicy::ThresholdBox(ThresholdBox::new(0.1, 0.2, 0.0, 1.0, 0.5, 1.0).unwrap()));
    }
}
