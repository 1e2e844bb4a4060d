//! Per-pixel water classification
//!
//! Two interchangeable policies decide whether a pixel is flood water:
//! - [`ThresholdBox`]: inclusive HSV box, tuned for clear water
//! - [`MultiCriteria`]: three disjunctive rules for sediment-laden water
//!
//! [`ClassificationPolicy`] is the tagged variant callers select at call time.

mod classifier;
mod multi_criteria;
mod policy;
mod threshold_box;

pub use classifier::{PixelClassifier, PixelSample};
pub use multi_criteria::{MuddyRule, MultiCriteria};
pub use policy::ClassificationPolicy;
pub use threshold_box::ThresholdBox;
