//! Flood extent change between two segmentations of the same scene.

mod detector;

pub use detector::{ChangeDirection, ChangeResult, change_percentage, change_pixels};
