//! Color space conversion
//!
//! RGB to HSV conversion used by every classification policy.

mod hsv;

pub use hsv::{Hsv, rgb_to_hsv};
