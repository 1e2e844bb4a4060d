//! Flood segmentation
//!
//! Turns a decoded RGB raster into a binary water mask, a masked copy of the
//! image and flood pixel statistics.

mod engine;
pub mod types;

pub use engine::SegmentationEngine;
pub use types::{BinaryMask, MaskedImage, RasterImage, SegmentationOutput, SegmentationStats, CHANNELS};
