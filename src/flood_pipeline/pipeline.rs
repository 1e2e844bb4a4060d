//! Segmentation orchestration
//!
//! Wires decoding, the segmentation engine and mask encoding together, and
//! produces the result records callers persist.

mod flood_segmentation;
mod report;


pub use flood_segmentation::FloodSegmentationPipeline;
pub use report::{ComparisonReport, SegmentationReport, compare_reports};
