use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::flood_pipeline::change::{ChangeDirection, ChangeResult};
use crate::flood_pipeline::classify::ClassificationPolicy;
use crate::flood_pipeline::segment::SegmentationStats;
use crate::flood_pipeline::timing::StepTiming;

/// Result record for one segmented image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationReport {
    pub width: usize,
    pub height: usize,
    pub flood_pixels: u64,
    pub total_pixels: u64,
    pub flood_percentage: f64,
    /// Wall time of decode, segment and encode, in milliseconds.
    pub processing_time_ms: f64,
    /// Per-step breakdown of `processing_time_ms`, in run order.
    #[serde(default)]
    pub steps: Vec<StepTiming>,
    pub policy: ClassificationPolicy,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mask_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub masked_path: Option<PathBuf>,
}

impl SegmentationReport {
    pub fn stats(&self) -> SegmentationStats {
        SegmentationStats {
            flood_pixel_count: self.flood_pixels,
            total_pixel_count: self.total_pixels,
            flood_percentage: self.flood_percentage,
        }
    }
}

/// Result record for a before/after comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub pre_flood_pixels: u64,
    pub post_flood_pixels: u64,
    pub pre_flood_percentage: f64,
    pub post_flood_percentage: f64,
    pub flood_change_percentage: f64,
    pub flood_change_pixels: i64,
    pub direction: ChangeDirection,
    pub interpretation: String,
}

pub fn compare_reports(pre: &SegmentationReport, post: &SegmentationReport) -> ComparisonReport {
    let change = ChangeResult::from_stats(&pre.stats(), &post.stats());

    ComparisonReport {
        pre_flood_pixels: pre.flood_pixels,
        post_flood_pixels: post.flood_pixels,
        pre_flood_percentage: pre.flood_percentage,
        post_flood_percentage: post.flood_percentage,
        flood_change_percentage: change.flood_change_percentage,
        flood_change_pixels: change.flood_change_pixels,
        direction: change.direction(),
        interpretation: change.interpretation(),
    }
}
