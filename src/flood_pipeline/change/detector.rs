use serde::{Deserialize, Serialize};

use crate::flood_pipeline::segment::SegmentationStats;

/// Percentage change in flood pixels from `pre_count` to `post_count`.
///
/// A zero baseline gives 100 when any water appears and 0 otherwise.
pub fn change_percentage(pre_count: u64, post_count: u64) -> f64 {
    if pre_count == 0 {
        return if post_count > 0 { 100.0 } else { 0.0 };
    }
    (post_count as f64 - pre_count as f64) / pre_count as f64 * 100.0
}

/// Signed flood pixel delta, `post_count - pre_count`, saturating at the `i64` range.
pub fn change_pixels(pre_count: u64, post_count: u64) -> i64 {
    let delta = i128::from(post_count) - i128::from(pre_count);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increased,
    Decreased,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeResult {
    pub flood_change_percentage: f64,
    pub flood_change_pixels: i64,
}

impl ChangeResult {
    pub fn between(pre_count: u64, post_count: u64) -> Self {
        Self {
            flood_change_percentage: change_percentage(pre_count, post_count),
            flood_change_pixels: change_pixels(pre_count, post_count),
        }
    }

    pub fn from_stats(pre: &SegmentationStats, post: &SegmentationStats) -> Self {
        Self::between(pre.flood_pixel_count, post.flood_pixel_count)
    }

    pub fn direction(&self) -> ChangeDirection {
        if self.flood_change_pixels > 0 {
            ChangeDirection::Increased
        } else if self.flood_change_pixels < 0 {
            ChangeDirection::Decreased
        } else {
            ChangeDirection::Unchanged
        }
    }

    /// Human readable summary, e.g. `Water increased by 50.00%`.
    ///
    /// Anything that is not a strict increase reads as a decrease.
    pub fn interpretation(&self) -> String {
        let magnitude = self.flood_change_percentage.abs();
        if self.flood_change_percentage > 0.0 {
            format!("Water increased by {magnitude:.2}%")
        } else {
            format!("Water decreased by {magnitude:.2}%")
        }
    }
}
