use rayon::prelude::*;

use crate::flood_pipeline::classify::{ClassificationPolicy, PixelClassifier, PixelSample};
use crate::flood_pipeline::common::error::Result;
use crate::flood_pipeline::segment::types::{
    BinaryMask, MaskedImage, NON_WATER, RasterImage, SegmentationOutput, SegmentationStats, WATER,
    CHANNELS, check_shape,
};

/// Per-pixel flood segmentation under a fixed classification policy.
///
/// The engine holds no mutable state; one instance can serve any number of
/// images, from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationEngine {
    policy: ClassificationPolicy,
    parallel: bool,
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self { policy: ClassificationPolicy::default(), parallel: true }
    }
}

impl SegmentationEngine {
    /// Fails with a configuration error before any pixel is touched if the
    /// policy's bounds are invalid.
    pub fn new(policy: ClassificationPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy, parallel: true })
    }

    /// Row-parallel execution. Output is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn segment(&self, image: &RasterImage) -> Result<SegmentationOutput> {
        self.segment_pixels(image.width(), image.height(), image.pixels())
    }

    /// Segments a borrowed RGB buffer of `width * height * 3` bytes.
    pub fn segment_pixels(&self, width: usize, height: usize, pixels: &[u8]) -> Result<SegmentationOutput> {
        check_shape(width, height, pixels.len())?;

        let mut mask = vec![NON_WATER; width * height];
        let mut masked = pixels.to_vec();
        let row_bytes = width * CHANNELS;

        let flood_pixels: usize = if self.parallel {
            mask.par_chunks_mut(width)
                .zip(masked.par_chunks_mut(row_bytes))
                .map(|(mask_row, masked_row)| classify_row(&self.policy, mask_row, masked_row))
                .sum()
        } else {
            mask.chunks_mut(width)
                .zip(masked.chunks_mut(row_bytes))
                .map(|(mask_row, masked_row)| classify_row(&self.policy, mask_row, masked_row))
                .sum()
        };

        let stats = SegmentationStats::from_counts(flood_pixels as u64, (width * height) as u64);

        Ok(SegmentationOutput {
            mask: BinaryMask { width, height, data: mask },
            masked_image: MaskedImage { width, height, data: masked },
            stats,
        })
    }
}

/// Classifies one row in place. `masked_row` starts as a copy of the source
/// row; non-water pixels are zeroed. Returns the row's water pixel count.
#[inline]
fn classify_row<C: PixelClassifier>(classifier: &C, mask_row: &mut [u8], masked_row: &mut [u8]) -> usize {
    let mut water = 0;

    for (mask_px, rgb) in mask_row.iter_mut().zip(masked_row.chunks_exact_mut(CHANNELS)) {
        let sample = PixelSample::from_rgb(rgb[0], rgb[1], rgb[2]);
        if classifier.is_water(&sample) {
            *mask_px = WATER;
            water += 1;
        } else {
            *mask_px = NON_WATER;
            rgb.fill(0);
        }
    }

    water
}
