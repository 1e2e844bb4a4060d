//! Raster, mask and statistics types

use serde::{Deserialize, Serialize};

use crate::flood_pipeline::common::error::{Result, SegmentationError};

/// Number of interleaved channels in a [`RasterImage`].
pub const CHANNELS: usize = 3;

/// Mask byte for water pixels.
pub const WATER: u8 = 255;
/// Mask byte for everything else.
pub const NON_WATER: u8 = 0;

/// Checks that `len` bytes hold exactly `width * height` RGB pixels.
pub(crate) fn check_shape(width: usize, height: usize, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(SegmentationError::InvalidDimensions(width, height));
    }

    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(SegmentationError::InvalidDimensions(width, height))?;

    if len != expected {
        return Err(SegmentationError::InputShape { width, height, expected, actual: len });
    }

    Ok(())
}

/// Decoded RGB image, row-major, tightly packed `[R, G, B, R, G, B, ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wraps a pixel buffer, failing if it does not hold `width * height * 3` bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_shape(width, height, data.len())?;
        Ok(Self { width, height, data })
    }

    /// Image filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self> {
        width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(SegmentationError::InvalidDimensions(width, height))?;
        Self::new(width, height, rgb.repeat(width * height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// RGB triple at pixel index `p` (row-major).
    pub fn pixel(&self, p: usize) -> Option<[u8; 3]> {
        let offset = p.checked_mul(CHANNELS)?;
        self.data.get(offset..offset + CHANNELS).map(|px| [px[0], px[1], px[2]])
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// One byte per pixel, each either 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub fn is_water(&self, p: usize) -> bool {
        self.data.get(p) == Some(&WATER)
    }

    pub fn water_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == WATER).count()
    }
}

/// Source image with every non-water pixel zeroed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl MaskedImage {
    pub fn pixel(&self, p: usize) -> Option<[u8; 3]> {
        let offset = p.checked_mul(CHANNELS)?;
        self.data.get(offset..offset + CHANNELS).map(|px| [px[0], px[1], px[2]])
    }
}

/// Flood pixel counts for one segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentationStats {
    pub flood_pixel_count: u64,
    pub total_pixel_count: u64,
    pub flood_percentage: f64,
}

impl SegmentationStats {
    pub fn from_counts(flood_pixel_count: u64, total_pixel_count: u64) -> Self {
        let flood_percentage = if total_pixel_count == 0 {
            0.0
        } else {
            flood_pixel_count as f64 / total_pixel_count as f64 * 100.0
        };

        Self { flood_pixel_count, total_pixel_count, flood_percentage }
    }

    pub fn non_flood_pixel_count(&self) -> u64 {
        self.total_pixel_count - self.flood_pixel_count
    }
}

/// Everything a segmentation call hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationOutput {
    pub mask: BinaryMask,
    pub masked_image: MaskedImage,
    pub stats: SegmentationStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_shape_checks() {
        assert!(RasterImage::new(2, 2, vec![0; 12]).is_ok());
        assert!(RasterImage::new(1, 1, vec![0; 3]).is_ok());

        let err = RasterImage::new(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, SegmentationError::InputShape { expected: 12, actual: 11, .. }));

        let err = RasterImage::new(2, 2, vec![0; 16]).unwrap_err();
        assert!(err.is_input_shape());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            RasterImage::new(0, 4, Vec::new()).unwrap_err(),
            SegmentationError::InvalidDimensions(0, 4)
        ));
        assert!(RasterImage::new(3, 0, Vec::new()).unwrap_err().is_input_shape());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(RasterImage::new(usize::MAX, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let image = RasterImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(image.pixel(0), Some([1, 2, 3]));
        assert_eq!(image.pixel(1), Some([4, 5, 6]));
        assert_eq!(image.pixel(2), None);
    }

    #[test]
    fn test_filled() {
        let image = RasterImage::filled(3, 2, [9, 8, 7]).unwrap();
        assert_eq!(image.pixel_count(), 6);
        assert!(image.pixels().chunks_exact(3).all(|px| px == [9, 8, 7]));
    }

    #[test]
    fn test_stats_percentage() {
        let stats = SegmentationStats::from_counts(1, 4);
        assert_eq!(stats.flood_percentage, 25.0);
        assert_eq!(stats.non_flood_pixel_count(), 3);

        assert_eq!(SegmentationStats::from_counts(0, 0).flood_percentage, 0.0);
    }
}
