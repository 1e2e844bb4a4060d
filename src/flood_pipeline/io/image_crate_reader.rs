//! Image reader backed by the `image` crate.
//!
//! Decodes any format the crate is built with (PNG, JPEG, TIFF, ...) and
//! flattens it to 8-bit RGB. Alpha is discarded, grayscale is expanded to
//! three equal channels, and 16-bit samples are scaled down to 8 bits.

use tracing::debug;
use crate::flood_pipeline::common::error::{Result, SegmentationError};
use crate::flood_pipeline::io::reader::ImageReader;
use crate::flood_pipeline::segment::RasterImage;

pub struct ImageCrateReader;

impl ImageReader for ImageCrateReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| SegmentationError::DecodeError(e.to_string()))?;

        debug!("Decoded {:?} image: {}x{}", decoded.color(), decoded.width(), decoded.height());

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        RasterImage::new(width as usize, height as usize, rgb.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn test_decodes_png_and_drops_alpha() {
        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(0, 0, Rgba([180, 140, 90, 10]));
        source.put_pixel(1, 0, Rgba([10, 10, 200, 255]));

        let mut encoded = Cursor::new(Vec::new());
        source.write_to(&mut encoded, ImageFormat::Png).unwrap();

        let image = ImageCrateReader.read_image(encoded.get_ref()).unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));
        assert_eq!(image.pixels(), &[180, 140, 90, 10, 10, 200]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = ImageCrateReader.read_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, SegmentationError::DecodeError(_)));
    }
}
