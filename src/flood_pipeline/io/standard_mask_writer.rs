use std::io::Write;
use image::{ExtendedColorType, ImageEncoder};
use image::codecs::png::PngEncoder;
use tracing::debug;
use crate::flood_pipeline::common::error::{Result, SegmentationError};
use crate::flood_pipeline::config::{MaskFormat, SegmentationConfig, TiffCompression};
use crate::flood_pipeline::io::writer::MaskWriter;
use crate::flood_pipeline::segment::{BinaryMask, MaskedImage};

/// Writes masks as PNG or TIFF depending on `config.output_format`.
pub struct StandardMaskWriter;

#[derive(Debug, Clone, Copy)]
enum Layout {
    Gray,
    Rgb,
}

impl StandardMaskWriter {
    fn encode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        layout: Layout,
        output: &mut dyn Write,
        config: &SegmentationConfig,
    ) -> Result<()> {
        debug!("Encoding {:?} {:?} image: {}x{}", config.output_format, layout, width, height);

        match config.output_format {
            MaskFormat::Png => encode_png(data, width, height, layout, output),
            MaskFormat::Tiff => encode_tiff(data, width, height, layout, output, config.compression),
        }
    }
}

impl MaskWriter for StandardMaskWriter {
    fn write_mask(&self, mask: &BinaryMask, output: &mut dyn Write, config: &SegmentationConfig) -> Result<()> {
        self.encode(&mask.data, mask.width, mask.height, Layout::Gray, output, config)
    }

    fn write_masked(&self, image: &MaskedImage, output: &mut dyn Write, config: &SegmentationConfig) -> Result<()> {
        self.encode(&image.data, image.width, image.height, Layout::Rgb, output, config)
    }
}

fn encode_png(data: &[u8], width: usize, height: usize, layout: Layout, output: &mut dyn Write) -> Result<()> {
    let color = match layout {
        Layout::Gray => ExtendedColorType::L8,
        Layout::Rgb => ExtendedColorType::Rgb8,
    };

    PngEncoder::new(output)
        .write_image(data, width as u32, height as u32, color)
        .map_err(|e| SegmentationError::EncodeError(e.to_string()))
}

fn encode_tiff(
    data: &[u8],
    width: usize,
    height: usize,
    layout: Layout,
    output: &mut dyn Write,
    compression: TiffCompression,
) -> Result<()> {
    let mut buffer = Vec::new();

    let compression = match compression {
        TiffCompression::None => tiff::encoder::Compression::Uncompressed,
        TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
        TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
    };

    let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
        .map_err(|e| SegmentationError::EncodeError(e.to_string()))?
        .with_compression(compression);

    match layout {
        Layout::Gray => encoder.write_image::<tiff::encoder::colortype::Gray8>(width as u32, height as u32, data),
        Layout::Rgb => encoder.write_image::<tiff::encoder::colortype::RGB8>(width as u32, height as u32, data),
    }
    .map_err(|e| SegmentationError::EncodeError(e.to_string()))?;

    output.write_all(&buffer)?;

    debug!("TIFF encoding complete, {} bytes", buffer.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mask() -> BinaryMask {
        BinaryMask { width: 2, height: 2, data: vec![255, 0, 0, 255] }
    }

    fn sample_masked() -> MaskedImage {
        MaskedImage { width: 2, height: 1, data: vec![180, 140, 90, 0, 0, 0] }
    }

    #[test]
    fn test_png_mask_round_trips_through_image_crate() {
        let mut out: Vec<u8> = Vec::new();
        StandardMaskWriter.write_mask(&sample_mask(), &mut out, &SegmentationConfig::default()).unwrap();

        let decoded = image::load_from_memory(&out).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_png_masked_image() {
        let mut out: Vec<u8> = Vec::new();
        StandardMaskWriter.write_masked(&sample_masked(), &mut out, &SegmentationConfig::default()).unwrap();

        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), vec![180, 140, 90, 0, 0, 0]);
    }

    #[test]
    fn test_tiff_output_for_every_compression() {
        for compression in [
            TiffCompression::None,
            TiffCompression::Lzw,
            TiffCompression::DeflateFast,
            TiffCompression::DeflateBalanced,
            TiffCompression::DeflateBest,
        ] {
            let config = SegmentationConfig::builder()
                .output_format(MaskFormat::Tiff)
                .compression(compression)
                .build();

            let mut out: Vec<u8> = Vec::new();
            StandardMaskWriter.write_masked(&sample_masked(), &mut out, &config).unwrap();

            let mut decoder = tiff::decoder::Decoder::new(std::io::Cursor::new(&out)).unwrap();
            assert_eq!(decoder.dimensions().unwrap(), (2, 1));
            match decoder.read_image().unwrap() {
                tiff::decoder::DecodingResult::U8(data) => assert_eq!(data, vec![180, 140, 90, 0, 0, 0]),
                _ => panic!("unexpected sample type for {compression:?}"),
            }
        }
    }
}
