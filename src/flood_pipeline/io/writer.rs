use std::io::Write;
use crate::flood_pipeline::common::error::Result;
use crate::flood_pipeline::config::SegmentationConfig;
use crate::flood_pipeline::segment::{BinaryMask, MaskedImage};

pub trait MaskWriter {
    fn write_mask(&self, mask: &BinaryMask, output: &mut dyn Write, config: &SegmentationConfig) -> Result<()>;
    fn write_masked(&self, image: &MaskedImage, output: &mut dyn Write, config: &SegmentationConfig) -> Result<()>;
}
