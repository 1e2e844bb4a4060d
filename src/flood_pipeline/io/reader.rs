use crate::flood_pipeline::common::error::Result;
use crate::flood_pipeline::segment::RasterImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage>;
}
