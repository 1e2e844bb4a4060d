//! Image decoding and mask encoding
//!
//! The core works on in-memory RGB buffers only. These collaborators decode
//! uploaded image files into a [`RasterImage`](crate::flood_pipeline::RasterImage)
//! and encode the mask outputs back into a displayable format.

mod reader;
mod image_crate_reader;
mod writer;
mod standard_mask_writer;

pub use reader::ImageReader;
pub use image_crate_reader::ImageCrateReader;
pub use writer::MaskWriter;
pub use standard_mask_writer::StandardMaskWriter;
