//! Flood water segmentation pipeline
//!
//! The core (color conversion, classification, segmentation, change
//! detection) is pure and works on in-memory buffers. The `io` and
//! `pipeline` modules wrap it with decoding, encoding and file handling.

pub mod change;
pub mod classify;
pub mod color;
pub mod common;
pub mod config;
pub mod io;
pub mod pipeline;
pub mod segment;
pub mod timing;

pub use common::{
    ErrorKind,
    Result,
    SegmentationError,
};

pub use color::{
    Hsv,
    rgb_to_hsv,
};

pub use classify::{
    ClassificationPolicy,
    MuddyRule,
    MultiCriteria,
    PixelClassifier,
    PixelSample,
    ThresholdBox,
};

pub use segment::{
    BinaryMask,
    MaskedImage,
    RasterImage,
    SegmentationEngine,
    SegmentationOutput,
    SegmentationStats,
};

pub use change::{
    ChangeDirection,
    ChangeResult,
    change_percentage,
    change_pixels,
};

pub use config::{
    MaskFormat,
    SegmentationConfig,
    SegmentationConfigBuilder,
    TiffCompression,
};

pub use io::{
    ImageCrateReader,
    ImageReader,
    MaskWriter,
    StandardMaskWriter,
};

pub use pipeline::{
    ComparisonReport,
    FloodSegmentationPipeline,
    SegmentationReport,
    compare_reports,
};

pub use timing::{PipelineTimings, StepTiming};
