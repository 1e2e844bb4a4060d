use thiserror::Error;

/// Coarse classification of a [`SegmentationError`] for callers that map
/// failures onto user-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InputShape,
    Decode,
    Encode,
    Io,
}

#[derive(Error, Debug)]
pub enum SegmentationError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Pixel buffer does not match {width}x{height} RGB: expected {expected} bytes, got {actual}")]
    InputShape {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SegmentationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InputShape { .. } | Self::InvalidDimensions(..) => ErrorKind::InputShape,
            Self::DecodeError(_) => ErrorKind::Decode,
            Self::EncodeError(_) => ErrorKind::Encode,
            Self::InputReadError(_) | Self::OutputWriteError(_) | Self::IoError(_) => ErrorKind::Io,
        }
    }

    pub fn is_input_shape(&self) -> bool {
        self.kind() == ErrorKind::InputShape
    }
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
