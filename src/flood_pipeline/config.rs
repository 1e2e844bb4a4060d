//! Segmentation pipeline configuration types

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::flood_pipeline::classify::ClassificationPolicy;
use crate::flood_pipeline::common::error::{Result, SegmentationError};

/// Encoding used for the mask and masked-image outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskFormat {
    /// PNG via the `image` crate (default)
    #[default]
    Png,
    /// TIFF via the `tiff` crate, honouring [`TiffCompression`]
    Tiff,
}

impl MaskFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Tiff => "tiff",
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced (default)
    #[default]
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Configuration for a flood segmentation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Water classification policy
    pub policy: ClassificationPolicy,
    /// Split the per-pixel loop across rows with rayon
    pub parallel: bool,
    /// Output encoding for mask and masked image
    pub output_format: MaskFormat,
    /// Compression, only used for TIFF output
    pub compression: TiffCompression,
    /// Reject decoded images whose width or height exceeds this
    pub max_dimension: Option<usize>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            policy: ClassificationPolicy::MultiCriteria,
            parallel: true,
            output_format: MaskFormat::Png,
            compression: TiffCompression::DeflateBalanced,
            max_dimension: None,
        }
    }
}

impl SegmentationConfig {
    pub fn builder() -> SegmentationConfigBuilder {
        SegmentationConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        if self.max_dimension == Some(0) {
            return Err(SegmentationError::Configuration("max_dimension must be positive".to_string()));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SegmentationError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SegmentationError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

/// Builder for SegmentationConfig
#[derive(Default)]
pub struct SegmentationConfigBuilder {
    policy: Option<ClassificationPolicy>,
    parallel: Option<bool>,
    output_format: Option<MaskFormat>,
    compression: Option<TiffCompression>,
    max_dimension: Option<Option<usize>>,
}

impl SegmentationConfigBuilder {
    pub fn policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn output_format(mut self, format: MaskFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> SegmentationConfig {
        let default = SegmentationConfig::default();
        SegmentationConfig {
            policy: self.policy.unwrap_or(default.policy),
            parallel: self.parallel.unwrap_or(default.parallel),
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
