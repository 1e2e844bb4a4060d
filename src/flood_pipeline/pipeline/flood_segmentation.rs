use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::flood_pipeline::{
    common::error::{Result, SegmentationError},
    config::SegmentationConfig,
    io::{ImageCrateReader, ImageReader, MaskWriter, StandardMaskWriter},
    pipeline::report::{ComparisonReport, SegmentationReport, compare_reports},
    segment::{RasterImage, SegmentationEngine, SegmentationOutput},
    timing::PipelineTimings,
};

/// A segmented image whose outputs have been encoded but not yet written.
struct EncodedOutputs {
    report: SegmentationReport,
    mask: Vec<u8>,
    masked: Vec<u8>,
}

pub struct FloodSegmentationPipeline<R: ImageReader, W: MaskWriter> {
    reader: R,
    writer: W,
    engine: SegmentationEngine,
    config: SegmentationConfig,
}

impl FloodSegmentationPipeline<ImageCrateReader, StandardMaskWriter> {
    pub fn new(config: SegmentationConfig) -> Result<Self> {
        Self::with_custom(ImageCrateReader, StandardMaskWriter, config)
    }
}

impl<R: ImageReader, W: MaskWriter> FloodSegmentationPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: SegmentationConfig) -> Result<Self> {
        let engine = Self::build_engine(&config)?;
        Ok(Self {
            reader,
            writer,
            engine,
            config,
        })
    }

    fn build_engine(config: &SegmentationConfig) -> Result<SegmentationEngine> {
        config.validate()?;
        Ok(SegmentationEngine::new(config.policy)?.with_parallel(config.parallel))
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(SegmentationError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(SegmentationError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Segments an already decoded image. No decoding, encoding or I/O.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height(), policy = %self.engine.policy()))]
    pub fn segment_image(&self, image: &RasterImage) -> Result<SegmentationOutput> {
        self.validate_dimensions(image.width(), image.height())?;
        let output = self.engine.segment(image)?;
        debug!(
            flood_pixels = output.stats.flood_pixel_count,
            total_pixels = output.stats.total_pixel_count,
            "Segmentation complete"
        );
        Ok(output)
    }

    /// Decodes `input_data`, segments it, and encodes the mask and masked image
    /// into the two sinks.
    #[instrument(skip(self, input_data, mask_output, masked_output), fields(input_size = input_data.len()))]
    pub fn segment(
        &self,
        input_data: &[u8],
        mask_output: &mut dyn Write,
        masked_output: &mut dyn Write,
    ) -> Result<SegmentationReport> {
        let mut timings = PipelineTimings::new();
        info!("Starting flood segmentation");

        let image = timings.time("decode_image", || self.reader.read_image(input_data))?;
        let output = timings.time("segment", || self.segment_image(&image))?;
        timings.time("encode_mask", || {
            self.writer.write_mask(&output.mask, mask_output, &self.config)
        })?;
        timings.time("encode_masked", || {
            self.writer.write_masked(&output.masked_image, masked_output, &self.config)
        })?;

        timings.log_summary();

        let report = SegmentationReport {
            width: image.width(),
            height: image.height(),
            flood_pixels: output.stats.flood_pixel_count,
            total_pixels: output.stats.total_pixel_count,
            flood_percentage: output.stats.flood_percentage,
            processing_time_ms: timings.total_millis(),
            steps: timings.into_steps(),
            policy: *self.engine.policy(),
            mask_path: None,
            masked_path: None,
        };

        info!(
            "Segmentation complete: {}x{}, {} flood pixels ({:.2}%) in {:.3}ms",
            report.width,
            report.height,
            report.flood_pixels,
            report.flood_percentage,
            report.processing_time_ms
        );
        Ok(report)
    }

    /// Segments `input_path` and writes `mask-<stem>` and `masked-<stem>` into `output_dir`.
    ///
    /// Nothing is written unless decoding, segmentation and encoding all succeed.
    pub fn segment_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<SegmentationReport> {
        let input_path = input_path.as_ref();
        let encoded = self.encode_file(input_path)?;
        self.write_outputs(encoded, output_dir.as_ref(), &file_label(input_path))
    }

    /// Segments both images and compares their flood pixel counts.
    ///
    /// Outputs are labelled `pre-<stem>` and `post-<stem>` so same-named inputs
    /// from different directories do not overwrite each other. Both images are
    /// encoded before any file is written, so a failure on either leaves the
    /// output directory untouched.
    #[instrument(skip(self, pre_path, post_path, output_dir))]
    pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        pre_path: P,
        post_path: Q,
        output_dir: O,
    ) -> Result<(SegmentationReport, SegmentationReport, ComparisonReport)> {
        let pre_path = pre_path.as_ref();
        let post_path = post_path.as_ref();
        let output_dir = output_dir.as_ref();

        let pre_encoded = self.encode_file(pre_path)?;
        let post_encoded = self.encode_file(post_path)?;

        let pre = self.write_outputs(pre_encoded, output_dir, &format!("pre-{}", file_label(pre_path)))?;
        let post = self.write_outputs(post_encoded, output_dir, &format!("post-{}", file_label(post_path)))?;

        let comparison = compare_reports(&pre, &post);
        info!(
            change_pixels = comparison.flood_change_pixels,
            "{}", comparison.interpretation
        );
        Ok((pre, post, comparison))
    }

    #[instrument(skip(self, input_path), fields(input = %input_path.display()))]
    fn encode_file(&self, input_path: &Path) -> Result<EncodedOutputs> {
        let input_data = std::fs::read(input_path).map_err(|e| {
            SegmentationError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        let mut mask = Vec::new();
        let mut masked = Vec::new();
        let report = self.segment(&input_data, &mut mask, &mut masked)?;
        Ok(EncodedOutputs { report, mask, masked })
    }

    fn write_outputs(&self, encoded: EncodedOutputs, output_dir: &Path, label: &str) -> Result<SegmentationReport> {
        info!(output_dir = %output_dir.display(), label, "Writing segmentation outputs");

        std::fs::create_dir_all(output_dir).map_err(|e| {
            SegmentationError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let extension = self.config.output_format.extension();
        let mask_path = output_dir.join(format!("mask-{label}.{extension}"));
        let masked_path = output_dir.join(format!("masked-{label}.{extension}"));

        write_output(&mask_path, &encoded.mask)?;
        if let Err(e) = write_output(&masked_path, &encoded.masked) {
            // Leave no mask without its masked image.
            let _ = std::fs::remove_file(&mask_path);
            return Err(e);
        }

        let mut report = encoded.report;
        report.mask_path = Some(mask_path);
        report.masked_path = Some(masked_path);
        Ok(report)
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    pub fn engine(&self) -> &SegmentationEngine {
        &self.engine
    }

    /// Replaces the configuration. The current one is kept if the new one is invalid.
    pub fn set_config(&mut self, config: SegmentationConfig) -> Result<()> {
        self.engine = Self::build_engine(&config)?;
        self.config = config;
        Ok(())
    }
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .map_err(|e| SegmentationError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
