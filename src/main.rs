use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use flood_seg_rs::flood_pipeline::{
    ClassificationPolicy, FloodSegmentationPipeline, MaskFormat, SegmentationConfig, ThresholdBox,
};
use flood_seg_rs::logger;

#[derive(Parser)]
#[command(name = "flood-seg")]
#[command(version, about = "Flood water segmentation and change detection for aerial imagery", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a single image
    Segment {
        /// Input image (PNG, JPEG, TIFF, ...)
        input: PathBuf,
        #[command(flatten)]
        options: SegmentOptions,
    },
    /// Segment a before/after pair and report the change in flood extent
    Compare {
        /// Image taken before the flood event
        pre: PathBuf,
        /// Image taken after the flood event
        post: PathBuf,
        #[command(flatten)]
        options: SegmentOptions,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Png,
    Tiff,
}

#[derive(Args)]
struct SegmentOptions {
    /// Directory for mask and masked-image outputs
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,

    /// JSON configuration file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Classification policy: multi-criteria or threshold-box
    #[arg(short, long)]
    policy: Option<String>,

    /// Output encoding
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable row-parallel segmentation
    #[arg(long)]
    sequential: bool,

    /// Print result records as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Threshold-box bounds in [0, 1]; setting any of them selects threshold-box
    #[arg(long)]
    h_min: Option<f64>,
    #[arg(long)]
    h_max: Option<f64>,
    #[arg(long)]
    s_min: Option<f64>,
    #[arg(long)]
    s_max: Option<f64>,
    #[arg(long)]
    v_min: Option<f64>,
    #[arg(long)]
    v_max: Option<f64>,
}

impl SegmentOptions {
    fn has_threshold_overrides(&self) -> bool {
        [self.h_min, self.h_max, self.s_min, self.s_max, self.v_min, self.v_max]
            .iter()
            .any(Option::is_some)
    }

    fn build_config(&self) -> Result<SegmentationConfig> {
        let mut config = match &self.config {
            Some(path) => SegmentationConfig::from_json_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => SegmentationConfig::default(),
        };

        if let Some(policy) = &self.policy {
            config.policy = config.policy.reselect(policy.parse::<ClassificationPolicy>()?);
        }

        if self.has_threshold_overrides() {
            let base = match config.policy {
                ClassificationPolicy::ThresholdBox(threshold_box) => threshold_box,
                ClassificationPolicy::MultiCriteria => ThresholdBox::default(),
            };
            let threshold_box = ThresholdBox::new(
                self.h_min.unwrap_or(base.h_min),
                self.h_max.unwrap_or(base.h_max),
                self.s_min.unwrap_or(base.s_min),
                self.s_max.unwrap_or(base.s_max),
                self.v_min.unwrap_or(base.v_min),
                self.v_max.unwrap_or(base.v_max),
            )?;
            config.policy = ClassificationPolicy::ThresholdBox(threshold_box);
        }

        if let Some(format) = self.format {
            config.output_format = match format {
                OutputFormat::Png => MaskFormat::Png,
                OutputFormat::Tiff => MaskFormat::Tiff,
            };
        }

        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Segment { input, options } => {
            let config = options.build_config()?;
            info!("Policy: {}", config.policy);
            let pipeline = FloodSegmentationPipeline::new(config)?;

            let report = pipeline
                .segment_file(&input, &options.out_dir)
                .with_context(|| format!("segmenting {}", input.display()))?;

            if options.json {
                print_json(&report)?;
            } else {
                println!(
                    "{}: {} of {} pixels flooded ({:.2}%) in {:.0}ms",
                    input.display(),
                    report.flood_pixels,
                    report.total_pixels,
                    report.flood_percentage,
                    report.processing_time_ms
                );
            }
        }
        Commands::Compare { pre, post, options } => {
            let config = options.build_config()?;
            info!("Policy: {}", config.policy);
            let pipeline = FloodSegmentationPipeline::new(config)?;

            let (pre_report, post_report, comparison) = pipeline
                .compare_files(&pre, &post, &options.out_dir)
                .with_context(|| format!("comparing {} with {}", pre.display(), post.display()))?;

            if options.json {
                print_json(&comparison)?;
            } else {
                println!(
                    "pre:  {} flood pixels ({:.2}%)",
                    pre_report.flood_pixels, pre_report.flood_percentage
                );
                println!(
                    "post: {} flood pixels ({:.2}%)",
                    post_report.flood_pixels, post_report.flood_percentage
                );
                println!(
                    "change: {:+} pixels, {:.2}% ({})",
                    comparison.flood_change_pixels,
                    comparison.flood_change_percentage,
                    comparison.interpretation
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> SegmentOptions {
        let argv = ["flood-seg", "segment", "in.png"].iter().chain(args).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Segment { options, .. } => options,
            Commands::Compare { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_policy_flag_keeps_box_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let custom = ThresholdBox::new(0.05, 0.25, 0.0, 0.5, 0.5, 1.0).unwrap();
        let config = SegmentationConfig::builder()
            .policy(ClassificationPolicy::ThresholdBox(custom))
            .build();
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let built = options(&["--config", path.to_str().unwrap(), "--policy", "threshold-box"])
            .build_config()
            .unwrap();
        assert_eq!(built.policy, ClassificationPolicy::ThresholdBox(custom));
    }

    #[test]
    fn test_threshold_flags_override_one_bound() {
        let built = options(&["--policy", "threshold-box", "--v-min", "0.7"]).build_config().unwrap();
        let expected = ThresholdBox { v_min: 0.7, ..ThresholdBox::default() };
        assert_eq!(built.policy, ClassificationPolicy::ThresholdBox(expected));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(options(&["--policy", "kmeans"]).build_config().is_err());
    }
}
