use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cornell_renderer::{HitPolicy, IndirectWeighting, RenderConfig};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "cornell")]
#[command(about = "Path traces the Cornell box with next-event estimation")]
pub struct Args {
    /// JSON render config; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (.ppm for plain-text P3, .png and friends via the image crate)
    #[arg(short, long, default_value = "scene.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum indirect bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Apply gamma 2.2 to the output
    #[arg(long)]
    pub gamma: bool,

    /// Shade the nearest surface instead of the first one in scene order
    #[arg(long)]
    pub nearest_hit: bool,

    /// Weight indirect bounces by BSDF, cosine and sampling pdf
    #[arg(long)]
    pub throughput: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Fold command line overrides into `config`.
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.gamma {
            config.gamma_correction = true;
        }
        if self.nearest_hit {
            config.hit_policy = HitPolicy::Nearest;
        }
        if self.throughput {
            config.indirect_weighting = IndirectWeighting::Throughput;
        }
        config
    }
}
