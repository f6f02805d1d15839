//! Cornell box path tracer.
//!
//! Renders the built-in Cornell box and writes it to disk. Settings come
//! from an optional JSON config, overridden by command line flags.

mod cli;
mod logger;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use cornell_renderer::{render_parallel, save, RenderConfig};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RenderConfig::default(),
    };
    let config = args.apply(config);
    config.validate().context("Invalid render settings")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }
    log::debug!("Config: {:?}", config);

    let scene = scene::cornell_box();
    log::info!(
        "Scene: {} surfaces, light power {}",
        scene.len(),
        scene.light().power()
    );

    let image = render_parallel(&scene, &config)?;

    save(&image, config.gamma_correction, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
