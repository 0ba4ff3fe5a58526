//! Debug overlay demo host
//!
//! Runs a simulated animation loop with the overlay attached, pauses and
//! resumes it through the loop indicator, then prints the overlay.
//!
//! Usage: `overlay [CONFIG.json] [--frames N] [--dump-graph OUT.png]`

mod host;

use anyhow::{Context, Result};
use clap::Parser;
use overlay_core::OverlayConfig;
use std::path::PathBuf;

/// Run the debug overlay against a simulated animation loop
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Overlay config as JSON; defaults to overlay and graph on
    config: Option<PathBuf>,

    /// Number of host loop iterations to run
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Write the final graph to this PNG file
    #[arg(long)]
    dump_graph: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<OverlayConfig> {
    let Some(path) = path else {
        return Ok(OverlayConfig {
            overlay_on: true,
            graph_on: true,
            loop_status_log_on: true,
            ..OverlayConfig::default()
        });
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    OverlayConfig::from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Debug overlay v{}", overlay_core::VERSION);
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let mut host = host::Host::new(config)?;
    host.run(args.frames);

    if let Some(outline) = host.outline() {
        tracing::info!("overlay:\n{outline}");
    }
    if let Some(path) = &args.dump_graph {
        host.dump_graph(path)
            .with_context(|| format!("failed to write graph to {}", path.display()))?;
    }

    Ok(())
}
