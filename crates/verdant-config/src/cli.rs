//! Command-line argument parsing for Verdant.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Verdant command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "verdant", about = "Procedural 2D side-scroller world generator")]
pub struct CliArgs {
    /// World seed (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// First horizontal position to generate.
    #[arg(long)]
    pub range_start: Option<i32>,

    /// End of the generated range (exclusive).
    #[arg(long)]
    pub range_end: Option<i32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(start) = args.range_start {
            self.world.range_start = start;
        }
        if let Some(end) = args.range_end {
            self.world.range_end = Some(end);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
