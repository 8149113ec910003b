//! Verdant: headless procedural side-scroller world generator.
//!
//! Loads (or creates) `config.ron`, applies CLI overrides, builds the
//! configured horizontal range, runs a short avatar simulation over it and
//! optionally writes a JSON snapshot of the resulting world.
//!
//! Run with: `cargo run -p verdant-game -- --seed 42 --ticks 300`

mod sim;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use verdant_config::{CliArgs, Config, ConfigError, default_config_dir};
use verdant_ecs::Tag;
use verdant_world::{WorldError, WorldSession};

use crate::sim::{SimPlan, run_simulation};

/// CLI arguments for the game binary.
#[derive(Parser, Debug)]
#[command(name = "verdant-game", about = "Procedural 2D side-scroller world generator")]
struct GameArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Frames to simulate after building the world.
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Seconds per simulated frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Jump every n-th frame (0 disables jumping).
    #[arg(long, default_value_t = 90)]
    jump_every: u64,

    /// Write a JSON snapshot of the final world to this file.
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum GameError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("failed to write snapshot to {path}: {source}")]
    Dump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load the persisted config, falling back to defaults when there is no
/// config directory, then apply CLI overrides.
fn load_config(cli: &CliArgs) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let config_dir = cli.config.clone().or_else(default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(cli);
    config.validate()?;
    Ok((config, config_dir))
}

fn run(args: GameArgs, config: &Config) -> Result<(), GameError> {
    let mut session = WorldSession::new(config)?;
    let (start, end) = (config.world.range_start, config.range_end());
    info!(
        seed = session.seed(),
        width = config.window.width,
        height = config.window.height,
        start,
        end,
        "building world"
    );

    let report = session.build_range(start, end);
    session.spawn_avatar(start as f32);

    let plan = SimPlan {
        ticks: args.ticks,
        dt: args.dt,
        jump_every: args.jump_every,
    };
    let summary = run_simulation(&mut session, &plan);

    let snapshot = session.snapshot();
    info!(
        blocks = report.blocks,
        trees = report.trees.len(),
        leaves = report.leaves,
        fruit = snapshot.count(Tag::Fruit),
        fruit_collected = summary.fruit_collected,
        energy = summary.final_energy,
        "world summary"
    );

    if let Some(path) = args.dump {
        let json = snapshot.to_json_pretty().map_err(WorldError::from)?;
        std::fs::write(&path, json).map_err(|source| GameError::Dump {
            path: path.clone(),
            source,
        })?;
        info!("Snapshot written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = GameArgs::parse();

    let (config, config_dir) = match load_config(&args.cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            verdant_log::init_logging(None, cfg!(debug_assertions), None);
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    verdant_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_flatten_config_overrides() {
        let args = GameArgs::parse_from([
            "verdant-game",
            "--seed",
            "42",
            "--width",
            "1024",
            "--ticks",
            "10",
            "--jump-every",
            "0",
        ]);
        assert_eq!(args.cli.seed, Some(42));
        assert_eq!(args.cli.width, Some(1024));
        assert_eq!(args.ticks, 10);
        assert_eq!(args.jump_every, 0);
        assert!(args.dump.is_none());
    }

    #[test]
    fn test_load_config_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliArgs {
            config: Some(dir.path().to_path_buf()),
            seed: Some(9),
            ..Default::default()
        };
        let (config, config_dir) = load_config(&cli).unwrap();
        assert_eq!(config.world.seed, Some(9));
        assert_eq!(config_dir.as_deref(), Some(dir.path()));
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_run_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("world.json");
        let args = GameArgs::parse_from([
            "verdant-game",
            "--seed",
            "42",
            "--ticks",
            "30",
            "--dump",
            dump.to_str().unwrap(),
        ]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args.cli);

        run(args, &config).unwrap();

        let json = std::fs::read_to_string(&dump).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 42);
        assert!(value["entities"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliArgs {
            config: Some(dir.path().to_path_buf()),
            height: Some(10),
            ..Default::default()
        };
        assert!(matches!(load_config(&cli), Err(ConfigError::Invalid(_))));
    }
}
