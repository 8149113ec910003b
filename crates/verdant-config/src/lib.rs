//! Configuration system for Verdant.
//!
//! Provides world-generation settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, validation of the
//! generation constants, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, FloraConfig, PlayerConfig, TerrainConfig, WindowConfig, WorldConfig,
    default_config_dir,
};
pub use error::ConfigError;
