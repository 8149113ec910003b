//! World session errors.

use verdant_config::ConfigError;
use verdant_flora::FloraError;

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Flora(#[from] FloraError),

    /// Snapshot could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
