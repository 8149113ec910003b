//! Flora placement errors.

/// Errors raised while validating flora parameters or sizing a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FloraError {
    /// No even tree height fits between the canopy half-size and the ground.
    #[error("no valid tree height at x = {x} (ground at {ground})")]
    EmptyHeightRange { x: i32, ground: f32 },

    /// A creation probability lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// The canopy square cannot be laid out on the leaf sub-grid.
    #[error("invalid canopy: {0}")]
    InvalidCanopy(String),
}
