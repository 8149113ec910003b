//! World session: wires terrain, flora, the avatar and the event bus around
//! one entity registry and one seed.

mod error;
mod params;
mod session;
mod snapshot;

pub use error::WorldError;
pub use params::{flora_params, player_params, sweep_params, terrain_params};
pub use session::{BuildReport, WorldSession};
pub use snapshot::{EntitySnapshot, WorldSnapshot};
