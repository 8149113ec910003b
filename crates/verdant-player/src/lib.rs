//! The avatar: its energy budget, the actions that spend it, and its body in
//! the registry.

mod avatar;
mod energy;

pub use avatar::{Avatar, AvatarBundle, avatar_bounds, move_avatar, spawn_avatar};
pub use energy::{ActionOutcome, AvatarAction, AvatarEnergy, PlayerParams};
