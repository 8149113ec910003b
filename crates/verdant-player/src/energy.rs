//! Avatar energy bookkeeping.
//!
//! Energy starts full. Standing still regains it, running and jumping spend
//! it, and fruit grants it through [`EnergyGain`]. The value never leaves
//! `[min_energy, max_energy]`.

use tracing::trace;
use verdant_ecs::EnergyGain;

/// Energy limits and action costs.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerParams {
    pub max_energy: f32,
    pub min_energy: f32,
    /// Regained per idle action.
    pub idle_gain: f32,
    /// Spent per run action.
    pub run_cost: f32,
    /// Spent per jump.
    pub jump_cost: f32,
    /// Side length of the avatar's square body.
    pub size: f32,
    /// Horizontal speed while running, in units per second.
    pub run_speed: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            min_energy: 0.0,
            idle_gain: 1.0,
            run_cost: 0.5,
            jump_cost: 10.0,
            size: 50.0,
            run_speed: 350.0,
        }
    }
}

/// What the avatar tries to do this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarAction {
    Idle,
    Run,
    Jump,
}

/// Result of [`AvatarEnergy::apply`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionOutcome {
    /// The avatar had enough energy to run.
    pub moved: bool,
    /// The avatar had enough energy to jump. Jump observers should be told.
    pub jumped: bool,
    /// Energy after the action.
    pub energy: f32,
}

/// The avatar's energy store, owned by the world session.
#[derive(Clone, Debug)]
pub struct AvatarEnergy {
    energy: f32,
    params: PlayerParams,
}

impl AvatarEnergy {
    /// A full energy store.
    pub fn new(params: PlayerParams) -> Self {
        Self {
            energy: params.max_energy,
            params,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn params(&self) -> &PlayerParams {
        &self.params
    }

    /// Add `amount`, capped at the maximum.
    pub fn gain(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(self.params.min_energy, self.params.max_energy);
    }

    fn spend(&mut self, cost: f32) -> bool {
        if self.energy < cost {
            return false;
        }
        self.energy = (self.energy - cost).max(self.params.min_energy);
        true
    }

    /// Charge or credit the energy for `action`.
    pub fn apply(&mut self, action: AvatarAction) -> ActionOutcome {
        let (moved, jumped) = match action {
            AvatarAction::Idle => {
                self.gain(self.params.idle_gain);
                (false, false)
            }
            AvatarAction::Run => (self.spend(self.params.run_cost), false),
            AvatarAction::Jump => (false, self.spend(self.params.jump_cost)),
        };
        trace!(?action, moved, jumped, energy = self.energy, "avatar action");
        ActionOutcome {
            moved,
            jumped,
            energy: self.energy,
        }
    }
}

impl Default for AvatarEnergy {
    fn default() -> Self {
        Self::new(PlayerParams::default())
    }
}

impl EnergyGain for AvatarEnergy {
    fn grant(&mut self, amount: f32) {
        self.gain(amount);
    }
}
