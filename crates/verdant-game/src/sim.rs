//! Headless avatar simulation over a built world.
//!
//! The avatar runs to the right along the ground, jumps every few frames and
//! picks up any fruit it touches. When it is out of energy it stands still
//! until it has regained some.

use tracing::{debug, info};
use verdant_player::AvatarAction;
use verdant_world::WorldSession;

/// How long and how to simulate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimPlan {
    pub ticks: u64,
    /// Seconds per frame.
    pub dt: f64,
    /// Jump on every n-th frame. Zero never jumps.
    pub jump_every: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimSummary {
    pub ticks: u64,
    pub jumps: u64,
    pub fruit_collected: usize,
    pub final_energy: f32,
}

fn action_for(tick: u64, plan: &SimPlan) -> AvatarAction {
    if plan.jump_every > 0 && tick > 0 && tick % plan.jump_every == 0 {
        AvatarAction::Jump
    } else {
        AvatarAction::Run
    }
}

pub fn run_simulation(session: &mut WorldSession, plan: &SimPlan) -> SimSummary {
    let mut summary = SimSummary::default();

    for tick in 0..plan.ticks {
        session.tick(plan.dt);

        let action = action_for(tick, plan);
        let outcome = session.perform(action);
        if outcome.jumped {
            summary.jumps += 1;
        } else if !outcome.moved {
            session.perform(AvatarAction::Idle);
        }

        let collected = session.collect_touched_fruit();
        if collected > 0 {
            debug!(tick, collected, energy = session.energy(), "fruit picked up");
        }
        summary.fruit_collected += collected;
        summary.ticks += 1;
    }

    summary.final_energy = session.energy();
    info!(
        ticks = summary.ticks,
        jumps = summary.jumps,
        fruit = summary.fruit_collected,
        energy = summary.final_energy,
        "simulation finished"
    );
    summary
}
