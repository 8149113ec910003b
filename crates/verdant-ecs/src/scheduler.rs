//! Deferred one-shot tasks bound to an owning entity.
//!
//! A task is registered with a delay in seconds and fires on the first frame
//! whose session time reaches its fire time. Tasks cannot be cancelled. If the
//! owning entity has been despawned by the time the task is due, the task is
//! dropped without running.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::*;
use tracing::trace;

use crate::time::TimeRes;

/// Work run against the world when a task fires. Receives the owner entity.
type TaskFn = Box<dyn FnOnce(&mut World, Entity) + Send + Sync>;

struct ScheduledTask {
    fire_at: f64,
    seq: u64,
    owner: Entity,
    label: &'static str,
    run: TaskFn,
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    // Reversed so the max-heap pops the earliest (fire_at, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Queue of pending one-shot tasks, ordered by fire time then registration order.
#[derive(Resource, Default)]
pub struct Scheduler {
    now: f64,
    next_seq: u64,
    pending: BinaryHeap<ScheduledTask>,
}

impl Scheduler {
    /// Register `task` to run `delay` seconds from the scheduler's current time.
    pub fn after<F>(&mut self, owner: Entity, delay: f64, label: &'static str, task: F)
    where
        F: FnOnce(&mut World, Entity) + Send + Sync + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledTask {
            fire_at: self.now + delay.max(0.0),
            seq,
            owner,
            label,
            run: Box::new(task),
        });
    }

    /// The scheduler's view of session time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the scheduler's clock forward to `now`. Never moves it backwards.
    pub fn sync_clock(&mut self, now: f64) {
        self.now = self.now.max(now);
    }

    /// Fire time of the earliest pending task.
    pub fn next_fire_time(&self) -> Option<f64> {
        self.pending.peek().map(|t| t.fire_at)
    }

    /// Returns the number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no task is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn take_due(&mut self, now: f64) -> Vec<ScheduledTask> {
        self.sync_clock(now);
        let mut due = Vec::new();
        while self.pending.peek().is_some_and(|t| t.fire_at <= self.now) {
            if let Some(task) = self.pending.pop() {
                due.push(task);
            }
        }
        due
    }
}

/// Register a task `delay` seconds after the world's current [`TimeRes::elapsed`].
pub fn schedule_after<F>(
    world: &mut World,
    owner: Entity,
    delay: f64,
    label: &'static str,
    task: F,
) where
    F: FnOnce(&mut World, Entity) + Send + Sync + 'static,
{
    let now = world.get_resource::<TimeRes>().map_or(0.0, |t| t.elapsed);
    let mut scheduler = world.get_resource_or_insert_with(Scheduler::default);
    scheduler.sync_clock(now);
    scheduler.after(owner, delay, label, task);
}

/// Fire every task that is due at the world's current time, in fire-time
/// order. Returns how many tasks actually ran.
pub fn fire_due_tasks(world: &mut World) -> usize {
    let now = world.get_resource::<TimeRes>().map_or(0.0, |t| t.elapsed);
    let due = match world.get_resource_mut::<Scheduler>() {
        Some(mut scheduler) => scheduler.take_due(now),
        None => return 0,
    };

    let mut fired = 0;
    for task in due {
        if world.get_entity(task.owner).is_err() {
            trace!(
                label = task.label,
                owner = ?task.owner,
                "owner despawned, dropping task"
            );
            continue;
        }
        trace!(label = task.label, owner = ?task.owner, at = task.fire_at, "firing task");
        (task.run)(world, task.owner);
        fired += 1;
    }
    fired
}

/// Exclusive system wrapper around [`fire_due_tasks`].
pub fn run_due_tasks(world: &mut World) {
    fire_due_tasks(world);
}
