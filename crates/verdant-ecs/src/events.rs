//! Publish/subscribe dispatch of gameplay events to world observers.
//!
//! Observers get mutable access to the world while handling an event, so the
//! bus lives outside the world and is owned by the session driving it.

use bevy_ecs::prelude::*;
use tracing::debug;

/// Reacts to events of type `E` by mutating the world.
pub trait Observer<E>: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn on_event(&mut self, event: &E, world: &mut World);
}

/// The avatar jumped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JumpEvent;

/// Ordered list of observers for one event type.
pub struct EventBus<E> {
    observers: Vec<Box<dyn Observer<E>>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn Observer<E>>) {
        debug!(observer = observer.name(), "observer subscribed");
        self.observers.push(observer);
    }

    /// Deliver `event` to every observer. Returns how many were notified.
    pub fn publish(&mut self, event: &E, world: &mut World) -> usize {
        for observer in &mut self.observers {
            observer.on_event(event, world);
        }
        self.observers.len()
    }

    /// Returns the number of subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
