use crate::core::BodyHandle;
use crate::math::Vector2;
use std::collections::VecDeque;

/// A collision handler fired for a pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The first body of the registered pair
    pub body_a: BodyHandle,

    /// The second body of the registered pair
    pub body_b: BodyHandle,

    /// The minimum-overlap axis reported by the collision test
    pub axis: Vector2,
}

/// Events produced during the most recent scene tick, for collaborators
/// (audio, effects, score keeping) that poll instead of registering handlers
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision handlers that fired this tick
    collision_events: VecDeque<CollisionEvent>,

    /// Bodies freed by this tick's cleanup pass
    removed_bodies: VecDeque<BodyHandle>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collision event to the queue
    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Records that a body has been freed
    pub fn add_removed_body(&mut self, body: BodyHandle) {
        self.removed_bodies.push_back(body);
    }

    /// Gets the next collision event from the queue
    pub fn next_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Gets the next freed body from the queue
    pub fn next_removed_body(&mut self) -> Option<BodyHandle> {
        self.removed_bodies.pop_front()
    }

    /// Returns whether there are any collision events in the queue
    pub fn has_collision_events(&self) -> bool {
        !self.collision_events.is_empty()
    }

    /// Returns whether any bodies were freed
    pub fn has_removed_bodies(&self) -> bool {
        !self.removed_bodies.is_empty()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.removed_bodies.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.removed_bodies.clear();
    }

    /// Iterates over the pending collision events
    pub fn collision_events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }

    /// Iterates over the pending freed bodies
    pub fn removed_bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.removed_bodies.iter().copied()
    }

    /// Gets all collision events involving a specific body
    pub fn collision_events_for_body(&self, body: BodyHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.body_a == body || e.body_b == body)
            .collect()
    }
}
