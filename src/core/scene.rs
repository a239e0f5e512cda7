use log::{debug, warn};

use crate::bodies::{Attachment, Body};
use crate::core::storage::Storage;
use crate::core::{BodyHandle, BodyStorage, EventQueue, SimulationConfig};
use crate::error::PhysicsError;
use crate::forces::{ForceCreator, ForceRegistry};
use crate::math::Real;
use crate::Result;

/// A collection of bodies and the force creators acting on them
#[derive(Debug)]
pub struct Scene {
    /// All bodies, in insertion order
    bodies: BodyStorage<Body>,

    /// Force creators, in evaluation order
    forces: ForceRegistry,

    /// Sprites and labels that do not follow a body
    attachments: Vec<Attachment>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Events produced by the most recent tick
    events: EventQueue,

    /// The total elapsed simulation time
    time: Real,
}

impl Scene {
    /// Creates an empty scene with default settings
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates an empty scene with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::with_capacity(config.initial_body_capacity),
            forces: ForceRegistry::with_capacity(config.initial_force_capacity),
            attachments: Vec::new(),
            events: EventQueue::new(),
            time: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Total simulated seconds
    pub fn time(&self) -> Real {
        self.time
    }

    /// Adds a body to the scene and returns its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.add(body)
    }

    /// Number of bodies, including ones flagged for removal but not yet freed
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// The body at insertion position `index`
    pub fn body_at(&self, index: usize) -> Result<&Body> {
        self.bodies.get_at(index).ok_or_else(|| out_of_range("body", index))
    }

    pub fn body_at_mut(&mut self, index: usize) -> Result<&mut Body> {
        self.bodies.get_at_mut(index).ok_or_else(|| out_of_range("body", index))
    }

    /// Handle of the body at insertion position `index`
    pub fn handle_at(&self, index: usize) -> Result<BodyHandle> {
        self.bodies.handle_at(index).ok_or_else(|| out_of_range("body", index))
    }

    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get_body(handle)
    }

    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.get_body_mut(handle)
    }

    /// Returns true until the body behind `handle` has been freed
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Iterates over the bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut Body)> {
        self.bodies.iter_mut()
    }

    /// Flags a body for removal; it is freed at the end of the next tick
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<()> {
        self.bodies.get_body_mut(handle)?.remove();
        Ok(())
    }

    /// Flags the body at insertion position `index` for removal
    pub fn remove_body_at(&mut self, index: usize) -> Result<()> {
        self.body_at_mut(index)?.remove();
        Ok(())
    }

    /// Registers a force creator acting on `bodies`.
    ///
    /// The creator is dropped in the first cleanup pass after any of the
    /// bodies is removed.
    pub fn add_bodies_force_creator<C>(&mut self, bodies: &[BodyHandle], creator: C) -> Result<()>
    where
        C: ForceCreator + 'static,
    {
        if let Some(missing) = bodies.iter().find(|handle| !self.bodies.contains(**handle)) {
            return Err(PhysicsError::ResourceNotFound(format!(
                "Body with handle {:?} not found",
                missing
            )));
        }
        self.forces.add(Box::new(creator), bodies.to_vec());
        Ok(())
    }

    /// Registers a force creator that depends on no body and is never dropped
    pub fn add_force_creator<C>(&mut self, creator: C)
    where
        C: ForceCreator + 'static,
    {
        self.forces.add(Box::new(creator), Vec::new());
    }

    pub fn force_creator_count(&self) -> usize {
        self.forces.len()
    }

    pub fn forces(&self) -> &ForceRegistry {
        &self.forces
    }

    /// Adds a free-standing sprite or label and returns its position
    pub fn add_attachment(&mut self, attachment: Attachment) -> usize {
        self.attachments.push(attachment);
        self.attachments.len() - 1
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    pub fn attachment_at(&self, index: usize) -> Result<&Attachment> {
        self.attachments.get(index).ok_or_else(|| out_of_range("attachment", index))
    }

    pub fn attachment_at_mut(&mut self, index: usize) -> Result<&mut Attachment> {
        self.attachments.get_mut(index).ok_or_else(|| out_of_range("attachment", index))
    }

    /// Flags a free-standing attachment for removal at the next tick
    pub fn remove_attachment_at(&mut self, index: usize) -> Result<()> {
        self.attachment_at_mut(index)?.remove();
        Ok(())
    }

    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Advances the scene by `dt` seconds.
    ///
    /// Force creators run first, in registration order, then every body is
    /// integrated, then removed bodies are cleaned up: force creators that
    /// depend on them are dropped before the bodies themselves are freed.
    pub fn tick(&mut self, dt: Real) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("ignoring invalid time step {dt}, using 0");
            0.0
        };

        self.events.clear();

        self.forces.apply_all(&mut self.bodies, &mut self.events);

        for (_, body) in self.bodies.iter_mut() {
            body.tick(dt);
        }

        let dropped_forces = self.forces.retain_live(&self.bodies);
        let removed = self.bodies.remove_where(Body::is_removed);
        let removed_count = removed.len();
        for (handle, body) in removed {
            drop(body);
            self.events.add_removed_body(handle);
        }
        self.attachments.retain(|attachment| !attachment.is_removed());

        if dropped_forces > 0 || removed_count > 0 {
            debug!(
                "freed {} bodies and {} force creators, {} bodies remain",
                removed_count,
                dropped_forces,
                self.bodies.len()
            );
        }

        self.time += dt;
    }

    /// Removes every body and attachment, along with the force creators that
    /// depend on bodies
    pub fn clear(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.remove();
        }
        for attachment in &mut self.attachments {
            attachment.remove();
        }
        self.tick(0.0);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn out_of_range(what: &str, index: usize) -> PhysicsError {
    PhysicsError::ResourceNotFound(format!("no {what} at index {index}"))
}
