use std::fmt;

use log::debug;

use crate::bodies::Body;
use crate::core::{BodyHandle, BodyStorage, CollisionEvent, EventQueue, Storage};
use crate::math::Vector2;

/// Something that applies forces or impulses to a fixed group of bodies once
/// per scene tick.
///
/// Any `FnMut(&mut ForceContext)` closure is a force creator, with its
/// captured state playing the role of the creator's auxiliary data.
pub trait ForceCreator {
    /// Returns the type name of the force creator
    fn creator_type(&self) -> &'static str {
        "custom"
    }

    /// Applies this tick's forces to the bodies in `ctx`
    fn apply(&mut self, ctx: &mut ForceContext<'_>);
}

impl<F> ForceCreator for F
where
    F: FnMut(&mut ForceContext<'_>),
{
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        self(ctx)
    }
}

/// The bodies a force creator was registered with, indexed in registration
/// order
pub struct ForceContext<'a> {
    bodies: &'a mut BodyStorage<Body>,
    handles: &'a [BodyHandle],
    events: &'a mut EventQueue,
}

impl<'a> ForceContext<'a> {
    pub(crate) fn new(
        bodies: &'a mut BodyStorage<Body>,
        handles: &'a [BodyHandle],
        events: &'a mut EventQueue,
    ) -> Self {
        Self { bodies, handles, events }
    }

    /// Number of bodies the creator was registered with
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handle of the `index`th registered body
    pub fn handle(&self, index: usize) -> BodyHandle {
        self.handles[index]
    }

    pub fn body(&self, index: usize) -> &Body {
        &self.bodies[self.handles[index]]
    }

    pub fn body_mut(&mut self, index: usize) -> &mut Body {
        &mut self.bodies[self.handles[index]]
    }

    /// Mutably borrows both bodies of a two-body registration.
    ///
    /// Panics unless the creator was registered with exactly two distinct
    /// bodies.
    pub fn pair_mut(&mut self) -> (&mut Body, &mut Body) {
        assert_eq!(self.handles.len(), 2, "pair_mut needs exactly two bodies");
        let (a, b) = (self.handles[0], self.handles[1]);
        assert_ne!(a, b, "pair_mut needs two distinct bodies");
        match self.bodies.get_pair_mut(a, b) {
            Some(pair) => pair,
            None => panic!("stale body handle in force registration"),
        }
    }

    /// Records that a collision handler fired for the registered pair
    pub fn report_collision(&mut self, axis: Vector2) {
        assert_eq!(self.handles.len(), 2, "collisions involve exactly two bodies");
        self.events.add_collision_event(CollisionEvent {
            body_a: self.handles[0],
            body_b: self.handles[1],
            axis,
        });
    }
}

/// A registered force creator together with the bodies it depends on
pub struct ForcePackage {
    creator: Box<dyn ForceCreator>,

    /// Non-owning references; the package is dropped once any of them is removed
    bodies: Vec<BodyHandle>,
}

impl ForcePackage {
    pub fn creator_type(&self) -> &'static str {
        self.creator.creator_type()
    }

    pub fn bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }
}

impl fmt::Debug for ForcePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForcePackage")
            .field("creator", &self.creator.creator_type())
            .field("bodies", &self.bodies)
            .finish()
    }
}

/// Registered force creators, evaluated in registration order
#[derive(Debug, Default)]
pub struct ForceRegistry {
    packages: Vec<ForcePackage>,
}

impl ForceRegistry {
    /// Creates an empty registry with room for `capacity` creators
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            packages: Vec::with_capacity(capacity),
        }
    }

    /// Registers a creator that depends on `bodies`
    pub fn add(&mut self, creator: Box<dyn ForceCreator>, bodies: Vec<BodyHandle>) {
        debug!(
            "registered {} force creator over {} bodies",
            creator.creator_type(),
            bodies.len()
        );
        self.packages.push(ForcePackage { creator, bodies });
    }

    /// Returns the number of registered creators
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForcePackage> {
        self.packages.iter()
    }

    /// Invokes every creator once, in registration order
    pub fn apply_all(&mut self, bodies: &mut BodyStorage<Body>, events: &mut EventQueue) {
        for package in &mut self.packages {
            if !package.bodies.iter().all(|handle| bodies.contains(*handle)) {
                continue;
            }
            let mut ctx = ForceContext::new(&mut *bodies, &package.bodies, &mut *events);
            package.creator.apply(&mut ctx);
        }
    }

    /// Drops every creator that depends on a body that is gone or flagged
    /// for removal. Returns the number of creators dropped.
    pub fn retain_live(&mut self, bodies: &BodyStorage<Body>) -> usize {
        let before = self.packages.len();
        self.packages.retain(|package| {
            package
                .bodies
                .iter()
                .all(|handle| bodies.get(*handle).is_some_and(|body| !body.is_removed()))
        });
        before - self.packages.len()
    }
}
