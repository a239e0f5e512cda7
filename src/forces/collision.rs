use log::trace;

use crate::bodies::Body;
use crate::collision::{find_collision, ContactState};
use crate::core::{BodyHandle, Scene};
use crate::forces::{distinct_pair, ForceContext, ForceCreator};
use crate::math::{Real, Vector2};
use crate::Result;

/// Reaction to two bodies starting to overlap.
///
/// Any `FnMut(&mut Body, &mut Body, Vector2)` closure is a handler; the
/// vector is the collision axis found by the separating axis test.
pub trait CollisionHandler {
    fn on_collision(&mut self, a: &mut Body, b: &mut Body, axis: Vector2);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut Body, &mut Body, Vector2),
{
    fn on_collision(&mut self, a: &mut Body, b: &mut Body, axis: Vector2) {
        self(a, b, axis)
    }
}

/// Runs a handler once per contact episode between two bodies
#[derive(Debug)]
pub struct CollisionForce<H> {
    handler: H,
    state: ContactState,

    /// Whether to skip the polygon test for pairs whose circumscribed
    /// circles do not touch
    radius_broad_phase: bool,
}

impl<H: CollisionHandler> CollisionForce<H> {
    pub fn new(handler: H, radius_broad_phase: bool) -> Self {
        Self {
            handler,
            state: ContactState::Separated,
            radius_broad_phase,
        }
    }

    pub fn state(&self) -> ContactState {
        self.state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    fn measure(&self, a: &Body, b: &Body) -> Option<Vector2> {
        if self.radius_broad_phase && a.centroid().distance(&b.centroid()) > a.size() + b.size() {
            return None;
        }
        let info = find_collision(a.polygon(), b.polygon());
        info.collided.then_some(info.axis)
    }
}

impl<H: CollisionHandler> ForceCreator for CollisionForce<H> {
    fn creator_type(&self) -> &'static str {
        "collision"
    }

    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let (a, b) = ctx.pair_mut();
        if a.is_removed() || b.is_removed() {
            return;
        }

        let contact = self.measure(a, b);
        let was_colliding = self.state.is_colliding();
        let began = self.state.update(contact.is_some());

        match contact {
            Some(axis) if began => {
                trace!("contact began at {} along {}", a.centroid(), axis);
                self.handler.on_collision(a, b, axis);
                ctx.report_collision(axis);
            }
            None if was_colliding => {
                trace!("contact ended at {}", a.centroid());
            }
            _ => {}
        }
    }
}

/// Elastic or inelastic bounce along the collision axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsCollision {
    /// 1.0 for a perfectly elastic bounce, 0.0 for a perfectly inelastic one
    elasticity: Real,
}

impl PhysicsCollision {
    pub fn new(elasticity: Real) -> Self {
        Self { elasticity }
    }

    pub fn elasticity(&self) -> Real {
        self.elasticity
    }
}

impl CollisionHandler for PhysicsCollision {
    fn on_collision(&mut self, a: &mut Body, b: &mut Body, axis: Vector2) {
        let reduced_mass = match (a.is_immovable(), b.is_immovable()) {
            (true, true) => return,
            (true, false) => b.mass(),
            (false, true) => a.mass(),
            (false, false) => a.mass() * b.mass() / (a.mass() + b.mass()),
        };

        let u_a = a.velocity().dot(&axis);
        let u_b = b.velocity().dot(&axis);
        let impulse = axis * (reduced_mass * (1.0 + self.elasticity) * (u_b - u_a));
        a.add_impulse(impulse);
        b.add_impulse(-impulse);
    }
}

/// Removes both bodies on contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestroyBoth;

impl CollisionHandler for DestroyBoth {
    fn on_collision(&mut self, a: &mut Body, b: &mut Body, _axis: Vector2) {
        a.remove();
        b.remove();
    }
}

/// Removes only the first body on contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestroyFirst;

impl CollisionHandler for DestroyFirst {
    fn on_collision(&mut self, a: &mut Body, _b: &mut Body, _axis: Vector2) {
        a.remove();
    }
}

/// Calls `handler` once each time `a` and `b` start to overlap
pub fn create_collision<H>(scene: &mut Scene, a: BodyHandle, b: BodyHandle, handler: H) -> Result<()>
where
    H: CollisionHandler + 'static,
{
    distinct_pair(a, b)?;
    let collision = CollisionForce::new(handler, scene.config().radius_broad_phase);
    scene.add_bodies_force_creator(&[a, b], collision)
}

/// Makes `a` and `b` bounce off each other with the given elasticity
pub fn create_physics_collision(scene: &mut Scene, elasticity: Real, a: BodyHandle, b: BodyHandle) -> Result<()> {
    create_collision(scene, a, b, PhysicsCollision::new(elasticity))
}

/// Removes both bodies when they collide
pub fn create_destructive_collision(scene: &mut Scene, a: BodyHandle, b: BodyHandle) -> Result<()> {
    create_collision(scene, a, b, DestroyBoth)
}

/// Removes `a` when it collides with `b`
pub fn create_one_sided_destructive_collision(scene: &mut Scene, a: BodyHandle, b: BodyHandle) -> Result<()> {
    create_collision(scene, a, b, DestroyFirst)
}
