use crate::core::{BodyHandle, Scene};
use crate::forces::{distinct_pair, ForceContext, ForceCreator};
use crate::math::Real;
use crate::Result;

/// Newtonian attraction between two bodies
///
/// Pairs involving an immovable body feel no gravity; anchor an orbit with a
/// large finite mass instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    /// The gravitational constant
    g: Real,

    /// No force is applied while the centroids are this close or closer
    min_distance: Real,

    /// Whether only the first body is pulled
    one_sided: bool,
}

impl NewtonianGravity {
    /// Mutual attraction with equal and opposite forces
    pub fn new(g: Real, min_distance: Real) -> Self {
        Self {
            g,
            min_distance,
            one_sided: false,
        }
    }

    /// Attraction applied to the first body only
    pub fn one_sided(g: Real, min_distance: Real) -> Self {
        Self {
            g,
            min_distance,
            one_sided: true,
        }
    }

    pub fn g(&self) -> Real {
        self.g
    }

    pub fn min_distance(&self) -> Real {
        self.min_distance
    }

    pub fn is_one_sided(&self) -> bool {
        self.one_sided
    }
}

impl ForceCreator for NewtonianGravity {
    fn creator_type(&self) -> &'static str {
        if self.one_sided {
            "one_sided_gravity"
        } else {
            "newtonian_gravity"
        }
    }

    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let (a, b) = ctx.pair_mut();
        // The law has no finite value with an infinite mass
        if a.is_immovable() || b.is_immovable() {
            return;
        }

        let offset = b.centroid() - a.centroid();
        let distance = offset.length();
        if distance <= self.min_distance {
            return;
        }

        let force = offset * (self.g * a.mass() * b.mass() / distance.powi(3));
        a.add_force(force);
        if !self.one_sided {
            b.add_force(-force);
        }
    }
}

/// Adds mutual Newtonian gravity with constant `g` between two bodies
pub fn create_newtonian_gravity(scene: &mut Scene, g: Real, a: BodyHandle, b: BodyHandle) -> Result<()> {
    distinct_pair(a, b)?;
    let gravity = NewtonianGravity::new(g, scene.config().gravity_min_distance);
    scene.add_bodies_force_creator(&[a, b], gravity)
}

/// Adds gravity that pulls `a` toward `b` while leaving `b` unaffected
pub fn create_one_sided_gravity(scene: &mut Scene, g: Real, a: BodyHandle, b: BodyHandle) -> Result<()> {
    distinct_pair(a, b)?;
    let gravity = NewtonianGravity::one_sided(g, scene.config().gravity_min_distance);
    scene.add_bodies_force_creator(&[a, b], gravity)
}
