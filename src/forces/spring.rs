use crate::core::{BodyHandle, Scene};
use crate::forces::{distinct_pair, ForceContext, ForceCreator};
use crate::math::Real;
use crate::Result;

/// A Hooke's law spring with zero rest length joining two centroids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    /// The spring stiffness coefficient
    k: Real,
}

impl Spring {
    pub fn new(k: Real) -> Self {
        Self { k }
    }

    pub fn stiffness(&self) -> Real {
        self.k
    }
}

impl ForceCreator for Spring {
    fn creator_type(&self) -> &'static str {
        "spring"
    }

    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let (a, b) = ctx.pair_mut();
        let force = (b.centroid() - a.centroid()) * self.k;
        a.add_force(force);
        b.add_force(-force);
    }
}

/// Joins two bodies with a spring of stiffness `k`
pub fn create_spring(scene: &mut Scene, k: Real, a: BodyHandle, b: BodyHandle) -> Result<()> {
    distinct_pair(a, b)?;
    scene.add_bodies_force_creator(&[a, b], Spring::new(k))
}
