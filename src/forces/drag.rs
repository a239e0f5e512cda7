use crate::core::{BodyHandle, Scene};
use crate::forces::{ForceContext, ForceCreator};
use crate::math::Real;
use crate::Result;

/// Linear drag opposing a body's velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// The drag coefficient
    gamma: Real,
}

impl Drag {
    pub fn new(gamma: Real) -> Self {
        Self { gamma }
    }

    pub fn gamma(&self) -> Real {
        self.gamma
    }
}

impl ForceCreator for Drag {
    fn creator_type(&self) -> &'static str {
        "drag"
    }

    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        for index in 0..ctx.len() {
            let body = ctx.body_mut(index);
            let force = body.velocity() * -self.gamma;
            body.add_force(force);
        }
    }
}

/// Applies drag with coefficient `gamma` to a body
pub fn create_drag(scene: &mut Scene, gamma: Real, body: BodyHandle) -> Result<()> {
    scene.add_bodies_force_creator(&[body], Drag::new(gamma))
}
