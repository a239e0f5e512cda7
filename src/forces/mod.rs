mod collision;
mod drag;
mod force_creator;
mod gravity;
mod spring;

pub use self::collision::{
    create_collision, create_destructive_collision, create_one_sided_destructive_collision,
    create_physics_collision, CollisionForce, CollisionHandler, DestroyBoth, DestroyFirst,
    PhysicsCollision,
};
pub use self::drag::{create_drag, Drag};
pub use self::force_creator::{ForceContext, ForceCreator, ForcePackage, ForceRegistry};
pub use self::gravity::{create_newtonian_gravity, create_one_sided_gravity, NewtonianGravity};
pub use self::spring::{create_spring, Spring};

use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Two-body creators need two different bodies
fn distinct_pair(a: BodyHandle, b: BodyHandle) -> Result<()> {
    if a == b {
        return Err(PhysicsError::InvalidParameter(format!(
            "a two-body force needs two distinct bodies, got {:?} twice",
            a
        )));
    }
    Ok(())
}
