mod contact_state;
mod sat;

pub use self::contact_state::ContactState;
pub use self::sat::{contains_point, find_collision, CollisionInfo};
