pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod forces;

/// Re-export common types for easier usage
pub use crate::core::{BodyHandle, Scene, SimulationConfig};
pub use crate::bodies::{Body, Color, INFINITE_MASS};
pub use crate::collision::{find_collision, CollisionInfo};
pub use crate::shapes::Polygon;
pub use crate::math::{Real, Vector2};

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Degenerate polygon with area {0}")]
        DegeneratePolygon(f64),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
