pub mod clock;
pub mod config;
pub mod events;
pub mod scene;
pub mod storage;

pub use self::clock::FrameClock;
pub use self::config::SimulationConfig;
pub use self::events::{CollisionEvent, EventQueue};
pub use self::scene::Scene;
pub use self::storage::{BodyStorage, Storage};

/// A generational identifier for a body in a scene.
///
/// A handle stops resolving once its body has been freed, even if the
/// underlying slot is later reused for another body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}
