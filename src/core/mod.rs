pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::PhysicsWorld;
pub use self::config::SimulationConfig;
pub use self::storage::{BodyStorage, ConstraintStorage, Handle, HandleMap, RodStorage};
pub use self::events::{EventQueue, BodyEvent, BodyEventType, AnchorEvent, AnchorEventType};

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

/// A unique identifier for a rod in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RodHandle(pub(crate) u32);

/// A unique identifier for a constraint in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(pub(crate) u32);

impl BodyHandle {
    /// Raw id of the handle
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl RodHandle {
    /// Raw id of the handle
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl ConstraintHandle {
    /// Raw id of the handle
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Anchors are the world's only constraint type
pub type AnchorHandle = ConstraintHandle;
