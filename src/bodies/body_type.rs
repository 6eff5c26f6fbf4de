#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyType {
    /// Dynamic bodies respond to forces and impulses
    Dynamic,
    
    /// Kinematic bodies are moved programmatically and have infinite mass
    Kinematic,
    
    /// Static bodies never move
    Static,
}

impl RigidBodyType {
    /// Returns true if the body has finite mass and responds to impulses
    pub fn is_dynamic(self) -> bool {
        self == RigidBodyType::Dynamic
    }
}
