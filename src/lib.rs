//! Coupling between rigid bodies and discretized flexible rods.
//!
//! An [`AnchorConstraint`] pins one node of a rod to a point on a rigid body.
//! Every step it measures how far the two sides disagree at that point and
//! splits the correction between them by mass: the rod node gets a force, the
//! body gets an impulse. The [`PhysicsWorld`] owns bodies, rods and anchors and
//! hands them out by handle.

pub mod math;
pub mod core;
pub mod bodies;
pub mod rod;
pub mod constraints;
pub mod sensors;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SimulationConfig, AnchorHandle, BodyHandle, RodHandle};
pub use crate::bodies::{RigidBody, RigidBodyType};
pub use crate::constraints::{AnchorConfig, AnchorConstraint, AnchorResolution, CorrectionMode};
pub use crate::rod::{RodModel, RodNodeIndex, RodSegmentIndex};
pub use crate::sensors::DataManager;
pub use crate::math::Vector3;

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Constraint error: {0}")]
        ConstraintError(String),

        #[error("Internal error: {0}")]
        InternalError(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
