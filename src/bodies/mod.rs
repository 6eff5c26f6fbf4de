mod rigid_body;
mod body_type;

pub use self::rigid_body::RigidBody;
pub use self::body_type::RigidBodyType;

use crate::math::Vector3;

/// Forces and impulses queued on a body until the next integration
#[derive(Debug, Clone, Copy)]
pub enum ForceType {
    /// Force applied at the center of mass
    Force(Vector3),
    
    /// Impulse applied at a point given relative to the center of mass
    ImpulseAtRelativePoint {
        /// The impulse to apply
        impulse: Vector3,
        
        /// Lever arm from the center of mass, in world orientation
        relative_position: Vector3,
    },
}

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;
    
    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u32 {
            /// Body is currently sleeping
            const SLEEPING = 0x01;
        }
    }
}
