use crate::core::{AnchorHandle, BodyHandle, PhysicsWorld};
use crate::Result;

/// Something in the world a sensor can observe
#[derive(Debug, Clone, PartialEq)]
pub enum Senseable {
    /// A rigid body
    Body(BodyHandle),

    /// An anchor between a body and a rod
    Anchor(AnchorHandle),

    /// A named collection, e.g. everything belonging to one model
    Group {
        /// Name of the group
        name: String,

        /// Direct members
        members: Vec<Senseable>,
    },
}

impl Senseable {
    /// Every senseable nested below this one, depth first, excluding itself
    pub fn descendants(&self) -> Vec<&Senseable> {
        let mut out = Vec::new();
        if let Senseable::Group { members, .. } = self {
            for member in members {
                out.push(member);
                out.extend(member.descendants());
            }
        }
        out
    }
}

/// Reads values from the world for one senseable
pub trait Sensor {
    /// Column names, one per value returned by [`Sensor::sense`]
    fn heading(&self) -> Vec<String>;

    /// Current values, in heading order
    fn sense(&self, world: &PhysicsWorld) -> Result<Vec<f32>>;
}

/// Creates sensors for the senseables it recognizes
pub trait SensorInfo {
    /// Whether this factory can build a sensor for `senseable`
    fn is_this_my_senseable(&self, senseable: &Senseable) -> bool;

    /// Builds a sensor for `senseable`; fails if the senseable is not recognized
    fn create_sensor(&self, senseable: &Senseable) -> Result<Box<dyn Sensor>>;
}
