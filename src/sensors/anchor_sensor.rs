use crate::core::{AnchorHandle, PhysicsWorld};
use crate::error::PhysicsError;
use crate::sensors::{Senseable, Sensor, SensorInfo};
use crate::Result;

/// Records an anchor's world position
#[derive(Debug, Clone)]
pub struct AnchorSensor {
    anchor: AnchorHandle,
}

impl AnchorSensor {
    /// Creates a sensor for `anchor`
    pub fn new(anchor: AnchorHandle) -> Self {
        Self { anchor }
    }
}

impl Sensor for AnchorSensor {
    fn heading(&self) -> Vec<String> {
        let id = self.anchor.id();
        ["X", "Y", "Z"]
            .iter()
            .map(|column| format!("anchor{}.{}", id, column))
            .collect()
    }

    fn sense(&self, world: &PhysicsWorld) -> Result<Vec<f32>> {
        let p = world.anchor_world_position(self.anchor)?;
        Ok(vec![p.x, p.y, p.z])
    }
}

/// Builds an [`AnchorSensor`] for every anchor senseable
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorSensorInfo;

impl SensorInfo for AnchorSensorInfo {
    fn is_this_my_senseable(&self, senseable: &Senseable) -> bool {
        matches!(senseable, Senseable::Anchor(_))
    }

    fn create_sensor(&self, senseable: &Senseable) -> Result<Box<dyn Sensor>> {
        match senseable {
            Senseable::Anchor(anchor) => Ok(Box::new(AnchorSensor::new(*anchor))),
            other => Err(PhysicsError::InvalidParameter(format!(
                "AnchorSensorInfo cannot sense {:?}",
                other
            ))),
        }
    }
}
