use crate::core::{BodyHandle, PhysicsWorld};
use crate::error::PhysicsError;
use crate::sensors::{Senseable, Sensor, SensorInfo};
use crate::Result;

/// Records a body's position and linear velocity
#[derive(Debug, Clone)]
pub struct RigidBodySensor {
    body: BodyHandle,
}

impl RigidBodySensor {
    /// Creates a sensor for `body`
    pub fn new(body: BodyHandle) -> Self {
        Self { body }
    }
}

impl Sensor for RigidBodySensor {
    fn heading(&self) -> Vec<String> {
        let id = self.body.id();
        ["X", "Y", "Z", "VX", "VY", "VZ"]
            .iter()
            .map(|column| format!("body{}.{}", id, column))
            .collect()
    }

    fn sense(&self, world: &PhysicsWorld) -> Result<Vec<f32>> {
        let body = world.get_body(self.body)?;
        let p = body.get_position();
        let v = body.get_linear_velocity();
        Ok(vec![p.x, p.y, p.z, v.x, v.y, v.z])
    }
}

/// Builds a [`RigidBodySensor`] for every body senseable
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidBodySensorInfo;

impl SensorInfo for RigidBodySensorInfo {
    fn is_this_my_senseable(&self, senseable: &Senseable) -> bool {
        matches!(senseable, Senseable::Body(_))
    }

    fn create_sensor(&self, senseable: &Senseable) -> Result<Box<dyn Sensor>> {
        match senseable {
            Senseable::Body(body) => Ok(Box::new(RigidBodySensor::new(*body))),
            other => Err(PhysicsError::InvalidParameter(format!(
                "RigidBodySensorInfo cannot sense {:?}",
                other
            ))),
        }
    }
}
