//! Data collection over simulated objects.
//!
//! A [`DataManager`] holds the objects to observe ([`Senseable`]) and the
//! factories ([`SensorInfo`]) that know which objects they can observe. On
//! [`DataManager::setup`] every factory is offered every object and its
//! descendants and creates a [`Sensor`] for those it accepts. Each step the
//! manager samples all sensors into one row.

mod sensor;
mod data_manager;
mod rigid_body_sensor;
mod anchor_sensor;

pub use self::sensor::{Senseable, Sensor, SensorInfo};
pub use self::data_manager::{DataManager, SensorSample};
pub use self::rigid_body_sensor::{RigidBodySensor, RigidBodySensorInfo};
pub use self::anchor_sensor::{AnchorSensor, AnchorSensorInfo};
