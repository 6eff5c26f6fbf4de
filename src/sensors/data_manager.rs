use crate::core::PhysicsWorld;
use crate::error::PhysicsError;
use crate::sensors::{Senseable, Sensor, SensorInfo};
use crate::Result;

use std::fmt;
use tracing::{debug, warn};

/// One row of sensor readings
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    /// Simulation time at which the row was taken
    pub time: f32,

    /// Every sensor's values, concatenated in sensor creation order
    pub values: Vec<f32>,
}

/// Registry of senseables and sensor factories that samples the world each step
///
/// The manager never owns or destroys the objects it senses; it only keeps
/// handles to them.
#[derive(Default)]
pub struct DataManager {
    senseables: Vec<Senseable>,
    sensor_infos: Vec<Box<dyn SensorInfo>>,
    sensors: Vec<Box<dyn Sensor>>,
    samples: Vec<SensorSample>,
    time: f32,
}

impl DataManager {
    /// Creates an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object to observe
    pub fn add_senseable(&mut self, senseable: Senseable) {
        self.senseables.push(senseable);
    }

    /// Registers a sensor factory
    pub fn add_sensor_info(&mut self, info: Box<dyn SensorInfo>) {
        self.sensor_infos.push(info);
    }

    /// Creates sensors for every senseable and all of its descendants
    pub fn setup(&mut self) -> Result<()> {
        if !self.sensors.is_empty() {
            warn!(sensors = self.sensors.len(), "setup called without teardown, dropping old sensors");
            self.sensors.clear();
        }

        let mut created = Vec::new();
        for senseable in &self.senseables {
            Self::add_sensors_if_appropriate(&self.sensor_infos, senseable, &mut created)?;
            for descendant in senseable.descendants() {
                Self::add_sensors_if_appropriate(&self.sensor_infos, descendant, &mut created)?;
            }
        }

        debug!(sensors = created.len(), senseables = self.senseables.len(), "data manager setup");
        self.sensors = created;
        self.samples.clear();
        self.time = 0.0;

        Ok(())
    }

    fn add_sensors_if_appropriate(
        infos: &[Box<dyn SensorInfo>],
        senseable: &Senseable,
        out: &mut Vec<Box<dyn Sensor>>,
    ) -> Result<()> {
        for info in infos {
            if info.is_this_my_senseable(senseable) {
                out.push(info.create_sensor(senseable)?);
            }
        }
        Ok(())
    }

    /// Advances the manager's clock and records one row from every sensor
    pub fn step(&mut self, dt: f32, world: &PhysicsWorld) -> Result<()> {
        if !(dt > 0.0) {
            warn!(dt, "rejected non-positive time step");
            return Err(PhysicsError::InvalidParameter(format!("dt is not positive: {}", dt)));
        }

        self.time += dt;

        let mut values = Vec::new();
        for sensor in &self.sensors {
            values.extend(sensor.sense(world)?);
        }

        self.samples.push(SensorSample {
            time: self.time,
            values,
        });

        Ok(())
    }

    /// Drops every sensor
    ///
    /// Senseables and sensor infos are kept so `setup` can run again after a reset.
    pub fn teardown(&mut self) {
        debug!(sensors = self.sensors.len(), "data manager teardown");
        self.sensors.clear();
    }

    /// Column names: `time` followed by every sensor's heading
    pub fn heading(&self) -> Vec<String> {
        std::iter::once("time".to_string())
            .chain(self.sensors.iter().flat_map(|s| s.heading()))
            .collect()
    }

    /// Rows recorded since the last setup
    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    /// Number of live sensors
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Number of registered senseables
    pub fn senseable_count(&self) -> usize {
        self.senseables.len()
    }

    /// Number of registered sensor factories
    pub fn sensor_info_count(&self) -> usize {
        self.sensor_infos.len()
    }
}

impl fmt::Display for DataManager {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DataManager with {} sensors, {} sensor infos, and {} senseables",
            self.sensor_count(),
            self.sensor_info_count(),
            self.senseable_count()
        )
    }
}
