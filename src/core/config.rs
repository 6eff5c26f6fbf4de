use crate::constraints::AnchorConfig;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics world
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Settings given to anchors bound without an explicit config
    pub anchor: AnchorConfig,

    /// Global damping factor for linear velocity
    pub linear_damping: f32,

    /// Global damping factor for angular velocity
    pub angular_damping: f32,
}

impl SimulationConfig {
    /// Set the default anchor settings
    pub fn with_anchor(mut self, anchor: AnchorConfig) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the global damping factors
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorConfig::default(),
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}
