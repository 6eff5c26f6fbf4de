use crate::constraints::AnchorNode;
use crate::math::{Quaternion, Vector3};

/// One mass point of a rod
#[derive(Debug, Clone)]
pub struct RodPositionElement {
    /// Position committed at the end of the previous step
    pub position: Vector3,

    /// Velocity committed at the end of the previous step
    pub velocity: Vector3,

    /// Position the rod predicts for the end of the current step
    pub predicted_position: Vector3,

    /// Velocity the rod predicts for the end of the current step
    pub predicted_velocity: Vector3,

    /// Mass of the node
    pub mass: f32,

    /// Force accumulated during the current step
    force: Vector3,

    /// Set while an anchor constraint holds this node
    is_anchor: bool,
}

impl RodPositionElement {
    /// Creates a node at rest at `position`
    pub fn new(position: Vector3, mass: f32) -> Self {
        Self {
            position,
            velocity: Vector3::zero(),
            predicted_position: position,
            predicted_velocity: Vector3::zero(),
            mass,
            force: Vector3::zero(),
            is_anchor: false,
        }
    }

    /// Adds to the force accumulator
    #[inline]
    pub fn apply_force(&mut self, force: Vector3) {
        self.force += force;
    }

    /// Returns the accumulated force
    #[inline]
    pub fn force(&self) -> Vector3 {
        self.force
    }

    /// Resets the force accumulator
    #[inline]
    pub fn clear_force(&mut self) {
        self.force = Vector3::zero();
    }

    /// Whether an anchor currently holds this node
    ///
    /// Internal rod solvers read this to leave anchored nodes to the anchor.
    #[inline]
    pub fn is_anchor(&self) -> bool {
        self.is_anchor
    }

    /// Only the anchor lifecycle writes the flag (set on bind, cleared on release).
    #[inline]
    pub(crate) fn set_anchor(&mut self, is_anchor: bool) {
        self.is_anchor = is_anchor;
    }
}

impl AnchorNode for RodPositionElement {
    fn mass(&self) -> f32 {
        self.mass
    }

    fn predicted_position(&self) -> Vector3 {
        self.predicted_position
    }

    fn predicted_velocity(&self) -> Vector3 {
        self.predicted_velocity
    }

    fn accumulated_force(&self) -> Vector3 {
        self.force
    }

    fn apply_force(&mut self, force: Vector3) {
        RodPositionElement::apply_force(self, force);
    }
}

/// Orientation of the segment between two consecutive rod nodes
#[derive(Debug, Clone, Copy)]
pub struct RodOrientationElement {
    /// Material frame of the segment
    pub orientation: Quaternion,

    /// Torque accumulated on the segment during the current step
    pub torque: Vector3,
}

impl RodOrientationElement {
    /// Creates a segment with the given orientation and no torque
    pub fn new(orientation: Quaternion) -> Self {
        Self {
            orientation,
            torque: Vector3::zero(),
        }
    }
}

impl Default for RodOrientationElement {
    fn default() -> Self {
        Self::new(Quaternion::identity())
    }
}
