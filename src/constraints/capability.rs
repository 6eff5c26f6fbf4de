use crate::math::{Transform, Vector3};

/// What an anchor needs from the rigid side
pub trait AnchorBody {
    /// Current world transform of the body
    fn world_transform(&self) -> Transform;

    /// Center of mass in world space
    fn center_of_mass_position(&self) -> Vector3;

    /// Inverse mass; zero marks an immovable body
    fn inverse_mass(&self) -> f32;

    /// Velocity of the point at `relative_position` from the center of mass
    fn velocity_in_local_point(&self, relative_position: Vector3) -> Vector3;

    /// Wakes a sleeping body
    fn activate(&mut self);

    /// Applies an impulse at a lever arm relative to the center of mass
    fn apply_impulse(&mut self, impulse: Vector3, relative_position: Vector3);
}

/// What an anchor needs from the rod side
pub trait AnchorNode {
    /// Mass of the node
    fn mass(&self) -> f32;

    /// Position predicted for the end of the current step
    fn predicted_position(&self) -> Vector3;

    /// Velocity predicted for the end of the current step
    fn predicted_velocity(&self) -> Vector3;

    /// Force accumulated on the node so far this step
    fn accumulated_force(&self) -> Vector3;

    /// Adds to the node's force accumulator
    fn apply_force(&mut self, force: Vector3);
}
