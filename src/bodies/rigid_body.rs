use crate::bodies::{body_flags::BodyFlags, RigidBodyType, ForceType};
use crate::constraints::AnchorBody;
use crate::math::{Matrix3, Quaternion, Transform, Vector3};

/// A rigid body for physics simulation
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// The body's transform in world space; its origin is the center of mass
    transform: Transform,

    /// The body's linear velocity
    linear_velocity: Vector3,

    /// The body's angular velocity
    angular_velocity: Vector3,

    /// The body's type (dynamic, kinematic, or static)
    body_type: RigidBodyType,

    /// The body's mass
    mass: f32,

    /// Inverse of the body's mass, zero for immovable bodies
    inv_mass: f32,

    /// Inverse of the body's inertia tensor in local space
    inv_inertia_tensor: Matrix3,

    /// Inverse of the body's inertia tensor in world space
    inv_inertia_tensor_world: Matrix3,

    /// The body's linear damping
    linear_damping: f32,

    /// The body's angular damping
    angular_damping: f32,

    /// The body's flags
    flags: BodyFlags,

    /// Forces to be applied in the next integration step
    forces: Vec<ForceType>,
}

impl RigidBody {
    /// Creates a new rigid body with the given transform, type and mass
    ///
    /// The inertia tensor defaults to that of a solid sphere of unit radius.
    pub fn new(transform: Transform, body_type: RigidBodyType, mass: f32) -> Self {
        let mut body = Self {
            transform,
            linear_velocity: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            body_type,
            mass: 0.0,
            inv_mass: 0.0,
            inv_inertia_tensor: Matrix3::zeros(),
            inv_inertia_tensor_world: Matrix3::zeros(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            flags: BodyFlags::empty(),
            forces: Vec::new(),
        };

        body.set_mass(mass);
        body.set_inertia_tensor(Matrix3::identity() * (0.4 * mass));

        body
    }

    /// Creates a new dynamic rigid body with the given mass and position
    pub fn new_dynamic(mass: f32, position: Vector3) -> Self {
        Self::new(Transform::from_position(position), RigidBodyType::Dynamic, mass)
    }

    /// Creates a new kinematic rigid body at the given position
    pub fn new_kinematic(position: Vector3) -> Self {
        Self::new(Transform::from_position(position), RigidBodyType::Kinematic, 0.0)
    }

    /// Creates a new static rigid body at the given position
    pub fn new_static(position: Vector3) -> Self {
        Self::new(Transform::from_position(position), RigidBodyType::Static, 0.0)
    }

    /// Returns the body's transform
    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    /// Sets the body's transform
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.update_inertia_tensor_world();
    }

    /// Returns the body's position, which is also its center of mass
    pub fn get_position(&self) -> Vector3 {
        self.transform.position
    }

    /// Sets the body's position
    pub fn set_position(&mut self, position: Vector3) {
        self.transform.position = position;
    }

    /// Returns the body's rotation as a quaternion
    pub fn get_rotation(&self) -> Quaternion {
        self.transform.rotation
    }

    /// Sets the body's rotation as a quaternion
    pub fn set_rotation(&mut self, rotation: Quaternion) {
        self.transform.rotation = rotation;
        self.update_inertia_tensor_world();
    }

    /// Returns the body's linear velocity
    pub fn get_linear_velocity(&self) -> Vector3 {
        self.linear_velocity
    }

    /// Sets the body's linear velocity
    pub fn set_linear_velocity(&mut self, velocity: Vector3) {
        self.linear_velocity = velocity;
        self.wake_up();
    }

    /// Returns the body's angular velocity
    pub fn get_angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    /// Sets the body's angular velocity
    pub fn set_angular_velocity(&mut self, velocity: Vector3) {
        self.angular_velocity = velocity;
        self.wake_up();
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the body's mass (and inverse mass)
    pub fn set_mass(&mut self, mass: f32) {
        if self.body_type.is_dynamic() && mass > 0.0 {
            self.mass = mass;
            self.inv_mass = 1.0 / mass;
        } else {
            self.mass = 0.0;
            self.inv_mass = 0.0;
        }
    }

    /// Returns the body's inverse mass
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Sets the body's inertia tensor in local space
    pub fn set_inertia_tensor(&mut self, tensor: Matrix3) {
        self.inv_inertia_tensor = if self.body_type.is_dynamic() {
            tensor.try_inverse().unwrap_or_else(Matrix3::zeros)
        } else {
            Matrix3::zeros()
        };
        self.update_inertia_tensor_world();
    }

    /// Returns the body type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Sets the body's linear damping
    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping.max(0.0);
    }

    /// Sets the body's angular damping
    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping.max(0.0);
    }

    /// Returns whether the body is sleeping
    pub fn is_sleeping(&self) -> bool {
        self.flags.contains(BodyFlags::SLEEPING)
    }

    /// Puts the body to sleep
    pub fn put_to_sleep(&mut self) {
        if self.body_type.is_dynamic() && !self.is_sleeping() {
            self.flags.insert(BodyFlags::SLEEPING);
            self.linear_velocity = Vector3::zero();
            self.angular_velocity = Vector3::zero();
            self.forces.clear();
        }
    }

    /// Wakes up the body
    pub fn wake_up(&mut self) {
        self.flags.remove(BodyFlags::SLEEPING);
    }

    /// Returns the forces and impulses queued for the next integration
    pub fn pending_forces(&self) -> &[ForceType] {
        &self.forces
    }

    /// Velocity of a point given relative to the center of mass: `v + ω × r`
    pub fn get_velocity_at_relative_point(&self, relative_position: Vector3) -> Vector3 {
        self.linear_velocity + self.angular_velocity.cross(&relative_position)
    }

    /// Updates the inverse inertia tensor in world space
    fn update_inertia_tensor_world(&mut self) {
        if !self.body_type.is_dynamic() {
            self.inv_inertia_tensor_world = Matrix3::zeros();
            return;
        }

        // R * inv_I * R^T
        let rotation_matrix = self.transform.rotation.to_rotation_matrix();
        self.inv_inertia_tensor_world = rotation_matrix * self.inv_inertia_tensor * rotation_matrix.transpose();
    }

    /// Applies an external force at the center of mass for the next step
    pub fn apply_force(&mut self, force: Vector3) {
        if self.body_type.is_dynamic() {
            self.wake_up();
            self.forces.push(ForceType::Force(force));
        }
    }

    /// Applies an impulse at a lever arm relative to the center of mass
    ///
    /// Does not wake a sleeping body; callers activate it first.
    pub fn apply_impulse(&mut self, impulse: Vector3, relative_position: Vector3) {
        if self.body_type.is_dynamic() {
            self.forces.push(ForceType::ImpulseAtRelativePoint { impulse, relative_position });
        }
    }

    /// Applies damping to the body's velocities
    pub fn apply_damping(&mut self, linear_damping: f32, angular_damping: f32) {
        if !self.body_type.is_dynamic() || self.is_sleeping() {
            return;
        }

        let linear_damping_factor = 1.0 - (self.linear_damping + linear_damping).clamp(0.0, 1.0);
        self.linear_velocity *= linear_damping_factor;

        let angular_damping_factor = 1.0 - (self.angular_damping + angular_damping).clamp(0.0, 1.0);
        self.angular_velocity *= angular_damping_factor;
    }

    /// Integrates queued forces and impulses into velocities
    pub fn integrate_forces(&mut self, dt: f32) {
        if !self.body_type.is_dynamic() || self.is_sleeping() {
            self.forces.clear();
            return;
        }

        for force in &self.forces {
            match *force {
                ForceType::Force(force) => {
                    self.linear_velocity += force * (self.inv_mass * dt);
                }
                ForceType::ImpulseAtRelativePoint { impulse, relative_position } => {
                    self.linear_velocity += impulse * self.inv_mass;

                    // Δω = I^-1 * (r × J)
                    let angular_impulse = relative_position.cross(&impulse);
                    let delta_omega = self.inv_inertia_tensor_world * angular_impulse.to_nalgebra();
                    self.angular_velocity += Vector3::from_nalgebra(&delta_omega);
                }
            }
        }

        self.forces.clear();
    }

    /// Integrates velocities to update the transform
    pub fn integrate_velocity(&mut self, dt: f32) {
        if self.body_type == RigidBodyType::Static || self.is_sleeping() {
            return;
        }

        self.transform.position += self.linear_velocity * dt;

        if !self.angular_velocity.is_zero() {
            let angle = self.angular_velocity.length() * dt;
            let axis = self.angular_velocity.normalize();

            let rotation = Quaternion::from_axis_angle(axis, angle);
            self.transform.rotation = (rotation * self.transform.rotation).normalize();

            self.update_inertia_tensor_world();
        }
    }
}

impl AnchorBody for RigidBody {
    fn world_transform(&self) -> Transform {
        self.transform
    }

    fn center_of_mass_position(&self) -> Vector3 {
        self.transform.position
    }

    fn inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    fn velocity_in_local_point(&self, relative_position: Vector3) -> Vector3 {
        self.get_velocity_at_relative_point(relative_position)
    }

    fn activate(&mut self) {
        self.wake_up();
    }

    fn apply_impulse(&mut self, impulse: Vector3, relative_position: Vector3) {
        RigidBody::apply_impulse(self, impulse, relative_position);
    }
}
