mod vector;
mod transform;
mod rotation;

pub use vector::Vector3;
pub use transform::Transform;
pub use rotation::{Quaternion, Rotation};

/// Inertia tensors and other 3x3 operators are plain nalgebra matrices
pub type Matrix3 = nalgebra::Matrix3<f32>;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f32) -> bool {
    a.abs() < EPSILON
}
