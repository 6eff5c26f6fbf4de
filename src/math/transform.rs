use crate::math::{Quaternion, Vector3};
use crate::math::rotation::Rotation;
use std::ops::Mul;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A rigid transformation in 3D space (rotation followed by translation)
///
/// Rigid bodies never carry scale, so the inverse is always exact:
/// `inverse() * (t * p) == p` for every point `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 3D space
    pub position: Vector3,
    
    /// Rotation as a quaternion
    pub rotation: Quaternion,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Creates a new identity transform
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::identity(),
        }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Quaternion::identity(),
        }
    }

    /// Transforms a point by this transform
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.rotate_vector(point) + self.position
    }

    /// Maps a world-space point into this transform's local frame
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.conjugate().rotate_vector(point - self.position)
    }

    /// Inverts this transform
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.conjugate();
        
        Self {
            position: -inv_rotation.rotate_vector(self.position),
            rotation: inv_rotation,
        }
    }

    /// Combines this transform with another, applying this one first
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: other.position + other.rotation.rotate_vector(self.position),
            rotation: other.rotation * self.rotation,
        }
    }

    /// Convert to a nalgebra isometry
    pub fn to_isometry(&self) -> nalgebra::Isometry3<f32> {
        nalgebra::Isometry3::from_parts(
            nalgebra::Translation3::from(self.position.to_nalgebra()),
            self.rotation.to_nalgebra(),
        )
    }

    /// Convert from a nalgebra isometry
    pub fn from_isometry(iso: &nalgebra::Isometry3<f32>) -> Self {
        Self {
            position: Vector3::from_nalgebra(&iso.translation.vector),
            rotation: Quaternion::from_nalgebra(&iso.rotation),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `transform * point` applies the transform to a point
impl Mul<Vector3> for Transform {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(rhs)
    }
}
