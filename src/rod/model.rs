use crate::error::PhysicsError;
use crate::math::{Quaternion, Vector3};
use crate::rod::{RodOrientationElement, RodPositionElement};
use crate::Result;

/// Index of a mass point within a rod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RodNodeIndex(pub usize);

/// Index of a segment within a rod; segment `i` joins nodes `i` and `i + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RodSegmentIndex(pub usize);

/// A rod discretized into `n` mass points and `n - 1` oriented segments
#[derive(Debug, Clone)]
pub struct RodModel {
    nodes: Vec<RodPositionElement>,
    segments: Vec<RodOrientationElement>,
}

impl RodModel {
    /// Builds a rod from explicit elements
    pub fn from_elements(
        nodes: Vec<RodPositionElement>,
        segments: Vec<RodOrientationElement>,
    ) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(PhysicsError::InvalidParameter(format!(
                "A rod needs at least 2 nodes, got {}",
                nodes.len()
            )));
        }
        if segments.len() + 1 != nodes.len() {
            return Err(PhysicsError::InvalidParameter(format!(
                "A rod with {} nodes needs {} segments, got {}",
                nodes.len(),
                nodes.len() - 1,
                segments.len()
            )));
        }
        if let Some(bad) = nodes.iter().position(|n| !(n.mass > 0.0 && n.mass.is_finite())) {
            return Err(PhysicsError::InvalidParameter(format!(
                "Rod node {} has non-positive mass {}",
                bad, nodes[bad].mass
            )));
        }

        Ok(Self { nodes, segments })
    }

    /// Builds a straight rod at rest from `start` to `end` with evenly spread mass
    pub fn new_straight(start: Vector3, end: Vector3, node_count: usize, total_mass: f32) -> Result<Self> {
        if node_count < 2 {
            return Err(PhysicsError::InvalidParameter(format!(
                "A rod needs at least 2 nodes, got {}",
                node_count
            )));
        }
        if !(total_mass > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "Rod mass must be positive, got {}",
                total_mass
            )));
        }

        let node_mass = total_mass / node_count as f32;
        let last = (node_count - 1) as f32;
        let nodes = (0..node_count)
            .map(|i| RodPositionElement::new(start.lerp(&end, i as f32 / last), node_mass))
            .collect();

        let orientation = segment_orientation(end - start);
        let segments = vec![RodOrientationElement::new(orientation); node_count - 1];

        Self::from_elements(nodes, segments)
    }

    /// Number of mass points
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total mass of all nodes
    pub fn total_mass(&self) -> f32 {
        self.nodes.iter().map(|n| n.mass).sum()
    }

    /// Gets a node, returning an error if the index is out of range
    pub fn node(&self, index: RodNodeIndex) -> Result<&RodPositionElement> {
        let count = self.nodes.len();
        self.nodes.get(index.0).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Rod node {} not found (count: {})", index.0, count))
        })
    }

    /// Gets a mutable node, returning an error if the index is out of range
    pub fn node_mut(&mut self, index: RodNodeIndex) -> Result<&mut RodPositionElement> {
        let count = self.nodes.len();
        self.nodes.get_mut(index.0).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Rod node {} not found (count: {})", index.0, count))
        })
    }

    /// Gets a segment, returning an error if the index is out of range
    pub fn segment(&self, index: RodSegmentIndex) -> Result<&RodOrientationElement> {
        let count = self.segments.len();
        self.segments.get(index.0).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Rod segment {} not found (count: {})", index.0, count))
        })
    }

    /// Gets a mutable segment, returning an error if the index is out of range
    pub fn segment_mut(&mut self, index: RodSegmentIndex) -> Result<&mut RodOrientationElement> {
        let count = self.segments.len();
        self.segments.get_mut(index.0).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Rod segment {} not found (count: {})", index.0, count))
        })
    }

    /// Iterates over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (RodNodeIndex, &RodPositionElement)> {
        self.nodes.iter().enumerate().map(|(i, n)| (RodNodeIndex(i), n))
    }

    /// Iterates over all nodes mutably
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = (RodNodeIndex, &mut RodPositionElement)> {
        self.nodes.iter_mut().enumerate().map(|(i, n)| (RodNodeIndex(i), n))
    }

    /// Nodes the rod's internal solver is free to move (not held by an anchor)
    pub fn free_nodes(&self) -> impl Iterator<Item = (RodNodeIndex, &RodPositionElement)> {
        self.nodes().filter(|(_, n)| !n.is_anchor())
    }

    /// Nodes currently held by an anchor
    pub fn anchored_nodes(&self) -> impl Iterator<Item = (RodNodeIndex, &RodPositionElement)> {
        self.nodes().filter(|(_, n)| n.is_anchor())
    }

    /// Resets the force accumulator of every node and the torque of every segment
    pub fn clear_forces(&mut self) {
        for node in &mut self.nodes {
            node.clear_force();
        }
        for segment in &mut self.segments {
            segment.torque = Vector3::zero();
        }
    }
}

/// Rotation taking the local z axis onto `direction`
fn segment_orientation(direction: Vector3) -> Quaternion {
    let dir = direction.normalize();
    if dir.is_zero() {
        return Quaternion::identity();
    }

    let z = Vector3::unit_z();
    let cos_angle = z.dot(&dir).clamp(-1.0, 1.0);
    let axis = z.cross(&dir);

    if axis.is_zero() {
        // Parallel or anti-parallel to z
        return if cos_angle > 0.0 {
            Quaternion::identity()
        } else {
            Quaternion::from_axis_angle(Vector3::unit_x(), std::f32::consts::PI)
        };
    }

    Quaternion::from_axis_angle(axis, cos_angle.acos())
}
