//! Coupling between a rigid body and one node of a flexible rod.
//!
//! An anchor freezes the attachment point in the body's local frame when it is
//! bound. Each step it compares where the body says the point is against where
//! the rod predicts its node will be, and splits the correction between the two
//! sides by their relative masses: the rod node receives a force, the body an
//! impulse at the anchor's lever arm.

use crate::bodies::RigidBody;
use crate::constraints::{AnchorBody, AnchorNode};
use crate::core::{BodyHandle, BodyStorage, RodHandle, RodStorage};
use crate::error::PhysicsError;
use crate::math::{Quaternion, Vector3};
use crate::rod::{RodModel, RodNodeIndex, RodSegmentIndex};
use crate::Result;

use tracing::{debug, trace};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Which mismatch an anchor corrects each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CorrectionMode {
    /// Correct the gap between the anchor point and the rod's predicted position
    #[default]
    Position,

    /// Correct the gap between the anchor point's velocity and the rod's predicted velocity
    Velocity,
}

/// Settings fixed for the lifetime of an anchor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AnchorConfig {
    /// Correction formulation
    pub mode: CorrectionMode,

    /// In position mode, also pass the node's accumulated force (times `dt`) to
    /// the body as impulse.
    ///
    /// This is an empirical stabilizer, not derived from first principles. It
    /// has no effect in velocity mode. The force is read before this step's
    /// soft correction lands on the node. Reading it after instead (as the
    /// Corde anchor does) cancels the correction impulse when no other force
    /// is present.
    pub transfer_internal_force: bool,
}

impl AnchorConfig {
    /// Position correction with internal force transfer
    pub fn new() -> Self {
        Self {
            mode: CorrectionMode::Position,
            transfer_internal_force: true,
        }
    }

    /// Set the correction mode
    pub fn with_mode(mut self, mode: CorrectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the internal force transfer heuristic
    pub fn with_internal_force_transfer(mut self, enabled: bool) -> Self {
        self.transfer_internal_force = enabled;
        self
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one call to [`resolve_anchor`] computed and applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorResolution {
    /// Mode used for this step
    pub mode: CorrectionMode,

    /// Rigid side minus soft side, as position or velocity depending on `mode`
    pub mismatch: Vector3,

    /// Share of the mismatch assigned to the rod node
    pub mass_ratio: f32,

    /// Force added to the rod node's accumulator
    pub soft_force: Vector3,

    /// Impulse applied to the rigid body, including any transferred internal force
    pub rigid_impulse: Vector3,

    /// The transferred internal force part of `rigid_impulse`
    pub internal_force_impulse: Vector3,

    /// Lever arm at which `rigid_impulse` was applied
    pub application_point: Vector3,
}

/// Expresses a world-space point in the body's local frame
#[inline]
pub fn reference_offset<B: AnchorBody + ?Sized>(body: &B, world_position: Vector3) -> Vector3 {
    body.world_transform().inverse() * world_position
}

/// World-space location of a local offset under the body's current transform
#[inline]
pub fn anchor_world_position<B: AnchorBody + ?Sized>(body: &B, reference_offset: Vector3) -> Vector3 {
    body.world_transform() * reference_offset
}

/// World-space location of a local offset relative to the body's center of mass
#[inline]
pub fn anchor_relative_world_position<B: AnchorBody + ?Sized>(body: &B, reference_offset: Vector3) -> Vector3 {
    anchor_world_position(body, reference_offset) - body.center_of_mass_position()
}

/// Mass from inverse mass; zero for immovable bodies
#[inline]
pub fn rigid_mass(inverse_mass: f32) -> f32 {
    if inverse_mass > 0.0 {
        1.0 / inverse_mass
    } else {
        0.0
    }
}

/// Fraction of a mismatch the soft side absorbs: `mr / (mr + ms)`
///
/// An immovable body (`rigid_mass == 0`) pushes the whole correction onto the rod.
#[inline]
pub fn mass_ratio(rigid_mass: f32, soft_mass: f32) -> f32 {
    if rigid_mass == 0.0 {
        1.0
    } else {
        rigid_mass / (rigid_mass + soft_mass)
    }
}

/// Resolves one step of coupling between `body` and `node`
///
/// `dt` must be positive. This is checked in debug builds only.
pub fn resolve_anchor<B, N>(
    body: &mut B,
    node: &mut N,
    reference_offset: Vector3,
    config: &AnchorConfig,
    dt: f32,
) -> AnchorResolution
where
    B: AnchorBody + ?Sized,
    N: AnchorNode + ?Sized,
{
    debug_assert!(dt > 0.0, "anchor solved with non-positive dt {}", dt);

    let inv_dt = 1.0 / dt;
    let application_point = anchor_relative_world_position(&*body, reference_offset);

    let r_mass = rigid_mass(body.inverse_mass());
    let s_mass = node.mass();
    let ratio = mass_ratio(r_mass, s_mass);
    if r_mass == 0.0 {
        trace!("anchor body is immovable, rod takes the full correction");
    }

    let (mismatch, soft_force, correction_impulse, internal_force_impulse) = match config.mode {
        CorrectionMode::Position => {
            let rigid_position = anchor_world_position(&*body, reference_offset);
            let mismatch = rigid_position - node.predicted_position();

            let soft_share = mismatch * ratio;
            let rigid_share = -mismatch * (1.0 - ratio);

            // Read before this step's correction lands on the accumulator
            let internal_force_impulse = if config.transfer_internal_force {
                node.accumulated_force() * dt
            } else {
                Vector3::zero()
            };

            (
                mismatch,
                soft_share * (s_mass * inv_dt * inv_dt),
                rigid_share * (r_mass * inv_dt),
                internal_force_impulse,
            )
        }
        CorrectionMode::Velocity => {
            let rigid_velocity = body.velocity_in_local_point(application_point);
            let mismatch = rigid_velocity - node.predicted_velocity();

            let soft_share = mismatch * ratio;
            let rigid_share = -mismatch * (1.0 - ratio);

            (
                mismatch,
                soft_share * (s_mass * inv_dt),
                rigid_share * r_mass,
                Vector3::zero(),
            )
        }
    };

    let rigid_impulse = correction_impulse + internal_force_impulse;

    node.apply_force(soft_force);
    body.activate();
    body.apply_impulse(rigid_impulse, application_point);

    trace!(
        mode = ?config.mode,
        mass_ratio = ratio,
        mismatch = %mismatch,
        soft_force = %soft_force,
        rigid_impulse = %rigid_impulse,
        "anchor resolved"
    );

    AnchorResolution {
        mode: config.mode,
        mismatch,
        mass_ratio: ratio,
        soft_force,
        rigid_impulse,
        internal_force_impulse,
        application_point,
    }
}

/// Binds one rigid body to one node of a rod
///
/// The body and rod are owned by the world and referenced by handle. The
/// reference offset is computed once at bind time and never changes.
#[derive(Debug, Clone)]
pub struct AnchorConstraint {
    body: BodyHandle,
    rod: RodHandle,
    node: RodNodeIndex,
    segment: RodSegmentIndex,
    reference_offset: Vector3,
    config: AnchorConfig,
}

impl AnchorConstraint {
    /// Binds `body` to `node` of `rod` at `world_position`
    ///
    /// Fails without side effects if the position is not finite, if any handle
    /// or index does not resolve, or if the node is already held by another anchor. On success the node is
    /// marked as an anchor.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bodies: &BodyStorage<RigidBody>,
        rods: &mut RodStorage<RodModel>,
        body: BodyHandle,
        rod: RodHandle,
        node: RodNodeIndex,
        segment: RodSegmentIndex,
        world_position: Vector3,
        config: AnchorConfig,
    ) -> Result<Self> {
        if !world_position.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "Anchor position must be finite, got {}",
                world_position
            )));
        }

        let rigid = bodies.lookup(body)?;
        let model = rods.lookup_mut(rod)?;
        model.segment(segment)?;
        let element = model.node_mut(node)?;

        if element.is_anchor() {
            return Err(PhysicsError::ConstraintError(format!(
                "Rod node {} of {:?} is already anchored",
                node.0, rod
            )));
        }

        let reference_offset = reference_offset(rigid, world_position);
        element.set_anchor(true);

        debug!(?body, ?rod, node = node.0, offset = %reference_offset, "anchor bound");

        Ok(Self {
            body,
            rod,
            node,
            segment,
            reference_offset,
            config,
        })
    }

    /// Handle of the bound body
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Handle of the bound rod
    pub fn rod(&self) -> RodHandle {
        self.rod
    }

    /// Index of the bound node
    pub fn node(&self) -> RodNodeIndex {
        self.node
    }

    /// Index of the segment whose orientation belongs to the bound node
    pub fn segment(&self) -> RodSegmentIndex {
        self.segment
    }

    /// Anchor point in the body's local frame, fixed at bind time
    pub fn reference_offset(&self) -> Vector3 {
        self.reference_offset
    }

    /// Settings this anchor was bound with
    pub fn config(&self) -> &AnchorConfig {
        &self.config
    }

    /// Whether the anchor references the given body
    pub fn involves_body(&self, body: BodyHandle) -> bool {
        self.body == body
    }

    /// Whether the anchor references the given rod
    pub fn involves_rod(&self, rod: RodHandle) -> bool {
        self.rod == rod
    }

    /// Absolute world position of the anchor under the body's current transform
    pub fn world_position(&self, bodies: &BodyStorage<RigidBody>) -> Result<Vector3> {
        let body = bodies.lookup(self.body)?;
        Ok(anchor_world_position(body, self.reference_offset))
    }

    /// Anchor position relative to the body's center of mass, in world orientation
    pub fn relative_world_position(&self, bodies: &BodyStorage<RigidBody>) -> Result<Vector3> {
        let body = bodies.lookup(self.body)?;
        Ok(anchor_relative_world_position(body, self.reference_offset))
    }

    /// Orientation of the bound segment (read only, kept for torque coupling)
    pub fn orientation(&self, rods: &RodStorage<RodModel>) -> Result<Quaternion> {
        Ok(rods.lookup(self.rod)?.segment(self.segment)?.orientation)
    }

    /// Applies one step of coupling to the bound body and node
    pub fn solve(
        &self,
        dt: f32,
        bodies: &mut BodyStorage<RigidBody>,
        rods: &mut RodStorage<RodModel>,
    ) -> Result<AnchorResolution> {
        let body = bodies.lookup_mut(self.body)?;
        let node = rods.lookup_mut(self.rod)?.node_mut(self.node)?;

        Ok(resolve_anchor(body, node, self.reference_offset, &self.config, dt))
    }

    /// Releases the binding, clearing the node's anchor flag
    ///
    /// The body and rod are left untouched apart from the flag.
    pub fn release(self, rods: &mut RodStorage<RodModel>) -> Result<()> {
        rods.lookup_mut(self.rod)?.node_mut(self.node)?.set_anchor(false);
        debug!(body = ?self.body, rod = ?self.rod, node = self.node.0, "anchor released");
        Ok(())
    }
}
