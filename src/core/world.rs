use crate::core::{
    AnchorHandle, BodyHandle, RodHandle, SimulationConfig,
    EventQueue, BodyEvent, BodyEventType, AnchorEvent, AnchorEventType,
    BodyStorage, ConstraintStorage, RodStorage,
};
use crate::bodies::RigidBody;
use crate::constraints::{AnchorConfig, AnchorConstraint, AnchorResolution};
use crate::error::PhysicsError;
use crate::math::{Quaternion, Vector3};
use crate::rod::{RodModel, RodNodeIndex, RodSegmentIndex};
use crate::Result;

use tracing::{debug, warn};

/// Owns every rigid body, rod and anchor, and runs the per-step coupling
///
/// The rod's own pass is not part of the world. At the start of it, callers
/// reset the accumulators with [`PhysicsWorld::clear_rod_forces`], then write
/// internal forces and each node's predicted position and velocity before
/// calling [`PhysicsWorld::step`]. The anchor forces `step` adds stay on the
/// accumulators for the rod's integrator to read.
pub struct PhysicsWorld {
    /// All rigid bodies in the world
    bodies: BodyStorage<RigidBody>,

    /// All rods in the world
    rods: RodStorage<RodModel>,

    /// All anchors in the world
    anchors: ConstraintStorage<AnchorConstraint>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            rods: RodStorage::new(),
            anchors: ConstraintStorage::new(),
            config,
            events: EventQueue::new(),
            time: 0.0,
        }
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns a mutable reference to the simulation configuration
    pub fn get_config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Adds a rigid body to the world and returns its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.add(body);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });

        handle
    }

    /// Removes a rigid body from the world, releasing every anchor that holds it
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        self.bodies.lookup(handle)?;

        let anchor_handles: Vec<AnchorHandle> = self.anchors
            .iter()
            .filter(|(_, anchor)| anchor.involves_body(handle))
            .map(|(a_handle, _)| a_handle)
            .collect();

        for a_handle in anchor_handles {
            self.release_anchor(a_handle)?;
        }

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Removed,
            body: handle,
        });

        self.bodies.remove(handle).ok_or_else(|| {
            PhysicsError::InternalError(format!("Body {:?} vanished during removal", handle))
        })
    }

    /// Gets a reference to a rigid body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.lookup(handle)
    }

    /// Gets a mutable reference to a rigid body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies.lookup_mut(handle)
    }

    /// Adds a rod to the world and returns its handle
    pub fn add_rod(&mut self, rod: RodModel) -> RodHandle {
        self.rods.add(rod)
    }

    /// Removes a rod from the world, releasing every anchor bound to it
    pub fn remove_rod(&mut self, handle: RodHandle) -> Result<RodModel> {
        self.rods.lookup(handle)?;

        let anchor_handles: Vec<AnchorHandle> = self.anchors
            .iter()
            .filter(|(_, anchor)| anchor.involves_rod(handle))
            .map(|(a_handle, _)| a_handle)
            .collect();

        for a_handle in anchor_handles {
            self.release_anchor(a_handle)?;
        }

        self.rods.remove(handle).ok_or_else(|| {
            PhysicsError::InternalError(format!("Rod {:?} vanished during removal", handle))
        })
    }

    /// Gets a reference to a rod by its handle
    pub fn get_rod(&self, handle: RodHandle) -> Result<&RodModel> {
        self.rods.lookup(handle)
    }

    /// Gets a mutable reference to a rod by its handle
    pub fn get_rod_mut(&mut self, handle: RodHandle) -> Result<&mut RodModel> {
        self.rods.lookup_mut(handle)
    }

    /// Binds a body to a rod node with the world's default anchor settings
    pub fn bind_anchor(
        &mut self,
        body: BodyHandle,
        rod: RodHandle,
        node: RodNodeIndex,
        segment: RodSegmentIndex,
        world_position: Vector3,
    ) -> Result<AnchorHandle> {
        let config = self.config.anchor;
        self.bind_anchor_with_config(body, rod, node, segment, world_position, config)
    }

    /// Binds a body to a rod node with explicit anchor settings
    pub fn bind_anchor_with_config(
        &mut self,
        body: BodyHandle,
        rod: RodHandle,
        node: RodNodeIndex,
        segment: RodSegmentIndex,
        world_position: Vector3,
        config: AnchorConfig,
    ) -> Result<AnchorHandle> {
        let anchor = AnchorConstraint::new(
            &self.bodies,
            &mut self.rods,
            body,
            rod,
            node,
            segment,
            world_position,
            config,
        )?;

        self.wake_body(body);

        let handle = self.anchors.add(anchor);
        self.events.add_anchor_event(AnchorEvent {
            event_type: AnchorEventType::Bound,
            anchor: handle,
            body,
            rod,
        });

        Ok(handle)
    }

    /// Releases an anchor, clearing its node's anchor flag
    pub fn release_anchor(&mut self, handle: AnchorHandle) -> Result<()> {
        let anchor = self.anchors.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Anchor with handle {:?} not found", handle))
        })?;

        let (body, rod) = (anchor.body(), anchor.rod());
        anchor.release(&mut self.rods)?;
        self.wake_body(body);

        self.events.add_anchor_event(AnchorEvent {
            event_type: AnchorEventType::Released,
            anchor: handle,
            body,
            rod,
        });

        Ok(())
    }

    /// Gets a reference to an anchor by its handle
    pub fn get_anchor(&self, handle: AnchorHandle) -> Result<&AnchorConstraint> {
        self.anchors.lookup(handle)
    }

    /// Absolute world position of an anchor
    pub fn anchor_world_position(&self, handle: AnchorHandle) -> Result<Vector3> {
        self.anchors.lookup(handle)?.world_position(&self.bodies)
    }

    /// Anchor position relative to its body's center of mass
    pub fn anchor_relative_world_position(&self, handle: AnchorHandle) -> Result<Vector3> {
        self.anchors.lookup(handle)?.relative_world_position(&self.bodies)
    }

    /// Orientation of the rod segment an anchor is attached to
    pub fn anchor_orientation(&self, handle: AnchorHandle) -> Result<Quaternion> {
        self.anchors.lookup(handle)?.orientation(&self.rods)
    }

    /// Runs one coupling pass over every anchor
    ///
    /// Must be called after the rods' predictions for this step are written and
    /// before rigid bodies are integrated. `dt` must be positive.
    pub fn solve_anchors(&mut self, dt: f32) -> Result<Vec<(AnchorHandle, AnchorResolution)>> {
        let mut resolutions = Vec::with_capacity(self.anchors.len());

        for (handle, anchor) in self.anchors.iter() {
            let was_sleeping = self.bodies.lookup(anchor.body())?.is_sleeping();
            let resolution = anchor.solve(dt, &mut self.bodies, &mut self.rods)?;

            if was_sleeping {
                self.events.add_body_event(BodyEvent {
                    event_type: BodyEventType::Awake,
                    body: anchor.body(),
                });
            }

            resolutions.push((handle, resolution));
        }

        Ok(resolutions)
    }

    /// Advances the world by one step
    ///
    /// Solves every anchor, then integrates the rigid bodies. Rod force
    /// accumulators are left holding the anchor forces.
    pub fn step(&mut self, dt: f32) -> Result<Vec<(AnchorHandle, AnchorResolution)>> {
        if !(dt > 0.0) {
            warn!(dt, "rejected non-positive time step");
            return Err(PhysicsError::InvalidParameter(format!("Time step must be positive, got {}", dt)));
        }

        self.events.clear();

        let resolutions = self.solve_anchors(dt)?;

        let (linear_damping, angular_damping) = (self.config.linear_damping, self.config.angular_damping);
        for (_, body) in self.bodies.iter_mut() {
            body.apply_damping(linear_damping, angular_damping);
            body.integrate_forces(dt);
            body.integrate_velocity(dt);
        }

        self.time += dt;

        Ok(resolutions)
    }

    /// Resets the force accumulators of every rod
    pub fn clear_rod_forces(&mut self) {
        for (_, rod) in self.rods.iter_mut() {
            rod.clear_forces();
        }
    }

    fn wake_body(&mut self, handle: BodyHandle) {
        if let Ok(body) = self.bodies.lookup_mut(handle) {
            if body.is_sleeping() {
                body.wake_up();

                self.events.add_body_event(BodyEvent {
                    event_type: BodyEventType::Awake,
                    body: handle,
                });
            }
        }
    }

    /// Returns a reference to the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Releases every anchor and removes all bodies and rods
    pub fn clear(&mut self) -> Result<()> {
        for handle in self.anchors.handles() {
            self.release_anchor(handle)?;
        }

        debug!(
            bodies = self.bodies.len(),
            rods = self.rods.len(),
            "clearing world"
        );

        self.bodies.clear();
        self.rods.clear();
        self.events.clear();
        self.time = 0.0;

        Ok(())
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns the number of rods in the world
    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    /// Returns the number of anchors in the world
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Handles of all anchors, in binding order
    pub fn anchor_handles(&self) -> Vec<AnchorHandle> {
        self.anchors.handles()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
