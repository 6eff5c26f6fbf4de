use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::core::{BodyHandle, ConstraintHandle, RodHandle};
use crate::error::PhysicsError;
use crate::Result;

/// A typed identifier issued by a [`HandleMap`]
pub trait Handle: Copy + Ord + Debug {
    /// Human-readable name of what the handle refers to, used in errors
    const KIND: &'static str;

    /// Wraps a raw id
    fn from_raw(id: u32) -> Self;
}

impl Handle for BodyHandle {
    const KIND: &'static str = "Body";

    fn from_raw(id: u32) -> Self {
        BodyHandle(id)
    }
}

impl Handle for RodHandle {
    const KIND: &'static str = "Rod";

    fn from_raw(id: u32) -> Self {
        RodHandle(id)
    }
}

impl Handle for ConstraintHandle {
    const KIND: &'static str = "Constraint";

    fn from_raw(id: u32) -> Self {
        ConstraintHandle(id)
    }
}

/// World-owned arena that hands out handles for the items it stores
///
/// Handles are never reused, so a stale handle fails to resolve instead of
/// aliasing a newer item. Iteration follows handle order.
#[derive(Debug, Clone)]
pub struct HandleMap<H: Handle, T> {
    items: BTreeMap<H, T>,
    next_id: u32,
}

/// Storage for rigid bodies
pub type BodyStorage<T> = HandleMap<BodyHandle, T>;

/// Storage for rods
pub type RodStorage<T> = HandleMap<RodHandle, T>;

/// Storage for constraints
pub type ConstraintStorage<T> = HandleMap<ConstraintHandle, T>;

impl<H: Handle, T> HandleMap<H, T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    /// Gets a reference to an item by its handle
    pub fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    /// Gets a mutable reference to an item by its handle
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    /// Gets an item by its handle, returning an error if not found
    pub fn lookup(&self, handle: H) -> Result<&T> {
        self.items.get(&handle).ok_or_else(|| not_found(handle))
    }

    /// Gets a mutable reference to an item by its handle, returning an error if not found
    pub fn lookup_mut(&mut self, handle: H) -> Result<&mut T> {
        self.items.get_mut(&handle).ok_or_else(|| not_found(handle))
    }

    /// Removes an item from the storage
    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    /// Whether the handle resolves
    pub fn contains(&self, handle: H) -> bool {
        self.items.contains_key(&handle)
    }

    /// Returns the number of items in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every item; handles already issued stay retired
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns all handles in order
    pub fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }

    /// Returns an iterator over all items
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    /// Returns a mutable iterator over all items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (H, &mut T)> {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }
}

impl<H: Handle, T> Default for HandleMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found<H: Handle>(handle: H) -> PhysicsError {
    PhysicsError::ResourceNotFound(format!("{} with handle {:?} not found", H::KIND, handle))
}
