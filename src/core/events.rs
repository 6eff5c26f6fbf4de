use crate::core::{AnchorHandle, BodyHandle, RodHandle};
use std::collections::VecDeque;

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,
    
    /// A body has been removed from the world
    Removed,
    
    /// A sleeping body has been woken up
    Awake,
}

/// An event related to a single body
#[derive(Debug, Clone)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,
    
    /// The body that the event refers to
    pub body: BodyHandle,
}

/// Types of anchor events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorEventType {
    /// A body has been bound to a rod node
    Bound,

    /// A binding has been released
    Released,
}

/// An event related to a single anchor
#[derive(Debug, Clone)]
pub struct AnchorEvent {
    /// The type of anchor event
    pub event_type: AnchorEventType,

    /// The anchor that the event refers to
    pub anchor: AnchorHandle,

    /// The bound body
    pub body: BodyHandle,

    /// The bound rod
    pub rod: RodHandle,
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Body events
    body_events: VecDeque<BodyEvent>,

    /// Anchor events
    anchor_events: VecDeque<AnchorEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Adds an anchor event to the queue
    pub fn add_anchor_event(&mut self, event: AnchorEvent) {
        self.anchor_events.push_back(event);
    }
    
    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Gets the next anchor event from the queue
    pub fn next_anchor_event(&mut self) -> Option<AnchorEvent> {
        self.anchor_events.pop_front()
    }
    
    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.body_events.is_empty() && self.anchor_events.is_empty()
    }
    
    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.body_events.clear();
        self.anchor_events.clear();
    }
    
    /// Gets all body events of a specific type
    pub fn get_body_events_of_type(&self, event_type: BodyEventType) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all anchor events of a specific type
    pub fn get_anchor_events_of_type(&self, event_type: AnchorEventType) -> Vec<&AnchorEvent> {
        self.anchor_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
    
    /// Gets all body events for a specific body
    pub fn get_body_events_for_body(&self, body: BodyHandle) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.body == body)
            .collect()
    }
}
