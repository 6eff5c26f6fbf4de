//! Discretized flexible rod: mass points joined by oriented segments.
//!
//! The rod's own dynamics live elsewhere. This module only holds the per-node
//! state that an anchor reads and writes during a step.

mod element;
mod model;

pub use self::element::{RodOrientationElement, RodPositionElement};
pub use self::model::{RodModel, RodNodeIndex, RodSegmentIndex};
