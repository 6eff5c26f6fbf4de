mod capability;
mod anchor;

pub use self::capability::{AnchorBody, AnchorNode};
pub use self::anchor::{
    AnchorConfig, AnchorConstraint, AnchorResolution, CorrectionMode,
    anchor_relative_world_position, anchor_world_position, mass_ratio,
    reference_offset, resolve_anchor, rigid_mass,
};
