//! Control tree: per-control data, behavior hooks, and the arena that links them.

pub mod behavior;
pub mod node;
pub mod tree;

pub use behavior::ControlBehavior;
pub use node::{ControlData, ControlId, GrowDirection, LayoutPreset, MouseFilterMode, SizeFlags};
pub use tree::ControlTree;
