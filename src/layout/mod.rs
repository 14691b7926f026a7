//! Layout engine: anchor/margin math, box arrangement via taffy, and the
//! minimum-size and arrangement passes run by the manager.

pub mod anchor;
pub mod boxes;
pub mod pass;

pub use anchor::{anchor_rect, preset_anchors, preset_margins};
pub use boxes::{arrange_box, box_minimum_size, BoxAxis, BoxChild};
pub use pass::MIN_SIZE_PROPERTY;
