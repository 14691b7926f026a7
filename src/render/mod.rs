//! Rendering: backend collaborator traits and the tree traversal.

pub mod handle;
mod traversal;

pub use handle::{DrawingHandle, RenderHandle, TextureId};
pub use traversal::MODULATE_SELF_PROPERTY;
