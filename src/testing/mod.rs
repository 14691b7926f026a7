//! Headless testing tools: a recording render backend and an input harness.
//!
//! Use [`Harness`] to drive a [`UiManager`](crate::manager::UiManager)
//! without a host. Use [`RecordingRenderer`] to capture render output as a
//! list of calls for assertions or snapshots.

pub mod harness;
pub mod recorder;

pub use harness::Harness;
pub use recorder::{DrawCall, RecordedRect, RecordedString, RecordingRenderer};
