//! Control notifications and the queue the host drains.
//!
//! Behaviors receive notifications synchronously through their hooks; the
//! manager also records each one here so a host can observe what happened
//! during a frame phase without registering callbacks.

use std::collections::VecDeque;

use crate::control::ControlId;

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    EnteredTree,
    ExitedTree,
    Disposed,
    Resized,
    MouseEntered,
    MouseExited,
    FocusEntered,
    FocusExited,
    ModalRemoved,
    /// A button was clicked and released over itself.
    Pressed,
}

/// A notification about one control. The control may already be disposed
/// by the time the host reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UiEvent {
    pub control: ControlId,
    pub kind: UiEventKind,
}

impl UiEvent {
    pub fn new(control: ControlId, kind: UiEventKind) -> Self {
        Self { control, kind }
    }
}

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// FIFO of pending notifications. Unbounded; the owner drains it every
/// frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<UiEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: UiEvent) {
        self.queue.push_back(event);
    }

    /// Drain all pending notifications in arrival order.
    pub fn drain(&mut self) -> Vec<UiEvent> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
