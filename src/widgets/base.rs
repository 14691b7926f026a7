//! The plain control: no content, no child arrangement.

use std::any::Any;

use crate::control::ControlBehavior;

/// A control with every hook at its default.
///
/// Children of a `BaseControl` keep whatever position and size they are
/// given; nothing arranges them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseControl;

impl BaseControl {
    pub const TYPE_CHAIN: &'static [&'static str] = &["Control"];
}

impl ControlBehavior for BaseControl {
    fn type_chain(&self) -> &'static [&'static str] {
        Self::TYPE_CHAIN
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
