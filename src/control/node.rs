//! Per-control data: identity, layout parameters, style state, flags.

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::geometry::{Color, Vec2};
use crate::style::StyleValue;

new_key_type! {
    /// Handle to a control in the tree. A handle whose control was disposed
    /// is stale and every lookup through it fails.
    pub struct ControlId;
}

// ---------------------------------------------------------------------------
// Enums and flags
// ---------------------------------------------------------------------------

/// How a control participates in hit-testing and event bubbling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseFilterMode {
    /// Receives input and lets it continue to ancestors.
    Pass,
    /// Receives input and halts propagation.
    #[default]
    Stop,
    /// Never receives input and never blocks it.
    Ignore,
}

/// Which edges may move outward when a control is smaller than its minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrowDirection {
    /// Grow towards the top/left.
    Begin,
    /// Grow towards the bottom/right.
    #[default]
    End,
    /// Grow symmetrically around the center.
    Both,
}

bitflags! {
    /// Sizing behavior inside a box container.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SizeFlags: u8 {
        const NONE = 0;
        /// Take the full allocated space.
        const FILL = 1;
        /// Claim a share of the leftover space along the main axis.
        const EXPAND = 2;
        /// Center within the allocated space.
        const SHRINK_CENTER = 4;
        /// Align to the end of the allocated space.
        const SHRINK_END = 8;
    }
}

impl Default for SizeFlags {
    fn default() -> Self {
        SizeFlags::FILL
    }
}

/// Common anchor/margin configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutPreset {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    Wide,
}

// ---------------------------------------------------------------------------
// ControlData
// ---------------------------------------------------------------------------

/// State shared by every control regardless of its behavior.
///
/// Positions and sizes are logical; pixel geometry is derived from them and
/// the manager's UI scale on demand.
#[derive(Debug, Clone)]
pub struct ControlData {
    pub name: Option<String>,
    /// Concrete type followed by its ancestors, ending in `"Control"`.
    pub type_chain: &'static [&'static str],

    pub position: Vec2,
    pub size: Vec2,

    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub anchor_left: f32,
    pub anchor_top: f32,
    pub anchor_right: f32,
    pub anchor_bottom: f32,
    pub grow_horizontal: GrowDirection,
    pub grow_vertical: GrowDirection,

    pub custom_minimum_size: Vec2,
    pub size_flags_horizontal: SizeFlags,
    pub size_flags_vertical: SizeFlags,
    pub size_flags_stretch_ratio: f32,

    pub visible: bool,
    pub mouse_filter: MouseFilterMode,
    pub rect_clip_content: bool,
    pub rect_draw_clip_margin: i32,
    pub modulate: Color,
    pub modulate_self: Color,
    pub can_keyboard_focus: bool,
    pub keyboard_focus_on_click: bool,

    pub style_classes: HashSet<String>,
    pub style_pseudo_classes: HashSet<String>,
    pub style_identifier: Option<String>,
    pub(crate) style_properties: HashMap<String, StyleValue>,

    pub(crate) inside_tree: bool,
    pub(crate) styling_dirty: bool,
    pub(crate) minimum_size_dirty: bool,
    pub(crate) layout_dirty: bool,
    pub(crate) combined_minimum_size: Vec2,
}

impl ControlData {
    pub fn new(type_chain: &'static [&'static str]) -> Self {
        Self {
            name: None,
            type_chain,
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            margin_left: 0.0,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            anchor_left: 0.0,
            anchor_top: 0.0,
            anchor_right: 0.0,
            anchor_bottom: 0.0,
            grow_horizontal: GrowDirection::End,
            grow_vertical: GrowDirection::End,
            custom_minimum_size: Vec2::ZERO,
            size_flags_horizontal: SizeFlags::FILL,
            size_flags_vertical: SizeFlags::FILL,
            size_flags_stretch_ratio: 1.0,
            visible: true,
            mouse_filter: MouseFilterMode::Stop,
            rect_clip_content: false,
            rect_draw_clip_margin: 0,
            modulate: Color::WHITE,
            modulate_self: Color::WHITE,
            can_keyboard_focus: false,
            keyboard_focus_on_click: false,
            style_classes: HashSet::new(),
            style_pseudo_classes: HashSet::new(),
            style_identifier: None,
            style_properties: HashMap::new(),
            inside_tree: false,
            styling_dirty: false,
            minimum_size_dirty: true,
            layout_dirty: false,
            combined_minimum_size: Vec2::ZERO,
        }
    }

    /// The most derived type name.
    pub fn type_name(&self) -> &'static str {
        self.type_chain.first().copied().unwrap_or("Control")
    }

    /// Whether `name` appears anywhere in this control's type chain.
    pub fn is_type(&self, name: &str) -> bool {
        self.type_chain.iter().any(|t| *t == name)
    }

    pub fn has_style_class(&self, class: &str) -> bool {
        self.style_classes.contains(class)
    }

    pub fn has_style_pseudo_class(&self, class: &str) -> bool {
        self.style_pseudo_classes.contains(class)
    }

    /// Whether the control is attached to the manager's root.
    pub fn is_inside_tree(&self) -> bool {
        self.inside_tree
    }

    /// Resolved properties from the last completed style pass.
    pub fn style_properties(&self) -> &HashMap<String, StyleValue> {
        &self.style_properties
    }
}
