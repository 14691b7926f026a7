//! Box (stacking) arrangement via taffy.
//!
//! A box container stacks its children along one axis. Each child gets at
//! least its minimum size along the main axis; children flagged `EXPAND`
//! share the leftover space in proportion to their stretch ratio. Along the
//! cross axis the size flags pick stretch, start, center or end alignment.

use taffy::prelude::*;

use crate::control::SizeFlags;
use crate::error::UiResult;
use crate::geometry::{Rect, Vec2};

/// Stacking axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxAxis {
    Vertical,
    Horizontal,
}

/// Per-child input to [`arrange_box`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxChild {
    pub minimum_size: Vec2,
    pub size_flags_horizontal: SizeFlags,
    pub size_flags_vertical: SizeFlags,
    pub stretch_ratio: f32,
}

impl BoxAxis {
    fn main(self, v: Vec2) -> f32 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    fn cross(self, v: Vec2) -> f32 {
        match self {
            Self::Vertical => v.x,
            Self::Horizontal => v.y,
        }
    }

    fn flags(self, child: &BoxChild) -> (SizeFlags, SizeFlags) {
        match self {
            Self::Vertical => (child.size_flags_vertical, child.size_flags_horizontal),
            Self::Horizontal => (child.size_flags_horizontal, child.size_flags_vertical),
        }
    }
}

/// Minimum size of a box: the sum along the main axis plus separations,
/// the maximum along the cross axis.
pub fn box_minimum_size(axis: BoxAxis, separation: f32, children: &[Vec2]) -> Vec2 {
    let main: f32 = children.iter().map(|c| axis.main(*c)).sum::<f32>()
        + separation * children.len().saturating_sub(1) as f32;
    let cross = children.iter().map(|c| axis.cross(*c)).fold(0.0, f32::max);
    match axis {
        BoxAxis::Vertical => Vec2::new(cross, main),
        BoxAxis::Horizontal => Vec2::new(main, cross),
    }
}

fn cross_alignment(flags: SizeFlags) -> AlignSelf {
    if flags.contains(SizeFlags::FILL) {
        AlignSelf::Stretch
    } else if flags.contains(SizeFlags::SHRINK_CENTER) {
        AlignSelf::Center
    } else if flags.contains(SizeFlags::SHRINK_END) {
        AlignSelf::FlexEnd
    } else {
        AlignSelf::FlexStart
    }
}

/// Compute each child's rectangle, relative to the container, for a container
/// of `size`.
pub fn arrange_box(axis: BoxAxis, size: Vec2, separation: f32, children: &[BoxChild]) -> UiResult<Vec<Rect>> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let mut nodes = Vec::with_capacity(children.len());
    for child in children {
        let (main_flags, cross_flags) = axis.flags(child);
        let grow = if main_flags.contains(SizeFlags::EXPAND) {
            child.stretch_ratio.max(0.0)
        } else {
            0.0
        };
        let style = Style {
            min_size: taffy::geometry::Size {
                width: Dimension::from_length(child.minimum_size.x),
                height: Dimension::from_length(child.minimum_size.y),
            },
            flex_basis: Dimension::from_length(axis.main(child.minimum_size)),
            flex_grow: grow,
            flex_shrink: 0.0,
            align_self: Some(cross_alignment(cross_flags)),
            ..Default::default()
        };
        nodes.push(tree.new_leaf(style)?);
    }

    let gap = LengthPercentage::from_length(separation);
    let root_style = Style {
        display: Display::Flex,
        flex_direction: match axis {
            BoxAxis::Vertical => FlexDirection::Column,
            BoxAxis::Horizontal => FlexDirection::Row,
        },
        size: taffy::geometry::Size {
            width: Dimension::from_length(size.x),
            height: Dimension::from_length(size.y),
        },
        gap: taffy::geometry::Size {
            width: gap,
            height: gap,
        },
        ..Default::default()
    };
    let root = tree.new_with_children(root_style, &nodes)?;

    tree.compute_layout(
        root,
        taffy::geometry::Size {
            width: AvailableSpace::Definite(size.x),
            height: AvailableSpace::Definite(size.y),
        },
    )?;

    nodes
        .iter()
        .map(|&node| {
            let layout = tree.layout(node)?;
            Ok(Rect::from_dimensions(
                Vec2::new(layout.location.x, layout.location.y),
                Vec2::new(layout.size.width, layout.size.height),
            ))
        })
        .collect()
}
