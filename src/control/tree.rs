//! Control arena: storage, parent/child links, traversal.

use slotmap::{SecondaryMap, SlotMap};

use super::behavior::ControlBehavior;
use super::node::{ControlData, ControlId};

/// Empty slice constant for returning when a control has no children.
const EMPTY_CHILDREN: &[ControlId] = &[];

/// The control tree, backed by a slotmap arena.
///
/// All controls live in one `SlotMap`; links and behaviors are kept in
/// secondary maps. This type only maintains structure. Invalidation,
/// notifications and manager state live in [`UiManager`](crate::manager::UiManager).
pub struct ControlTree {
    nodes: SlotMap<ControlId, ControlData>,
    behaviors: SecondaryMap<ControlId, Box<dyn ControlBehavior>>,
    children: SecondaryMap<ControlId, Vec<ControlId>>,
    parent: SecondaryMap<ControlId, ControlId>,
    root: Option<ControlId>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            behaviors: SecondaryMap::new(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached control.
    pub fn insert(&mut self, data: ControlData, behavior: Box<dyn ControlBehavior>) -> ControlId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.behaviors.insert(id, behavior);
        id
    }

    /// Append `child` to `parent`'s children. The caller checks that `child`
    /// is currently detached.
    pub(crate) fn attach(&mut self, parent: ControlId, child: ControlId) {
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
    }

    /// Unlink `child` from its parent, returning the old parent.
    pub(crate) fn detach(&mut self, child: ControlId) -> Option<ControlId> {
        let parent = self.parent.remove(child)?;
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&c| c != child);
        }
        Some(parent)
    }

    /// Drop a single detached, childless control from the arena.
    pub(crate) fn remove(&mut self, id: ControlId) -> Option<ControlData> {
        self.detach(id);
        self.children.remove(id);
        self.behaviors.remove(id);
        if self.root == Some(id) {
            self.root = None;
        }
        self.nodes.remove(id)
    }

    // ── Behavior checkout ────────────────────────────────────────────

    /// Temporarily take a control's behavior out of the arena so it can be
    /// called with mutable access to the whole manager.
    pub(crate) fn take_behavior(&mut self, id: ControlId) -> Option<Box<dyn ControlBehavior>> {
        self.behaviors.remove(id)
    }

    /// Return a behavior taken with [`take_behavior`](Self::take_behavior).
    /// Dropped silently if the control was disposed meanwhile.
    pub(crate) fn restore_behavior(&mut self, id: ControlId, behavior: Box<dyn ControlBehavior>) {
        if self.nodes.contains_key(id) {
            self.behaviors.insert(id, behavior);
        }
    }

    pub fn behavior(&self, id: ControlId) -> Option<&dyn ControlBehavior> {
        self.behaviors.get(id).map(|b| b.as_ref())
    }

    pub fn behavior_mut(&mut self, id: ControlId) -> Option<&mut Box<dyn ControlBehavior>> {
        self.behaviors.get_mut(id)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get(&self, id: ControlId) -> Option<&ControlData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut ControlData> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.parent.get(id).copied()
    }

    /// Children in z-order: later children draw on top.
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first. Does not include `id`.
    pub fn ancestors(&self, id: ControlId) -> Vec<ControlId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_same_or_ancestor(&self, ancestor: ControlId, id: ControlId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    pub fn root(&self) -> Option<ControlId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, id: ControlId) {
        self.root = Some(id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first walk of the subtree rooted at `start`.
    pub fn walk_depth_first(&self, start: ControlId) -> Vec<ControlId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            result.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Post-order walk: children before their parents.
    pub fn walk_leaves_first(&self, start: ControlId) -> Vec<ControlId> {
        let mut result = self.walk_depth_first(start);
        result.reverse();
        result
    }

    /// First control in the subtree of `start` whose name is `name`.
    pub fn find_by_name(&self, start: ControlId, name: &str) -> Option<ControlId> {
        self.walk_depth_first(start)
            .into_iter()
            .find(|&id| self.nodes.get(id).and_then(|d| d.name.as_deref()) == Some(name))
    }
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::BaseControl;

    fn node(tree: &mut ControlTree, name: &str) -> ControlId {
        let mut data = ControlData::new(BaseControl::TYPE_CHAIN);
        data.name = Some(name.into());
        tree.insert(data, Box::new(BaseControl))
    }

    /// ```text
    ///      root
    ///     /    \
    ///    a      b
    ///   / \
    ///  c   d
    /// ```
    fn sample() -> (ControlTree, [ControlId; 5]) {
        let mut tree = ControlTree::new();
        let root = node(&mut tree, "root");
        tree.set_root(root);
        let a = node(&mut tree, "a");
        let b = node(&mut tree, "b");
        let c = node(&mut tree, "c");
        let d = node(&mut tree, "d");
        tree.attach(root, a);
        tree.attach(root, b);
        tree.attach(a, c);
        tree.attach(a, d);
        (tree, [root, a, b, c, d])
    }

    #[test]
    fn attach_and_children_order() {
        let (tree, [root, a, b, c, d]) = sample();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn walk_orders() {
        let (tree, [root, a, b, c, d]) = sample();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk_leaves_first(root), vec![b, d, c, a, root]);
    }

    #[test]
    fn ancestors_nearest_first() {
        let (tree, [root, a, _b, c, _d]) = sample();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.is_same_or_ancestor(root, c));
        assert!(tree.is_same_or_ancestor(c, c));
        assert!(!tree.is_same_or_ancestor(c, a));
    }

    #[test]
    fn detach_and_remove() {
        let (mut tree, [root, a, b, c, _d]) = sample();
        assert_eq!(tree.detach(b), Some(root));
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.detach(b), None);

        tree.remove(c);
        assert!(!tree.contains(c));
        assert_eq!(tree.children(a).len(), 1);
        assert!(tree.get(c).is_none());
    }

    #[test]
    fn behavior_checkout_skips_removed() {
        let (mut tree, [_root, _a, b, _c, _d]) = sample();
        let behavior = tree.take_behavior(b).expect("behavior present");
        assert!(tree.behavior(b).is_none());
        tree.remove(b);
        tree.restore_behavior(b, behavior);
        assert!(tree.behavior(b).is_none());
    }

    #[test]
    fn find_by_name() {
        let (tree, [root, _a, _b, _c, d]) = sample();
        assert_eq!(tree.find_by_name(root, "d"), Some(d));
        assert_eq!(tree.find_by_name(root, "zzz"), None);
    }
}
