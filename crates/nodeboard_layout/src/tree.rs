//! Element tree management
//!
//! [`ElementTree`] is the retained tree every widget lives in. Each element
//! owns a mirrored Taffy node; parent/child edits are applied to both so a
//! layout pass always sees the current hierarchy. An element has at most one
//! parent: attaching it somewhere else detaches it first.

use slotmap::SlotMap;
use smallvec::SmallVec;
use taffy::geometry::Size;
use taffy::style::{AvailableSpace, Style};
use taffy::{NodeId, TaffyTree};

use nodeboard_core::ElementId;

use crate::element::{Capabilities, ElementBounds, ElementKind, ResizeRestriction};
use crate::style::StyleRule;
use crate::stylesheet::StyleSheet;

/// Path from an element up to its root, element first
pub type ElementPath = SmallVec<[ElementId; 16]>;

struct ElementNode {
    kind: ElementKind,
    name: Option<String>,
    classes: SmallVec<[String; 4]>,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    inline_style: StyleRule,
    bounds: ElementBounds,
    capabilities: Capabilities,
    resize_restriction: ResizeRestriction,
    scroll_offset: (f32, f32),
    taffy_node: NodeId,
}

/// Retained element tree backed by Taffy for layout
pub struct ElementTree {
    taffy: TaffyTree,
    nodes: SlotMap<ElementId, ElementNode>,
    /// Stylesheets and the subtree root they apply to, in attach order
    style_sheets: Vec<(ElementId, StyleSheet)>,
    pointer_capture: Option<ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            nodes: SlotMap::with_key(),
            style_sheets: Vec::new(),
            pointer_capture: None,
        }
    }

    /// Create a detached element
    pub fn create(&mut self, kind: ElementKind) -> ElementId {
        let taffy_node = self
            .taffy
            .new_leaf(Style::default())
            .expect("creating a taffy leaf cannot fail");
        self.nodes.insert(ElementNode {
            kind,
            name: None,
            classes: SmallVec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
            inline_style: StyleRule::default(),
            bounds: ElementBounds::INVALID,
            capabilities: Capabilities::NONE,
            resize_restriction: ResizeRestriction::Free,
            scroll_offset: (0.0, 0.0),
            taffy_node,
        })
    }

    /// Create a detached, named element
    pub fn create_named(&mut self, kind: ElementKind, name: impl Into<String>) -> ElementId {
        let id = self.create(kind);
        self.set_name(id, name);
        id
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.nodes.get(id).map(|n| n.kind)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Append `child` to `parent`, detaching it from its current parent
    ///
    /// Returns `false` (and changes nothing) if either id is stale or the
    /// edit would create a cycle.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Insert `child` at `index` among `parent`'s children (clamped)
    pub fn insert_child(&mut self, parent: ElementId, index: usize, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            tracing::trace!(?parent, ?child, "add_child on stale element ignored");
            return false;
        }
        if parent == child || self.is_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to create a cycle in the element tree");
            return false;
        }

        self.remove_from_hierarchy(child);

        let parent_node = self.nodes[parent].taffy_node;
        let child_node = self.nodes[child].taffy_node;
        let siblings = &mut self.nodes[parent].children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.nodes[child].parent = Some(parent);

        if let Err(err) = self.taffy.insert_child_at_index(parent_node, index, child_node) {
            tracing::warn!(?err, "taffy rejected child insertion");
        }
        self.refresh_subtree(child);
        true
    }

    /// Detach `child` from its parent; the element stays alive
    ///
    /// Returns `true` if the element had a parent.
    pub fn remove_from_hierarchy(&mut self, child: ElementId) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };

        let child_node = self.nodes[child].taffy_node;
        let parent_node = self.nodes[parent].taffy_node;
        self.nodes[parent].children.retain(|&c| c != child);
        self.nodes[child].parent = None;

        if let Err(err) = self.taffy.remove_child(parent_node, child_node) {
            tracing::warn!(?err, "taffy rejected child removal");
        }
        self.refresh_subtree(child);
        true
    }

    /// Destroy an element and its whole subtree, returning the removed ids
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.remove_from_hierarchy(id);

        let removed = self.descendants(id);
        for &element in &removed {
            if let Some(node) = self.nodes.remove(element) {
                let _ = self.taffy.remove(node.taffy_node);
            }
        }
        self.style_sheets.retain(|(root, _)| !removed.contains(root));
        if self.pointer_capture.is_some_and(|c| removed.contains(&c)) {
            self.pointer_capture = None;
        }
        removed
    }

    /// `id` followed by each of its ancestors
    pub fn path_to_root(&self, id: ElementId) -> ElementPath {
        let mut path = ElementPath::new();
        let mut current = self.contains(id).then_some(id);
        while let Some(element) = current {
            path.push(element);
            current = self.parent(element);
        }
        path
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = self.parent(id);
        while let Some(element) = current {
            if element == ancestor {
                return true;
            }
            current = self.parent(element);
        }
        false
    }

    /// `root` and all its descendants, in pre-order
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First element named `name` in `root`'s subtree (pre-order, root included)
    pub fn query(&self, root: ElementId, name: &str) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.name(id) == Some(name))
    }

    // =========================================================================
    // Identity, classes, text
    // =========================================================================

    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.name.as_deref())
    }

    pub fn set_name(&mut self, id: ElementId, name: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.name = Some(name.into());
        }
    }

    pub fn classes(&self, id: ElementId) -> &[String] {
        self.nodes.get(id).map_or(&[], |n| n.classes.as_slice())
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add a class (no-op if already present)
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.classes.iter().any(|c| c == class) {
            return;
        }
        node.classes.push(class.to_string());
        self.refresh_style(id);
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        if node.classes.len() != before {
            self.refresh_style(id);
        }
    }

    pub fn clear_classes(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes.clear();
            self.refresh_style(id);
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.text.as_deref())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.text = Some(text.into());
        }
    }

    // =========================================================================
    // Graph element metadata
    // =========================================================================

    pub fn capabilities(&self, id: ElementId) -> Capabilities {
        self.nodes.get(id).map_or(Capabilities::NONE, |n| n.capabilities)
    }

    pub fn set_capabilities(&mut self, id: ElementId, capabilities: Capabilities) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.capabilities = capabilities;
        }
    }

    pub fn resize_restriction(&self, id: ElementId) -> ResizeRestriction {
        self.nodes
            .get(id)
            .map_or(ResizeRestriction::Free, |n| n.resize_restriction)
    }

    pub fn set_resize_restriction(&mut self, id: ElementId, restriction: ResizeRestriction) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.resize_restriction = restriction;
        }
    }

    pub fn scroll_offset(&self, id: ElementId) -> (f32, f32) {
        self.nodes.get(id).map_or((0.0, 0.0), |n| n.scroll_offset)
    }

    pub fn set_scroll_offset(&mut self, id: ElementId, offset: (f32, f32)) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.scroll_offset = offset;
        }
    }

    // =========================================================================
    // Pointer capture
    // =========================================================================

    /// Route subsequent pointer move/up events to `id`
    pub fn capture_pointer(&mut self, id: ElementId) {
        if self.contains(id) {
            self.pointer_capture = Some(id);
        }
    }

    /// Release the capture if `id` holds it
    pub fn release_pointer(&mut self, id: ElementId) {
        if self.pointer_capture == Some(id) {
            self.pointer_capture = None;
        }
    }

    pub fn pointer_capture(&self) -> Option<ElementId> {
        self.pointer_capture
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Attach a stylesheet to `root`'s subtree
    pub fn add_style_sheet(&mut self, root: ElementId, sheet: StyleSheet) {
        if !self.contains(root) {
            return;
        }
        self.style_sheets.push((root, sheet));
        self.refresh_subtree(root);
    }

    pub fn inline_style(&self, id: ElementId) -> Option<&StyleRule> {
        self.nodes.get(id).map(|n| &n.inline_style)
    }

    pub fn set_inline_style(&mut self, id: ElementId, style: StyleRule) {
        self.update_inline_style(id, |inline| *inline = style);
    }

    /// Edit the inline style in place and push the result to the layout engine
    pub fn update_inline_style(&mut self, id: ElementId, edit: impl FnOnce(&mut StyleRule)) {
        if let Some(node) = self.nodes.get_mut(id) {
            edit(&mut node.inline_style);
            self.refresh_style(id);
        }
    }

    /// Stylesheet rules for the element's classes, then its inline style
    pub fn effective_style(&self, id: ElementId) -> StyleRule {
        let mut rule = StyleRule::default();
        let Some(node) = self.nodes.get(id) else {
            return rule;
        };
        for (root, sheet) in &self.style_sheets {
            if *root == id || self.is_ancestor(*root, id) {
                sheet.apply(node.classes.iter().map(String::as_str), &mut rule);
            }
        }
        rule.merge(&node.inline_style);
        rule
    }

    fn refresh_style(&mut self, id: ElementId) {
        let Some(taffy_node) = self.nodes.get(id).map(|n| n.taffy_node) else {
            return;
        };
        let style = self.effective_style(id).to_taffy();
        if let Err(err) = self.taffy.set_style(taffy_node, style) {
            tracing::warn!(?err, "taffy rejected style update");
        }
    }

    fn refresh_subtree(&mut self, root: ElementId) {
        if self.style_sheets.is_empty() {
            self.refresh_style(root);
            return;
        }
        for id in self.descendants(root) {
            self.refresh_style(id);
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Measured bounds (NaN size until measured or assigned)
    pub fn layout(&self, id: ElementId) -> ElementBounds {
        self.nodes
            .get(id)
            .map_or(ElementBounds::INVALID, |n| n.bounds)
    }

    /// Assign bounds directly (host-driven placement)
    pub fn set_layout(&mut self, id: ElementId, bounds: ElementBounds) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = bounds;
        }
    }

    /// Run a layout pass over `root`'s subtree and store the measured bounds
    pub fn compute_layout(&mut self, root: ElementId, available_space: Size<AvailableSpace>) {
        let Some(taffy_node) = self.nodes.get(root).map(|n| n.taffy_node) else {
            return;
        };
        if let Err(err) = self.taffy.compute_layout(taffy_node, available_space) {
            tracing::warn!(?err, "layout pass failed");
            return;
        }

        let origin = self
            .parent(root)
            .map(|p| self.layout(p))
            .filter(ElementBounds::is_valid)
            .map_or((0.0, 0.0), |b| (b.x, b.y));

        let mut stack = vec![(root, origin)];
        while let Some((id, offset)) = stack.pop() {
            let node = &self.nodes[id];
            let Ok(layout) = self.taffy.layout(node.taffy_node) else {
                continue;
            };
            let bounds = ElementBounds::from_layout(layout, offset);
            stack.extend(node.children.iter().map(|&c| (c, (bounds.x, bounds.y))));
            self.nodes[id].bounds = bounds;
        }
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Direction;

    fn definite(width: f32, height: f32) -> Size<AvailableSpace> {
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        }
    }

    #[test]
    fn test_reparent_keeps_single_parent() {
        let mut tree = ElementTree::new();
        let a = tree.create(ElementKind::Container);
        let b = tree.create(ElementKind::Container);
        let child = tree.create(ElementKind::Label);

        assert!(tree.add_child(a, child));
        assert!(tree.add_child(b, child));
        assert_eq!(tree.parent(child), Some(b));
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[child]);
    }

    #[test]
    fn test_refuses_cycles() {
        let mut tree = ElementTree::new();
        let a = tree.create(ElementKind::Container);
        let b = tree.create(ElementKind::Container);
        tree.add_child(a, b);

        assert!(!tree.add_child(b, a));
        assert!(!tree.add_child(a, a));
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_insert_child_clamps_index() {
        let mut tree = ElementTree::new();
        let parent = tree.create(ElementKind::Container);
        let first = tree.create(ElementKind::Label);
        let second = tree.create(ElementKind::Label);
        tree.add_child(parent, first);
        tree.insert_child(parent, 0, second);
        let third = tree.create(ElementKind::Label);
        tree.insert_child(parent, 99, third);

        assert_eq!(tree.children(parent), &[second, first, third]);
    }

    #[test]
    fn test_query_and_path() {
        let mut tree = ElementTree::new();
        let root = tree.create_named(ElementKind::Container, "root");
        let header = tree.create_named(ElementKind::Container, "header");
        let title = tree.create_named(ElementKind::Label, "titleLabel");
        tree.add_child(root, header);
        tree.add_child(header, title);

        assert_eq!(tree.query(root, "titleLabel"), Some(title));
        assert_eq!(tree.query(header, "root"), None);
        assert_eq!(tree.path_to_root(title).as_slice(), &[title, header, root]);
        assert!(tree.is_ancestor(root, title));
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = ElementTree::new();
        let root = tree.create(ElementKind::Container);
        let child = tree.create(ElementKind::Container);
        let grandchild = tree.create(ElementKind::Label);
        tree.add_child(root, child);
        tree.add_child(child, grandchild);
        tree.capture_pointer(grandchild);

        let removed = tree.remove(child);
        assert_eq!(removed, vec![child, grandchild]);
        assert!(tree.children(root).is_empty());
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.pointer_capture(), None);
    }

    #[test]
    fn test_classes() {
        let mut tree = ElementTree::new();
        let id = tree.create(ElementKind::Container);
        tree.add_class(id, "blackboard");
        tree.add_class(id, "blackboard");
        tree.add_class(id, "scrollable");
        assert_eq!(tree.classes(id).len(), 2);

        tree.remove_class(id, "scrollable");
        assert!(!tree.has_class(id, "scrollable"));
        tree.clear_classes(id);
        assert!(tree.classes(id).is_empty());
    }

    #[test]
    fn test_stylesheet_applies_to_subtree_only() {
        let mut tree = ElementTree::new();
        let styled = tree.create(ElementKind::Container);
        let inside = tree.create(ElementKind::Container);
        let outside = tree.create(ElementKind::Container);
        tree.add_child(styled, inside);
        tree.add_class(inside, "wide");
        tree.add_class(outside, "wide");

        tree.add_style_sheet(
            styled,
            StyleSheet::new().with_rule("wide", StyleRule::new().size(300.0, 10.0)),
        );

        assert_eq!(tree.effective_style(inside).width, Some(300.0));
        assert_eq!(tree.effective_style(outside).width, None);

        tree.remove_from_hierarchy(inside);
        assert_eq!(tree.effective_style(inside).width, None);
    }

    #[test]
    fn test_inline_style_wins_over_sheet() {
        let mut tree = ElementTree::new();
        let id = tree.create(ElementKind::Container);
        tree.add_class(id, "wide");
        tree.add_style_sheet(
            id,
            StyleSheet::new().with_rule("wide", StyleRule::new().size(300.0, 10.0)),
        );
        tree.update_inline_style(id, |s| s.width = Some(120.0));

        let style = tree.effective_style(id);
        assert_eq!(style.width, Some(120.0));
        assert_eq!(style.height, Some(10.0));
    }

    #[test]
    fn test_layout_is_invalid_until_computed() {
        let mut tree = ElementTree::new();
        let root = tree.create(ElementKind::Container);
        let child = tree.create(ElementKind::Container);
        tree.add_child(root, child);
        tree.set_inline_style(
            root,
            StyleRule {
                flex_direction: Some(Direction::Column),
                ..StyleRule::new().size(400.0, 300.0)
            },
        );
        tree.set_inline_style(
            child,
            StyleRule {
                left: Some(10.0),
                top: Some(20.0),
                ..StyleRule::new().absolute().size(50.0, 60.0)
            },
        );

        assert!(!tree.layout(child).is_valid());

        tree.compute_layout(root, definite(400.0, 300.0));
        assert_eq!(tree.layout(root), ElementBounds::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(tree.layout(child), ElementBounds::new(10.0, 20.0, 50.0, 60.0));
    }
}
