//! Fixed / scrollable layout of a panel's content area
//!
//! In [`LayoutMode::Fixed`] the content container sits directly under the
//! panel's content root and the panel grows with its items; only the width
//! can be resized. In [`LayoutMode::Scrollable`] the content container is
//! moved into a [`ScrollContainer`] and the panel becomes resizable on both
//! axes.
//!
//! Transitions happen only on an actual change of mode and complete before
//! returning, so the content container always has exactly one parent. The
//! scroll container is created on the first switch to scrollable mode and
//! reused afterwards.

use nodeboard_core::ElementId;
use nodeboard_layout::{Axis, ElementTree, ResizeRestriction};

use crate::context::WidgetContext;
use crate::scroll::{ScrollContainer, ScrollDirection};
use crate::widget::Widget;

/// Class set on the panel root while it is scrollable
pub const SCROLLABLE_CLASS: &str = "scrollable";

/// Restriction that goes with fixed mode
pub const FIXED_RESTRICTION: ResizeRestriction = ResizeRestriction::AxisLocked(Axis::Horizontal);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    #[default]
    Fixed,
    Scrollable,
}

/// Owns the parentage of a panel's content and scroll containers
#[derive(Debug)]
pub struct LayoutModeController {
    mode: LayoutMode,
    panel: ElementId,
    content_root: ElementId,
    content_container: ElementId,
    scroll_container: Option<ScrollContainer>,
    /// Size applied to unmeasured axes when entering scrollable mode
    default_size: (f32, f32),
}

impl LayoutModeController {
    /// Take over `content_container` in fixed mode
    pub fn new(
        ctx: &mut WidgetContext,
        panel: ElementId,
        content_root: ElementId,
        content_container: ElementId,
        default_size: (f32, f32),
    ) -> Self {
        let tree = ctx.tree_mut();
        if tree.parent(content_container) != Some(content_root) {
            tree.add_child(content_root, content_container);
        }
        tree.set_resize_restriction(panel, FIXED_RESTRICTION);
        tree.remove_class(panel, SCROLLABLE_CLASS);

        Self {
            mode: LayoutMode::Fixed,
            panel,
            content_root,
            content_container,
            scroll_container: None,
            default_size,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn is_scrollable(&self) -> bool {
        self.mode == LayoutMode::Scrollable
    }

    pub fn content_container(&self) -> ElementId {
        self.content_container
    }

    pub fn content_root(&self) -> ElementId {
        self.content_root
    }

    /// The scroll container, once scrollable mode has been entered
    pub fn scroll_container(&self) -> Option<&ScrollContainer> {
        self.scroll_container.as_ref()
    }

    pub fn default_size(&self) -> (f32, f32) {
        self.default_size
    }

    /// Switch modes; returns `false` if `mode` is already current
    ///
    /// A default size pinned on entering scrollable mode stays in the inline
    /// style after returning to fixed mode. Clear `width`/`height` with
    /// [`ElementTree::update_inline_style`] to let the panel follow its
    /// content again.
    pub fn set_mode(&mut self, ctx: &mut WidgetContext, mode: LayoutMode) -> bool {
        if mode == self.mode {
            return false;
        }
        match mode {
            LayoutMode::Scrollable => self.enter_scrollable(ctx),
            LayoutMode::Fixed => self.enter_fixed(ctx.tree_mut()),
        }
        tracing::debug!(panel = ?self.panel, from = ?self.mode, to = ?mode, "layout mode changed");
        self.mode = mode;
        true
    }

    fn enter_scrollable(&mut self, ctx: &mut WidgetContext) {
        let scroll = match self.scroll_container {
            Some(scroll) => scroll,
            None => {
                let scroll = ScrollContainer::new(ctx, ScrollDirection::Both);
                tracing::debug!(panel = ?self.panel, element = ?scroll.element(), "scroll container created");
                *self.scroll_container.insert(scroll)
            }
        };

        let tree = ctx.tree_mut();
        tree.remove_from_hierarchy(self.content_container);
        tree.add_child(self.content_root, scroll.element());
        tree.add_child(scroll.element(), self.content_container);

        tree.set_resize_restriction(self.panel, ResizeRestriction::Free);
        apply_default_size(tree, self.panel, self.default_size);
        tree.add_class(self.panel, SCROLLABLE_CLASS);
    }

    /// Leaves the inline size alone; see [`Self::set_mode`].
    fn enter_fixed(&mut self, tree: &mut ElementTree) {
        if let Some(scroll) = self.scroll_container {
            tree.set_resize_restriction(self.panel, FIXED_RESTRICTION);
            tree.remove_from_hierarchy(scroll.element());
            tree.remove_from_hierarchy(self.content_container);
            tree.add_child(self.content_root, self.content_container);
        }
        tree.remove_class(self.panel, SCROLLABLE_CLASS);
    }
}

/// Give unmeasured axes of `element` a default size
///
/// Does nothing when both axes are measured. Otherwise both axes are pinned
/// in the inline style (a measured axis keeps its measured value) and the
/// measured bounds are updated to match.
pub fn apply_default_size(tree: &mut ElementTree, element: ElementId, default_size: (f32, f32)) {
    let mut bounds = tree.layout(element);
    if bounds.is_valid() {
        return;
    }
    if !bounds.has_valid_width() {
        bounds.width = default_size.0;
    }
    if !bounds.has_valid_height() {
        bounds.height = default_size.1;
    }

    tree.update_inline_style(element, |style| {
        style.width = Some(bounds.width);
        style.height = Some(bounds.height);
    });
    tree.set_layout(element, bounds);
    tracing::debug!(?element, width = bounds.width, height = bounds.height, "default size applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeboard_layout::{ElementBounds, ElementKind};

    struct Fixture {
        ctx: WidgetContext,
        panel: ElementId,
        content_root: ElementId,
        content: ElementId,
        controller: LayoutModeController,
    }

    fn fixture() -> Fixture {
        let mut ctx = WidgetContext::new();
        let tree = ctx.tree_mut();
        let panel = tree.create(ElementKind::Container);
        let content_root = tree.create(ElementKind::Container);
        let content = tree.create(ElementKind::Container);
        tree.add_child(panel, content_root);
        tree.add_child(content_root, content);
        let controller =
            LayoutModeController::new(&mut ctx, panel, content_root, content, (200.0, 400.0));
        Fixture {
            ctx,
            panel,
            content_root,
            content,
            controller,
        }
    }

    #[test]
    fn test_starts_fixed() {
        let f = fixture();
        assert_eq!(f.controller.mode(), LayoutMode::Fixed);
        assert!(f.controller.scroll_container().is_none());
        assert_eq!(f.ctx.tree().resize_restriction(f.panel), FIXED_RESTRICTION);
        assert!(!f.ctx.tree().has_class(f.panel, SCROLLABLE_CLASS));
    }

    #[test]
    fn test_enter_scrollable_reparents() {
        let mut f = fixture();
        assert!(f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable));

        let scroll = *f.controller.scroll_container().unwrap();
        let tree = f.ctx.tree();
        assert_eq!(tree.parent(scroll.element()), Some(f.content_root));
        assert_eq!(tree.parent(f.content), Some(scroll.element()));
        assert_eq!(tree.resize_restriction(f.panel), ResizeRestriction::Free);
        assert!(tree.has_class(f.panel, SCROLLABLE_CLASS));
    }

    #[test]
    fn test_round_trip_reuses_scroll_container() {
        let mut f = fixture();
        f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable);
        let first = *f.controller.scroll_container().unwrap();

        f.controller.set_mode(&mut f.ctx, LayoutMode::Fixed);
        let tree = f.ctx.tree();
        assert_eq!(tree.parent(f.content), Some(f.content_root));
        assert_eq!(tree.parent(first.element()), None);
        assert!(tree.contains(first.element()));
        assert_eq!(tree.resize_restriction(f.panel), FIXED_RESTRICTION);

        f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable);
        assert_eq!(*f.controller.scroll_container().unwrap(), first);
    }

    #[test]
    fn test_same_mode_is_noop() {
        let mut f = fixture();
        assert!(!f.controller.set_mode(&mut f.ctx, LayoutMode::Fixed));
        assert!(f.controller.scroll_container().is_none());

        f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable);
        f.ctx.tree_mut().remove_class(f.panel, SCROLLABLE_CLASS);
        assert!(!f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable));
        assert!(!f.ctx.tree().has_class(f.panel, SCROLLABLE_CLASS));
    }

    #[test]
    fn test_default_size_only_for_invalid_axes() {
        let mut f = fixture();
        f.ctx
            .tree_mut()
            .set_layout(f.panel, ElementBounds::new(0.0, 0.0, f32::NAN, 350.0));

        f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable);

        let bounds = f.ctx.tree().layout(f.panel);
        assert_eq!((bounds.width, bounds.height), (200.0, 350.0));
        let inline = f.ctx.tree().inline_style(f.panel).unwrap();
        assert_eq!((inline.width, inline.height), (Some(200.0), Some(350.0)));
    }

    #[test]
    fn test_fixed_mode_keeps_pinned_default_size() {
        let mut f = fixture();
        f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable);
        f.controller.set_mode(&mut f.ctx, LayoutMode::Fixed);

        let inline = f.ctx.tree().inline_style(f.panel).unwrap();
        assert_eq!((inline.width, inline.height), (Some(200.0), Some(400.0)));

        f.ctx.tree_mut().update_inline_style(f.panel, |style| {
            style.width = None;
            style.height = None;
        });
        let inline = f.ctx.tree().inline_style(f.panel).unwrap();
        assert_eq!((inline.width, inline.height), (None, None));
    }

    #[test]
    fn test_measured_panel_keeps_its_size() {
        let mut f = fixture();
        f.ctx
            .tree_mut()
            .set_layout(f.panel, ElementBounds::new(0.0, 0.0, 320.0, 90.0));

        f.controller.set_mode(&mut f.ctx, LayoutMode::Scrollable);

        let bounds = f.ctx.tree().layout(f.panel);
        assert_eq!((bounds.width, bounds.height), (320.0, 90.0));
        assert_eq!(f.ctx.tree().inline_style(f.panel).unwrap().width, None);
    }
}
