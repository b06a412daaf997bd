//! Scroll container widget
//!
//! A `ScrollView` element that clips its children and keeps a scroll offset.
//! Wheel events that reach it move the offset; the event keeps bubbling so
//! ancestors decide for themselves whether to react.
//!
//! Offsets are positive when scrolled towards the end (down/right) and are
//! clamped to `[0, content - viewport]` on each axis once both extents are
//! measured.

use nodeboard_core::events::{event_types, EventData};
use nodeboard_core::ElementId;
use nodeboard_layout::{ElementKind, ElementTree, OverflowMode};

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Class carried by every scroll container element
pub const SCROLL_VIEW_CLASS: &str = "scroll-view";

/// Axes a scroll container responds to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
    #[default]
    Both,
}

impl ScrollDirection {
    fn horizontal(self) -> bool {
        matches!(self, ScrollDirection::Horizontal | ScrollDirection::Both)
    }

    fn vertical(self) -> bool {
        matches!(self, ScrollDirection::Vertical | ScrollDirection::Both)
    }
}

/// Scroll container widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollContainer {
    element: ElementId,
    direction: ScrollDirection,
}

impl ScrollContainer {
    /// Create a detached scroll container
    pub fn new(ctx: &mut WidgetContext, direction: ScrollDirection) -> Self {
        let element = ctx.tree_mut().create(ElementKind::ScrollView);
        ctx.tree_mut().add_class(element, SCROLL_VIEW_CLASS);
        ctx.tree_mut().update_inline_style(element, |style| {
            style.overflow = Some(OverflowMode::Scroll);
            style.flex_grow = Some(1.0);
        });

        ctx.listen(element, event_types::WHEEL, move |event, tree| {
            if let EventData::Wheel { delta_x, delta_y } = event.data {
                scroll_element(tree, element, direction, delta_x, delta_y);
            }
        });

        Self { element, direction }
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Current `(x, y)` scroll offset
    pub fn scroll_offset(&self, ctx: &WidgetContext) -> (f32, f32) {
        ctx.tree().scroll_offset(self.element)
    }

    /// Scroll by a delta on the axes this container handles
    pub fn scroll_by(&self, ctx: &mut WidgetContext, dx: f32, dy: f32) -> (f32, f32) {
        scroll_element(ctx.tree_mut(), self.element, self.direction, dx, dy)
    }

    /// Scroll to an absolute offset on the axes this container handles
    pub fn scroll_to(&self, ctx: &mut WidgetContext, x: f32, y: f32) -> (f32, f32) {
        let (cx, cy) = self.scroll_offset(ctx);
        self.scroll_by(ctx, x - cx, y - cy)
    }

    /// Largest reachable offset per axis, `None` while unmeasured
    pub fn max_offset(&self, ctx: &WidgetContext) -> (Option<f32>, Option<f32>) {
        max_offset(ctx.tree(), self.element)
    }
}

impl Widget for ScrollContainer {
    fn element(&self) -> ElementId {
        self.element
    }
}

fn scroll_element(
    tree: &mut ElementTree,
    element: ElementId,
    direction: ScrollDirection,
    dx: f32,
    dy: f32,
) -> (f32, f32) {
    let (x, y) = tree.scroll_offset(element);
    let (max_x, max_y) = max_offset(tree, element);

    let x = if direction.horizontal() {
        clamp_offset(x + dx, max_x)
    } else {
        x
    };
    let y = if direction.vertical() {
        clamp_offset(y + dy, max_y)
    } else {
        y
    };

    tree.set_scroll_offset(element, (x, y));
    tracing::trace!(?element, x, y, "scrolled");
    (x, y)
}

fn clamp_offset(value: f32, max: Option<f32>) -> f32 {
    let value = if value.is_nan() { 0.0 } else { value };
    match max {
        Some(max) => value.min(max).max(0.0),
        None => value.max(0.0),
    }
}

fn max_offset(tree: &ElementTree, element: ElementId) -> (Option<f32>, Option<f32>) {
    let viewport = tree.layout(element);
    let mut content_right: Option<f32> = None;
    let mut content_bottom: Option<f32> = None;

    for &child in tree.children(element) {
        let bounds = tree.layout(child);
        if bounds.has_valid_width() {
            content_right = Some(content_right.map_or(bounds.right(), |r| r.max(bounds.right())));
        }
        if bounds.has_valid_height() {
            content_bottom =
                Some(content_bottom.map_or(bounds.bottom(), |b| b.max(bounds.bottom())));
        }
    }

    let max_x = content_right
        .filter(|_| viewport.has_valid_width())
        .map(|right| (right - viewport.right()).max(0.0));
    let max_y = content_bottom
        .filter(|_| viewport.has_valid_height())
        .map(|bottom| (bottom - viewport.bottom()).max(0.0));
    (max_x, max_y)
}
