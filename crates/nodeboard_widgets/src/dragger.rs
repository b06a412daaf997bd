//! Drag-to-move manipulator
//!
//! Moves a `MOVABLE` element by the pointer delta. The element is placed
//! with inline `left`/`top` relative to its parent, and the measured bounds
//! of the element and its descendants are shifted at once so the new
//! position is visible (and hit-testable) before the next layout pass.

use std::sync::{Arc, Mutex};

use nodeboard_core::events::event_types;
use nodeboard_core::ElementId;
use nodeboard_layout::{Capabilities, ElementBounds, ElementTree};

use crate::context::WidgetContext;

#[derive(Clone, Copy, Debug)]
struct DragSession {
    pointer_start: (f32, f32),
    /// Position relative to the parent when the drag began
    origin: (f32, f32),
}

/// Drag-to-move behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dragger {
    /// Keep the element inside its parent's measured bounds
    pub clamp_to_parent_edges: bool,
}

impl Default for Dragger {
    fn default() -> Self {
        Self {
            clamp_to_parent_edges: true,
        }
    }
}

impl Dragger {
    pub fn new(clamp_to_parent_edges: bool) -> Self {
        Self {
            clamp_to_parent_edges,
        }
    }

    /// Start listening for drags on `target`
    ///
    /// A drag begins on a primary-button pointer-down that reaches `target`
    /// unstopped; register this before anything on `target` that stops
    /// pointer-down.
    pub fn attach(self, ctx: &mut WidgetContext, target: ElementId) {
        let session: Arc<Mutex<Option<DragSession>>> = Arc::new(Mutex::new(None));

        let down = session.clone();
        ctx.listen(target, event_types::POINTER_DOWN, move |event, tree| {
            if !tree.capabilities(target).contains(Capabilities::MOVABLE)
                || event.button() != Some(0)
            {
                return;
            }
            let Some(pointer_start) = event.position() else {
                return;
            };
            *down.lock().unwrap() = Some(DragSession {
                pointer_start,
                origin: relative_position(tree, target),
            });
            tree.capture_pointer(target);
            tracing::trace!(element = ?target, "drag started");
        });

        let motion = session.clone();
        ctx.listen(target, event_types::POINTER_MOVE, move |event, tree| {
            let Some(drag) = *motion.lock().unwrap() else {
                return;
            };
            let Some((x, y)) = event.position() else {
                return;
            };
            let left = drag.origin.0 + x - drag.pointer_start.0;
            let top = drag.origin.1 + y - drag.pointer_start.1;
            self.move_to(tree, target, left, top);
            event.stop_propagation();
        });

        ctx.listen(target, event_types::POINTER_UP, move |event, tree| {
            if session.lock().unwrap().take().is_some() {
                tree.release_pointer(target);
                event.stop_propagation();
                tracing::trace!(element = ?target, "drag ended");
            }
        });
    }

    fn move_to(&self, tree: &mut ElementTree, target: ElementId, left: f32, top: f32) {
        let parent = tree.parent(target).map(|p| tree.layout(p));
        let bounds = tree.layout(target);

        let (left, top) = match parent {
            Some(parent) if self.clamp_to_parent_edges => (
                clamp_axis(left, bounds.width, parent.width),
                clamp_axis(top, bounds.height, parent.height),
            ),
            _ => (left, top),
        };

        tree.update_inline_style(target, |style| {
            style.left = Some(left);
            style.top = Some(top);
        });
        let origin = parent
            .filter(ElementBounds::is_valid)
            .map_or((0.0, 0.0), |p| (p.x, p.y));
        let moved = ElementBounds {
            x: origin.0 + left,
            y: origin.1 + top,
            ..bounds
        };
        tree.set_layout(target, moved);

        let (dx, dy) = (moved.x - bounds.x, moved.y - bounds.y);
        if dx.is_nan() || dy.is_nan() || (dx == 0.0 && dy == 0.0) {
            return;
        }
        for id in tree.descendants(target).into_iter().skip(1) {
            let mut child = tree.layout(id);
            if child.x.is_nan() || child.y.is_nan() {
                continue;
            }
            child.x += dx;
            child.y += dy;
            tree.set_layout(id, child);
        }
    }
}

/// Clamp a position so `[pos, pos + size]` stays inside `[0, extent]`
///
/// Unmeasured sizes only clamp at the leading edge.
fn clamp_axis(pos: f32, size: f32, extent: f32) -> f32 {
    if extent.is_nan() {
        return pos;
    }
    let size = if size.is_nan() { 0.0 } else { size };
    pos.min(extent - size).max(0.0)
}

fn relative_position(tree: &ElementTree, target: ElementId) -> (f32, f32) {
    let bounds = tree.layout(target);
    let parent = tree
        .parent(target)
        .map(|p| tree.layout(p))
        .filter(ElementBounds::is_valid);

    if bounds.is_valid() {
        let origin = parent.map_or((0.0, 0.0), |p| (p.x, p.y));
        return (bounds.x - origin.0, bounds.y - origin.1);
    }
    let inline = tree.inline_style(target);
    (
        inline.and_then(|s| s.left).unwrap_or(0.0),
        inline.and_then(|s| s.top).unwrap_or(0.0),
    )
}
