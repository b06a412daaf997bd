//! Resize handle
//!
//! A small handle element in the owner's bottom-right corner. Dragging it
//! changes the owner's width and, when the owner's [`ResizeRestriction`]
//! allows it, its height.

use std::sync::{Arc, Mutex};

use nodeboard_core::events::event_types;
use nodeboard_core::ElementId;
use nodeboard_layout::{Axis, Capabilities, ElementKind, ElementTree, ResizeRestriction};

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Name and class of the handle element
pub const RESIZER_CLASS: &str = "resizer";

#[derive(Clone, Copy, Debug)]
struct ResizeSession {
    pointer_start: (f32, f32),
    start_size: (f32, f32),
}

/// Resize handle attached to an owner element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resizer {
    handle: ElementId,
    owner: ElementId,
}

impl Resizer {
    /// Append a resize handle to `owner`
    ///
    /// Sizes produced by the handle never go below `min_size`.
    pub fn attach(ctx: &mut WidgetContext, owner: ElementId, min_size: (f32, f32)) -> Self {
        let handle = ctx
            .tree_mut()
            .create_named(ElementKind::Container, RESIZER_CLASS);
        ctx.tree_mut().add_class(handle, RESIZER_CLASS);
        ctx.tree_mut().add_child(owner, handle);

        let session: Arc<Mutex<Option<ResizeSession>>> = Arc::new(Mutex::new(None));

        let down = session.clone();
        ctx.listen(handle, event_types::POINTER_DOWN, move |event, tree| {
            if !tree.capabilities(owner).contains(Capabilities::RESIZABLE) {
                return;
            }
            let Some(pointer_start) = event.position() else {
                return;
            };
            let bounds = tree.layout(owner);
            *down.lock().unwrap() = Some(ResizeSession {
                pointer_start,
                start_size: (bounds.width, bounds.height),
            });
            tree.capture_pointer(handle);
            event.stop_propagation();
        });

        let motion = session.clone();
        ctx.listen(handle, event_types::POINTER_MOVE, move |event, tree| {
            let Some(resize) = *motion.lock().unwrap() else {
                return;
            };
            let Some((x, y)) = event.position() else {
                return;
            };
            let delta = (x - resize.pointer_start.0, y - resize.pointer_start.1);
            resize_owner(tree, owner, resize.start_size, delta, min_size);
            event.stop_propagation();
        });

        ctx.listen(handle, event_types::POINTER_UP, move |event, tree| {
            if session.lock().unwrap().take().is_some() {
                tree.release_pointer(handle);
                event.stop_propagation();
            }
        });

        Self { handle, owner }
    }

    pub fn owner(&self) -> ElementId {
        self.owner
    }
}

impl Widget for Resizer {
    fn element(&self) -> ElementId {
        self.handle
    }
}

fn resize_owner(
    tree: &mut ElementTree,
    owner: ElementId,
    start_size: (f32, f32),
    delta: (f32, f32),
    min_size: (f32, f32),
) {
    let restriction: ResizeRestriction = tree.resize_restriction(owner);
    let width = (restriction.allows(Axis::Horizontal) && !start_size.0.is_nan())
        .then(|| (start_size.0 + delta.0).max(min_size.0));
    let height = (restriction.allows(Axis::Vertical) && !start_size.1.is_nan())
        .then(|| (start_size.1 + delta.1).max(min_size.1));

    tree.update_inline_style(owner, |style| {
        if width.is_some() {
            style.width = width;
        }
        if height.is_some() {
            style.height = height;
        }
    });

    let mut bounds = tree.layout(owner);
    bounds.width = width.unwrap_or(bounds.width);
    bounds.height = height.unwrap_or(bounds.height);
    tree.set_layout(owner, bounds);
    tracing::trace!(element = ?owner, ?width, ?height, "resized");
}
