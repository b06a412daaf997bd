//! Widget context
//!
//! Owns the element tree and the event dispatcher. Listeners receive the
//! tree mutably so they can update widget state without holding references
//! into the context.

use nodeboard_core::events::{event_types, Event, EventDispatcher, EventType};
use nodeboard_core::ElementId;
use nodeboard_layout::{AvailableSpace, ElementTree, Size};

/// Shared state for every widget of one UI surface
pub struct WidgetContext {
    tree: ElementTree,
    events: EventDispatcher<ElementTree>,
}

impl WidgetContext {
    pub fn new() -> Self {
        Self {
            tree: ElementTree::new(),
            events: EventDispatcher::new(),
        }
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    /// Register a listener on `element`
    pub fn listen<F>(&mut self, element: ElementId, event_type: EventType, handler: F)
    where
        F: Fn(&mut Event, &mut ElementTree) + Send + Sync + 'static,
    {
        self.events.register(element, event_type, handler);
    }

    pub fn listener_count(&self, element: ElementId, event_type: EventType) -> usize {
        self.events.listener_count(element, event_type)
    }

    /// Dispatch an event at its target and bubble it towards the root
    ///
    /// Pointer move/up events go to the element holding pointer capture, if
    /// any. Returns `true` if the event bubbled past the root without being
    /// stopped; a stale target delivers nothing and returns `false`.
    pub fn dispatch(&mut self, event: &mut Event) -> bool {
        if matches!(
            event.event_type,
            event_types::POINTER_MOVE | event_types::POINTER_UP
        ) {
            if let Some(captured) = self.tree.pointer_capture() {
                event.target = captured;
            }
        }

        let path = self.tree.path_to_root(event.target);
        if path.is_empty() {
            tracing::trace!(target_element = ?event.target, "dispatch to stale element dropped");
            return false;
        }
        self.events.dispatch(&path, event, &mut self.tree)
    }

    /// Destroy an element subtree together with its listeners
    pub fn remove_element(&mut self, id: ElementId) {
        for removed in self.tree.remove(id) {
            self.events.remove_element(removed);
        }
    }

    /// Run a layout pass with a definite viewport
    pub fn compute_layout(&mut self, root: ElementId, width: f32, height: f32) {
        self.tree.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::Definite(height),
            },
        );
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}
