//! Event dispatch system
//!
//! Events travel along a propagation path (target first, then each ancestor).
//! Listeners are registered per `(element, event type)`; on each element they
//! run in registration order. Any listener may stop propagation, after which
//! no further listener runs, on the same element or on any later one.

use rustc_hash::FxHashMap;

use crate::ElementId;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Pointer button pressed
    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// A drag payload is being moved over the target
    pub const DRAG_OVER: EventType = 8;
    /// Mouse wheel or trackpad scroll
    pub const WHEEL: EventType = 30;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Element the event was dispatched at
    pub target: ElementId,
    /// Element whose listeners are currently running (set by the dispatcher)
    pub current_target: Option<ElementId>,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        /// 0 = primary, 1 = secondary, 2 = middle
        button: u8,
        pressure: f32,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
    },
    None,
}

impl Event {
    /// Create an event aimed at `target`
    pub fn new(event_type: EventType, target: ElementId, data: EventData) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Pointer event with the primary button
    pub fn pointer(event_type: EventType, target: ElementId, x: f32, y: f32) -> Self {
        Self::new(
            event_type,
            target,
            EventData::Pointer {
                x,
                y,
                button: 0,
                pressure: 1.0,
            },
        )
    }

    pub fn wheel(target: ElementId, delta_x: f32, delta_y: f32) -> Self {
        Self::new(event_types::WHEEL, target, EventData::Wheel { delta_x, delta_y })
    }

    pub fn drag_over(target: ElementId, x: f32, y: f32) -> Self {
        Self::pointer(event_types::DRAG_OVER, target, x, y)
    }

    /// Set the timestamp (milliseconds)
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Pointer position, if this is a pointer event
    pub fn position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// Pressed button, if this is a pointer event
    pub fn button(&self) -> Option<u8> {
        match self.data {
            EventData::Pointer { button, .. } => Some(button),
            _ => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener function type
///
/// Listeners get the event and a caller-chosen context (usually the element
/// tree) so they can react without holding references into it.
pub type EventHandler<C> = Box<dyn Fn(&mut Event, &mut C) + Send + Sync>;

/// Dispatches events to registered listeners along a propagation path
pub struct EventDispatcher<C> {
    handlers: FxHashMap<(ElementId, EventType), Vec<EventHandler<C>>>,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a listener for an element and event type
    pub fn register<F>(&mut self, element: ElementId, event_type: EventType, handler: F)
    where
        F: Fn(&mut Event, &mut C) + Send + Sync + 'static,
    {
        self.handlers
            .entry((element, event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// Number of listeners registered for an element and event type
    pub fn listener_count(&self, element: ElementId, event_type: EventType) -> usize {
        self.handlers
            .get(&(element, event_type))
            .map_or(0, Vec::len)
    }

    /// Drop every listener registered on `element`
    pub fn remove_element(&mut self, element: ElementId) {
        self.handlers.retain(|(id, _), _| *id != element);
    }

    /// Dispatch an event along `path` (target first, root last)
    ///
    /// Returns `true` if the event reached the end of the path without
    /// being stopped.
    pub fn dispatch(&self, path: &[ElementId], event: &mut Event, ctx: &mut C) -> bool {
        for &element in path {
            if event.propagation_stopped {
                break;
            }
            event.current_target = Some(element);

            let Some(handlers) = self.handlers.get(&(element, event.event_type)) else {
                continue;
            };
            for handler in handlers {
                if event.propagation_stopped {
                    break;
                }
                handler(event, ctx);
            }
        }

        if event.propagation_stopped {
            tracing::trace!(
                event_type = event.event_type,
                stopped_at = ?event.current_target,
                "event propagation stopped"
            );
        }
        !event.propagation_stopped
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ids(n: usize) -> Vec<ElementId> {
        let mut map: SlotMap<ElementId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_event_types_are_distinct() {
        let types = [
            event_types::POINTER_DOWN,
            event_types::POINTER_UP,
            event_types::POINTER_MOVE,
            event_types::POINTER_ENTER,
            event_types::POINTER_LEAVE,
            event_types::DRAG_OVER,
            event_types::WHEEL,
        ];
        for (i, a) in types.iter().enumerate() {
            assert!(!types[i + 1..].contains(a), "event type {a} is reused");
        }
    }

    #[test]
    fn test_bubbles_target_to_root() {
        let path = ids(3);
        let mut dispatcher: EventDispatcher<Vec<ElementId>> = EventDispatcher::new();
        for &id in &path {
            dispatcher.register(id, event_types::POINTER_DOWN, move |_, seen| seen.push(id));
        }

        let mut seen = Vec::new();
        let mut event = Event::pointer(event_types::POINTER_DOWN, path[0], 1.0, 2.0);
        assert!(dispatcher.dispatch(&path, &mut event, &mut seen));
        assert_eq!(seen, path);
        assert_eq!(event.current_target, Some(path[2]));
    }

    #[test]
    fn test_stop_skips_ancestors() {
        let path = ids(2);
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher: EventDispatcher<()> = EventDispatcher::new();

        dispatcher.register(path[0], event_types::WHEEL, |e, _| e.stop_propagation());
        let calls_clone = calls.clone();
        dispatcher.register(path[1], event_types::WHEEL, move |_, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut event = Event::wheel(path[0], 0.0, 3.0);
        assert!(!dispatcher.dispatch(&path, &mut event, &mut ()));
        assert!(event.is_propagation_stopped());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_skips_later_listeners_on_same_element() {
        let path = ids(1);
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        dispatcher.register(path[0], event_types::DRAG_OVER, |_, n| *n += 1);
        dispatcher.register(path[0], event_types::DRAG_OVER, |e, n| {
            *n += 10;
            e.stop_propagation();
        });
        dispatcher.register(path[0], event_types::DRAG_OVER, |_, n| *n += 100);

        let mut count = 0;
        let mut event = Event::drag_over(path[0], 0.0, 0.0);
        dispatcher.dispatch(&path, &mut event, &mut count);
        assert_eq!(count, 11);
    }

    #[test]
    fn test_listeners_filtered_by_type() {
        let path = ids(1);
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        dispatcher.register(path[0], event_types::POINTER_UP, |_, n| *n += 1);

        let mut count = 0;
        let mut event = Event::pointer(event_types::POINTER_DOWN, path[0], 0.0, 0.0);
        dispatcher.dispatch(&path, &mut event, &mut count);
        assert_eq!(count, 0);
        assert_eq!(dispatcher.listener_count(path[0], event_types::POINTER_UP), 1);

        dispatcher.remove_element(path[0]);
        assert_eq!(dispatcher.listener_count(path[0], event_types::POINTER_UP), 0);
    }

    #[test]
    fn test_event_accessors() {
        let path = ids(1);
        let event = Event::pointer(event_types::POINTER_MOVE, path[0], 4.0, 5.0).at(42);
        assert_eq!(event.position(), Some((4.0, 5.0)));
        assert_eq!(event.button(), Some(0));
        assert_eq!(event.timestamp, 42);
        assert_eq!(Event::wheel(path[0], 1.0, 1.0).position(), None);
    }
}
