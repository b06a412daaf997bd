//! Gesture shield
//!
//! Keeps canvas-level manipulators (pan, zoom, marquee selection, drop
//! targets) from seeing gestures that started over an overlay element.
//! The shield stops bubbling at the element it is installed on; listeners
//! between the target and that element still run.

use nodeboard_core::events::{event_types, EventType};
use nodeboard_core::ElementId;

use crate::context::WidgetContext;

/// Event kinds that never bubble past a shielded element
pub const SHIELDED_EVENTS: [EventType; 3] = [
    event_types::DRAG_OVER,
    event_types::WHEEL,
    event_types::POINTER_DOWN,
];

/// Stop [`SHIELDED_EVENTS`] from bubbling past `element`
///
/// Register other listeners on `element` first if they must see these
/// events; listeners run in registration order.
pub fn install(ctx: &mut WidgetContext, element: ElementId) {
    for event_type in SHIELDED_EVENTS {
        ctx.listen(element, event_type, |event, _| {
            event.stop_propagation();
        });
    }
    tracing::debug!(?element, "gesture shield installed");
}

pub fn is_shielded(event_type: EventType) -> bool {
    SHIELDED_EVENTS.contains(&event_type)
}
