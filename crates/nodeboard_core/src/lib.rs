//! Nodeboard Core
//!
//! Foundational primitives shared by the layout and widget crates:
//!
//! - **Element identity**: [`ElementId`], the arena key of every element in a tree
//! - **Event dispatch**: ordered listeners along a propagation path, with a
//!   "stopped" flag checked before every listener
//! - **State machines**: flat FSMs for widget interaction states
//!
//! # Example
//!
//! ```rust
//! use nodeboard_core::events::{event_types, Event, EventData, EventDispatcher};
//! use nodeboard_core::ElementId;
//! use slotmap::SlotMap;
//!
//! let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
//! let canvas = ids.insert(());
//! let panel = ids.insert(());
//!
//! let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
//! dispatcher.register(panel, event_types::WHEEL, |event, _| event.stop_propagation());
//! dispatcher.register(canvas, event_types::WHEEL, |_, zoom| *zoom += 1);
//!
//! let mut zoom = 0;
//! let mut wheel = Event::new(event_types::WHEEL, panel, EventData::Wheel { delta_x: 0.0, delta_y: 1.0 });
//! let delivered = dispatcher.dispatch(&[panel, canvas], &mut wheel, &mut zoom);
//!
//! assert!(!delivered);
//! assert_eq!(zoom, 0);
//! ```

pub mod events;
pub mod fsm;

pub use events::{Event, EventData, EventDispatcher, EventType};
pub use fsm::{StateMachine, Transition};

slotmap::new_key_type! {
    /// Stable identifier of an element inside an element tree
    pub struct ElementId;
}
