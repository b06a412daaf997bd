//! Button widget with FSM-driven interactions
//!
//! The button provides:
//! - Interaction states: idle, hovered, pressed, disabled
//! - Click detection from the pressed → hovered transition on pointer up
//! - A programmatic activation path for keyboard and accessibility hosts

use std::sync::{Arc, Mutex};

use nodeboard_core::events::{event_types, Event};
use nodeboard_core::{ElementId, StateMachine};
use nodeboard_layout::{ElementKind, ElementTree};

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Class set on the button element while it is disabled
pub const DISABLED_CLASS: &str = "disabled";

/// Button interaction states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
    Disabled,
}

type ClickCallback = Box<dyn FnMut() + Send>;

struct ButtonShared {
    fsm: StateMachine<ButtonState>,
    on_click: Option<ClickCallback>,
    /// Whether the button was clicked (cleared after reading)
    clicked: bool,
    activations: u64,
}

impl ButtonShared {
    fn activate(&mut self) {
        self.clicked = true;
        self.activations += 1;
        if let Some(ref mut callback) = self.on_click {
            callback();
        }
    }
}

/// Button widget
pub struct Button {
    element: ElementId,
    shared: Arc<Mutex<ButtonShared>>,
}

impl Button {
    /// Create a detached button element with a label
    pub fn new(ctx: &mut WidgetContext, label: impl Into<String>) -> Self {
        let element = ctx.tree_mut().create(ElementKind::Button);
        ctx.tree_mut().set_text(element, label);
        Self::attach(ctx, element)
    }

    /// Turn an existing element into a button
    pub fn attach(ctx: &mut WidgetContext, element: ElementId) -> Self {
        let shared = Arc::new(Mutex::new(ButtonShared {
            fsm: Self::create_fsm(),
            on_click: None,
            clicked: false,
            activations: 0,
        }));

        for event_type in [event_types::POINTER_ENTER, event_types::POINTER_LEAVE] {
            let shared = shared.clone();
            ctx.listen(element, event_type, move |event, _| {
                shared.lock().unwrap().fsm.send(event.event_type);
            });
        }

        let down = shared.clone();
        ctx.listen(element, event_types::POINTER_DOWN, move |event, tree| {
            let mut state = down.lock().unwrap();
            if state.fsm.send(event_types::POINTER_DOWN).is_some() {
                tree.capture_pointer(element);
                event.stop_propagation();
            }
        });

        let up = shared.clone();
        ctx.listen(element, event_types::POINTER_UP, move |event, tree| {
            let mut state = up.lock().unwrap();
            if !state.fsm.is_in(ButtonState::Pressed) {
                return;
            }
            tree.release_pointer(element);
            event.stop_propagation();

            if !Self::released_inside(tree, element, event) {
                state.fsm.reset(ButtonState::Idle);
                return;
            }
            // Detect click (transition from PRESSED to HOVERED on pointer up)
            if let Some((ButtonState::Pressed, ButtonState::Hovered)) =
                state.fsm.send(event_types::POINTER_UP)
            {
                state.activate();
            }
        });

        Self { element, shared }
    }

    fn create_fsm() -> StateMachine<ButtonState> {
        use ButtonState::*;

        StateMachine::builder(Idle)
            .on(Idle, event_types::POINTER_ENTER, Hovered)
            .on(Hovered, event_types::POINTER_LEAVE, Idle)
            .on(Idle, event_types::POINTER_DOWN, Pressed)
            .on(Hovered, event_types::POINTER_DOWN, Pressed)
            .on(Pressed, event_types::POINTER_UP, Hovered)
            .on(Pressed, event_types::POINTER_LEAVE, Idle)
            .build()
    }

    /// A release without a position, or over an unmeasured button, counts as inside
    fn released_inside(tree: &ElementTree, element: ElementId, event: &Event) -> bool {
        let bounds = tree.layout(element);
        match event.position() {
            Some((x, y)) if bounds.is_valid() => bounds.contains(x, y),
            _ => true,
        }
    }

    /// Set the click callback
    pub fn set_on_click<F: FnMut() + Send + 'static>(&self, callback: F) {
        self.shared.lock().unwrap().on_click = Some(Box::new(callback));
    }

    /// Activate as if clicked; returns `false` while disabled
    pub fn activate(&self) -> bool {
        let mut state = self.shared.lock().unwrap();
        if state.fsm.is_in(ButtonState::Disabled) {
            return false;
        }
        state.activate();
        true
    }

    /// Check if the button was clicked (and clear the flag)
    pub fn take_clicked(&self) -> bool {
        std::mem::take(&mut self.shared.lock().unwrap().clicked)
    }

    /// Number of activations so far
    pub fn activations(&self) -> u64 {
        self.shared.lock().unwrap().activations
    }

    pub fn state(&self) -> ButtonState {
        self.shared.lock().unwrap().fsm.current_state()
    }

    pub fn is_disabled(&self) -> bool {
        self.state() == ButtonState::Disabled
    }

    pub fn set_disabled(&self, ctx: &mut WidgetContext, disabled: bool) {
        let mut state = self.shared.lock().unwrap();
        if disabled {
            state.fsm.reset(ButtonState::Disabled);
            ctx.tree_mut().add_class(self.element, DISABLED_CLASS);
            ctx.tree_mut().release_pointer(self.element);
        } else if state.fsm.is_in(ButtonState::Disabled) {
            state.fsm.reset(ButtonState::Idle);
            ctx.tree_mut().remove_class(self.element, DISABLED_CLASS);
        }
    }
}

impl Widget for Button {
    fn element(&self) -> ElementId {
        self.element
    }
}
