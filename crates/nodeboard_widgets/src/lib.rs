//! Nodeboard Widgets
//!
//! The blackboard panel and the small set of interaction widgets it is
//! assembled from.
//!
//! # Example
//!
//! ```rust
//! use nodeboard_core::events::Event;
//! use nodeboard_layout::ElementKind;
//! use nodeboard_widgets::{assets, Blackboard, PanelConfig, WidgetContext};
//!
//! let mut ctx = WidgetContext::new();
//! let canvas = ctx.tree_mut().create(ElementKind::Container);
//!
//! let config = PanelConfig::default().title("Variables");
//! let mut panel = Blackboard::new(&mut ctx, canvas, &config, &assets::builtin_loader()).unwrap();
//! assert_eq!(panel.title(&ctx), "Variables");
//!
//! panel.set_scrollable(&mut ctx, true);
//! let item = ctx.tree_mut().create(ElementKind::Label);
//! panel.add_item(&mut ctx, item);
//!
//! // Wheel events over the panel never reach the canvas
//! let mut wheel = Event::wheel(item, 0.0, 40.0);
//! assert!(!ctx.dispatch(&mut wheel));
//! ```

pub mod assets;
pub mod blackboard;
pub mod button;
pub mod config;
pub mod context;
pub mod dragger;
pub mod error;
pub mod gesture_shield;
pub mod layout_mode;
pub mod resizer;
pub mod scroll;
pub mod widget;

pub use blackboard::{AddItemCallback, Blackboard, EditTextCallback, MoveItemCallback};
pub use button::{Button, ButtonState};
pub use config::PanelConfig;
pub use context::WidgetContext;
pub use dragger::Dragger;
pub use error::{BlackboardError, Result};
pub use layout_mode::{LayoutMode, LayoutModeController};
pub use resizer::Resizer;
pub use scroll::{ScrollContainer, ScrollDirection};
pub use widget::Widget;
