//! Nodeboard Layout Engine
//!
//! Retained element tree with Flexbox layout powered by Taffy, class-based
//! stylesheets, and declarative TOML templates.

pub mod element;
pub mod style;
pub mod stylesheet;
pub mod template;
pub mod tree;

pub use element::{Axis, Capabilities, ElementBounds, ElementKind, ResizeRestriction};
pub use nodeboard_core::ElementId;
pub use style::{Direction, DisplayMode, OverflowMode, PositionMode, StyleRule};
pub use stylesheet::StyleSheet;
pub use taffy::geometry::Size;
pub use taffy::style::AvailableSpace;
pub use template::{
    DirectoryLoader, MemoryLoader, Template, TemplateError, TemplateLoader, TemplateNode,
};
pub use tree::{ElementPath, ElementTree};
