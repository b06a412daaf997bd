//! Element types for the retained element tree
//!
//! Geometry ([`ElementBounds`]), element kinds, and the graph-element
//! metadata that generic manipulators (drag, resize) read from an element.

use serde::{Deserialize, Serialize};
use taffy::Layout;

/// Measured or assigned bounds of an element
///
/// Width/height are NaN until the element has been measured by a layout
/// pass or assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBounds {
    /// X position, in tree coordinates
    pub x: f32,
    /// Y position, in tree coordinates
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementBounds {
    /// Unmeasured bounds
    pub const INVALID: Self = Self {
        x: 0.0,
        y: 0.0,
        width: f32::NAN,
        height: f32::NAN,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create bounds from a Taffy Layout with parent offset
    pub fn from_layout(layout: &Layout, parent_offset: (f32, f32)) -> Self {
        Self {
            x: parent_offset.0 + layout.location.x,
            y: parent_offset.1 + layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        }
    }

    pub fn has_valid_width(&self) -> bool {
        !self.width.is_nan()
    }

    pub fn has_valid_height(&self) -> bool {
        !self.height.is_nan()
    }

    /// Both dimensions are measured
    pub fn is_valid(&self) -> bool {
        self.has_valid_width() && self.has_valid_height()
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether a point lies inside the bounds (NaN bounds contain nothing)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl Default for ElementBounds {
    fn default() -> Self {
        Self::INVALID
    }
}

/// What an element is, as far as templates and widgets are concerned
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    #[default]
    Container,
    Label,
    Button,
    ScrollView,
}

/// Behaviors an element advertises to generic manipulators
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    bits: u8,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities { bits: 0 };
    /// Can be dragged around by a dragger
    pub const MOVABLE: Capabilities = Capabilities { bits: 0b01 };
    /// Can be resized through a resize handle
    pub const RESIZABLE: Capabilities = Capabilities { bits: 0b10 };

    pub const fn union(self, other: Capabilities) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub const fn contains(&self, other: Capabilities) -> bool {
        self.bits & other.bits == other.bits
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Capabilities) {
        *self = self.union(rhs);
    }
}

/// Layout axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which axes a resize handle may change
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeRestriction {
    /// Both width and height
    #[default]
    Free,
    /// Only the given axis; the other one follows the content
    AxisLocked(Axis),
}

impl ResizeRestriction {
    /// Whether a resize handle may change `axis`
    pub fn allows(&self, axis: Axis) -> bool {
        match self {
            ResizeRestriction::Free => true,
            ResizeRestriction::AxisLocked(locked) => *locked == axis,
        }
    }
}
