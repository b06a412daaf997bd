//! Style rules
//!
//! A [`StyleRule`] is a sparse set of layout properties. Stylesheet rules and
//! an element's inline rule are merged (later set fields win) and the result
//! is lowered to a taffy [`Style`].

use serde::{Deserialize, Serialize};
use taffy::geometry::{Point, Rect, Size};
use taffy::style::{
    Dimension, Display, FlexDirection, LengthPercentage, LengthPercentageAuto, Overflow,
    Position, Style,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Flex,
    Block,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    Relative,
    Absolute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowMode {
    Visible,
    Hidden,
    Scroll,
}

impl From<DisplayMode> for Display {
    fn from(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Flex => Display::Flex,
            DisplayMode::Block => Display::Block,
            DisplayMode::None => Display::None,
        }
    }
}

impl From<PositionMode> for Position {
    fn from(mode: PositionMode) -> Self {
        match mode {
            PositionMode::Relative => Position::Relative,
            PositionMode::Absolute => Position::Absolute,
        }
    }
}

impl From<Direction> for FlexDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Row => FlexDirection::Row,
            Direction::Column => FlexDirection::Column,
            Direction::RowReverse => FlexDirection::RowReverse,
            Direction::ColumnReverse => FlexDirection::ColumnReverse,
        }
    }
}

impl From<OverflowMode> for Overflow {
    fn from(mode: OverflowMode) -> Self {
        match mode {
            OverflowMode::Visible => Overflow::Visible,
            OverflowMode::Hidden => Overflow::Hidden,
            OverflowMode::Scroll => Overflow::Scroll,
        }
    }
}

/// Sparse layout properties, as written in stylesheets or set inline
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleRule {
    pub display: Option<DisplayMode>,
    pub position: Option<PositionMode>,
    pub flex_direction: Option<Direction>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub padding: Option<f32>,
    pub gap: Option<f32>,
    pub overflow: Option<OverflowMode>,
}

macro_rules! merge_fields {
    ($dst:expr, $src:expr, $($field:ident),+ $(,)?) => {
        $(
            if $src.$field.is_some() {
                $dst.$field = $src.$field;
            }
        )+
    };
}

impl StyleRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absolute(mut self) -> Self {
        self.position = Some(PositionMode::Absolute);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn flex_grow(mut self, grow: f32) -> Self {
        self.flex_grow = Some(grow);
        self
    }

    /// Overlay every property set in `other` on top of `self`
    pub fn merge(&mut self, other: &StyleRule) {
        merge_fields!(
            self, other, display, position, flex_direction, flex_grow, flex_shrink, width,
            height, min_width, min_height, max_width, max_height, left, top, right, bottom,
            padding, gap, overflow,
        );
    }

    /// Lower to a taffy style; unset properties keep taffy's defaults
    pub fn to_taffy(&self) -> Style {
        let mut style = Style::default();

        if let Some(display) = self.display {
            style.display = display.into();
        }
        if let Some(position) = self.position {
            style.position = position.into();
        }
        if let Some(direction) = self.flex_direction {
            style.flex_direction = direction.into();
        }
        if let Some(grow) = self.flex_grow {
            style.flex_grow = grow;
        }
        if let Some(shrink) = self.flex_shrink {
            style.flex_shrink = shrink;
        }

        style.size = Size {
            width: length_or_auto(self.width),
            height: length_or_auto(self.height),
        };
        style.min_size = Size {
            width: length_or_auto(self.min_width),
            height: length_or_auto(self.min_height),
        };
        style.max_size = Size {
            width: length_or_auto(self.max_width),
            height: length_or_auto(self.max_height),
        };

        if let Some(left) = self.left {
            style.inset.left = LengthPercentageAuto::Length(left);
        }
        if let Some(top) = self.top {
            style.inset.top = LengthPercentageAuto::Length(top);
        }
        if let Some(right) = self.right {
            style.inset.right = LengthPercentageAuto::Length(right);
        }
        if let Some(bottom) = self.bottom {
            style.inset.bottom = LengthPercentageAuto::Length(bottom);
        }
        if let Some(padding) = self.padding {
            let p = LengthPercentage::Length(padding);
            style.padding = Rect {
                left: p,
                right: p,
                top: p,
                bottom: p,
            };
        }
        if let Some(gap) = self.gap {
            let g = LengthPercentage::Length(gap);
            style.gap = Size {
                width: g,
                height: g,
            };
        }
        if let Some(overflow) = self.overflow {
            let o: Overflow = overflow.into();
            style.overflow = Point { x: o, y: o };
        }

        style
    }
}

fn length_or_auto(value: Option<f32>) -> Dimension {
    match value {
        Some(v) if !v.is_nan() => Dimension::Length(v),
        _ => Dimension::Auto,
    }
}
