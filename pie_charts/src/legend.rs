// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend geometry.
//!
//! A legend is a strip of fixed-size items (symbol + label) anchored inside a container
//! box. This module only computes where things go; drawing is up to the renderer.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::arc::ArcGeometry;

/// Where the legend box is pinned inside its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendAnchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Top edge, centered.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge, centered.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge, centered.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge, centered.
    Left,
    /// Center of the container.
    Center,
}

/// How items follow each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendDirection {
    /// Side by side.
    Row,
    /// Stacked.
    #[default]
    Column,
}

/// Symbol/label order inside an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendItemDirection {
    /// Symbol first, label to its right.
    #[default]
    LeftToRight,
    /// Label first, symbol at the item's right edge.
    RightToLeft,
}

/// Legend symbol shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolShape {
    /// A filled square.
    #[default]
    Square,
    /// A filled circle inscribed in the symbol box.
    Circle,
}

/// Horizontal alignment of a text run relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// One legend entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendDatum {
    /// Id of the slice the entry stands for.
    pub id: Arc<str>,
    /// Displayed text.
    pub label: Arc<str>,
    /// Symbol color.
    pub color: Color,
}

impl LegendDatum {
    /// One entry per arc, in draw order, labeled with the slice id.
    pub fn from_arcs(arcs: &[ArcGeometry]) -> Vec<Self> {
        arcs.iter()
            .map(|arc| Self {
                id: arc.slice_id.clone(),
                label: arc.slice_id.clone(),
                color: arc.color,
            })
            .collect()
    }
}

/// Legend configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendSpec {
    /// Placement inside the container.
    pub anchor: LegendAnchor,
    /// Item flow.
    pub direction: LegendDirection,
    /// Horizontal offset applied after anchoring.
    pub translate_x: f64,
    /// Vertical offset applied after anchoring.
    pub translate_y: f64,
    /// Width of one item.
    pub item_width: f64,
    /// Height of one item.
    pub item_height: f64,
    /// Gap between consecutive items.
    pub items_spacing: f64,
    /// Side of the symbol box.
    pub symbol_size: f64,
    /// Symbol shape.
    pub symbol_shape: SymbolShape,
    /// Gap between symbol and label.
    pub symbol_spacing: f64,
    /// Symbol/label order.
    pub item_direction: LegendItemDirection,
    /// Label color; `None` uses the theme's legend text color.
    pub item_text_color: Option<Color>,
}

impl Default for LegendSpec {
    fn default() -> Self {
        Self {
            anchor: LegendAnchor::TopLeft,
            direction: LegendDirection::Column,
            translate_x: 0.0,
            translate_y: 0.0,
            item_width: 80.0,
            item_height: 20.0,
            items_spacing: 0.0,
            symbol_size: 16.0,
            symbol_shape: SymbolShape::Square,
            symbol_spacing: 8.0,
            item_direction: LegendItemDirection::LeftToRight,
            item_text_color: None,
        }
    }
}

impl LegendSpec {
    /// Sets the anchor.
    pub fn with_anchor(mut self, anchor: LegendAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the item flow direction.
    pub fn with_direction(mut self, direction: LegendDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the translation applied after anchoring.
    pub fn with_translate(mut self, x: f64, y: f64) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    /// Sets the item size.
    pub fn with_item_size(mut self, width: f64, height: f64) -> Self {
        self.item_width = width.max(0.0);
        self.item_height = height.max(0.0);
        self
    }

    /// Sets the gap between items.
    pub fn with_items_spacing(mut self, spacing: f64) -> Self {
        self.items_spacing = spacing.max(0.0);
        self
    }

    /// Sets the symbol size and shape.
    pub fn with_symbol(mut self, size: f64, shape: SymbolShape) -> Self {
        self.symbol_size = size.max(0.0);
        self.symbol_shape = shape;
        self
    }

    /// Sets the symbol-to-label gap.
    pub fn with_symbol_spacing(mut self, spacing: f64) -> Self {
        self.symbol_spacing = spacing.max(0.0);
        self
    }

    /// Sets the symbol/label order.
    pub fn with_item_direction(mut self, item_direction: LegendItemDirection) -> Self {
        self.item_direction = item_direction;
        self
    }

    /// Sets the label color.
    pub fn with_item_text_color(mut self, color: Color) -> Self {
        self.item_text_color = Some(color);
        self
    }

    /// Size of the box holding `count` items.
    pub fn box_size(&self, count: usize) -> Size {
        if count == 0 {
            return Size::ZERO;
        }
        let n = count as f64;
        let gaps = self.items_spacing * (n - 1.0);
        match self.direction {
            LegendDirection::Row => Size::new(self.item_width * n + gaps, self.item_height),
            LegendDirection::Column => Size::new(self.item_width, self.item_height * n + gaps),
        }
    }

    /// Positions the legend box and its items inside a `width` x `height` container.
    pub fn arrange(&self, data: &[LegendDatum], width: f64, height: f64) -> LegendLayout {
        let size = self.box_size(data.len());
        let free_x = width - size.width;
        let free_y = height - size.height;
        let (x, y) = match self.anchor {
            LegendAnchor::TopLeft => (0.0, 0.0),
            LegendAnchor::Top => (free_x * 0.5, 0.0),
            LegendAnchor::TopRight => (free_x, 0.0),
            LegendAnchor::Right => (free_x, free_y * 0.5),
            LegendAnchor::BottomRight => (free_x, free_y),
            LegendAnchor::Bottom => (free_x * 0.5, free_y),
            LegendAnchor::BottomLeft => (0.0, free_y),
            LegendAnchor::Left => (0.0, free_y * 0.5),
            LegendAnchor::Center => (free_x * 0.5, free_y * 0.5),
        };
        let origin = Point::new(x + self.translate_x, y + self.translate_y);

        let items = data
            .iter()
            .enumerate()
            .map(|(i, datum)| {
                let step = i as f64;
                let item_origin = match self.direction {
                    LegendDirection::Row => Point::new(
                        origin.x + step * (self.item_width + self.items_spacing),
                        origin.y,
                    ),
                    LegendDirection::Column => Point::new(
                        origin.x,
                        origin.y + step * (self.item_height + self.items_spacing),
                    ),
                };
                self.item(item_origin, datum)
            })
            .collect();

        LegendLayout {
            bounds: Rect::from_origin_size(origin, size),
            items,
        }
    }

    fn item(&self, origin: Point, datum: &LegendDatum) -> LegendItemLayout {
        let mid_y = origin.y + self.item_height * 0.5;
        let s = self.symbol_size;
        let (symbol_x, label_x, label_anchor) = match self.item_direction {
            LegendItemDirection::LeftToRight => {
                (origin.x, origin.x + s + self.symbol_spacing, TextAnchor::Start)
            }
            LegendItemDirection::RightToLeft => {
                let symbol_x = origin.x + self.item_width - s;
                (symbol_x, symbol_x - self.symbol_spacing, TextAnchor::End)
            }
        };
        LegendItemLayout {
            symbol: Rect::new(symbol_x, mid_y - s * 0.5, symbol_x + s, mid_y + s * 0.5),
            symbol_shape: self.symbol_shape,
            label_position: Point::new(label_x, mid_y),
            label_anchor,
            label: datum.label.clone(),
            color: datum.color,
        }
    }
}

/// A positioned legend item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItemLayout {
    /// Symbol box.
    pub symbol: Rect,
    /// Symbol shape.
    pub symbol_shape: SymbolShape,
    /// Label anchor point; the label is vertically centered on it.
    pub label_position: Point,
    /// Horizontal alignment of the label.
    pub label_anchor: TextAnchor,
    /// Label text.
    pub label: Arc<str>,
    /// Symbol color.
    pub color: Color,
}

/// Output of [`LegendSpec::arrange`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendLayout {
    /// Legend box.
    pub bounds: Rect,
    /// Items, in data order.
    pub items: Vec<LegendItemLayout>,
}
