// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend drawing.

use std::fmt;

use kurbo::{Circle, Shape};
use pie_charts::{LegendDatum, LegendSpec, SymbolShape, Theme};

use crate::surface::Surface;

/// Draws one legend onto a surface.
///
/// The surface is positioned at the content box origin; `width` and `height` are the
/// content box size.
pub trait LegendRenderer: fmt::Debug {
    /// Renders `data` as laid out by `spec`.
    fn render(
        &self,
        surface: &mut dyn Surface,
        spec: &LegendSpec,
        data: &[LegendDatum],
        width: f64,
        height: f64,
        theme: &Theme,
    );
}

/// The default legend: a filled symbol and a label per entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwatchLegend;

impl LegendRenderer for SwatchLegend {
    fn render(
        &self,
        surface: &mut dyn Surface,
        spec: &LegendSpec,
        data: &[LegendDatum],
        width: f64,
        height: f64,
        theme: &Theme,
    ) {
        let text_color = spec.item_text_color.unwrap_or(theme.legends.fill);
        for item in spec.arrange(data, width, height).items {
            let symbol = match item.symbol_shape {
                SymbolShape::Square => item.symbol.to_path(0.1),
                SymbolShape::Circle => Circle::new(
                    item.symbol.center(),
                    item.symbol.width().min(item.symbol.height()) * 0.5,
                )
                .to_path(0.1),
            };
            surface.fill_path(&symbol, item.color);
            surface.fill_text(
                &item.label,
                item.label_position,
                theme.legends.font_size,
                text_color,
                item.label_anchor,
            );
        }
    }
}
