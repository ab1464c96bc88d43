// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paints one frame: background, arcs, slice labels, legends.

use kurbo::Point;
use pie_charts::{
    ArcGeometry, Center, Dimensions, InheritedColor, LegendDatum, LegendSpec, SliceLabel,
    TextAnchor, Theme, arc_path,
};

use crate::legend::LegendRenderer;
use crate::surface::Surface;
use crate::RenderError;

/// Curve tolerance for arc outlines, in device pixels.
const DEVICE_TOLERANCE: f64 = 0.1;

/// Everything the renderer needs besides geometry.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Outer and inner boxes.
    pub dimensions: Dimensions,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f64,
    /// Background and text styles.
    pub theme: &'a Theme,
    /// Arc border width; `0` disables borders.
    pub border_width: f64,
    /// Arc border color.
    pub border_color: &'a InheritedColor,
    /// Whether slice labels are drawn.
    pub enable_slice_labels: bool,
    /// Legends to draw against the content box.
    pub legends: &'a [LegendSpec],
    /// Legend painter.
    pub legend_renderer: &'a dyn LegendRenderer,
}

/// Renders a full frame onto `surface`.
///
/// The surface is resized first, which discards whatever was drawn before, so calling
/// this repeatedly with the same inputs yields identical pixels. Arcs whose outline cannot
/// be built are skipped; the rest of the frame is still drawn.
pub fn render(
    surface: &mut dyn Surface,
    arcs: &[ArcGeometry],
    labels: &[SliceLabel],
    center: &Center,
    ctx: &RenderContext<'_>,
) -> Result<(), RenderError> {
    let dims = &ctx.dimensions;
    let ratio = ctx.pixel_ratio;
    let (width, height) = device_size(dims.outer_width, dims.outer_height, ratio);
    surface.resize(width, height)?;
    surface.scale(ratio);
    surface.clear(ctx.theme.background);

    surface.save();
    surface.translate(dims.margin.left, dims.margin.top);

    surface.save();
    surface.translate(center.x, center.y);

    let tolerance = DEVICE_TOLERANCE / ratio;
    for arc in arcs {
        let path = match arc_path(arc, tolerance) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(slice = %arc.slice_id, %err, "skipping arc");
                continue;
            }
        };
        surface.fill_path(&path, arc.color);
        if ctx.border_width > 0.0 {
            let color = ctx.border_color.resolve(arc, arc.color);
            surface.stroke_path(&path, color, ctx.border_width);
        }
    }

    if ctx.enable_slice_labels {
        let font_size = ctx.theme.labels.font_size;
        for label in labels {
            surface.fill_text(
                &label.text,
                Point::new(label.x, label.y),
                font_size,
                label.color,
                TextAnchor::Middle,
            );
        }
    }

    surface.restore();

    if !ctx.legends.is_empty() {
        let data = LegendDatum::from_arcs(arcs);
        for spec in ctx.legends {
            ctx.legend_renderer.render(
                surface,
                spec,
                &data,
                dims.inner_width,
                dims.inner_height,
                ctx.theme,
            );
        }
    }

    surface.restore();
    tracing::debug!(
        arcs = arcs.len(),
        labels = labels.len(),
        width,
        height,
        "frame rendered"
    );
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "saturating float-to-int conversion of a rounded, clamped size"
)]
fn device_size(width: f64, height: f64, ratio: f64) -> (u32, u32) {
    let px = |v: f64| (v * ratio).round().max(0.0) as u32;
    (px(width), px(height))
}
