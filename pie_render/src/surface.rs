// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface abstraction.

use kurbo::{BezPath, Point};
use peniko::Color;
use pie_charts::TextAnchor;

use crate::RenderError;

/// A 2D raster target with a canvas-like state model.
///
/// Coordinates passed to drawing calls are in the current user space, which starts as
/// device pixels after [`Surface::resize`] and is changed by [`Surface::translate`] and
/// [`Surface::scale`]. [`Surface::save`] and [`Surface::restore`] push and pop that
/// transform.
pub trait Surface {
    /// Reallocates the surface at `width` x `height` device pixels.
    ///
    /// Resets the transform to identity and empties the save stack.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops the last saved transform. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Appends a translation to the current transform.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Appends a uniform scale to the current transform.
    fn scale(&mut self, factor: f64);

    /// Overwrites every pixel with `color`, ignoring the transform.
    fn clear(&mut self, color: Color);

    /// Fills `path` using the nonzero rule.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Strokes `path` with a line of `width` user units.
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draws one line of text, horizontally aligned on `at` per `anchor` and vertically
    /// centered on it.
    fn fill_text(&mut self, text: &str, at: Point, font_size: f64, color: Color, anchor: TextAnchor);
}
