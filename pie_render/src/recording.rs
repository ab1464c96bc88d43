// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A surface that records calls instead of drawing.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Color;
use pie_charts::TextAnchor;

use crate::surface::Surface;
use crate::RenderError;

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// [`Surface::resize`].
    Resize {
        /// Device width.
        width: u32,
        /// Device height.
        height: u32,
    },
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::translate`].
    Translate(f64, f64),
    /// [`Surface::scale`].
    Scale(f64),
    /// [`Surface::clear`].
    Clear(Color),
    /// [`Surface::fill_path`], summarized by the path's bounds.
    Fill {
        /// Path bounding box in user space.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// [`Surface::stroke_path`].
    Stroke {
        /// Path bounding box in user space.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f64,
    },
    /// [`Surface::fill_text`].
    Text {
        /// The text.
        text: String,
        /// Anchor point in user space.
        at: Point,
        /// Font size.
        font_size: f64,
        /// Text color.
        color: Color,
        /// Horizontal alignment.
        anchor: TextAnchor,
    },
}

/// A [`Surface`] that keeps a log of every call, for inspecting draw order.
///
/// `resize` fails for a zero-sized request, like a real raster surface.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<Command>,
    depth: usize,
}

impl RecordingSurface {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls so far, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Forgets every recorded call.
    pub fn clear_log(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable { width, height });
        }
        self.depth = 0;
        self.commands.push(Command::Resize { width, height });
        Ok(())
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(Command::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(Command::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(Command::Translate(dx, dy));
    }

    fn scale(&mut self, factor: f64) {
        self.commands.push(Command::Scale(factor));
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(Command::Clear(color));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(Command::Fill {
            bounds: path.bounding_box(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.commands.push(Command::Stroke {
            bounds: path.bounding_box(),
            color,
            width,
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font_size: f64,
        color: Color,
        anchor: TextAnchor,
    ) {
        self.commands.push(Command::Text {
            text: text.to_owned(),
            at,
            font_size,
            color,
            anchor,
        });
    }
}
