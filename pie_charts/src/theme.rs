// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart theme.

use peniko::Color;

/// Text styling for one family of chart text (slice labels, legend labels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextTheme {
    /// Font size in logical pixels.
    pub font_size: f64,
    /// Text fill.
    pub fill: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            fill: Color::from_rgb8(0x33, 0x33, 0x33),
        }
    }
}

/// Colors and text styles shared by every element of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Fill for the whole surface before anything is drawn.
    pub background: Color,
    /// Slice label styling.
    pub labels: TextTheme,
    /// Legend label styling.
    pub legends: TextTheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            labels: TextTheme::default(),
            legends: TextTheme::default(),
        }
    }
}

impl Theme {
    /// Sets the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets the slice label text style.
    pub fn with_labels(mut self, labels: TextTheme) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the legend text style.
    pub fn with_legends(mut self, legends: TextTheme) -> Self {
        self.legends = legends;
        self
    }
}
