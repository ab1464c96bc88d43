// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font loading and glyph metrics.

use std::fmt;
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use pie_charts::TextMeasurer;

use crate::RenderError;

/// Parses a TrueType/OpenType font for text drawing and measurement.
pub fn load_font(bytes: &[u8]) -> Result<Arc<Font>, RenderError> {
    Font::from_bytes(bytes, FontSettings::default())
        .map(Arc::new)
        .map_err(|e| RenderError::Font(e.to_string()))
}

/// Line width using glyph advances; kerning is not applied.
pub(crate) fn advance_width(font: &Font, text: &str, px: f32) -> f32 {
    text.chars().map(|c| font.metrics(c, px).advance_width).sum()
}

/// `(ascent, descent)` at `px`, with descent negative.
pub(crate) fn vertical_metrics(font: &Font, px: f32) -> (f32, f32) {
    font.horizontal_line_metrics(px)
        .map_or((px * 0.8, -px * 0.2), |m| (m.ascent, m.descent))
}

/// A [`TextMeasurer`] backed by real glyph advances.
#[derive(Clone)]
pub struct FontdueMeasurer {
    font: Arc<Font>,
}

impl FontdueMeasurer {
    /// Creates a measurer for `font`.
    pub fn new(font: Arc<Font>) -> Self {
        Self { font }
    }
}

impl fmt::Debug for FontdueMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontdueMeasurer").finish_non_exhaustive()
    }
}

impl TextMeasurer for FontdueMeasurer {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "font sizes are small positive numbers"
    )]
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let px = font_size as f32;
        let width = advance_width(&self.font, text, px);
        let (ascent, descent) = vertical_metrics(&self.font, px);
        (f64::from(width), f64::from(ascent - descent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_not_a_font() {
        let err = load_font(b"definitely not a font").unwrap_err();
        assert!(matches!(err, RenderError::Font(_)), "{err}");
    }
}
