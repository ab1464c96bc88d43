// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label-aware layout.
//!
//! The `fit` sizing mode needs label extents before the final radius is known, and legend
//! layout needs label widths. Shaping stays downstream; layout only depends on this trait.

/// A minimal text measurement interface.
pub trait TextMeasurer {
    /// Returns `(width, height)` of a single line of `text` in layout units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        (**self).measure(text, font_size)
    }
}

/// A tiny heuristic text measurer.
///
/// It assumes an average glyph width of ~0.6em and a line height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_counts_chars_not_bytes() {
        let m = HeuristicTextMeasurer;
        assert_eq!(m.measure("12.5", 10.0), (24.0, 10.0));
        assert_eq!(m.measure("é", 10.0), (6.0, 10.0));
        assert_eq!(m.measure("", 11.0), (0.0, 11.0));
    }
}
