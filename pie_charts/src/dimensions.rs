// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outer/inner box computation.
//!
//! The host hands the chart a requested size and a partial margin; the chart draws into
//! the inner box (outer size minus margins). [`DimensionsProvider`] is the seam for hosts
//! that compute this differently (responsive containers, reserved legend space, ...).

/// Resolved margins, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

/// Margins where any side may be left unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartialMargin {
    /// Top margin.
    pub top: Option<f64>,
    /// Right margin.
    pub right: Option<f64>,
    /// Bottom margin.
    pub bottom: Option<f64>,
    /// Left margin.
    pub left: Option<f64>,
}

impl PartialMargin {
    /// The same margin on every side.
    pub fn uniform(m: f64) -> Self {
        Self {
            top: Some(m),
            right: Some(m),
            bottom: Some(m),
            left: Some(m),
        }
    }

    /// Fills unspecified sides from `defaults`.
    pub fn resolve(&self, defaults: Margin) -> Margin {
        Margin {
            top: self.top.unwrap_or(defaults.top),
            right: self.right.unwrap_or(defaults.right),
            bottom: self.bottom.unwrap_or(defaults.bottom),
            left: self.left.unwrap_or(defaults.left),
        }
    }
}

/// Output of a [`DimensionsProvider`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    /// Resolved margins.
    pub margin: Margin,
    /// Width of the content box.
    pub inner_width: f64,
    /// Height of the content box.
    pub inner_height: f64,
    /// Width of the whole surface.
    pub outer_width: f64,
    /// Height of the whole surface.
    pub outer_height: f64,
}

/// Computes chart dimensions from a requested size.
pub trait DimensionsProvider {
    /// Resolves the outer and inner boxes.
    fn dimensions(&self, width: f64, height: f64, margin: PartialMargin) -> Dimensions;
}

/// The default provider: missing margin sides are zero and the inner box never goes
/// negative.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxDimensions {
    /// Margins used for unspecified sides.
    pub defaults: Margin,
}

impl DimensionsProvider for BoxDimensions {
    fn dimensions(&self, width: f64, height: f64, margin: PartialMargin) -> Dimensions {
        let margin = margin.resolve(self.defaults);
        let outer_width = width.max(0.0);
        let outer_height = height.max(0.0);
        Dimensions {
            margin,
            inner_width: (outer_width - margin.left - margin.right).max(0.0),
            inner_height: (outer_height - margin.top - margin.bottom).max(0.0),
            outer_width,
            outer_height,
        }
    }
}
