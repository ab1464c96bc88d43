// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie and donut chart building blocks.
//!
//! The crate is a pure `(data, options) -> geometry` pipeline:
//! - **Normalize** raw records into ordered [`SliceDescriptor`]s (id, value, label, color).
//! - **Lay out** slices into absolute [`ArcGeometry`] records around a shared [`Center`].
//! - **Plan** inline [`SliceLabel`]s for slices wide enough to carry one.
//! - **Arrange** legends against the content box.
//!
//! Nothing here draws pixels. [`arc_path`] turns one arc into a center-relative `BezPath`;
//! painting it (and the rest of the frame) is left to a renderer.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod arc;
mod arc_path;
mod color;
mod dimensions;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod label;
mod legend;
mod log;
mod measure;
mod normalize;
mod record;
mod theme;

pub use arc::{
    ArcGeometry, ArcLayoutSpec, Center, FitDecorations, FitLabels, PieLayout, layout,
};
pub use arc_path::{ArcPathError, arc_path};
pub use color::{
    ColorModifier, ColorResolver, ColorSpec, InheritedColor, NIVO_SCHEME, OrdinalColorScale,
    parse_css_color,
};
pub use dimensions::{BoxDimensions, Dimensions, DimensionsProvider, Margin, PartialMargin};
pub use format::ValueFormat;
pub use label::{LabelAccessor, SliceLabel, SliceLabelSpec, plan_labels};
pub use legend::{
    LegendAnchor, LegendDatum, LegendDirection, LegendItemDirection, LegendItemLayout,
    LegendLayout, LegendSpec, SymbolShape, TextAnchor,
};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use normalize::{DataError, InvalidDataPolicy, NormalizeSpec, SliceDescriptor, normalize};
pub use record::{Accessor, Record, Value};
pub use theme::{TextTheme, Theme};
