// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice, border, and label color resolution.
//!
//! Colors are described declaratively ([`ColorSpec`], [`InheritedColor`]) and resolved once
//! per layout pass. Resolution is pure: the same id (or the same arc) always yields the
//! same color within a pass, which keeps arcs and legend swatches consistent.

extern crate alloc;

use alloc::sync::Arc;
use core::fmt;

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::arc::ArcGeometry;
use crate::record::Record;

/// The default categorical palette (`nivo` scheme).
pub const NIVO_SCHEME: [Color; 6] = [
    Color::from_rgb8(0xe8, 0xc1, 0xa0),
    Color::from_rgb8(0xf4, 0x75, 0x60),
    Color::from_rgb8(0xf1, 0xe1, 0x5b),
    Color::from_rgb8(0xe8, 0xa8, 0x38),
    Color::from_rgb8(0x61, 0xcd, 0xbb),
    Color::from_rgb8(0x97, 0xe3, 0xd5),
];

/// Parses a CSS color string (`#e8c1a0`, `rgb(1 2 3)`, `tomato`, ...) into sRGB.
pub fn parse_css_color(s: &str) -> Option<Color> {
    parse_color(s).ok().map(|c| c.to_alpha_color::<Srgb>())
}

/// An ordinal color scale: ids map to palette entries in order of first appearance.
#[derive(Clone, Debug)]
pub struct OrdinalColorScale {
    palette: Arc<[Color]>,
    assigned: HashMap<Arc<str>, usize>,
}

impl OrdinalColorScale {
    /// Creates a scale over `palette`.
    ///
    /// An empty palette resolves everything to black.
    pub fn new(palette: Arc<[Color]>) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
        }
    }

    /// Returns the color for `id`, assigning the next palette slot on first sight.
    pub fn color(&mut self, id: &Arc<str>) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        let next = self.assigned.len();
        let slot = *self.assigned.entry(id.clone()).or_insert(next);
        self.palette[slot % self.palette.len()]
    }
}

/// How slice fill colors are chosen.
#[derive(Clone)]
pub enum ColorSpec {
    /// An ordinal scheme keyed by slice id.
    Scheme(Arc<[Color]>),
    /// The same color for every slice.
    Fixed(Color),
    /// Read a CSS color string from a record field, falling back to the scheme.
    Field {
        /// Field name holding the color string.
        name: Arc<str>,
        /// Scheme used when the field is missing or unparsable.
        fallback: Arc<[Color]>,
    },
    /// Compute the color from the record and its input index.
    Derived(Arc<dyn Fn(&Record, usize) -> Color + Send + Sync>),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Scheme(Arc::from(NIVO_SCHEME.as_slice()))
    }
}

impl ColorSpec {
    /// Convenience for [`ColorSpec::Field`] with the default scheme as fallback.
    pub fn field(name: &str) -> Self {
        Self::Field {
            name: Arc::from(name),
            fallback: Arc::from(NIVO_SCHEME.as_slice()),
        }
    }

    /// Convenience for [`ColorSpec::Derived`].
    pub fn derived(f: impl Fn(&Record, usize) -> Color + Send + Sync + 'static) -> Self {
        Self::Derived(Arc::new(f))
    }

    /// Creates the per-pass resolver.
    pub fn resolver(&self) -> ColorResolver<'_> {
        let scale = match self {
            Self::Scheme(palette) | Self::Field { fallback: palette, .. } => {
                Some(OrdinalColorScale::new(palette.clone()))
            }
            Self::Fixed(_) | Self::Derived(_) => None,
        };
        ColorResolver { spec: self, scale }
    }
}

impl fmt::Debug for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheme(p) => f.debug_tuple("Scheme").field(p).finish(),
            Self::Fixed(c) => f.debug_tuple("Fixed").field(c).finish(),
            Self::Field { name, fallback } => f
                .debug_struct("Field")
                .field("name", name)
                .field("fallback", fallback)
                .finish(),
            Self::Derived(_) => f.debug_tuple("Derived").finish_non_exhaustive(),
        }
    }
}

/// Stateful color resolution for a single normalization pass.
#[derive(Debug)]
pub struct ColorResolver<'a> {
    spec: &'a ColorSpec,
    scale: Option<OrdinalColorScale>,
}

impl ColorResolver<'_> {
    /// Resolves the fill color of the slice built from `record`.
    pub fn resolve(&mut self, id: &Arc<str>, index: usize, record: &Record) -> Color {
        match self.spec {
            ColorSpec::Fixed(c) => *c,
            ColorSpec::Derived(f) => f(record, index),
            ColorSpec::Field { name, .. } => {
                let parsed = record
                    .get(name)
                    .and_then(|v| v.as_str())
                    .and_then(parse_css_color);
                match parsed {
                    Some(c) => c,
                    None => self.scale_color(id),
                }
            }
            ColorSpec::Scheme(_) => self.scale_color(id),
        }
    }

    fn scale_color(&mut self, id: &Arc<str>) -> Color {
        self.scale.as_mut().map_or(Color::BLACK, |s| s.color(id))
    }
}

/// A transform applied to an inherited color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorModifier {
    /// Multiply RGB by `0.7^k`.
    Darker(f64),
    /// Divide RGB by `0.7^k` (clamped to the displayable range).
    Brighter(f64),
    /// Replace the alpha channel.
    Opacity(f64),
}

impl ColorModifier {
    /// Applies the modifier.
    pub fn apply(self, color: Color) -> Color {
        let [r, g, b, a] = color.components;
        match self {
            Self::Darker(k) => scale_rgb(r, g, b, a, 0.7_f64.powf(k)),
            Self::Brighter(k) => scale_rgb(r, g, b, a, 0.7_f64.powf(-k)),
            Self::Opacity(alpha) => {
                #[allow(clippy::cast_possible_truncation, reason = "alpha is clamped to [0, 1]")]
                let alpha = alpha.clamp(0.0, 1.0) as f32;
                Color::new([r, g, b, alpha])
            }
        }
    }
}

fn scale_rgb(r: f32, g: f32, b: f32, a: f32, k: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "channel factors are tiny; the result is clamped below"
    )]
    let k = k as f32;
    let c = |v: f32| (v * k).clamp(0.0, 1.0);
    Color::new([c(r), c(g), c(b), a])
}

/// A color that may be derived from the slice it decorates (borders, label text).
#[derive(Clone)]
pub enum InheritedColor {
    /// A fixed color.
    Fixed(Color),
    /// The theme-provided color for this element.
    Theme,
    /// The slice color with the modifiers applied in order.
    Inherit(SmallVec<[ColorModifier; 2]>),
    /// Compute the color from the arc.
    Custom(Arc<dyn Fn(&ArcGeometry) -> Color + Send + Sync>),
}

impl InheritedColor {
    /// The slice color, unchanged.
    pub fn inherit() -> Self {
        Self::Inherit(SmallVec::new())
    }

    /// The slice color darkened by `k`.
    pub fn darker(k: f64) -> Self {
        Self::Inherit(smallvec::smallvec![ColorModifier::Darker(k)])
    }

    /// The slice color brightened by `k`.
    pub fn brighter(k: f64) -> Self {
        Self::Inherit(smallvec::smallvec![ColorModifier::Brighter(k)])
    }

    /// Convenience for [`InheritedColor::Custom`].
    pub fn custom(f: impl Fn(&ArcGeometry) -> Color + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Resolves the color for `arc`; `theme` is used by [`InheritedColor::Theme`].
    pub fn resolve(&self, arc: &ArcGeometry, theme: Color) -> Color {
        match self {
            Self::Fixed(c) => *c,
            Self::Theme => theme,
            Self::Inherit(modifiers) => modifiers.iter().fold(arc.color, |c, m| m.apply(c)),
            Self::Custom(f) => f(arc),
        }
    }
}

impl fmt::Debug for InheritedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(c) => f.debug_tuple("Fixed").field(c).finish(),
            Self::Theme => f.write_str("Theme"),
            Self::Inherit(m) => f.debug_tuple("Inherit").field(m).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}
