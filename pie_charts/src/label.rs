// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline slice labels.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::arc::{ArcGeometry, Center};
use crate::color::InheritedColor;
use crate::format::ValueFormat;
use crate::normalize::SliceDescriptor;

/// Which text a slice label shows.
#[derive(Clone, Default)]
pub enum LabelAccessor {
    /// The slice's formatted value.
    #[default]
    FormattedValue,
    /// The slice id.
    Id,
    /// The raw value, default-formatted.
    Value,
    /// A field of the source record (empty if missing).
    Field(Arc<str>),
    /// Caller-supplied text.
    Custom(Arc<dyn Fn(&SliceDescriptor) -> String + Send + Sync>),
}

impl LabelAccessor {
    /// Convenience for [`LabelAccessor::Field`].
    pub fn field(name: &str) -> Self {
        Self::Field(Arc::from(name))
    }

    /// Convenience for [`LabelAccessor::Custom`].
    pub fn custom(f: impl Fn(&SliceDescriptor) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// The label text for `slice`.
    pub fn text(&self, slice: &SliceDescriptor) -> String {
        match self {
            Self::FormattedValue => slice.formatted_value.clone(),
            Self::Id => slice.id.to_string(),
            Self::Value => ValueFormat::Default.format(slice.value),
            Self::Field(name) => slice
                .data
                .get(name)
                .map(ToString::to_string)
                .unwrap_or_default(),
            Self::Custom(f) => f(slice),
        }
    }
}

impl fmt::Debug for LabelAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormattedValue => f.write_str("FormattedValue"),
            Self::Id => f.write_str("Id"),
            Self::Value => f.write_str("Value"),
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

/// Label planning options.
#[derive(Clone, Debug)]
pub struct SliceLabelSpec {
    /// Label text.
    pub label: LabelAccessor,
    /// Slices whose angular span is below this get no label.
    pub skip_angle: f64,
    /// Added to the ring's mid radius; positive values push labels outward.
    pub radius_offset: f64,
    /// Text color.
    pub text_color: InheritedColor,
}

impl Default for SliceLabelSpec {
    fn default() -> Self {
        Self {
            label: LabelAccessor::FormattedValue,
            skip_angle: 0.0,
            radius_offset: 0.0,
            text_color: InheritedColor::Theme,
        }
    }
}

impl SliceLabelSpec {
    /// Sets the label text accessor.
    pub fn with_label(mut self, label: LabelAccessor) -> Self {
        self.label = label;
        self
    }

    /// Sets the skip angle.
    pub fn with_skip_angle(mut self, skip_angle: f64) -> Self {
        self.skip_angle = skip_angle.max(0.0);
        self
    }

    /// Sets the radial offset.
    pub fn with_radius_offset(mut self, radius_offset: f64) -> Self {
        self.radius_offset = radius_offset;
        self
    }

    /// Sets the text color.
    pub fn with_text_color(mut self, text_color: InheritedColor) -> Self {
        self.text_color = text_color;
        self
    }
}

/// A positioned label, relative to the pie center.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceLabel {
    /// Id of the labeled slice.
    pub slice_id: Arc<str>,
    /// Position of the slice in the layout input.
    pub slice_index: usize,
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Text.
    pub text: String,
    /// Text color.
    pub color: Color,
}

/// Places one label per sufficiently wide arc, in arc order.
///
/// `slices` is the layout input; arcs refer into it by `slice_index`. `theme_color` is
/// the color used by [`InheritedColor::Theme`].
pub fn plan_labels(
    arcs: &[ArcGeometry],
    slices: &[SliceDescriptor],
    center: &Center,
    spec: &SliceLabelSpec,
    theme_color: Color,
) -> Vec<SliceLabel> {
    let radius = center.inner_radius
        + (center.radius - center.inner_radius) * 0.5
        + spec.radius_offset;

    arcs.iter()
        .filter(|arc| arc.span().abs() >= spec.skip_angle)
        .filter_map(|arc| {
            let slice = slices.get(arc.slice_index)?;
            let angle = arc.mid_angle();
            Some(SliceLabel {
                slice_id: arc.slice_id.clone(),
                slice_index: arc.slice_index,
                x: radius * angle.sin(),
                y: -radius * angle.cos(),
                text: spec.label.text(slice),
                color: spec.text_color.resolve(arc, theme_color),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{PI, TAU};

    use peniko::color::palette::css;

    use super::*;
    use crate::arc::{ArcLayoutSpec, FitDecorations, PieLayout, layout};
    use crate::normalize::{NormalizeSpec, normalize};
    use crate::record::Record;

    fn pie(values: &[(&str, f64)]) -> (Vec<SliceDescriptor>, PieLayout) {
        let records: Vec<_> = values
            .iter()
            .map(|&(id, v)| Record::id_value(id, v).with("note", "n"))
            .collect();
        let slices = normalize(&records, &NormalizeSpec::default()).unwrap();
        let out = layout(
            &slices,
            100.0,
            100.0,
            &ArcLayoutSpec::default().with_inner_radius_ratio(0.5),
            &FitDecorations::default(),
        );
        (slices, out)
    }

    #[test]
    fn labels_sit_mid_ring_at_mid_angle() {
        let (slices, out) = pie(&[("a", 1.0), ("b", 1.0)]);
        let labels = plan_labels(
            &out.arcs,
            &slices,
            &out.center,
            &SliceLabelSpec::default(),
            css::BLACK,
        );
        assert_eq!(labels.len(), 2);
        // Ring is 25..50, so the mid radius is 37.5; "a" spans 0..π and points right.
        assert!((labels[0].x - 37.5).abs() < 1e-9);
        assert!(labels[0].y.abs() < 1e-9);
        assert!((labels[1].x + 37.5).abs() < 1e-9);
        assert_eq!(labels[0].text, "1");
        assert_eq!(labels[0].color, css::BLACK);
    }

    #[test]
    fn narrow_slices_are_skipped() {
        let (slices, out) = pie(&[("big", 99.0), ("tiny", 1.0)]);
        let spec = SliceLabelSpec::default().with_skip_angle(TAU * 0.05);
        let labels = plan_labels(&out.arcs, &slices, &out.center, &spec, css::BLACK);
        let ids: Vec<_> = labels.iter().map(|l| &*l.slice_id).collect();
        assert_eq!(ids, ["big"]);
    }

    #[test]
    fn offset_and_accessors() {
        let (slices, out) = pie(&[("a", 3.0), ("b", 1.0)]);
        let spec = SliceLabelSpec::default()
            .with_radius_offset(12.5)
            .with_label(LabelAccessor::Id)
            .with_text_color(InheritedColor::Fixed(css::RED));
        let labels = plan_labels(&out.arcs, &slices, &out.center, &spec, css::BLACK);
        // "a" spans 0..3π/2, mid angle 3π/4.
        let angle = 0.75 * PI;
        assert!((labels[0].x - 50.0 * angle.sin()).abs() < 1e-9);
        assert!((labels[0].y + 50.0 * angle.cos()).abs() < 1e-9);
        assert_eq!(labels[0].text, "a");
        assert_eq!(labels[0].color, css::RED);

        assert_eq!(LabelAccessor::field("note").text(&slices[1]), "n");
        assert_eq!(LabelAccessor::field("missing").text(&slices[1]), "");
        let custom = LabelAccessor::custom(|s| alloc::format!("{}={}", s.id, s.value));
        assert_eq!(custom.text(&slices[0]), "a=3");
    }

    #[test]
    fn inherited_text_color_follows_slice() {
        let (slices, out) = pie(&[("a", 1.0)]);
        let spec = SliceLabelSpec::default().with_text_color(InheritedColor::inherit());
        let labels = plan_labels(&out.arcs, &slices, &out.center, &spec, css::BLACK);
        assert_eq!(labels[0].color, slices[0].color);
        // A single full-circle slice labels at its mid angle (π, straight down).
        assert!((labels[0].y - 37.5).abs() < 1e-9);
        assert!(labels[0].x.abs() < 1e-9);
    }
}
