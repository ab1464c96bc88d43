// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart options.

use std::f64::consts::TAU;

use pie_charts::{
    Accessor, ArcLayoutSpec, ColorSpec, InheritedColor, InvalidDataPolicy, LabelAccessor,
    LegendSpec, NormalizeSpec, PartialMargin, SliceLabelSpec, Theme, ValueFormat,
};

/// All options of a pie chart.
///
/// Numeric setters clamp out-of-range input instead of rejecting it.
#[derive(Clone, Debug)]
pub struct PieConfig {
    /// Outer width in logical pixels.
    pub width: f64,
    /// Outer height in logical pixels.
    pub height: f64,
    /// Requested margins; missing sides fall back to the dimensions provider.
    pub margin: PartialMargin,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f64,
    /// Sort slices by descending value.
    pub sort_by_value: bool,
    /// Start of the sweep (radians, clockwise from twelve o'clock).
    pub start_angle: f64,
    /// End of the sweep.
    pub end_angle: f64,
    /// Gap between slices.
    pub pad_angle: f64,
    /// Inner radius as a fraction of the outer radius.
    pub inner_radius_ratio: f64,
    /// Corner rounding.
    pub corner_radius: f64,
    /// Shrink the pie so labels and borders fit.
    pub fit: bool,
    /// Arc border width.
    pub border_width: f64,
    /// Arc border color.
    pub border_color: InheritedColor,
    /// Draw inline slice labels.
    pub enable_slice_labels: bool,
    /// Slice label text.
    pub slice_label: LabelAccessor,
    /// Slices narrower than this get no label.
    pub slice_labels_skip_angle: f64,
    /// Radial label offset from the ring's middle.
    pub slice_labels_radius_offset: f64,
    /// Slice label color.
    pub slice_labels_text_color: InheritedColor,
    /// Reads the slice id.
    pub id: Accessor,
    /// Reads the slice value.
    pub value: Accessor,
    /// Formats slice values.
    pub value_format: ValueFormat,
    /// Slice colors.
    pub colors: ColorSpec,
    /// Handling of malformed records.
    pub invalid: InvalidDataPolicy,
    /// Theme.
    pub theme: Theme,
    /// Legends, drawn in order.
    pub legends: Vec<LegendSpec>,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            margin: PartialMargin::default(),
            pixel_ratio: 1.0,
            sort_by_value: false,
            start_angle: 0.0,
            end_angle: TAU,
            pad_angle: 0.0,
            inner_radius_ratio: 0.0,
            corner_radius: 0.0,
            fit: false,
            border_width: 0.0,
            border_color: InheritedColor::darker(1.0),
            enable_slice_labels: true,
            slice_label: LabelAccessor::FormattedValue,
            slice_labels_skip_angle: 0.0,
            slice_labels_radius_offset: 0.0,
            slice_labels_text_color: InheritedColor::Theme,
            id: Accessor::field("id"),
            value: Accessor::field("value"),
            value_format: ValueFormat::Default,
            colors: ColorSpec::default(),
            invalid: InvalidDataPolicy::Skip,
            theme: Theme::default(),
            legends: Vec::new(),
        }
    }
}

impl PieConfig {
    /// Creates a config for a `width` x `height` chart with default options.
    pub fn new(width: f64, height: f64) -> Self {
        Self::default().with_size(width, height)
    }

    /// Sets the outer size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self
    }

    /// Sets the margins.
    #[must_use]
    pub fn with_margin(mut self, margin: PartialMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the pixel ratio. Non-positive or non-finite ratios fall back to `1`.
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        self
    }

    /// Sets whether slices are sorted by value.
    #[must_use]
    pub fn with_sort_by_value(mut self, sort_by_value: bool) -> Self {
        self.sort_by_value = sort_by_value;
        self
    }

    /// Sets the sweep.
    #[must_use]
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    /// Sets the gap between slices.
    #[must_use]
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle.max(0.0);
        self
    }

    /// Sets the inner radius ratio, clamped to `[0, 1)` at layout time.
    #[must_use]
    pub fn with_inner_radius_ratio(mut self, ratio: f64) -> Self {
        self.inner_radius_ratio = ratio.max(0.0);
        self
    }

    /// Sets the corner radius.
    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius.max(0.0);
        self
    }

    /// Enables fit sizing.
    #[must_use]
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the border width and color.
    #[must_use]
    pub fn with_border(mut self, width: f64, color: InheritedColor) -> Self {
        self.border_width = width.max(0.0);
        self.border_color = color;
        self
    }

    /// Enables or disables slice labels.
    #[must_use]
    pub fn with_slice_labels(mut self, enable: bool) -> Self {
        self.enable_slice_labels = enable;
        self
    }

    /// Sets the slice label text.
    #[must_use]
    pub fn with_slice_label(mut self, label: LabelAccessor) -> Self {
        self.slice_label = label;
        self
    }

    /// Sets the label skip angle.
    #[must_use]
    pub fn with_slice_labels_skip_angle(mut self, angle: f64) -> Self {
        self.slice_labels_skip_angle = angle.max(0.0);
        self
    }

    /// Sets the label radius offset.
    #[must_use]
    pub fn with_slice_labels_radius_offset(mut self, offset: f64) -> Self {
        self.slice_labels_radius_offset = offset;
        self
    }

    /// Sets the label color.
    #[must_use]
    pub fn with_slice_labels_text_color(mut self, color: InheritedColor) -> Self {
        self.slice_labels_text_color = color;
        self
    }

    /// Sets the id and value accessors.
    #[must_use]
    pub fn with_accessors(mut self, id: Accessor, value: Accessor) -> Self {
        self.id = id;
        self.value = value;
        self
    }

    /// Sets the value format.
    #[must_use]
    pub fn with_value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }

    /// Sets the slice colors.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorSpec) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the invalid-data policy.
    #[must_use]
    pub fn with_invalid(mut self, invalid: InvalidDataPolicy) -> Self {
        self.invalid = invalid;
        self
    }

    /// Sets the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Adds a legend.
    #[must_use]
    pub fn with_legend(mut self, legend: LegendSpec) -> Self {
        self.legends.push(legend);
        self
    }

    /// Normalization options derived from this config.
    pub fn normalize_spec(&self) -> NormalizeSpec {
        NormalizeSpec::default()
            .with_id(self.id.clone())
            .with_value(self.value.clone())
            .with_value_format(self.value_format.clone())
            .with_colors(self.colors.clone())
            .with_invalid(self.invalid)
    }

    /// Layout options derived from this config.
    pub fn layout_spec(&self) -> ArcLayoutSpec {
        ArcLayoutSpec::default()
            .with_sort_by_value(self.sort_by_value)
            .with_angles(self.start_angle, self.end_angle)
            .with_pad_angle(self.pad_angle)
            .with_inner_radius_ratio(self.inner_radius_ratio)
            .with_corner_radius(self.corner_radius)
            .with_fit(self.fit)
    }

    /// Label options derived from this config.
    pub fn label_spec(&self) -> SliceLabelSpec {
        SliceLabelSpec::default()
            .with_label(self.slice_label.clone())
            .with_skip_angle(self.slice_labels_skip_angle)
            .with_radius_offset(self.slice_labels_radius_offset)
            .with_text_color(self.slice_labels_text_color.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_numbers_are_clamped() {
        let config = PieConfig::new(-5.0, 100.0)
            .with_pixel_ratio(0.0)
            .with_pad_angle(-1.0)
            .with_border(-2.0, InheritedColor::inherit());
        assert_eq!(config.width, 0.0);
        assert_eq!(config.pixel_ratio, 1.0);
        assert_eq!(config.pad_angle, 0.0);
        assert_eq!(config.border_width, 0.0);
        assert_eq!(PieConfig::default().with_pixel_ratio(f64::NAN).pixel_ratio, 1.0);
        assert_eq!(PieConfig::default().with_pixel_ratio(2.0).pixel_ratio, 2.0);
    }

    #[test]
    fn derived_specs_carry_options() {
        let config = PieConfig::default()
            .with_angles(1.0, -1.0)
            .with_inner_radius_ratio(0.4)
            .with_slice_labels_skip_angle(0.2)
            .with_invalid(InvalidDataPolicy::Abort);
        let layout = config.layout_spec();
        assert_eq!((layout.start_angle, layout.end_angle), (1.0, -1.0));
        assert_eq!(layout.inner_radius_ratio, 0.4);
        assert_eq!(config.label_spec().skip_angle, 0.2);
        assert_eq!(config.normalize_spec().invalid, InvalidDataPolicy::Abort);
    }
}
