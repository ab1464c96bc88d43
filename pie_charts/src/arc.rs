// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc layout: slices + box -> per-slice angles and radii.
//!
//! Angles are radians measured clockwise from twelve o'clock, so `0` points up and `π/2`
//! points right. Every arc's angles are absolute; no arc depends on its neighbor, so any
//! single slice can be re-drawn from its own record.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::f64::consts::TAU;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::log;
use crate::normalize::SliceDescriptor;

/// Layout options for [`layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcLayoutSpec {
    /// Order slices by descending value (stable for ties).
    pub sort_by_value: bool,
    /// Angle at which the first slice starts.
    pub start_angle: f64,
    /// Angle at which the last slice ends. May be less than `start_angle` to sweep
    /// counter-clockwise.
    pub end_angle: f64,
    /// Gap between consecutive slices.
    pub pad_angle: f64,
    /// Inner radius as a fraction of the outer radius, in `[0, 1)`.
    pub inner_radius_ratio: f64,
    /// Requested corner rounding; clamped to half the ring width.
    pub corner_radius: f64,
    /// Shrink the radius so outward decorations (labels, borders) stay inside the box.
    pub fit: bool,
}

impl Default for ArcLayoutSpec {
    fn default() -> Self {
        Self {
            sort_by_value: false,
            start_angle: 0.0,
            end_angle: TAU,
            pad_angle: 0.0,
            inner_radius_ratio: 0.0,
            corner_radius: 0.0,
            fit: false,
        }
    }
}

impl ArcLayoutSpec {
    /// Sets whether slices are sorted by value.
    pub fn with_sort_by_value(mut self, sort_by_value: bool) -> Self {
        self.sort_by_value = sort_by_value;
        self
    }

    /// Sets the start and end angles.
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    /// Sets the pad angle.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle.max(0.0);
        self
    }

    /// Sets the inner radius ratio.
    pub fn with_inner_radius_ratio(mut self, ratio: f64) -> Self {
        self.inner_radius_ratio = ratio;
        self
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius.max(0.0);
        self
    }

    /// Enables or disables fit sizing.
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }
}

/// Label extents used by fit sizing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitLabels {
    /// Radial offset added to the ring's mid radius.
    pub radius_offset: f64,
    /// Slices narrower than this carry no label.
    pub skip_angle: f64,
    /// Measured `(width, height)` of each slice's label, indexed like the input slices.
    pub sizes: Vec<(f64, f64)>,
}

/// Decorations that extend past the outer radius.
///
/// Only consulted when [`ArcLayoutSpec::fit`] is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitDecorations {
    /// Border stroke width; half of it lies outside the arc.
    pub border_width: f64,
    /// Slice labels, if they are drawn.
    pub labels: Option<FitLabels>,
}

/// Geometry of one slice.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcGeometry {
    /// Id of the slice this arc draws.
    pub slice_id: Arc<str>,
    /// Position of the slice in the layout input.
    pub slice_index: usize,
    /// Slice value.
    pub value: f64,
    /// Start angle (radians).
    pub start_angle: f64,
    /// End angle (radians). Less than `start_angle` for counter-clockwise sweeps.
    pub end_angle: f64,
    /// Inner radius.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Gap to the neighboring slices. The gap lies outside `[start_angle, end_angle]`.
    pub pad_angle: f64,
    /// Corner rounding radius.
    pub corner_radius: f64,
    /// Fill color.
    pub color: Color,
}

impl ArcGeometry {
    /// Signed angular span.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway between start and end.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }
}

/// Shared center of all arcs in a pass, relative to the content box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Center {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Outer radius (after fit sizing).
    pub radius: f64,
    /// Inner radius.
    pub inner_radius: f64,
}

/// Output of [`layout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieLayout {
    /// One arc per slice, in draw order.
    pub arcs: Vec<ArcGeometry>,
    /// Center and radii.
    pub center: Center,
}

impl PieLayout {
    /// Returns `true` if nothing is to be drawn (no slices, or a non-positive total).
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

/// Lays out `slices` inside a `width` x `height` box.
///
/// A dataset whose positive values sum to zero produces no arcs; that is the defined
/// result, not an error.
pub fn layout(
    slices: &[SliceDescriptor],
    width: f64,
    height: f64,
    spec: &ArcLayoutSpec,
    decorations: &FitDecorations,
) -> PieLayout {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let ratio = inner_ratio(spec.inner_radius_ratio);
    let base_radius = width.min(height) * 0.5;

    let mut order: Vec<usize> = (0..slices.len()).collect();
    if spec.sort_by_value {
        // `sort_by` is stable, so ties keep their input order.
        order.sort_by(|&a, &b| slices[b].value.total_cmp(&slices[a].value));
    }

    let angles = slice_angles(slices, &order, spec);
    let radius = if spec.fit && !angles.is_empty() {
        fit_radius(base_radius, ratio, &angles, width, height, decorations)
    } else {
        base_radius
    };
    let inner_radius = radius * ratio;
    let corner_radius = spec
        .corner_radius
        .max(0.0)
        .min((radius - inner_radius) * 0.5);
    let pad_angle = pad_for(spec, angles.len());

    let arcs = angles
        .into_iter()
        .map(|(i, start_angle, end_angle)| {
            let slice = &slices[i];
            ArcGeometry {
                slice_id: slice.id.clone(),
                slice_index: i,
                value: slice.value,
                start_angle,
                end_angle,
                inner_radius,
                outer_radius: radius,
                pad_angle,
                corner_radius,
                color: slice.color,
            }
        })
        .collect();

    PieLayout {
        arcs,
        center: Center {
            x: width * 0.5,
            y: height * 0.5,
            radius,
            inner_radius,
        },
    }
}

fn inner_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() || ratio <= 0.0 {
        0.0
    } else if ratio >= 1.0 {
        1.0 - f64::EPSILON
    } else {
        ratio
    }
}

/// The effective pad: never more than the sweep can hold.
fn pad_for(spec: &ArcLayoutSpec, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let gaps = (n - 1) as f64;
    let sweep = (spec.end_angle - spec.start_angle).abs();
    spec.pad_angle.max(0.0).min(sweep / gaps)
}

/// Returns `(slice index, start, end)` in draw order, or nothing for a degenerate total.
fn slice_angles(
    slices: &[SliceDescriptor],
    order: &[usize],
    spec: &ArcLayoutSpec,
) -> Vec<(usize, f64, f64)> {
    let n = order.len();
    let total: f64 = order.iter().map(|&i| slices[i].value.max(0.0)).sum();
    if n == 0 || total <= 0.0 {
        log::debug!(slices = n, total, "degenerate pie; nothing to lay out");
        return Vec::new();
    }

    let sweep = spec.end_angle - spec.start_angle;
    let dir = if sweep < 0.0 { -1.0 } else { 1.0 };
    let pad = pad_for(spec, n);
    let k = (sweep.abs() - pad * (n - 1) as f64) / total;

    let mut out = Vec::with_capacity(n);
    let mut a0 = spec.start_angle;
    for (pos, &i) in order.iter().enumerate() {
        let a1 = if pos + 1 == n {
            // Snap to the requested end so rounding never drifts the last slice.
            spec.end_angle
        } else {
            a0 + dir * slices[i].value.max(0.0) * k
        };
        out.push((i, a0, a1));
        a0 = a1 + dir * pad;
    }
    out
}

/// Single-pass fit: place labels at the provisional radius, then shrink the radius by the
/// largest overflow. Labels move inward by less than the shrink, so a second pass could
/// shrink further; we deliberately stop after one.
fn fit_radius(
    base: f64,
    ratio: f64,
    angles: &[(usize, f64, f64)],
    width: f64,
    height: f64,
    decorations: &FitDecorations,
) -> f64 {
    let half_w = width * 0.5;
    let half_h = height * 0.5;
    let mut overflow = decorations.border_width.max(0.0) * 0.5;

    if let Some(labels) = &decorations.labels {
        let inner = base * ratio;
        let r = inner + (base - inner) * 0.5 + labels.radius_offset;
        for &(i, a0, a1) in angles {
            if (a1 - a0).abs() < labels.skip_angle {
                continue;
            }
            let Some(&(w, h)) = labels.sizes.get(i) else {
                continue;
            };
            let mid = (a0 + a1) * 0.5;
            let x = r * mid.sin();
            let y = -r * mid.cos();
            overflow = overflow
                .max(x.abs() + w * 0.5 - half_w)
                .max(y.abs() + h * 0.5 - half_h);
        }
    }

    (base - overflow.max(0.0)).max(0.0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;
    use core::f64::consts::PI;

    use peniko::color::palette::css;

    use super::*;
    use crate::record::Record;

    fn slices(values: &[(&str, f64)]) -> Vec<SliceDescriptor> {
        values
            .iter()
            .enumerate()
            .map(|(index, &(id, value))| SliceDescriptor {
                id: Arc::from(id),
                index,
                value,
                formatted_value: value.to_string(),
                color: css::GRAY,
                data: Record::id_value(id, value),
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn run(values: &[(&str, f64)], spec: &ArcLayoutSpec) -> PieLayout {
        layout(
            &slices(values),
            200.0,
            100.0,
            spec,
            &FitDecorations::default(),
        )
    }

    #[test]
    fn thirty_seventy_split() {
        let out = run(&[("a", 30.0), ("b", 70.0)], &ArcLayoutSpec::default());
        let [a, b] = &out.arcs[..] else {
            panic!("expected two arcs");
        };
        assert_eq!(&*a.slice_id, "a");
        assert!(close(a.start_angle, 0.0));
        assert!(close(a.end_angle, 0.6 * PI));
        assert!(close(b.start_angle, 0.6 * PI));
        assert_eq!(b.end_angle, TAU);
    }

    #[test]
    fn spans_plus_padding_fill_the_sweep() {
        let values = [("a", 3.0), ("b", 1.0), ("c", 0.0), ("d", 7.5), ("e", 2.25)];
        for (start, end) in [(0.0, TAU), (-PI / 2.0, PI / 2.0), (PI, -PI / 3.0)] {
            let spec = ArcLayoutSpec::default()
                .with_angles(start, end)
                .with_pad_angle(0.05);
            let out = run(&values, &spec);
            let spans: f64 = out.arcs.iter().map(ArcGeometry::span).sum();
            let dir = if end < start { -1.0 } else { 1.0 };
            let pads = dir * 0.05 * (values.len() - 1) as f64;
            assert!(close(spans + pads, end - start), "sweep {start}..{end}");
            assert_eq!(out.arcs.last().unwrap().end_angle, end);

            for pair in out.arcs.windows(2) {
                let gap = pair[1].start_angle - pair[0].end_angle;
                assert!(close(gap, dir * 0.05), "slices must not overlap");
                assert!(dir * pair[0].span() >= 0.0);
            }
        }
    }

    #[test]
    fn oversized_pad_is_clamped_to_the_sweep() {
        let spec = ArcLayoutSpec::default()
            .with_angles(0.0, 1.0)
            .with_pad_angle(10.0);
        let out = run(&[("a", 1.0), ("b", 1.0), ("c", 1.0)], &spec);
        assert!(close(out.arcs[0].pad_angle, 0.5));
        assert!(out.arcs.iter().all(|a| close(a.span(), 0.0)));
        assert_eq!(out.arcs[2].end_angle, 1.0);
    }

    #[test]
    fn sort_by_value_is_descending_and_stable() {
        let spec = ArcLayoutSpec::default().with_sort_by_value(true);
        let out = run(
            &[("a", 1.0), ("b", 5.0), ("c", 1.0), ("d", 5.0), ("e", 3.0)],
            &spec,
        );
        let ids: Vec<&str> = out.arcs.iter().map(|a| &*a.slice_id).collect();
        assert_eq!(ids, ["b", "d", "e", "a", "c"]);
        assert_eq!(out.arcs[0].slice_index, 1);
        assert!(out.arcs.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn zero_total_lays_out_nothing() {
        let out = run(&[("a", 0.0), ("b", 0.0)], &ArcLayoutSpec::default());
        assert!(out.is_empty());
        let out = run(&[("a", -3.0)], &ArcLayoutSpec::default());
        assert!(out.is_empty());
        let out = run(&[], &ArcLayoutSpec::default());
        assert!(out.is_empty());
        assert_eq!(out.center.x, 100.0);
    }

    #[test]
    fn negative_values_get_an_empty_span() {
        let out = run(&[("a", 1.0), ("b", -1.0), ("c", 1.0)], &ArcLayoutSpec::default());
        assert!(close(out.arcs[1].span(), 0.0));
        assert!(close(out.arcs[0].span(), PI));
    }

    #[test]
    fn radii_follow_the_ratio_and_the_box() {
        let values = [("a", 1.0), ("b", 2.0)];
        let pie = run(&values, &ArcLayoutSpec::default());
        assert_eq!(pie.center.radius, 50.0);
        assert!(pie.arcs.iter().all(|a| a.inner_radius == 0.0));

        let ring = run(
            &values,
            &ArcLayoutSpec::default().with_inner_radius_ratio(0.98),
        );
        assert!(close(ring.arcs[0].inner_radius, 49.0));
        assert!(ring.arcs[0].outer_radius <= 50.0);

        let clamped = run(&values, &ArcLayoutSpec::default().with_inner_radius_ratio(1.5));
        assert!(clamped.center.inner_radius < clamped.center.radius);
    }

    #[test]
    fn corner_radius_is_clamped_to_half_the_band() {
        let spec = ArcLayoutSpec::default()
            .with_inner_radius_ratio(0.5)
            .with_corner_radius(100.0);
        let out = run(&[("a", 1.0), ("b", 1.0)], &spec);
        assert!(close(out.arcs[0].corner_radius, 12.5));
    }

    #[test]
    fn fit_shrinks_only_for_overflowing_labels() {
        let values = slices(&[("a", 1.0), ("b", 1.0)]);
        let spec = ArcLayoutSpec::default().with_fit(true);

        // Small labels at mid radius never reach the box edge.
        let small = FitDecorations {
            border_width: 0.0,
            labels: Some(FitLabels {
                radius_offset: 0.0,
                skip_angle: 0.0,
                sizes: vec![(4.0, 4.0), (4.0, 4.0)],
            }),
        };
        let out = layout(&values, 100.0, 100.0, &spec, &small);
        assert_eq!(out.center.radius, 50.0);

        // Pushed outward by 40px, the labels stick out of the box.
        let wide = FitDecorations {
            border_width: 0.0,
            labels: Some(FitLabels {
                radius_offset: 40.0,
                skip_angle: 0.0,
                sizes: vec![(20.0, 10.0), (20.0, 10.0)],
            }),
        };
        let out = layout(&values, 100.0, 100.0, &spec, &wide);
        // Label "a" sits at (65, 0) relative to the center: 65 + 10 - 50 = 25 overflow.
        assert!(close(out.center.radius, 25.0));
        assert!(out.arcs.iter().all(|a| a.outer_radius == out.center.radius));

        // Without `fit` the same decorations are ignored.
        let out = layout(&values, 100.0, 100.0, &ArcLayoutSpec::default(), &wide);
        assert_eq!(out.center.radius, 50.0);
    }

    #[test]
    fn fit_accounts_for_border_and_skipped_labels() {
        let values = slices(&[("a", 99.0), ("b", 1.0)]);
        let spec = ArcLayoutSpec::default().with_fit(true);
        let decorations = FitDecorations {
            border_width: 4.0,
            labels: Some(FitLabels {
                radius_offset: 100.0,
                // Only "a" is wide enough to carry a label.
                skip_angle: 0.5,
                sizes: vec![(0.0, 0.0), (0.0, 0.0)],
            }),
        };
        let out = layout(&values, 100.0, 100.0, &spec, &decorations);
        assert!(out.center.radius < 50.0);
        assert!(out.center.radius >= 0.0);

        let border_only = FitDecorations {
            border_width: 4.0,
            labels: None,
        };
        let out = layout(&values, 100.0, 100.0, &spec, &border_only);
        assert!(close(out.center.radius, 48.0));
    }
}
