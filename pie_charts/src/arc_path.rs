// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc outline generation.
//!
//! Turns one [`ArcGeometry`] into a center-relative `BezPath`: an annular (or circular)
//! sector with the pad gap cut out and optional rounded corners. The construction follows
//! the classic d3 arc generator:
//! - the pad gap has constant width, measured at the pad radius `sqrt(r0² + r1²)`;
//! - corner radii shrink when the sector is too narrow to hold them, so the outline never
//!   folds over itself.
//!
//! Paths are emitted in y-down screen coordinates with angle `0` pointing up.

use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::fmt;

use kurbo::{Arc, BezPath, PathEl, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::arc::ArcGeometry;

const EPSILON: f64 = 1e-12;
const PATH_EPSILON: f64 = 1e-6;
const SLOT_EPSILON: f64 = 1e-9;

/// An arc whose outline cannot be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcPathError {
    /// An angle, radius, or the resulting outline is `NaN` or infinite.
    NonFinite,
}

impl fmt::Display for ArcPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => f.write_str("arc geometry is not finite"),
        }
    }
}

impl core::error::Error for ArcPathError {}

/// Builds the outline of `arc`, centered on the origin.
///
/// `tolerance` is the curve approximation tolerance for circular segments.
pub fn arc_path(arc: &ArcGeometry, tolerance: f64) -> Result<BezPath, ArcPathError> {
    let inputs = [
        arc.start_angle,
        arc.end_angle,
        arc.inner_radius,
        arc.outer_radius,
        arc.pad_angle,
        arc.corner_radius,
    ];
    if inputs.iter().any(|v| !v.is_finite()) {
        return Err(ArcPathError::NonFinite);
    }

    // Layout keeps the pad outside `[start, end]`. Widen to the full slot and cut the gap
    // back out so that neighboring edges run parallel.
    let dir = if arc.end_angle < arc.start_angle {
        -1.0
    } else {
        1.0
    };
    // Only an unpadded full sweep is a closed ring. A widened slot stays short of a full
    // turn so the gap survives.
    let span = (arc.end_angle - arc.start_angle).abs();
    let half_pad = if span > TAU - EPSILON {
        0.0
    } else {
        (arc.pad_angle.max(0.0) * 0.5).min(((TAU - span) * 0.5 - SLOT_EPSILON).max(0.0))
    };

    let mut w = PathWriter::new(tolerance);
    sector(
        &mut w,
        arc.inner_radius.max(0.0),
        arc.outer_radius.max(0.0),
        arc.start_angle - dir * half_pad,
        arc.end_angle + dir * half_pad,
        arc.pad_angle.max(0.0),
        arc.corner_radius.max(0.0),
    );
    let path = w.finish();

    let finite = path.elements().iter().all(|el| match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
        PathEl::QuadTo(p1, p2) => p1.is_finite() && p2.is_finite(),
        PathEl::CurveTo(p1, p2, p3) => p1.is_finite() && p2.is_finite() && p3.is_finite(),
        PathEl::ClosePath => true,
    });
    if finite {
        Ok(path)
    } else {
        Err(ArcPathError::NonFinite)
    }
}

fn above(x: f64) -> bool {
    x > EPSILON
}

fn asin(x: f64) -> f64 {
    if x >= 1.0 {
        FRAC_PI_2
    } else if x <= -1.0 {
        -FRAC_PI_2
    } else {
        x.asin()
    }
}

fn acos(x: f64) -> f64 {
    if x > 1.0 {
        0.0
    } else if x < -1.0 {
        PI
    } else {
        x.acos()
    }
}

fn sector(
    w: &mut PathWriter,
    inner: f64,
    outer: f64,
    start: f64,
    end: f64,
    pad: f64,
    corner: f64,
) {
    let (r0, r1) = if outer < inner {
        (outer, inner)
    } else {
        (inner, outer)
    };
    let a0 = start - FRAC_PI_2;
    let a1 = end - FRAC_PI_2;
    let da = (a1 - a0).abs();
    let cw = a1 > a0;

    if !above(r1) {
        // A point.
        w.move_to(0.0, 0.0);
    } else if da > TAU - EPSILON {
        // A circle or annulus.
        w.move_to(r1 * a0.cos(), r1 * a0.sin());
        w.arc(0.0, 0.0, r1, a0, a1, !cw);
        if r0 > EPSILON {
            w.move_to(r0 * a1.cos(), r0 * a1.sin());
            w.arc(0.0, 0.0, r0, a1, a0, cw);
        }
    } else {
        let (mut a01, mut a11, mut a00, mut a10) = (a0, a1, a0, a1);
        let (mut da0, mut da1) = (da, da);
        let ap = pad * 0.5;
        let rp = if ap > EPSILON {
            (r0 * r0 + r1 * r1).sqrt()
        } else {
            0.0
        };
        let rc = ((r1 - r0).abs() * 0.5).min(corner);
        let (mut rc0, mut rc1) = (rc, rc);

        // Since r1 >= r0, da1 >= da0.
        if rp > EPSILON {
            let sign = if cw { 1.0 } else { -1.0 };
            let mut p0 = asin(rp / r0 * ap.sin());
            let mut p1 = asin(rp / r1 * ap.sin());
            da0 -= p0 * 2.0;
            if da0 > EPSILON {
                p0 *= sign;
                a00 += p0;
                a10 -= p0;
            } else {
                da0 = 0.0;
                a00 = (a0 + a1) * 0.5;
                a10 = a00;
            }
            da1 -= p1 * 2.0;
            if da1 > EPSILON {
                p1 *= sign;
                a01 += p1;
                a11 -= p1;
            } else {
                da1 = 0.0;
                a01 = (a0 + a1) * 0.5;
                a11 = a01;
            }
        }

        let x01 = r1 * a01.cos();
        let y01 = r1 * a01.sin();
        let x10 = r0 * a10.cos();
        let y10 = r0 * a10.sin();
        let x11 = r1 * a11.cos();
        let y11 = r1 * a11.sin();
        let x00 = r0 * a00.cos();
        let y00 = r0 * a00.sin();

        // Narrow sectors cannot hold the full corner radius. If the edge lines do not
        // intersect the sector is too small for rounding at all.
        if rc > EPSILON && da < PI {
            if let Some((ocx, ocy)) = intersect(x01, y01, x00, y00, x11, y11, x10, y10) {
                let (ax, ay) = (x01 - ocx, y01 - ocy);
                let (bx, by) = (x11 - ocx, y11 - ocy);
                let cos = (ax * bx + ay * by)
                    / ((ax * ax + ay * ay).sqrt() * (bx * bx + by * by).sqrt());
                let kc = 1.0 / (acos(cos) * 0.5).sin();
                let lc = (ocx * ocx + ocy * ocy).sqrt();
                rc0 = rc.min((r0 - lc) / (kc - 1.0));
                rc1 = rc.min((r1 - lc) / (kc + 1.0));
            } else {
                rc0 = 0.0;
                rc1 = 0.0;
            }
        }

        // Outer ring.
        if !above(da1) {
            w.move_to(x01, y01);
        } else if rc1 > EPSILON {
            let t0 = corner_tangents(x00, y00, x01, y01, r1, rc1, cw);
            let t1 = corner_tangents(x11, y11, x10, y10, r1, rc1, cw);
            w.move_to(t0.cx + t0.x01, t0.cy + t0.y01);
            if rc1 < rc {
                // The corners merged.
                w.arc(t0.cx, t0.cy, rc1, t0.y01.atan2(t0.x01), t1.y01.atan2(t1.x01), !cw);
            } else {
                w.arc(t0.cx, t0.cy, rc1, t0.y01.atan2(t0.x01), t0.y11.atan2(t0.x11), !cw);
                w.arc(
                    0.0,
                    0.0,
                    r1,
                    (t0.cy + t0.y11).atan2(t0.cx + t0.x11),
                    (t1.cy + t1.y11).atan2(t1.cx + t1.x11),
                    !cw,
                );
                w.arc(t1.cx, t1.cy, rc1, t1.y11.atan2(t1.x11), t1.y01.atan2(t1.x01), !cw);
            }
        } else {
            w.move_to(x01, y01);
            w.arc(0.0, 0.0, r1, a01, a11, !cw);
        }

        // Inner ring (or the center point).
        if !above(r0) || !above(da0) {
            w.line_to(x10, y10);
        } else if rc0 > EPSILON {
            let t0 = corner_tangents(x10, y10, x11, y11, r0, -rc0, cw);
            let t1 = corner_tangents(x01, y01, x00, y00, r0, -rc0, cw);
            w.line_to(t0.cx + t0.x01, t0.cy + t0.y01);
            if rc0 < rc {
                w.arc(t0.cx, t0.cy, rc0, t0.y01.atan2(t0.x01), t1.y01.atan2(t1.x01), !cw);
            } else {
                w.arc(t0.cx, t0.cy, rc0, t0.y01.atan2(t0.x01), t0.y11.atan2(t0.x11), !cw);
                w.arc(
                    0.0,
                    0.0,
                    r0,
                    (t0.cy + t0.y11).atan2(t0.cx + t0.x11),
                    (t1.cy + t1.y11).atan2(t1.cx + t1.x11),
                    cw,
                );
                w.arc(t1.cx, t1.cy, rc0, t1.y11.atan2(t1.x11), t1.y01.atan2(t1.x01), !cw);
            }
        } else {
            w.arc(0.0, 0.0, r0, a10, a00, cw);
        }
    }

    w.close();
}

/// Intersection of the lines `p0 p1` and `p2 p3`, if they are not parallel.
fn intersect(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
) -> Option<(f64, f64)> {
    let (x10, y10) = (x1 - x0, y1 - y0);
    let (x32, y32) = (x3 - x2, y3 - y2);
    let t = y32 * x10 - x32 * y10;
    if t * t < EPSILON {
        return None;
    }
    let t = (x32 * (y0 - y2) - y32 * (x0 - x2)) / t;
    Some((x0 + t * x10, y0 + t * y10))
}

struct CornerTangent {
    cx: f64,
    cy: f64,
    x01: f64,
    y01: f64,
    x11: f64,
    y11: f64,
}

/// The corner circle of radius `rc` tangent to the edge `p0 p1` and to the ring of radius
/// `r1`. A negative `rc` places the circle inside an inner ring.
fn corner_tangents(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    r1: f64,
    rc: f64,
    cw: bool,
) -> CornerTangent {
    let x01 = x0 - x1;
    let y01 = y0 - y1;
    let lo = (if cw { rc } else { -rc }) / (x01 * x01 + y01 * y01).sqrt();
    let ox = lo * y01;
    let oy = -lo * x01;
    let x11 = x0 + ox;
    let y11 = y0 + oy;
    let x10 = x1 + ox;
    let y10 = y1 + oy;
    let x00 = (x11 + x10) * 0.5;
    let y00 = (y11 + y10) * 0.5;
    let dx = x10 - x11;
    let dy = y10 - y11;
    let d2 = dx * dx + dy * dy;
    let r = r1 - rc;
    let dd = x11 * y10 - x10 * y11;
    let d = (if dy < 0.0 { -1.0 } else { 1.0 }) * (r * r * d2 - dd * dd).max(0.0).sqrt();
    let mut cx = (dd * dy - dx * d) / d2;
    let mut cy = (-dd * dx - dy * d) / d2;
    let cx1 = (dd * dy + dx * d) / d2;
    let cy1 = (-dd * dx + dy * d) / d2;

    // Pick the intersection closer to the edge midpoint.
    let (dx0, dy0) = (cx - x00, cy - y00);
    let (dx1, dy1) = (cx1 - x00, cy1 - y00);
    if dx0 * dx0 + dy0 * dy0 > dx1 * dx1 + dy1 * dy1 {
        cx = cx1;
        cy = cy1;
    }

    CornerTangent {
        cx,
        cy,
        x01: -ox,
        y01: -oy,
        x11: cx * (r1 / r - 1.0),
        y11: cy * (r1 / r - 1.0),
    }
}

/// A canvas-style path writer: `arc` connects from the current point with a line, like
/// `CanvasRenderingContext2D::arc`.
struct PathWriter {
    path: BezPath,
    tolerance: f64,
    current: Option<Point>,
}

impl PathWriter {
    fn new(tolerance: f64) -> Self {
        Self {
            path: BezPath::new(),
            tolerance: if tolerance > 0.0 { tolerance } else { 0.1 },
            current: None,
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        self.path.move_to(p);
        self.current = Some(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        let p = Point::new(x, y);
        self.path.line_to(p);
        self.current = Some(p);
    }

    fn arc(&mut self, cx: f64, cy: f64, r: f64, a0: f64, a1: f64, ccw: bool) {
        let r = r.abs();
        let x0 = cx + r * a0.cos();
        let y0 = cy + r * a0.sin();
        match self.current {
            None => self.move_to(x0, y0),
            Some(p) if (p.x - x0).abs() > PATH_EPSILON || (p.y - y0).abs() > PATH_EPSILON => {
                self.line_to(x0, y0);
            }
            Some(_) => {}
        }
        if r == 0.0 {
            return;
        }

        let mut da = if ccw { a0 - a1 } else { a1 - a0 };
        if da < 0.0 {
            da = da % TAU + TAU;
        }
        let sweep = if da > TAU - PATH_EPSILON {
            TAU
        } else if da > PATH_EPSILON {
            da
        } else {
            return;
        };
        let sweep = if ccw { -sweep } else { sweep };

        let arc = Arc {
            center: Point::new(cx, cy),
            radii: Vec2::new(r, r),
            start_angle: a0,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        self.path.extend(arc.append_iter(self.tolerance));
        let end = a0 + sweep;
        self.current = Some(Point::new(cx + r * end.cos(), cy + r * end.sin()));
    }

    fn close(&mut self) {
        self.path.close_path();
    }

    fn finish(self) -> BezPath {
        self.path
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::sync::Arc as Shared;
    use alloc::vec::Vec;

    use kurbo::Shape;
    use peniko::color::palette::css;

    use super::*;

    fn geometry(start: f64, end: f64, inner: f64, outer: f64) -> ArcGeometry {
        ArcGeometry {
            slice_id: Shared::from("s"),
            slice_index: 0,
            value: 1.0,
            start_angle: start,
            end_angle: end,
            inner_radius: inner,
            outer_radius: outer,
            pad_angle: 0.0,
            corner_radius: 0.0,
            color: css::BLACK,
        }
    }

    fn flattened_points(path: &BezPath) -> Vec<Point> {
        let mut pts = Vec::new();
        kurbo::flatten(path.iter(), 0.01, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => pts.push(p),
            _ => {}
        });
        pts
    }

    #[test]
    fn quarter_slice_starts_at_twelve_and_turns_clockwise() {
        let path = arc_path(&geometry(0.0, FRAC_PI_2, 0.0, 10.0), 0.01).unwrap();
        let bbox = path.bounding_box();
        assert!(bbox.x0.abs() < 1e-6 && (bbox.x1 - 10.0).abs() < 0.05);
        assert!((bbox.y0 + 10.0).abs() < 0.05 && bbox.y1.abs() < 1e-6);
        assert!(flattened_points(&path).iter().any(|p| p.to_vec2().hypot() < 1e-9));
    }

    #[test]
    fn full_sweep_is_an_annulus() {
        let path = arc_path(&geometry(0.0, TAU, 20.0, 50.0), 0.01).unwrap();
        let expected = PI * (50.0 * 50.0 - 20.0 * 20.0);
        let area = path.area().abs();
        assert!((area - expected).abs() / expected < 0.01, "area {area}");
    }

    #[test]
    fn rounded_corners_stay_inside_the_band() {
        for (start, end) in [(0.0, 0.3), (0.0, 2.0), (1.0, 4.5), (3.0, 0.5)] {
            let mut arc = geometry(start, end, 30.0, 60.0);
            arc.corner_radius = 15.0;
            let path = arc_path(&arc, 0.01).unwrap();
            for p in flattened_points(&path) {
                let r = p.to_vec2().hypot();
                assert!(r <= 60.0 + 0.05, "{start}..{end}: {r} beyond outer radius");
                assert!(r >= 30.0 - 0.05, "{start}..{end}: {r} inside inner radius");
            }
        }
    }

    #[test]
    fn padding_removes_area() {
        let plain = geometry(0.0, 1.0, 10.0, 50.0);
        let mut padded = plain.clone();
        padded.pad_angle = 0.1;
        let a = arc_path(&plain, 0.01).unwrap().area().abs();
        let b = arc_path(&padded, 0.01).unwrap().area().abs();
        assert!(b < a);
        // The pad lies outside the slice, so the gap edge is within `[start, end]`.
        for p in flattened_points(&arc_path(&padded, 0.01).unwrap()) {
            if p.to_vec2().hypot() > 1e-6 {
                let angle = p.x.atan2(-p.y);
                assert!((-1e-9..=1.0 + 1e-9).contains(&angle), "angle {angle}");
            }
        }
    }

    #[test]
    fn lone_padded_slice_keeps_its_gap() {
        // The only non-zero slice of a padded pie spans `TAU - pad`.
        let pad = 0.3;
        let mut arc = geometry(0.0, TAU - pad, 0.0, 50.0);
        arc.pad_angle = pad;
        let path = arc_path(&arc, 0.01).unwrap();
        let area = path.area().abs();
        let disk = PI * 50.0 * 50.0;
        let wedge = 0.5 * 50.0 * 50.0 * (TAU - pad);
        assert!(area < disk - 100.0, "area {area} covers the gap");
        assert!((area - wedge).abs() / wedge < 0.01, "area {area} vs {wedge}");
        // Nothing is drawn inside the gap before twelve o'clock.
        for p in flattened_points(&path) {
            if p.to_vec2().hypot() > 1.0 {
                let mut angle = p.x.atan2(-p.y);
                if angle < 0.0 {
                    angle += TAU;
                }
                assert!(
                    angle <= TAU - pad + 1e-3 || angle >= TAU - 1e-3,
                    "angle {angle} inside the gap"
                );
            }
        }

        let mut ring = geometry(0.0, TAU, 20.0, 50.0);
        ring.pad_angle = pad;
        let area = arc_path(&ring, 0.01).unwrap().area().abs();
        let expected = PI * (50.0 * 50.0 - 20.0 * 20.0);
        assert!((area - expected).abs() / expected < 0.01, "ring area {area}");
    }

    #[test]
    fn non_finite_geometry_is_rejected() {
        let arc = geometry(f64::NAN, 1.0, 0.0, 10.0);
        assert_eq!(arc_path(&arc, 0.1), Err(ArcPathError::NonFinite));
        let arc = geometry(0.0, 1.0, 0.0, f64::INFINITY);
        assert_eq!(arc_path(&arc, 0.1), Err(ArcPathError::NonFinite));
    }

    #[test]
    fn zero_radius_is_a_point() {
        let path = arc_path(&geometry(0.0, 1.0, 0.0, 0.0), 0.1).unwrap();
        assert_eq!(path.elements().len(), 2);
    }
}
