// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A CPU raster surface on top of `tiny-skia`.

use std::fmt;
use std::path::Path as FsPath;
use std::sync::Arc;

use fontdue::Font;
use kurbo::{Affine, BezPath, PathEl, Point};
use peniko::Color;
use pie_charts::TextAnchor;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use crate::surface::Surface;
use crate::text::{advance_width, vertical_metrics};
use crate::RenderError;

/// A [`Surface`] backed by a `tiny_skia::Pixmap`.
///
/// Text is rasterized with `fontdue` when a font is attached and silently skipped
/// otherwise.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Affine,
    stack: Vec<Affine>,
    font: Option<Arc<Font>>,
}

impl fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("transform", &self.transform)
            .field("depth", &self.stack.len())
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl PixmapSurface {
    /// Allocates a transparent `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            font: None,
        })
    }

    /// Attaches the font used by [`Surface::fill_text`].
    #[must_use]
    pub fn with_font(mut self, font: Arc<Font>) -> Self {
        self.font = Some(font);
        self
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The backing pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Un-premultiplied RGBA of one pixel, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Number of unbalanced [`Surface::save`] calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Encodes the surface as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Png(e.to_string()))
    }

    /// Writes the surface to `path` as PNG.
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<(), RenderError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| RenderError::Png(e.to_string()))
    }

    fn skia_transform(&self) -> Transform {
        to_skia_transform(self.transform)
    }
}

impl Surface for PixmapSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        } else {
            self.pixmap = allocate(width, height)?;
        }
        self.transform = Affine::IDENTITY;
        self.stack.clear();
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform *= Affine::translate((dx, dy));
    }

    fn scale(&mut self, factor: f64) {
        self.transform *= Affine::scale(factor);
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let transform = self.skia_transform();
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, transform, None);
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "stroke widths are small positive numbers"
    )]
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            ..Stroke::default()
        };
        let transform = self.skia_transform();
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, transform, None);
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "font sizes and glyph offsets are small"
    )]
    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font_size: f64,
        color: Color,
        anchor: TextAnchor,
    ) {
        let Some(font) = self.font.clone() else {
            return;
        };
        // Rasterize at device size so text stays crisp under a pixel ratio.
        let px = (font_size * self.transform.determinant().abs().sqrt()) as f32;
        if text.is_empty() || !(px.is_finite() && px > 0.0) {
            return;
        }
        let origin = self.transform * at;
        if !origin.is_finite() {
            return;
        }

        let width = advance_width(&font, text, px);
        let (ascent, descent) = vertical_metrics(&font, px);
        let baseline = origin.y as f32 + (ascent + descent) * 0.5;
        let mut pen = match anchor {
            TextAnchor::Start => origin.x as f32,
            TextAnchor::Middle => origin.x as f32 - width * 0.5,
            TextAnchor::End => origin.x as f32 - width,
        };

        let mut glyphs = Vec::new();
        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, px);
            if metrics.width > 0 {
                glyphs.push(GlyphBitmap {
                    left: (pen + metrics.xmin as f32).round() as i64,
                    top: (baseline - metrics.ymin as f32 - metrics.height as f32).round() as i64,
                    width: metrics.width,
                    coverage: bitmap,
                });
            }
            pen += metrics.advance_width;
        }
        draw_glyphs(&mut self.pixmap, &glyphs, color);
    }
}

/// A rasterized glyph placed in device pixels.
struct GlyphBitmap {
    left: i64,
    top: i64,
    width: usize,
    coverage: Vec<u8>,
}

impl GlyphBitmap {
    fn height(&self) -> usize {
        self.coverage.len() / self.width.max(1)
    }
}

/// Composites a glyph run over `pixmap` through a scratch pixmap covering only the run.
#[allow(
    clippy::cast_possible_truncation,
    reason = "run bounds are clipped to the pixmap"
)]
fn draw_glyphs(pixmap: &mut Pixmap, glyphs: &[GlyphBitmap], color: Color) {
    let (w, h) = (i64::from(pixmap.width()), i64::from(pixmap.height()));
    let x0 = glyphs.iter().map(|g| g.left).min().unwrap_or(0).max(0);
    let y0 = glyphs.iter().map(|g| g.top).min().unwrap_or(0).max(0);
    let x1 = glyphs
        .iter()
        .map(|g| g.left + g.width as i64)
        .max()
        .unwrap_or(0)
        .min(w);
    let y1 = glyphs
        .iter()
        .map(|g| g.top + g.height() as i64)
        .max()
        .unwrap_or(0)
        .min(h);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let (run_w, run_h) = (x1 - x0, y1 - y0);
    let Some(mut run) = Pixmap::new(run_w as u32, run_h as u32) else {
        return;
    };

    let mut coverage = vec![0_u8; (run_w * run_h) as usize];
    for glyph in glyphs.iter().filter(|g| g.width > 0) {
        for (row, line) in glyph.coverage.chunks(glyph.width).enumerate() {
            let y = glyph.top + row as i64;
            if !(y0..y1).contains(&y) {
                continue;
            }
            for (col, &alpha) in line.iter().enumerate() {
                let x = glyph.left + col as i64;
                if !(x0..x1).contains(&x) {
                    continue;
                }
                let idx = ((y - y0) * run_w + (x - x0)) as usize;
                coverage[idx] = coverage[idx].max(alpha);
            }
        }
    }

    let base = to_skia_color(color);
    for (pixel, &alpha) in run.pixels_mut().iter_mut().zip(&coverage) {
        if alpha > 0 {
            let mut c = base;
            c.apply_opacity(f32::from(alpha) / 255.0);
            *pixel = c.premultiply().to_color_u8();
        }
    }
    pixmap.draw_pixmap(
        x0 as i32,
        y0 as i32,
        run.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

fn allocate(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let c = color.to_rgba8();
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "tiny-skia works in f32"
)]
fn to_skia_transform(t: Affine) -> Transform {
    let [a, b, c, d, e, f] = t.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Converts a kurbo path; `None` for empty or degenerate paths.
#[allow(
    clippy::cast_possible_truncation,
    reason = "tiny-skia works in f32"
)]
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32);
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
