// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster rendering for `pie_charts`.
//!
//! - [`Surface`] is the drawing seam, with a canvas-like save/restore transform stack.
//!   [`PixmapSurface`] rasterizes with `tiny-skia` (text via `fontdue`) and
//!   [`RecordingSurface`] logs calls for inspection.
//! - [`render`] paints one frame from precomputed geometry.
//! - [`PieCanvas`] ties it together: records in, pixels out, recomputed on every
//!   [`PieCanvas::redraw`].
//!
//! ```no_run
//! use pie_charts::Record;
//! use pie_render::{PieCanvas, PieConfig, PixmapSurface};
//!
//! let canvas = PieCanvas::new(PieConfig::new(300.0, 300.0).with_inner_radius_ratio(0.5));
//! let mut surface = PixmapSurface::new(300, 300)?;
//! canvas.redraw(&mut surface, &[Record::id_value("a", 30), Record::id_value("b", 70)])?;
//! surface.save_png("pie.png")?;
//! # Ok::<(), pie_render::RenderError>(())
//! ```

mod chart;
mod config;
mod error;
mod legend;
mod pixmap;
mod recording;
mod renderer;
mod surface;
mod text;

pub use chart::{PieCanvas, PreparedPie};
pub use config::PieConfig;
pub use error::RenderError;
pub use legend::{LegendRenderer, SwatchLegend};
pub use pixmap::PixmapSurface;
pub use recording::{Command, RecordingSurface};
pub use renderer::{RenderContext, render};
pub use surface::Surface;
pub use text::{FontdueMeasurer, load_font};
