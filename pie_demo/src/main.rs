// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie chart demos rendered to PNG.
//!
//! Usage: `pie_demo [FONT_PATH]`. Without a font, slice and legend labels are skipped.

mod report;

use std::error::Error;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;
use std::sync::Arc;

use peniko::color::palette::css;
use pie_charts::{
    ColorSpec, InheritedColor, LabelAccessor, LegendAnchor, LegendDirection, LegendSpec,
    PartialMargin, Record, SymbolShape, Theme, ValueFormat,
};
use pie_render::{FontdueMeasurer, PieCanvas, PieConfig, PixmapSurface, load_font};

const OUT_DIR: &str = "pie_demo_out";

fn languages() -> Vec<Record> {
    [
        ("rust", 42.0),
        ("go", 18.0),
        ("python", 27.0),
        ("haskell", 4.0),
        ("elixir", 9.0),
    ]
    .into_iter()
    .map(|(id, v)| Record::id_value(id, v))
    .collect()
}

fn shares() -> Vec<Record> {
    [
        ("north", 0.31, "#5b8ff9"),
        ("south", 0.22, "#5ad8a6"),
        ("east", 0.27, "#f6bd16"),
        ("west", 0.20, "not-a-color"),
    ]
    .into_iter()
    .map(|(id, v, color)| Record::id_value(id, v).with("color", color))
    .collect()
}

fn demos() -> Vec<(&'static str, &'static str, PieConfig, Vec<Record>)> {
    let base = PieConfig::new(320.0, 240.0)
        .with_margin(PartialMargin::uniform(20.0))
        .with_theme(Theme::default().with_background(css::WHITE));
    let legend = LegendSpec::default()
        .with_anchor(LegendAnchor::Right)
        .with_item_size(70.0, 18.0)
        .with_symbol(12.0, SymbolShape::Circle);

    vec![
        ("pie", "Default options.", base.clone(), languages()),
        (
            "donut",
            "Inner radius, padding, rounded corners, darker borders.",
            base.clone()
                .with_inner_radius_ratio(0.55)
                .with_pad_angle(0.03)
                .with_corner_radius(4.0)
                .with_border(2.0, InheritedColor::darker(0.6))
                .with_slice_labels_text_color(InheritedColor::darker(2.0)),
            languages(),
        ),
        (
            "sorted_legend",
            "Sorted by value, ids as labels, legend on the right.",
            base.clone()
                .with_sort_by_value(true)
                .with_slice_label(LabelAccessor::Id)
                .with_slice_labels_skip_angle(0.3)
                .with_legend(legend),
            languages(),
        ),
        (
            "half_donut",
            "A half sweep with colors read from the data.",
            base.clone()
                .with_angles(-FRAC_PI_2, FRAC_PI_2)
                .with_inner_radius_ratio(0.5)
                .with_colors(ColorSpec::field("color"))
                .with_value_format(ValueFormat::Percent { precision: 0 })
                .with_legend(
                    LegendSpec::default()
                        .with_anchor(LegendAnchor::Bottom)
                        .with_direction(LegendDirection::Row)
                        .with_item_size(64.0, 18.0),
                ),
            shares(),
        ),
        (
            "counter_clockwise",
            "Sweep from 12 o'clock counter-clockwise.",
            base.clone().with_angles(0.0, -1.5 * PI),
            languages(),
        ),
        (
            "fit",
            "Labels pushed outward with fit sizing keeping them in the box.",
            base.clone()
                .with_fit(true)
                .with_slice_labels_radius_offset(40.0)
                .with_value_format(ValueFormat::Fixed { precision: 1 }),
            languages(),
        ),
        (
            "retina",
            "Pixel ratio 2.",
            base.with_pixel_ratio(2.0).with_inner_radius_ratio(0.3),
            languages(),
        ),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let font = match std::env::args().nth(1) {
        Some(path) => Some(load_font(&std::fs::read(&path)?)?),
        None => {
            tracing::info!("no font given; text will be skipped");
            None
        }
    };

    let out_dir = Path::new(OUT_DIR);
    std::fs::create_dir_all(out_dir)?;

    let mut sections = Vec::new();
    for (name, note, config, records) in demos() {
        let mut canvas = PieCanvas::new(config);
        let mut surface = PixmapSurface::new(1, 1)?;
        if let Some(font) = &font {
            canvas = canvas.with_text_measurer(FontdueMeasurer::new(Arc::clone(font)));
            surface = surface.with_font(Arc::clone(font));
        }
        let prepared = canvas.redraw(&mut surface, &records)?;
        let file = format!("{name}.png");
        surface.save_png(out_dir.join(&file))?;
        tracing::info!(
            demo = name,
            arcs = prepared.layout.arcs.len(),
            radius = prepared.layout.center.radius,
            "rendered"
        );
        sections.push(report::Section {
            title: name,
            note,
            file,
        });
    }

    let html = report::render_report("pie_charts demos", &sections);
    std::fs::write(out_dir.join("index.html"), html)?;
    println!("wrote {OUT_DIR}/index.html");
    Ok(())
}
