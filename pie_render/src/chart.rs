// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The end-to-end pie pipeline.

use std::fmt;
use std::sync::Arc;

use pie_charts::{
    BoxDimensions, Dimensions, DimensionsProvider, FitDecorations, FitLabels,
    HeuristicTextMeasurer, PieLayout, Record, SliceDescriptor, SliceLabel, TextMeasurer, layout,
    normalize, plan_labels,
};

use crate::config::PieConfig;
use crate::legend::{LegendRenderer, SwatchLegend};
use crate::renderer::{RenderContext, render};
use crate::surface::Surface;
use crate::RenderError;

/// Everything computed for one frame, before painting.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedPie {
    /// Outer and inner boxes.
    pub dimensions: Dimensions,
    /// Normalized slices, in input order.
    pub slices: Vec<SliceDescriptor>,
    /// Arcs and center.
    pub layout: PieLayout,
    /// Inline labels (empty when disabled).
    pub labels: Vec<SliceLabel>,
}

/// A pie chart: config plus the collaborators that resolve sizes, measure text, and
/// draw legends.
///
/// Holds no per-frame state. Every [`PieCanvas::redraw`] recomputes the frame from the
/// records it is given.
pub struct PieCanvas {
    config: PieConfig,
    dimensions: Arc<dyn DimensionsProvider + Send + Sync>,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    legend_renderer: Arc<dyn LegendRenderer + Send + Sync>,
}

impl fmt::Debug for PieCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieCanvas")
            .field("config", &self.config)
            .field("legend_renderer", &self.legend_renderer)
            .finish_non_exhaustive()
    }
}

impl PieCanvas {
    /// Creates a chart with the default collaborators.
    pub fn new(config: PieConfig) -> Self {
        Self {
            config,
            dimensions: Arc::new(BoxDimensions::default()),
            measurer: Arc::new(HeuristicTextMeasurer),
            legend_renderer: Arc::new(SwatchLegend),
        }
    }

    /// Replaces the dimensions provider.
    #[must_use]
    pub fn with_dimensions_provider(
        mut self,
        provider: impl DimensionsProvider + Send + Sync + 'static,
    ) -> Self {
        self.dimensions = Arc::new(provider);
        self
    }

    /// Replaces the text measurer used by fit sizing.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + Send + Sync + 'static) -> Self {
        self.measurer = Arc::new(measurer);
        self
    }

    /// Replaces the legend renderer.
    #[must_use]
    pub fn with_legend_renderer(
        mut self,
        renderer: impl LegendRenderer + Send + Sync + 'static,
    ) -> Self {
        self.legend_renderer = Arc::new(renderer);
        self
    }

    /// The chart options.
    pub fn config(&self) -> &PieConfig {
        &self.config
    }

    /// Mutable access to the chart options.
    pub fn config_mut(&mut self) -> &mut PieConfig {
        &mut self.config
    }

    /// Runs dimensions, normalization, layout, and label planning.
    pub fn prepare(&self, records: &[Record]) -> Result<PreparedPie, RenderError> {
        let config = &self.config;
        let dimensions =
            self.dimensions
                .dimensions(config.width, config.height, config.margin);
        let slices = normalize(records, &config.normalize_spec())?;
        let label_spec = config.label_spec();

        let decorations = if config.fit {
            FitDecorations {
                border_width: config.border_width,
                labels: config.enable_slice_labels.then(|| FitLabels {
                    radius_offset: label_spec.radius_offset,
                    skip_angle: label_spec.skip_angle,
                    sizes: slices
                        .iter()
                        .map(|s| {
                            self.measurer
                                .measure(&label_spec.label.text(s), config.theme.labels.font_size)
                        })
                        .collect(),
                }),
            }
        } else {
            FitDecorations::default()
        };

        let layout = layout(
            &slices,
            dimensions.inner_width,
            dimensions.inner_height,
            &config.layout_spec(),
            &decorations,
        );
        let labels = if config.enable_slice_labels {
            plan_labels(
                &layout.arcs,
                &slices,
                &layout.center,
                &label_spec,
                config.theme.labels.fill,
            )
        } else {
            Vec::new()
        };

        Ok(PreparedPie {
            dimensions,
            slices,
            layout,
            labels,
        })
    }

    /// Paints an already prepared frame.
    pub fn paint(&self, surface: &mut dyn Surface, prepared: &PreparedPie) -> Result<(), RenderError> {
        let config = &self.config;
        let ctx = RenderContext {
            dimensions: prepared.dimensions,
            pixel_ratio: config.pixel_ratio,
            theme: &config.theme,
            border_width: config.border_width,
            border_color: &config.border_color,
            enable_slice_labels: config.enable_slice_labels,
            legends: &config.legends,
            legend_renderer: &*self.legend_renderer,
        };
        render(
            surface,
            &prepared.layout.arcs,
            &prepared.labels,
            &prepared.layout.center,
            &ctx,
        )
    }

    /// Recomputes the frame from `records` and paints it onto `surface`.
    pub fn redraw(
        &self,
        surface: &mut dyn Surface,
        records: &[Record],
    ) -> Result<PreparedPie, RenderError> {
        let prepared = self.prepare(records)?;
        self.paint(surface, &prepared)?;
        Ok(prepared)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use std::sync::Mutex;

    use peniko::Color;
    use peniko::color::palette::css;
    use pie_charts::{
        ColorSpec, DataError, InvalidDataPolicy, LegendDatum, LegendSpec, Margin, PartialMargin,
        TextTheme, Theme, Value,
    };

    use super::*;
    use crate::pixmap::PixmapSurface;
    use crate::recording::{Command, RecordingSurface};

    /// Resolves missing margin sides from fixed defaults.
    struct FixedMargins;

    impl DimensionsProvider for FixedMargins {
        fn dimensions(&self, width: f64, height: f64, margin: PartialMargin) -> Dimensions {
            BoxDimensions {
                defaults: Margin {
                    top: 15.0,
                    right: 5.0,
                    bottom: 25.0,
                    left: 10.0,
                },
            }
            .dimensions(width, height, margin)
        }
    }

    #[derive(Debug, PartialEq)]
    struct LegendCall {
        ids: Vec<String>,
        colors: Vec<Color>,
        width: f64,
        height: f64,
        font_size: f64,
    }

    /// Remembers what it was asked to draw.
    #[derive(Debug, Default)]
    struct LegendLog(Arc<Mutex<Vec<LegendCall>>>);

    impl LegendRenderer for LegendLog {
        fn render(
            &self,
            _surface: &mut dyn Surface,
            _spec: &LegendSpec,
            data: &[LegendDatum],
            width: f64,
            height: f64,
            theme: &Theme,
        ) {
            self.0.lock().unwrap().push(LegendCall {
                ids: data.iter().map(|d| d.id.to_string()).collect(),
                colors: data.iter().map(|d| d.color).collect(),
                width,
                height,
                font_size: theme.legends.font_size,
            });
        }
    }

    fn records(values: &[(&str, f64)]) -> Vec<Record> {
        values
            .iter()
            .map(|&(id, v)| Record::id_value(id, v))
            .collect()
    }

    #[test]
    fn prepare_runs_the_whole_pipeline() {
        let canvas = PieCanvas::new(
            PieConfig::new(220.0, 120.0)
                .with_margin(PartialMargin::uniform(10.0))
                .with_inner_radius_ratio(0.5),
        );
        let out = canvas.prepare(&records(&[("a", 30.0), ("b", 70.0)])).unwrap();
        assert_eq!(out.dimensions.inner_width, 200.0);
        assert_eq!(out.layout.center.radius, 50.0);
        assert_eq!(out.layout.center.inner_radius, 25.0);
        assert_eq!(out.layout.arcs.len(), 2);
        assert!((out.layout.arcs[0].end_angle - 0.6 * PI).abs() < 1e-9);
        let texts: Vec<_> = out.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["30", "70"]);
        assert_eq!(out.labels[0].color, Theme::default().labels.fill);
    }

    #[test]
    fn fit_never_grows_the_radius() {
        let config = PieConfig::new(200.0, 200.0).with_slice_labels_radius_offset(60.0);
        let data = records(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let plain = PieCanvas::new(config.clone()).prepare(&data).unwrap();
        let fitted = PieCanvas::new(config.with_fit(true)).prepare(&data).unwrap();
        assert!(fitted.layout.center.radius < plain.layout.center.radius);
        assert!(fitted.layout.center.radius >= 0.0);
    }

    #[test]
    fn abort_policy_surfaces_data_errors() {
        let canvas = PieCanvas::new(PieConfig::default().with_invalid(InvalidDataPolicy::Abort));
        let bad = [Record::id_value("a", "oops")];
        let err = canvas.prepare(&bad).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Data(DataError::InvalidValue { index: 0, .. })
        ));

        let lenient = PieCanvas::new(PieConfig::default());
        assert!(lenient.prepare(&bad).unwrap().slices.is_empty());
        let missing = [Record::id_value(Value::Null, 1)];
        assert!(lenient.prepare(&missing).unwrap().layout.is_empty());
    }

    #[test]
    fn all_zero_data_draws_background_only() {
        let canvas = PieCanvas::new(
            PieConfig::new(40.0, 30.0)
                .with_theme(Theme::default().with_background(css::WHITE))
                .with_legend(LegendSpec::default()),
        );
        let mut surface = RecordingSurface::new();
        let out = canvas
            .redraw(&mut surface, &records(&[("a", 0.0), ("b", 0.0)]))
            .unwrap();
        assert!(out.layout.is_empty());
        assert!(
            !surface
                .commands()
                .iter()
                .any(|c| matches!(c, Command::Fill { .. } | Command::Text { .. }))
        );
        assert!(surface.commands().contains(&Command::Clear(css::WHITE)));
    }

    #[test]
    fn custom_collaborators_are_used() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut canvas = PieCanvas::new(PieConfig::new(200.0, 160.0).with_margin(PartialMargin {
            left: Some(30.0),
            ..PartialMargin::default()
        }))
        .with_dimensions_provider(FixedMargins)
        .with_legend_renderer(LegendLog(Arc::clone(&calls)));
        canvas.config_mut().legends.push(LegendSpec::default());
        canvas.config_mut().theme = Theme::default().with_legends(TextTheme {
            font_size: 13.0,
            fill: css::NAVY,
        });
        assert_eq!(canvas.config().legends.len(), 1);

        let data = records(&[("a", 1.0), ("b", 3.0)]);
        let mut surface = RecordingSurface::new();
        let out = canvas.redraw(&mut surface, &data).unwrap();
        assert_eq!(out.dimensions.inner_width, 165.0);
        assert_eq!(out.dimensions.inner_height, 120.0);
        let first_translate = surface
            .commands()
            .iter()
            .find(|c| matches!(c, Command::Translate(..)));
        assert_eq!(first_translate, Some(&Command::Translate(30.0, 15.0)));

        let expected = LegendCall {
            ids: vec!["a".into(), "b".into()],
            colors: out.layout.arcs.iter().map(|a| a.color).collect(),
            width: 165.0,
            height: 120.0,
            font_size: 13.0,
        };
        assert_eq!(calls.lock().unwrap().as_slice(), [expected]);

        // A second frame logs the same calls again.
        let first = surface.commands().to_vec();
        surface.clear_log();
        assert!(surface.commands().is_empty());
        canvas.redraw(&mut surface, &data).unwrap();
        assert_eq!(surface.commands(), &first[..]);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn redraw_is_stable_across_calls() {
        let canvas = PieCanvas::new(
            PieConfig::new(80.0, 80.0)
                .with_pixel_ratio(2.0)
                .with_pad_angle(0.05)
                .with_corner_radius(3.0)
                .with_inner_radius_ratio(0.4)
                .with_colors(ColorSpec::Scheme(
                    [css::RED, css::GREEN, css::BLUE].as_slice().into(),
                ))
                .with_theme(Theme::default().with_background(css::WHITE)),
        );
        let data = records(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);
        let mut surface = PixmapSurface::new(1, 1).unwrap();
        canvas.redraw(&mut surface, &data).unwrap();
        let first = surface.pixmap().data().to_vec();
        canvas.redraw(&mut surface, &data).unwrap();
        assert_eq!(surface.pixmap().data(), &first[..]);
        assert_eq!((surface.width(), surface.height()), (160, 160));
        // Slice "a" spans 0..π minus padding, so it owns the right-hand side of the ring.
        assert_eq!(surface.pixel(80 + 50, 80), Some([255, 0, 0, 255]));
        // The donut hole shows the background.
        assert_eq!(surface.pixel(80, 80), Some([255, 255, 255, 255]));
    }
}
