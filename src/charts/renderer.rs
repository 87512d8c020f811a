//! Static Chart Renderer
//! Draws a dataset and chart configuration to an SVG document with plotters.
//!
//! Layout:
//! 1. Title centered at the top ("{y} by {x}" unless one is given)
//! 2. Cartesian kinds (bar, line, area, scatter, composed): category x axis,
//!    numeric y axis, horizontal grid
//! 3. Polar and stacked kinds (pie, doughnut, radar, radial bar, funnel):
//!    shapes drawn straight onto the drawing area with labels around them
//!
//! Empty data or an unset axis renders a placeholder instead of failing.

use crate::charts::{extract_series, polar, ChartConfig, ChartKind, SeriesPoint};
use crate::data::Dataset;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

/// Series colors, cycled per record.
pub const PALETTE: [RGBColor; 8] = [
    RGBColor(139, 92, 246),  // #8b5cf6
    RGBColor(192, 132, 252), // #c084fc
    RGBColor(167, 139, 250), // #a78bfa
    RGBColor(124, 58, 237),  // #7c3aed
    RGBColor(109, 40, 217),  // #6d28d9
    RGBColor(91, 33, 182),   // #5b21b6
    RGBColor(76, 29, 149),   // #4c1d95
    RGBColor(46, 16, 101),   // #2e1065
];

pub(crate) const ACCENT: RGBColor = RGBColor(124, 58, 237);
pub(crate) const AREA_FILL: RGBColor = RGBColor(196, 181, 253);
pub(crate) const GRID: RGBColor = RGBColor(233, 213, 255);
pub(crate) const AXIS: RGBColor = RGBColor(109, 40, 217);
pub(crate) const LABEL: RGBColor = RGBColor(55, 48, 80);
pub(crate) const MUTED: RGBColor = RGBColor(156, 163, 175);

pub(crate) const PLACEHOLDER_TEXT: &str = "No data to display";

const DEFAULT_WIDTH: u32 = 960;
const DEFAULT_HEIGHT: u32 = 540;
const MIN_WIDTH: u32 = 240;
const MIN_HEIGHT: u32 = 180;
const MAX_X_LABELS: usize = 24;
const BAR_GAP: u32 = 6;
const POINT_RADIUS: u32 = 4;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

/// Draws a dataset according to a chart configuration.
pub trait ChartRenderer {
    type Output;

    fn render(&self, dataset: &Dataset, config: &ChartConfig) -> Result<Self::Output, RenderError>;
}

/// Renders charts to SVG markup.
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    width: u32,
    height: u32,
    title: Option<String>,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SvgChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn title_for(&self, config: &ChartConfig) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} by {}", config.y_axis, config.x_axis))
    }
}

impl ChartRenderer for SvgChartRenderer {
    type Output = String;

    fn render(&self, dataset: &Dataset, config: &ChartConfig) -> Result<String, RenderError> {
        let series = extract_series(dataset, config);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE)?;

            if series.is_empty() {
                draw_placeholder(&root, PLACEHOLDER_TEXT)?;
            } else {
                let area = root.titled(
                    &self.title_for(config),
                    ("sans-serif", 22).into_font().color(&LABEL),
                )?;
                draw_kind(&area, config, &series)?;
            }
            root.present()?;
        }
        Ok(svg)
    }
}

pub(crate) fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

pub(crate) fn draw_placeholder<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    message: &str,
) -> Result<(), RenderError> {
    let (w, h) = area.dim_in_pixel();
    let style = ("sans-serif", 20)
        .into_font()
        .color(&MUTED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(message, (w as i32 / 2, h as i32 / 2), style))?;
    Ok(())
}

fn draw_kind<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    series: &[SeriesPoint],
) -> Result<(), RenderError> {
    if config.chart_kind.is_cartesian() {
        return draw_cartesian(area, config, series);
    }
    match config.chart_kind {
        ChartKind::Doughnut => polar::draw_pie(area, series, polar::DOUGHNUT_HOLE),
        ChartKind::Radar => polar::draw_radar(area, series),
        ChartKind::RadialBar => polar::draw_radial_bars(area, series),
        ChartKind::Funnel => polar::draw_funnel(area, series),
        _ => polar::draw_pie(area, series, 0.0),
    }
}

/// Y range that always contains zero, padded by a tenth of the span.
fn value_range(series: &[SeriesPoint]) -> (f64, f64) {
    let min = series.iter().map(|p| p.value).fold(0.0, f64::min);
    let max = series.iter().map(|p| p.value).fold(0.0, f64::max);
    let pad = if max > min { (max - min) * 0.1 } else { 1.0 };
    let lower = if min < 0.0 { min - pad } else { 0.0 };
    let upper = if max > 0.0 { max + pad } else { pad };
    (lower, upper)
}

fn centers(series: &[SeriesPoint]) -> impl Iterator<Item = (SegmentValue<usize>, f64)> + '_ {
    series
        .iter()
        .enumerate()
        .map(|(i, p)| (SegmentValue::CenterOf(i), p.value))
}

fn draw_cartesian<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    series: &[SeriesPoint],
) -> Result<(), RenderError> {
    let kind = config.chart_kind;
    let count = series.len();
    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    let (y_min, y_max) = value_range(series);

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..count).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(GRID)
        .axis_style(AXIS)
        .x_labels(count.min(MAX_X_LABELS))
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => labels.get(*i).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(config.x_axis.as_str())
        .y_desc(config.y_axis.as_str())
        .label_style(("sans-serif", 13).into_font().color(&LABEL))
        .draw()?;

    if matches!(kind, ChartKind::Area | ChartKind::Composed) {
        chart.draw_series(
            AreaSeries::new(centers(series), 0.0, AREA_FILL.mix(0.6))
                .border_style(ACCENT.stroke_width(2)),
        )?;
    }

    if matches!(kind, ChartKind::Bar | ChartKind::Composed) {
        let composed = kind == ChartKind::Composed;
        chart.draw_series(series.iter().enumerate().map(|(i, p)| {
            let color = if composed { ACCENT } else { palette_color(i) };
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), p.value)],
                color.filled(),
            );
            bar.set_margin(0, 0, BAR_GAP, BAR_GAP);
            bar
        }))?;
    }

    if matches!(kind, ChartKind::Line | ChartKind::Composed) {
        chart.draw_series(LineSeries::new(centers(series), PALETTE[6].stroke_width(3)))?;
    }

    if matches!(kind, ChartKind::Line | ChartKind::Scatter) {
        chart.draw_series(
            centers(series).map(|point| Circle::new(point, POINT_RADIUS, ACCENT.filled())),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, value: f64) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn test_value_range_contains_zero() {
        assert_eq!(value_range(&[point("a", 0.0)]), (0.0, 1.0));

        let (lo, hi) = value_range(&[point("a", 10.0), point("b", 20.0)]);
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);

        let (lo, hi) = value_range(&[point("a", -5.0), point("b", 5.0)]);
        assert!(lo < -5.0);
        assert!(hi > 5.0);
    }

    #[test]
    fn test_minimum_size_is_enforced() {
        assert_eq!(SvgChartRenderer::new(10, 10).size(), (MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
    }
}
