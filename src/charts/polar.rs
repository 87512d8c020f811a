//! Polar and stacked chart drawing: pie, doughnut, radar, radial bars, funnel.
//!
//! These kinds have no cartesian mesh, so they are drawn from primitives in
//! pixel coordinates. Angles start at twelve o'clock and run clockwise.

use crate::charts::renderer::{
    draw_placeholder, palette_color, RenderError, ACCENT, GRID, LABEL, PALETTE,
};
use crate::charts::SeriesPoint;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Inner radius of a doughnut, as a share of the outer radius.
pub(crate) const DOUGHNUT_HOLE: f64 = 0.6;

const ARC_STEP: f64 = TAU / 180.0;
const LABEL_MARGIN: f64 = 60.0;
const RADAR_RINGS: usize = 4;

type Point = (i32, i32);

fn frame<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> (Point, f64) {
    let (w, h) = area.dim_in_pixel();
    let radius = (w.min(h) as f64 / 2.0 - LABEL_MARGIN).max(20.0);
    ((w as i32 / 2, h as i32 / 2), radius)
}

fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    let theta = angle - FRAC_PI_2;
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 + (radius * theta.sin()).round() as i32,
    )
}

fn arc(center: Point, radius: f64, start: f64, end: f64) -> Vec<Point> {
    let steps = (((end - start) / ARC_STEP).ceil() as usize).max(1);
    (0..=steps)
        .map(|s| point_at(center, radius, start + (end - start) * s as f64 / steps as f64))
        .collect()
}

/// Anchor labels away from the center depending on which side they sit.
fn side_anchor(angle: f64) -> Pos {
    let side = angle.sin();
    let h = if side > 0.05 {
        HPos::Left
    } else if side < -0.05 {
        HPos::Right
    } else {
        HPos::Center
    };
    Pos::new(h, VPos::Center)
}

fn label_style(pos: Pos) -> TextStyle<'static> {
    ("sans-serif", 13).into_font().color(&LABEL).pos(pos)
}

fn max_magnitude(series: &[SeriesPoint]) -> f64 {
    let max = series.iter().map(|p| p.value.abs()).fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn format_value(value: f64) -> String {
    format!("{}", value)
}

pub(crate) fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &[SeriesPoint],
    hole: f64,
) -> Result<(), RenderError> {
    let (center, radius) = frame(area);
    let total: f64 = series.iter().map(|p| p.value.abs()).sum();
    if total <= 0.0 {
        return draw_placeholder(area, "All values are zero");
    }

    let mut start = 0.0;
    for (i, point) in series.iter().enumerate() {
        let share = point.value.abs() / total;
        if share <= 0.0 {
            continue;
        }
        let end = start + share * TAU;

        let mut wedge = vec![center];
        wedge.extend(arc(center, radius, start, end));
        area.draw(&Polygon::new(wedge, palette_color(i).filled()))?;

        let mid = (start + end) / 2.0;
        area.draw(&Text::new(
            format!("{}: {:.0}%", point.label, share * 100.0),
            point_at(center, radius + 12.0, mid),
            label_style(side_anchor(mid)),
        ))?;
        start = end;
    }

    if hole > 0.0 {
        area.draw(&Circle::new(center, (radius * hole) as u32, WHITE.filled()))?;
    }
    Ok(())
}

pub(crate) fn draw_radar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &[SeriesPoint],
) -> Result<(), RenderError> {
    let (center, radius) = frame(area);
    let count = series.len();
    let step = TAU / count as f64;
    let max = max_magnitude(series);

    for ring in 1..=RADAR_RINGS {
        let r = radius * ring as f64 / RADAR_RINGS as f64;
        let outline = if count >= 3 {
            let mut outline: Vec<Point> = (0..count)
                .map(|i| point_at(center, r, i as f64 * step))
                .collect();
            outline.push(outline[0]);
            outline
        } else {
            arc(center, r, 0.0, TAU)
        };
        area.draw(&PathElement::new(outline, GRID.stroke_width(1)))?;
    }

    for (i, point) in series.iter().enumerate() {
        let angle = i as f64 * step;
        area.draw(&PathElement::new(
            vec![center, point_at(center, radius, angle)],
            GRID.stroke_width(1),
        ))?;
        area.draw(&Text::new(
            point.label.clone(),
            point_at(center, radius + 12.0, angle),
            label_style(side_anchor(angle)),
        ))?;
    }

    let shape: Vec<Point> = series
        .iter()
        .enumerate()
        .map(|(i, p)| point_at(center, radius * p.value.max(0.0) / max, i as f64 * step))
        .collect();
    area.draw(&Polygon::new(shape.clone(), PALETTE[0].mix(0.6).filled()))?;

    let mut border = shape;
    if let Some(first) = border.first().copied() {
        border.push(first);
    }
    area.draw(&PathElement::new(border, ACCENT.stroke_width(2)))?;
    Ok(())
}

pub(crate) fn draw_radial_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &[SeriesPoint],
) -> Result<(), RenderError> {
    let (center, radius) = frame(area);
    let inner = radius * 0.15;
    let band = (radius - inner) / series.len() as f64;
    let thickness = ((band * 0.7).round() as u32).max(1);
    let max = max_magnitude(series);

    for (i, point) in series.iter().enumerate() {
        let r = inner + band * (i as f64 + 0.5);
        area.draw(&PathElement::new(
            arc(center, r, 0.0, TAU),
            GRID.stroke_width(thickness),
        ))?;

        let sweep = point.value.abs() / max * TAU;
        if sweep > 0.0 {
            area.draw(&PathElement::new(
                arc(center, r, 0.0, sweep),
                palette_color(i).stroke_width(thickness),
            ))?;
        }

        let (x, y) = point_at(center, r, 0.0);
        area.draw(&Text::new(
            format!("{} ({})", point.label, format_value(point.value)),
            (x - 8, y),
            label_style(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }
    Ok(())
}

pub(crate) fn draw_funnel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &[SeriesPoint],
) -> Result<(), RenderError> {
    let (w, h) = area.dim_in_pixel();
    let max = max_magnitude(series);
    let full_width = w as f64 * 0.55;
    let cx = w as f64 * 0.4;
    let top = 20.0;
    let level = (h as f64 - 2.0 * top) / series.len() as f64;

    let widths: Vec<f64> = series
        .iter()
        .map(|p| p.value.abs() / max * full_width)
        .collect();

    for (i, point) in series.iter().enumerate() {
        let upper = widths[i];
        let lower = widths.get(i + 1).copied().unwrap_or(upper);
        let y0 = top + level * i as f64;
        let y1 = y0 + level;

        let shape = vec![
            ((cx - upper / 2.0) as i32, y0 as i32),
            ((cx + upper / 2.0) as i32, y0 as i32),
            ((cx + lower / 2.0) as i32, y1 as i32),
            ((cx - lower / 2.0) as i32, y1 as i32),
        ];
        area.draw(&Polygon::new(shape, palette_color(i).filled()))?;

        area.draw(&Text::new(
            format!("{}: {}", point.label, format_value(point.value)),
            ((cx + full_width / 2.0 + 16.0) as i32, ((y0 + y1) / 2.0) as i32),
            label_style(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_starts_at_twelve_o_clock() {
        assert_eq!(point_at((100, 100), 50.0, 0.0), (100, 50));
        assert_eq!(point_at((100, 100), 50.0, TAU / 4.0), (150, 100));
        assert_eq!(point_at((100, 100), 50.0, TAU / 2.0), (100, 150));
    }

    #[test]
    fn test_arc_closes_on_both_ends() {
        let points = arc((0, 0), 10.0, 0.0, TAU);
        assert_eq!(points.first(), points.last());
        assert!(points.len() > 90);
    }
}
