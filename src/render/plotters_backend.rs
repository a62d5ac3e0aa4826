//! PNG chart backend built on [`plotters`]
//!
//! Uses the bitmap backend so charts can be produced in headless environments.

use crate::render::chart_model::{ChartModel, LabelAnchor, LayerShape, Rgb, YAxis};
use crate::render::ChartBackend;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
const FINE_GRID_COLOR: RGBColor = RGBColor(240, 240, 240);

/// Draws a [`ChartModel`] to an image file with the bitmap backend
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersBackend;

fn rgb((r, g, b): Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

fn whole_number(v: &f64) -> String {
    format!("{:.0}", v)
}

fn percent(fraction: &f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

impl ChartBackend for PlottersBackend {
    fn draw(&self, chart: &ChartModel, output: &Path) -> Result<(), String> {
        let root = BitMapBackend::new(output, (chart.width, chart.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let x_range = chart.x_window.lower..chart.x_window.upper;
        let y_range = chart.y_window.lower..chart.y_window.upper;
        let mut context = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| e.to_string())?;

        let mut mesh = context.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style(("sans-serif", 16))
            .bold_line_style(GRID_COLOR)
            .light_line_style(FINE_GRID_COLOR)
            .x_label_formatter(&whole_number);
        match chart.y_axis {
            YAxis::Fraction => mesh.y_label_formatter(&percent),
            YAxis::Count => mesh.y_label_formatter(&whole_number),
        };
        mesh.draw().map_err(|e| e.to_string())?;

        for layer in &chart.layers {
            let color = rgb(layer.color);
            match &layer.shape {
                LayerShape::Steps(points) => {
                    context
                        .draw_series(LineSeries::new(
                            points.iter().copied(),
                            color.stroke_width(2),
                        ))
                        .map_err(|e| e.to_string())?
                        .label(layer.name.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
                LayerShape::Bars(bins) => {
                    let (y_lo, y_hi) = (chart.y_window.lower, chart.y_window.upper);
                    let (x_lo, x_hi) = (chart.x_window.lower, chart.x_window.upper);
                    context
                        .draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
                            let left = b.start.clamp(x_lo, x_hi);
                            let right = b.end.clamp(x_lo, x_hi);
                            let top = (b.count as f64).clamp(y_lo, y_hi);
                            Rectangle::new([(left, y_lo), (right, top)], color.mix(0.5).filled())
                        }))
                        .map_err(|e| e.to_string())?
                        .label(layer.name.as_str())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.5).filled())
                        });
                }
            }
        }

        for marker in &chart.markers {
            let color = rgb(marker.color);
            context
                .draw_series(LineSeries::new(
                    [(marker.x, chart.y_window.lower), (marker.x, chart.y_window.upper)],
                    color.mix(0.7).stroke_width(1),
                ))
                .map_err(|e| e.to_string())?;

            let pos = match marker.anchor {
                LabelAnchor::Right => Pos::new(HPos::Right, VPos::Bottom),
                LabelAnchor::Left => Pos::new(HPos::Left, VPos::Top),
            };
            let style = ("sans-serif", 13).into_font().color(&color).pos(pos);
            context
                .draw_series(std::iter::once(Text::new(
                    marker.label.clone(),
                    (marker.x, marker.label_y),
                    style,
                )))
                .map_err(|e| e.to_string())?;
        }

        context
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .label_font(("sans-serif", 16))
            .draw()
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
        Ok(())
    }
}
