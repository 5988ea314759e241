//! Plots a point stream onto the 0..3 annotated grid.

use std::path::Path;

use plotters::prelude::*;

use crate::chaos::{Point, PointStream};
use crate::error::{FernError, Result};

pub const DEFAULT_OUTPUT: &str = "barnsley_fern_fractal.png";

/// Affine placement applied to every point before plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl PostTransform {
    /// Uniform scale followed by a translation.
    pub fn scale_translate(scale: f64, dx: f64, dy: f64) -> Self {
        Self {
            a: scale,
            b: 0.0,
            c: 0.0,
            d: scale,
            e: dx,
            f: dy,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.e,
            self.c * x + self.d * y + self.f,
        )
    }
}

impl Default for PostTransform {
    /// Shrinks the fern into the 0..3 window, centred on x = 1.5.
    fn default() -> Self {
        PostTransform::scale_translate(0.15, 1.5, 0.5)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub placement: PostTransform,
    /// Upper limit of both axes; the lower limit is 0.
    pub extent: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            placement: PostTransform::default(),
            extent: 3.0,
        }
    }
}

impl RenderOptions {
    /// Placed points, ready for the chart coordinate system.
    pub fn place(&self, stream: &PointStream) -> Vec<Point> {
        stream
            .points()
            .map(|(x, y)| self.placement.apply(x, y))
            .collect()
    }

    /// Major label count: one per 0.1 along an axis, both ends included.
    pub fn label_count(&self) -> usize {
        (self.extent * 10.0).round() as usize + 1
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> FernError {
    FernError::Render(e.to_string())
}

/// Draws `stream` as black dots on a white grid and writes a PNG to `path`.
pub fn render_png(stream: &PointStream, path: &Path, options: &RenderOptions) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let extent = options.extent;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..extent, 0.0..extent)
        .map_err(render_err)?;

    let labels = options.label_count();
    chart
        .configure_mesh()
        .x_labels(labels)
        .y_labels(labels)
        .x_label_formatter(&|v: &f64| format!("{v:.1}"))
        .y_label_formatter(&|v: &f64| format!("{v:.1}"))
        .x_desc(format!("X Coordinate (0 to {extent})"))
        .y_desc(format!("Y Coordinate (0 to {extent})"))
        .axis_desc_style(("sans-serif", 16))
        .label_style(("sans-serif", 11))
        .bold_line_style(BLACK.mix(0.25))
        .light_line_style(BLACK.mix(0.08))
        .draw()
        .map_err(render_err)?;

    let reference = RED.mix(0.6).stroke_width(1);
    for axis in [[(0.0, 0.0), (extent, 0.0)], [(0.0, 0.0), (0.0, extent)]] {
        chart
            .draw_series(LineSeries::new(axis, reference))
            .map_err(render_err)?;
    }

    let dot = BLACK.mix(0.9).filled();
    chart
        .draw_series(
            options
                .place(stream)
                .into_iter()
                .filter(|&(x, y)| (0.0..=extent).contains(&x) && (0.0..=extent).contains(&y))
                .map(|p| Pixel::new(p, dot)),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    log::info!("wrote {} points to {}", stream.len(), path.display());
    Ok(())
}
