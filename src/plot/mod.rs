//! # Plot Module
//!
//! PNG rendering of run results with `plotters`:
//!
//! - [`render_resistance`]: resistance samples as a scatter plus the fitted line,
//!   annotated with the resistance and intercept.
//! - [`render_curves`]: charge (left panel) and discharge (right panel) curves,
//!   one line per requested cycle.
//!
//! Text rendering uses the system `sans-serif` font.

mod error;


use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

use crate::analysis::{LinearFit, NamedSeries, ResistanceSample, SERIES_PER_CYCLE};

pub use error::PlotError;

/// The fitted line is drawn at least up to this current (μA)
pub const MIN_FIT_LINE_END: f64 = 50.0;

const FONT: &str = "sans-serif";

/// Canvas size, font size and per-cycle colours
#[derive(Clone, Debug)]
pub struct PlotStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Label font size in pixels
    pub font_size: f64,
    /// Line colour per cycle position
    pub palette: Vec<RGBColor>,
}

impl PlotStyle {
    /// Style for the resistance plot
    pub fn resistance() -> Self {
        Self {
            width: 800,
            height: 600,
            ..Self::default()
        }
    }

    /// Style for the two-panel curve plot
    pub fn curves() -> Self {
        Self {
            width: 1400,
            height: 450,
            ..Self::default()
        }
    }

    fn font(&self) -> FontDesc<'static> {
        (FONT, self.font_size).into_font()
    }

    fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            BLACK
        } else {
            self.palette[index % self.palette.len()]
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            font_size: 18.0,
            palette: vec![
                RGBColor(255, 0, 0),
                RGBColor(255, 99, 71),
                RGBColor(0, 250, 154),
                RGBColor(135, 206, 235),
                RGBColor(0, 0, 205),
                RGBColor(255, 165, 0),
                RGBColor(255, 218, 185),
                RGBColor(128, 128, 0),
                RGBColor(34, 139, 34),
            ],
        }
    }
}

/// English ordinal of `n`: 1st, 2nd, 3rd, 4th, 11th, 21st, ...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Legend label of a cycle
pub fn cycle_label(cycle: u32) -> String {
    format!("{} cycle", ordinal(cycle))
}

/// Right end of the fitted line: the largest current, but at least [`MIN_FIT_LINE_END`]
pub fn fit_line_end(samples: &[ResistanceSample]) -> f64 {
    samples
        .iter()
        .map(|s| s.current)
        .fold(MIN_FIT_LINE_END, f64::max)
}

/// Axis range covering every finite value with a 5% margin
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span < f64::EPSILON { 0.5 } else { span * 0.05 };
    (min - pad)..(max + pad)
}

/// Render the resistance scatter and fitted line to a PNG file
pub fn render_resistance<P: AsRef<Path>>(
    path: P,
    samples: &[ResistanceSample],
    fit: &LinearFit,
    style: &PlotStyle,
) -> Result<(), PlotError> {
    if samples.is_empty() {
        return Err(PlotError::NoData("no resistance samples".into()));
    }

    let end = fit_line_end(samples);
    let line = [(0.0, fit.intercept), (end, fit.predict(end))];
    let y_range = padded_range(
        samples
            .iter()
            .map(|s| s.voltage_drop)
            .chain(line.iter().map(|p| p.1)),
    );
    let y_span = y_range.end - y_range.start;

    let root = BitMapBackend::new(path.as_ref(), (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..end * 1.05, y_range.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("I (μA)")
        .y_desc("ΔV (mV)")
        .label_style(style.font())
        .draw()?;

    chart.draw_series(
        samples
            .iter()
            .map(|s| Circle::new((s.current, s.voltage_drop), 4, BLACK.filled())),
    )?;
    chart.draw_series(LineSeries::new(line, &BLUE))?;

    let text_x = end * 0.02;
    let text_y = y_range.end - y_span * 0.08;
    chart.draw_series([
        Text::new(
            format!("Rin: {:.3} (kΩ)", fit.slope),
            (text_x, text_y),
            style.font(),
        ),
        Text::new(
            format!("segment: {:.3} (mV)", fit.intercept),
            (text_x, text_y - y_span * 0.07),
            style.font(),
        ),
    ])?;

    root.present()?;
    Ok(())
}

/// Render charge and discharge curves side by side to a PNG file
///
/// `series` is the aggregator output for `cycles`, [`SERIES_PER_CYCLE`] series
/// per cycle.
pub fn render_curves<P: AsRef<Path>>(
    path: P,
    series: &[NamedSeries],
    cycles: &[u32],
    style: &PlotStyle,
) -> Result<(), PlotError> {
    let blocks: Vec<(u32, &[NamedSeries])> = cycles
        .iter()
        .copied()
        .zip(series.chunks(SERIES_PER_CYCLE))
        .collect();
    if blocks
        .iter()
        .all(|(_, block)| block.iter().all(NamedSeries::is_empty))
    {
        return Err(PlotError::NoData("every curve series is empty".into()));
    }

    let root = BitMapBackend::new(path.as_ref(), (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally((style.width / 2) as i32);

    draw_curve_panel(&left, &blocks, 0, "Charge", style, false)?;
    draw_curve_panel(&right, &blocks, 2, "Discharge", style, true)?;

    root.present()?;
    Ok(())
}

fn draw_curve_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    blocks: &[(u32, &[NamedSeries])],
    offset: usize,
    title: &str,
    style: &PlotStyle,
    legend: bool,
) -> Result<(), PlotError> {
    let curves: Vec<(usize, u32, Vec<(f64, f64)>)> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, (cycle, block))| {
            let capacity = block.get(offset)?;
            let voltage = block.get(offset + 1)?;
            let points = capacity
                .data()
                .iter()
                .copied()
                .zip(voltage.data().iter().copied())
                .collect();
            Some((index, *cycle, points))
        })
        .collect();

    let x_range = padded_range(curves.iter().flat_map(|c| c.2.iter().map(|p| p.0)));
    let y_range = padded_range(curves.iter().flat_map(|c| c.2.iter().map(|p| p.1)));

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .caption(title, style.font())
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Capacity (mAh/g)")
        .y_desc("V (V vs. Ag/AgCl)")
        .label_style(style.font())
        .draw()?;

    for (index, cycle, points) in curves {
        let color = style.color(index);
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(cycle_label(cycle))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if legend {
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()?;
    }

    Ok(())
}
