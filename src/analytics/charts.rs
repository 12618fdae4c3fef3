use std::collections::BTreeMap;
use std::fmt::Display;
use chrono::{Duration, NaiveDate};
use plotters::element::Pie;
use plotters::prelude::*;
use thiserror::Error;
use super::aggregation::HistogramBin;
use crate::i18n::{translate, Language};

const SIZE: (u32, u32) = (720, 420);
const PRIMARY: RGBColor = RGBColor(102, 126, 234);

// Pastel palette in the spirit of matplotlib's Set3
const PALETTE: [RGBColor; 8] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to chart")]
    NoData,

    #[error("Chart rendering failed: {0}")]
    Drawing(String),
}

pub type ChartResult<T> = Result<T, ChartError>;

fn drawing_error(e: impl Display) -> ChartError {
    ChartError::Drawing(e.to_string())
}

/// Bar chart of the amount distribution, rendered as an SVG document
pub fn render_histogram(bins: &[HistogramBin], language: Language) -> ChartResult<String> {
    let (first, last) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ChartError::NoData),
    };

    // A single-value histogram has no width, give it one unit
    let (x_min, x_max) = if last.upper - first.lower < f64::EPSILON {
        (first.lower - 0.5, last.upper + 0.5)
    } else {
        (first.lower, last.upper)
    };
    let y_max = bins.iter().map(|b| b.count as u32).max().unwrap_or(0) + 1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(translate(language, "Expense Distribution"), ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0u32..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc(translate(language, "Expense Amount"))
            .y_desc(translate(language, "Frequency"))
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(bins.iter().map(|bin| {
                let (lower, upper) = if bin.upper - bin.lower < f64::EPSILON {
                    (x_min, x_max)
                } else {
                    (bin.lower, bin.upper)
                };
                Rectangle::new([(lower, 0), (upper, bin.count as u32)], PRIMARY.filled())
            }))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    Ok(svg)
}

/// Pie chart of totals per sector with percentage labels
pub fn render_category_pie(breakdown: &BTreeMap<String, f64>, language: Language) -> ChartResult<String> {
    let total: f64 = breakdown.values().sum();
    if breakdown.is_empty() || total <= 0.0 {
        return Err(ChartError::NoData);
    }

    let sizes: Vec<f64> = breakdown.values().copied().collect();
    let labels: Vec<String> = breakdown.keys().cloned().collect();
    let colors: Vec<RGBColor> = (0..sizes.len()).map(|i| PALETTE[i % PALETTE.len()]).collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        let area = root
            .titled(translate(language, "Expenses by Sector"), ("sans-serif", 20))
            .map_err(drawing_error)?;

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.38;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 12).into_font().color(&BLACK));
        area.draw(&pie).map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    Ok(svg)
}

/// Line chart of total spend per date
pub fn render_daily_trend(trend: &[(NaiveDate, f64)], language: Language) -> ChartResult<String> {
    let first_date = match trend.first() {
        Some((date, _)) => *date,
        None => return Err(ChartError::NoData),
    };

    // x is the number of days since the first recorded date
    let points: Vec<(f64, f64)> = trend
        .iter()
        .map(|(date, amount)| ((*date - first_date).num_days() as f64, *amount))
        .collect();
    let x_max = points.last().map_or(0.0, |p| p.0).max(1.0);
    let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max).max(1.0) * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(translate(language, "Daily Expense Trends"), ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..x_max + 0.5, 0.0..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc(translate(language, "Date"))
            .y_desc(translate(language, "Total Expense"))
            .x_labels(6)
            .x_label_formatter(&|x| {
                (first_date + Duration::days(x.round() as i64)).format("%m/%d").to_string()
            })
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), PRIMARY.stroke_width(2)))
            .map_err(drawing_error)?;
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 4, PRIMARY.filled())))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    Ok(svg)
}
