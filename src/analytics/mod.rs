pub mod aggregation;
pub mod charts;
pub mod forecast;

pub use aggregation::{category_breakdown, daily_trend, histogram_bins, histogram_input, HistogramBin, DEFAULT_HISTOGRAM_BINS};
pub use charts::{render_category_pie, render_daily_trend, render_histogram, ChartError};
pub use forecast::{forecast, Forecast, NextMonthHorizon, Prediction};
