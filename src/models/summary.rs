use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::Serialize;
use crate::analytics::{Forecast, HistogramBin};
use super::ExpenseRecord;

/// Everything the dashboard shows, computed from one load of the data files
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub salary: f64,
    pub total_spent: f64,
    pub balance: f64,
    pub records: Vec<ExpenseRecord>,
    pub amounts: Vec<f64>,
    pub histogram: Vec<HistogramBin>,
    pub category_breakdown: BTreeMap<String, f64>,
    pub daily_trend: Vec<(NaiveDate, f64)>,
    pub forecast: Option<Forecast>,
    pub forecast_warning: Option<String>,
}
