use chrono::{Datelike, Months, NaiveDate};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::ExpenseRecord;

pub const MIN_RECORDS: usize = 2;

#[derive(Error, Debug, PartialEq)]
pub enum ForecastError {
    #[error("Not enough data for prediction: {0} record(s), need at least 2")]
    InsufficientData(usize),

    #[error("Date out of range after {0}")]
    DateOutOfRange(NaiveDate),
}

/// How far the "next month" predictions reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NextMonthHorizon {
    /// Every real day of next month
    #[default]
    CalendarMonth,
    /// 31 consecutive days from the 1st of next month. Short months roll
    /// over into the month after, and those dates are predicted with their
    /// own day of month.
    ThirtyOneDays,
}

/// Least-squares line of amount against day of month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Fits the line over every record. Requires at least two records.
    ///
    /// If all records fall on the same day of month the slope is 0 and the
    /// intercept is the mean amount.
    pub fn fit(records: &[ExpenseRecord]) -> Result<Self, ForecastError> {
        let n = records.len();
        if n < MIN_RECORDS {
            return Err(ForecastError::InsufficientData(n));
        }

        let x = DVector::from_iterator(n, records.iter().map(|r| f64::from(r.date.day())));
        let y = DVector::from_iterator(n, records.iter().map(|r| r.amount));

        let x_mean = x.mean();
        let y_mean = y.mean();
        let x_centered = x.add_scalar(-x_mean);
        let y_centered = y.add_scalar(-y_mean);

        let sxx = x_centered.dot(&x_centered);
        let slope = if sxx.abs() < f64::EPSILON {
            0.0
        } else {
            x_centered.dot(&y_centered) / sxx
        };

        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn predict(&self, day_of_month: u32) -> f64 {
        self.intercept + self.slope * f64::from(day_of_month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub amount: f64,  // rounded to 2 decimals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub model: LinearModel,
    pub remaining_days: Vec<Prediction>,
    pub next_month: Vec<Prediction>,
}

/// Fits the ledger and predicts the rest of this month and the next one.
///
/// `today` is passed in so the same ledger and date always give the same
/// output.
pub fn forecast(
    records: &[ExpenseRecord],
    today: NaiveDate,
    horizon: NextMonthHorizon,
) -> Result<Forecast, ForecastError> {
    let model = LinearModel::fit(records)?;

    let next_month_start = first_of_next_month(today)?;
    let following_month_start = first_of_next_month(next_month_start)?;

    let remaining: Vec<NaiveDate> = today
        .iter_days()
        .skip(1)
        .take_while(|d| *d < next_month_start)
        .collect();

    let next_month: Vec<NaiveDate> = match horizon {
        NextMonthHorizon::CalendarMonth => next_month_start
            .iter_days()
            .take_while(|d| *d < following_month_start)
            .collect(),
        NextMonthHorizon::ThirtyOneDays => next_month_start.iter_days().take(31).collect(),
    };

    tracing::debug!(
        "Forecast fitted: slope={:.4} intercept={:.4}, {} remaining day(s), {} next month day(s)",
        model.slope,
        model.intercept,
        remaining.len(),
        next_month.len()
    );

    Ok(Forecast {
        model,
        remaining_days: predict_dates(&model, &remaining),
        next_month: predict_dates(&model, &next_month),
    })
}

fn predict_dates(model: &LinearModel, dates: &[NaiveDate]) -> Vec<Prediction> {
    dates
        .iter()
        .map(|&date| Prediction {
            date,
            amount: round_cents(model.predict(date.day())),
        })
        .collect()
}

fn first_of_next_month(date: NaiveDate) -> Result<NaiveDate, ForecastError> {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .ok_or(ForecastError::DateOutOfRange(date))
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(day: u32, amount: f64) -> ExpenseRecord {
        ExpenseRecord::new(ymd(2026, 9, day), "Food", amount)
    }

    fn linear_ledger() -> Vec<ExpenseRecord> {
        vec![record(1, 10.0), record(2, 20.0), record(3, 30.0)]
    }

    #[test]
    fn test_fit_perfect_line() {
        let model = LinearModel::fit(&linear_ledger()).unwrap();
        assert!((model.slope - 10.0).abs() < 1e-9);
        assert!(model.intercept.abs() < 1e-9);
        assert!((model.predict(4) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(LinearModel::fit(&[]), Err(ForecastError::InsufficientData(0)));

        let result = forecast(&[record(5, 12.0)], ymd(2026, 10, 19), NextMonthHorizon::CalendarMonth);
        assert_eq!(result, Err(ForecastError::InsufficientData(1)));
    }

    #[test]
    fn test_same_day_records_predict_mean() {
        let records = vec![record(7, 10.0), record(7, 30.0)];
        let model = LinearModel::fit(&records).unwrap();
        assert_eq!(model.slope, 0.0);
        assert!((model.predict(28) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_noisy_data() {
        let records = vec![record(1, 4.0), record(2, 4.0), record(3, 8.0), record(4, 8.0)];
        let model = LinearModel::fit(&records).unwrap();
        assert!((model.slope - 1.6).abs() < 1e-9);
        assert!((model.intercept - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let today = ymd(2026, 10, 19);
        let first = forecast(&linear_ledger(), today, NextMonthHorizon::CalendarMonth).unwrap();
        let second = forecast(&linear_ledger(), today, NextMonthHorizon::CalendarMonth).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remaining_days_run_to_month_end() {
        // November 2026 has 30 days
        let result = forecast(&linear_ledger(), ymd(2026, 11, 10), NextMonthHorizon::CalendarMonth).unwrap();
        assert_eq!(result.remaining_days.len(), 20);
        assert_eq!(result.remaining_days.first().unwrap().date, ymd(2026, 11, 11));
        assert_eq!(result.remaining_days.last().unwrap().date, ymd(2026, 11, 30));
        assert_eq!(result.remaining_days[0].amount, 110.0);
    }

    #[test]
    fn test_no_remaining_days_on_last_day() {
        let result = forecast(&linear_ledger(), ymd(2026, 10, 31), NextMonthHorizon::CalendarMonth).unwrap();
        assert!(result.remaining_days.is_empty());
        assert_eq!(result.next_month.len(), 30);
    }

    #[test]
    fn test_calendar_month_horizon_uses_real_days() {
        let result = forecast(&linear_ledger(), ymd(2026, 10, 19), NextMonthHorizon::CalendarMonth).unwrap();
        assert_eq!(result.next_month.len(), 30);
        assert_eq!(result.next_month.first().unwrap().date, ymd(2026, 11, 1));
        assert_eq!(result.next_month.last().unwrap().date, ymd(2026, 11, 30));
        assert_eq!(result.next_month.last().unwrap().amount, 300.0);

        let leap = forecast(&linear_ledger(), ymd(2028, 1, 15), NextMonthHorizon::CalendarMonth).unwrap();
        assert_eq!(leap.next_month.len(), 29);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let result = forecast(&linear_ledger(), ymd(2026, 12, 30), NextMonthHorizon::CalendarMonth).unwrap();
        assert_eq!(result.remaining_days.len(), 1);
        assert_eq!(result.next_month.first().unwrap().date, ymd(2027, 1, 1));
        assert_eq!(result.next_month.len(), 31);
    }

    // Known discrepancy: the 31-day horizon runs past the end of a 30-day
    // month. The extra date is the 1st of the month after, predicted as day 1.
    #[test]
    fn test_thirty_one_day_horizon_rolls_past_short_month() {
        let result = forecast(&linear_ledger(), ymd(2026, 10, 19), NextMonthHorizon::ThirtyOneDays).unwrap();
        assert_eq!(result.next_month.len(), 31);
        let last = result.next_month.last().unwrap();
        assert_eq!(last.date, ymd(2026, 12, 1));
        assert_eq!(last.amount, 10.0);
    }

    #[test]
    fn test_predictions_rounded_to_cents() {
        let records = vec![record(1, 10.0), record(2, 10.0), record(3, 10.005), record(4, 13.333)];
        let result = forecast(&records, ymd(2026, 10, 29), NextMonthHorizon::CalendarMonth).unwrap();
        for prediction in result.remaining_days.iter().chain(result.next_month.iter()) {
            assert_eq!(prediction.amount, round_cents(prediction.amount));
        }
        assert_eq!(round_cents(2.345678), 2.35);
        assert_eq!(round_cents(-1.004), -1.0);
    }
}
