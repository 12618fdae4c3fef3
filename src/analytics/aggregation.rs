use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::Serialize;
use crate::models::ExpenseRecord;

pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Raw amounts in ledger order, the input of the distribution chart
pub fn histogram_input(records: &[ExpenseRecord]) -> Vec<f64> {
    records.iter().map(|r| r.amount).collect()
}

/// Buckets amounts into `bins` equal-width bins spanning [min, max].
///
/// The maximum value is counted in the last bin. When every amount is the
/// same there is no width to split, so a single bin holds them all.
pub fn histogram_bins(amounts: &[f64], bins: usize) -> Vec<HistogramBin> {
    if amounts.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = amounts.iter().copied().fold(f64::INFINITY, f64::min);
    let max = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max - min <= f64::EPSILON {
        return vec![HistogramBin { lower: min, upper: max, count: amounts.len() }];
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &amount in amounts {
        let index = (((amount - min) / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}

/// Total amount per sector. Labels are compared exactly, no case or
/// whitespace folding.
pub fn category_breakdown(records: &[ExpenseRecord]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.sector.clone()).or_insert(0.0) += record.amount;
    }
    totals
}

/// Total amount per calendar date, ascending by date
pub fn daily_trend(records: &[ExpenseRecord]) -> Vec<(NaiveDate, f64)> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.amount;
    }
    totals.into_iter().collect()
}
