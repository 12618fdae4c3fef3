use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn new(date: NaiveDate, sector: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            sector: sector.into(),
            amount,
        }
    }
}
