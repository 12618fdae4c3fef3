use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use csv::{Reader, Writer};
use crate::errors::{StoreError, StoreResult};
use crate::models::ExpenseRecord;

const HEADER: [&str; 3] = ["Date", "Sector", "Amount"];

/// Sum of every recorded amount, 0 for an empty ledger
pub fn total_spent(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Expense table persisted as CSV. Rows keep insertion order.
#[derive(Clone, Debug)]
pub struct ExpenseLedger {
    path: PathBuf,
}

impl ExpenseLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_exists(&self) -> StoreResult<()> {
        if !self.path.exists() {
            tracing::info!("Creating expenses file: {}", self.path.display());
            self.write_records(&[])?;
        }
        Ok(())
    }

    pub fn all(&self) -> StoreResult<Vec<ExpenseRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));

        reader
            .deserialize::<ExpenseRecord>()
            .map(|row| {
                let record = row.map_err(|e| StoreError::Malformed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;
                if !record.amount.is_finite() || record.amount < 0.0 {
                    return Err(StoreError::Malformed {
                        path: self.path.clone(),
                        reason: format!("amount {} on {} is not a non-negative number", record.amount, record.date),
                    });
                }
                Ok(record)
            })
            .collect()
    }

    pub fn append(&self, date: NaiveDate, sector: &str, amount: f64) -> StoreResult<ExpenseRecord> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(StoreError::InvalidAmount(amount));
        }

        let mut records = self.all()?;
        let record = ExpenseRecord::new(date, sector, amount);
        records.push(record.clone());
        self.write_records(&records)?;

        tracing::debug!("Appended expense {} {} {:.2}", date, sector, amount);
        Ok(record)
    }

    /// Drops every record, leaving a header-only file
    pub fn clear(&self) -> StoreResult<()> {
        self.write_records(&[])?;
        tracing::info!("Cleared expense ledger");
        Ok(())
    }

    fn write_records(&self, records: &[ExpenseRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut writer = Writer::from_writer(BufWriter::new(file));

        if records.is_empty() {
            writer.write_record(HEADER)?;
        }
        for record in records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}
