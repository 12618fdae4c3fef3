use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::{StoreError, StoreResult};

/// Single salary value kept in a plain text file
#[derive(Clone, Debug)]
pub struct SalaryStore {
    path: PathBuf,
}

impl SalaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_exists(&self) -> StoreResult<()> {
        if !self.path.exists() {
            tracing::info!("Creating salary file: {}", self.path.display());
            self.set(0.0)?;
        }
        Ok(())
    }

    /// Current salary, 0 when nothing has been saved yet
    pub fn get(&self) -> StoreResult<f64> {
        if !self.path.exists() {
            return Ok(0.0);
        }

        let contents = fs::read_to_string(&self.path)?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }

        let salary = trimmed.parse::<f64>().map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: format!("salary '{}' is not a number: {}", trimmed, e),
        })?;

        if !salary.is_finite() || salary < 0.0 {
            return Err(StoreError::Malformed {
                path: self.path.clone(),
                reason: format!("salary '{}' is not a non-negative number", trimmed),
            });
        }
        Ok(salary)
    }

    pub fn set(&self, amount: f64) -> StoreResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(StoreError::InvalidAmount(amount));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, amount.to_string())?;

        tracing::debug!("Saved salary {:.2}", amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = SalaryStore::new(dir.path().join("salary.txt"));
        assert_eq!(store.get().unwrap(), 0.0);

        store.ensure_exists().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "0");
        assert_eq!(store.get().unwrap(), 0.0);
    }

    #[test]
    fn test_set_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = SalaryStore::new(dir.path().join("salary.txt"));
        store.set(1000.0).unwrap();
        store.set(2500.75).unwrap();
        assert_eq!(store.get().unwrap(), 2500.75);
    }

    #[test]
    fn test_negative_salary_rejected() {
        let dir = TempDir::new().unwrap();
        let store = SalaryStore::new(dir.path().join("salary.txt"));
        store.set(10.0).unwrap();
        assert!(matches!(store.set(-1.0), Err(StoreError::InvalidAmount(_))));
        assert_eq!(store.get().unwrap(), 10.0);
    }

    #[test]
    fn test_garbage_file_is_malformed_error() {
        let dir = TempDir::new().unwrap();
        let store = SalaryStore::new(dir.path().join("salary.txt"));
        fs::write(store.path(), "ten thousand").unwrap();
        assert!(matches!(store.get(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_non_finite_or_negative_file_is_malformed_error() {
        let dir = TempDir::new().unwrap();
        let store = SalaryStore::new(dir.path().join("salary.txt"));
        for contents in ["NaN", "inf", "-infinity", "-250"] {
            fs::write(store.path(), contents).unwrap();
            assert!(matches!(store.get(), Err(StoreError::Malformed { .. })), "accepted {}", contents);
        }
    }

    #[test]
    fn test_reads_float_written_by_other_tools() {
        let dir = TempDir::new().unwrap();
        let store = SalaryStore::new(dir.path().join("salary.txt"));
        fs::write(store.path(), "45000.0\n").unwrap();
        assert_eq!(store.get().unwrap(), 45000.0);
    }
}
