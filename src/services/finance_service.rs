use std::sync::{Arc, Mutex, MutexGuard};
use chrono::NaiveDate;
use crate::analytics::{self, NextMonthHorizon, DEFAULT_HISTOGRAM_BINS};
use crate::config::StorageConfig;
use crate::errors::{StoreError, StoreResult};
use crate::models::{Account, DashboardSummary, ExpenseRecord};
use super::expense_ledger::total_spent;
use super::{CredentialStore, ExpenseLedger, SalaryStore};

/// Salary minus total expenses. Negative balances are reported as is.
pub fn balance(salary: f64, total_spent: f64) -> f64 {
    salary - total_spent
}

/// Shared handle over the accounts, expense and salary files.
///
/// Expenses and salary are global: every account reads and writes the same
/// ledger. Each operation holds the lock for its whole read-modify-write so
/// concurrent requests in this process cannot interleave file rewrites.
pub struct FinanceService {
    credentials: CredentialStore,
    ledger: ExpenseLedger,
    salary: SalaryStore,
    lock: Arc<Mutex<()>>,
}

impl FinanceService {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            credentials: CredentialStore::new(storage.users_path()),
            ledger: ExpenseLedger::new(storage.expenses_path()),
            salary: SalaryStore::new(storage.salary_path()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Builds the service and creates any missing data file
    pub fn open(storage: &StorageConfig) -> StoreResult<Self> {
        let service = Self::new(storage);
        service.credentials.ensure_exists()?;
        service.ledger.ensure_exists()?;
        service.salary.ensure_exists()?;
        tracing::info!(
            "Data files ready: {}, {}, {}",
            service.credentials.path().display(),
            service.ledger.path().display(),
            service.salary.path().display()
        );
        Ok(service)
    }

    fn guard(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Creates an account, then wipes the ledger and resets salary to 0.
    /// A duplicate username changes nothing.
    pub fn register(&self, username: &str, password: &str, full_name: &str, email: &str) -> StoreResult<Account> {
        let _guard = self.guard()?;

        let account = self.credentials.add(username, password, full_name, email)?;
        self.ledger.clear()?;
        self.salary.set(0.0)?;

        tracing::info!("Registered {}, expenses and salary reset", username);
        Ok(account)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> StoreResult<bool> {
        let _guard = self.guard()?;
        self.credentials.authenticate(username, password)
    }

    pub fn add_expense(&self, date: NaiveDate, sector: &str, amount: f64) -> StoreResult<ExpenseRecord> {
        let _guard = self.guard()?;
        self.ledger.append(date, sector, amount)
    }

    pub fn clear_expenses(&self) -> StoreResult<()> {
        let _guard = self.guard()?;
        self.ledger.clear()
    }

    pub fn set_salary(&self, amount: f64) -> StoreResult<()> {
        let _guard = self.guard()?;
        self.salary.set(amount)
    }

    /// Loads both files once and derives every dashboard view from them
    pub fn summary(&self, today: NaiveDate, horizon: NextMonthHorizon) -> StoreResult<DashboardSummary> {
        let (salary, records) = {
            let _guard = self.guard()?;
            (self.salary.get()?, self.ledger.all()?)
        };

        let total_spent = total_spent(&records);
        let amounts = analytics::histogram_input(&records);

        let (forecast, forecast_warning) = match analytics::forecast(&records, today, horizon) {
            Ok(forecast) => (Some(forecast), None),
            Err(e) => {
                tracing::warn!("Skipping forecast: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Ok(DashboardSummary {
            salary,
            total_spent,
            balance: balance(salary, total_spent),
            histogram: analytics::histogram_bins(&amounts, DEFAULT_HISTOGRAM_BINS),
            amounts,
            category_breakdown: analytics::category_breakdown(&records),
            daily_trend: analytics::daily_trend(&records),
            records,
            forecast,
            forecast_warning,
        })
    }
}

impl Clone for FinanceService {
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            ledger: self.ledger.clone(),
            salary: self.salary.clone(),
            lock: self.lock.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, FinanceService) {
        let dir = TempDir::new().unwrap();
        let storage = StorageConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            users_file: "users.csv".into(),
            expenses_file: "expenses.csv".into(),
            salary_file: "salary.txt".into(),
        };
        let service = FinanceService::open(&storage).unwrap();
        (dir, service)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn current(service: &FinanceService) -> DashboardSummary {
        service.summary(date(19), NextMonthHorizon::CalendarMonth).unwrap()
    }

    #[test]
    fn test_balance_rule() {
        assert_eq!(balance(1000.0, 350.5), 649.5);
        assert_eq!(balance(0.0, 0.0), 0.0);
        assert_eq!(balance(50.0, 200.0), -150.0);
    }

    #[test]
    fn test_balance_after_salary_and_expenses() {
        let (_dir, service) = service();
        service.set_salary(1000.0).unwrap();
        service.add_expense(date(1), "Food", 100.0).unwrap();
        service.add_expense(date(2), "Rent", 250.50).unwrap();
        let summary = current(&service);
        assert_eq!(summary.total_spent, 350.50);
        assert!((summary.balance - 649.50).abs() < 1e-9);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let (_dir, service) = service();
        service.set_salary(50.0).unwrap();
        service.add_expense(date(1), "Rent", 200.0).unwrap();
        assert_eq!(current(&service).balance, -150.0);
    }

    #[test]
    fn test_register_resets_expenses_and_salary() {
        let (_dir, service) = service();
        service.set_salary(5000.0).unwrap();
        service.add_expense(date(1), "Food", 10.0).unwrap();
        service.add_expense(date(2), "Food", 20.0).unwrap();

        service.register("asha", "pw", "Asha Rao", "asha@example.com").unwrap();

        let summary = current(&service);
        assert!(summary.records.is_empty());
        assert_eq!(summary.salary, 0.0);
        assert_eq!(summary.total_spent, 0.0);
    }

    #[test]
    fn test_duplicate_registration_leaves_data_alone() {
        let (_dir, service) = service();
        service.register("asha", "pw", "Asha Rao", "asha@example.com").unwrap();
        service.set_salary(900.0).unwrap();
        service.add_expense(date(3), "Food", 15.0).unwrap();

        let again = service.register("asha", "other", "Asha Again", "again@example.com");
        assert!(matches!(again, Err(StoreError::AlreadyExists(_))));
        let summary = current(&service);
        assert_eq!(summary.salary, 900.0);
        assert_eq!(summary.records.len(), 1);
        assert!(service.authenticate("asha", "pw").unwrap());
        assert!(!service.authenticate("asha", "other").unwrap());
    }

    #[test]
    fn test_expenses_are_shared_between_accounts() {
        let (_dir, service) = service();
        service.register("asha", "pw", "Asha Rao", "asha@example.com").unwrap();
        service.add_expense(date(4), "Food", 12.0).unwrap();
        let other_handle = service.clone();
        assert_eq!(current(&other_handle).records.len(), 1);
    }

    #[test]
    fn test_summary_with_forecast() {
        let (_dir, service) = service();
        service.set_salary(1000.0).unwrap();
        service.add_expense(date(1), "Food", 10.0).unwrap();
        service.add_expense(date(2), "Food", 20.0).unwrap();
        service.add_expense(date(3), "Rent", 30.0).unwrap();

        let summary = current(&service);
        assert_eq!(summary.total_spent, 60.0);
        assert_eq!(summary.balance, 940.0);
        assert_eq!(summary.amounts, vec![10.0, 20.0, 30.0]);
        assert_eq!(summary.category_breakdown["Food"], 30.0);
        assert_eq!(summary.daily_trend.len(), 3);
        let forecast = summary.forecast.unwrap();
        assert_eq!(forecast.remaining_days.len(), 12);
        assert_eq!(forecast.remaining_days[0].amount, 200.0);
        assert!(summary.forecast_warning.is_none());
    }

    #[test]
    fn test_summary_warns_on_insufficient_data() {
        let (_dir, service) = service();
        service.add_expense(date(1), "Food", 10.0).unwrap();

        let summary = current(&service);
        assert!(summary.forecast.is_none());
        assert!(summary.forecast_warning.unwrap().contains("Not enough data"));
    }
}
