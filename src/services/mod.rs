mod credential_store;
mod expense_ledger;
mod finance_service;
mod salary_store;

pub use credential_store::CredentialStore;
pub use expense_ledger::ExpenseLedger;
pub use finance_service::FinanceService;
pub use salary_store::SalaryStore;
