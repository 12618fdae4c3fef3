mod account;
mod expense;
mod forms;
mod summary;

pub use account::Account;
pub use expense::ExpenseRecord;
pub use forms::{LoginForm, RegisterForm, SalaryForm, ExpenseForm, LanguageForm, PageQuery};
pub use summary::DashboardSummary;
