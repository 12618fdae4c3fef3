use serde::Deserialize;
use chrono::NaiveDate;
use crate::i18n::Language;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    // Every field must be present and non-blank
    pub fn is_complete(&self) -> bool {
        [&self.full_name, &self.email, &self.username, &self.password]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct SalaryForm {
    pub salary: f64,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub date: NaiveDate,
    pub sector: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub language: Language,
    pub redirect_to: Option<String>,
}

// Flash messages carried through redirects
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub form: Option<String>,
}
