mod api;
mod auth;
mod dashboard;

pub use api::get_summary;
pub use auth::{serve_login_page, handle_login, handle_register, handle_logout, handle_language};
pub use dashboard::{serve_dashboard, handle_save_salary, handle_add_expense, handle_clear_dashboard};

use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::i18n::{translate, Language};
use crate::models::PageQuery;
use crate::views::escape_html;

pub(crate) const USER_KEY: &str = "user_session";
pub(crate) const LANGUAGE_KEY: &str = "language";

// Session language, or the configured default when none was picked
pub(crate) async fn current_language(session: &Session, config: &Config) -> Language {
    match session.get::<Language>(LANGUAGE_KEY).await {
        Ok(Some(language)) => language,
        Ok(None) => config.display.default_language,
        Err(e) => {
            tracing::warn!("Failed to read language from session: {}", e);
            config.display.default_language
        }
    }
}

pub(crate) async fn current_user(session: &Session) -> AppResult<String> {
    session
        .get::<String>(USER_KEY)
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))
}

pub(crate) fn language_options(selected: Language) -> String {
    [(Language::English, "English"), (Language::Hindi, "Hindi")]
        .iter()
        .map(|(language, label)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                language.code(),
                if *language == selected { " selected" } else { "" },
                label
            )
        })
        .collect()
}

// Flash messages arrive untranslated in the query string
pub(crate) fn render_messages(query: &PageQuery, language: Language) -> String {
    let mut html = String::new();
    if let Some(error) = &query.error {
        html.push_str(&format!(
            r#"<div class="message error">{}</div>"#,
            escape_html(translate(language, error))
        ));
    }
    if let Some(notice) = &query.notice {
        html.push_str(&format!(
            r#"<div class="message notice">{}</div>"#,
            escape_html(translate(language, notice))
        ));
    }
    html
}
