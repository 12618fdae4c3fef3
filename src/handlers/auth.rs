use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult, StoreError};
use crate::models::{LanguageForm, LoginForm, PageQuery, RegisterForm};
use crate::services::FinanceService;
use crate::views;
use super::{current_language, language_options, render_messages, LANGUAGE_KEY, USER_KEY};

fn redirect_with(param: &str, message: &str, extra: &str) -> Response {
    Redirect::to(&format!("/?{}={}{}", param, urlencoding::encode(message), extra)).into_response()
}

pub async fn serve_login_page(
    State((_, config)): State<(FinanceService, Config)>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> AppResult<Response> {
    let language = current_language(&session, &config).await;
    tracing::debug!("Serving login page in {}", language);

    let template = views::load_template(&config.display.templates_dir, "login.html")?;
    let register_open = if query.form.as_deref() == Some("register") { "open" } else { "" };

    let html = views::fill(&views::localize(&template, language), &[
        ("language_options", language_options(language)),
        ("messages", render_messages(&query, language)),
        ("register_open", register_open.to_string()),
        ("redirect_to", "/".to_string()),
    ]);
    Ok(Html(html).into_response())
}

#[axum::debug_handler]
pub async fn handle_login(
    State((finance_service, _)): State<(FinanceService, Config)>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    // Unknown users and wrong passwords get the same message
    if !finance_service.authenticate(&login_form.username, &login_form.password)? {
        tracing::info!("Login rejected for user: {}", login_form.username);
        return Ok(redirect_with("error", "Invalid username or password.", ""));
    }

    session
        .insert(USER_KEY, login_form.username.clone())
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?;

    tracing::info!("User logged in: {}", login_form.username);
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn handle_register(
    State((finance_service, _)): State<(FinanceService, Config)>,
    Form(register_form): Form<RegisterForm>,
) -> AppResult<Response> {
    if !register_form.is_complete() {
        return Ok(redirect_with("error", "All fields are required.", "&form=register"));
    }

    match finance_service.register(
        &register_form.username,
        &register_form.password,
        &register_form.full_name,
        &register_form.email,
    ) {
        Ok(_) => Ok(redirect_with(
            "notice",
            "Account created successfully! Previous data cleared.",
            "",
        )),
        Err(StoreError::AlreadyExists(_)) => {
            Ok(redirect_with("error", "Username already exists.", "&form=register"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn handle_logout(
    session: Session,
) -> Response {
    if let Err(e) = session.remove::<String>(USER_KEY).await {
        tracing::warn!("Session removal error: {}", e);
    }
    Redirect::to("/").into_response()
}

pub async fn handle_language(
    session: Session,
    Form(language_form): Form<LanguageForm>,
) -> AppResult<Response> {
    session
        .insert(LANGUAGE_KEY, language_form.language)
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?;

    tracing::debug!("Language switched to {}", language_form.language);

    // Only same-site paths are followed
    let target = language_form
        .redirect_to
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());
    Ok(Redirect::to(&target).into_response())
}
