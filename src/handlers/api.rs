use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::FinanceService;
use super::current_user;

/// Dashboard data as JSON: balance, aggregates and forecast
pub async fn get_summary(
    State((finance_service, config)): State<(FinanceService, Config)>,
    session: Session,
) -> AppResult<Response> {
    let username = current_user(&session).await?;
    tracing::debug!("Building summary for user: {}", username);

    let today = chrono::Local::now().date_naive();
    let summary = finance_service.summary(today, config.forecast.next_month_horizon)?;

    let response = json!({
        "username": username,
        "currency_symbol": config.display.currency_symbol,
        "today": today,
        "summary": summary,
    });

    tracing::trace!("Sending summary response: {:?}", response);
    Ok(Json(response).into_response())
}
