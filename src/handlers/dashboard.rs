use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use tower_sessions::Session;
use crate::analytics::{self, ChartError, Prediction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::i18n::{translate, Language};
use crate::models::{DashboardSummary, ExpenseForm, PageQuery, SalaryForm};
use crate::services::FinanceService;
use crate::views::{self, escape_html, format_currency};
use super::{current_language, current_user, language_options, render_messages};

fn notice(message: &str) -> Response {
    Redirect::to(&format!("/dashboard?notice={}", urlencoding::encode(message))).into_response()
}

pub async fn serve_dashboard(
    State((finance_service, config)): State<(FinanceService, Config)>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> AppResult<Response> {
    let username = current_user(&session).await?;
    let language = current_language(&session, &config).await;
    tracing::info!("Rendering dashboard for user: {}", username);

    let today = chrono::Local::now().date_naive();
    let summary = finance_service.summary(today, config.forecast.next_month_horizon)?;
    tracing::debug!("Dashboard has {} expense record(s)", summary.records.len());

    let template = views::load_template(&config.display.templates_dir, "dashboard.html")?;
    let symbol = &config.display.currency_symbol;

    let html = views::fill(&views::localize(&template, language), &[
        ("username", escape_html(&username)),
        ("language_options", language_options(language)),
        ("messages", render_messages(&query, language)),
        ("salary", format_currency(symbol, summary.salary)),
        ("salary_value", format!("{:.2}", summary.salary)),
        ("today", today.format("%Y-%m-%d").to_string()),
        ("expense_rows", expense_rows(&summary, symbol, language)),
        ("total_spent", format_currency(symbol, summary.total_spent)),
        ("balance", format_currency(symbol, summary.balance)),
        ("balance_class", (if summary.balance < 0.0 { "negative" } else { "positive" }).to_string()),
        ("histogram_chart", chart_slot(analytics::render_histogram(&summary.histogram, language), language)),
        ("pie_chart", chart_slot(analytics::render_category_pie(&summary.category_breakdown, language), language)),
        ("trend_chart", chart_slot(analytics::render_daily_trend(&summary.daily_trend, language), language)),
        ("forecast", forecast_section(&summary, symbol, language)),
    ]);

    tracing::info!("Successfully rendered dashboard for user: {}", username);
    Ok(Html(html).into_response())
}

pub async fn handle_save_salary(
    State((finance_service, _)): State<(FinanceService, Config)>,
    Form(salary_form): Form<SalaryForm>,
) -> AppResult<Response> {
    if !salary_form.salary.is_finite() || salary_form.salary < 0.0 {
        return Err(AppError::Validation("Salary must be a non-negative number.".into()));
    }

    finance_service.set_salary(salary_form.salary)?;
    tracing::info!("Salary saved: {:.2}", salary_form.salary);
    Ok(notice("Salary saved!"))
}

pub async fn handle_add_expense(
    State((finance_service, _)): State<(FinanceService, Config)>,
    Form(expense_form): Form<ExpenseForm>,
) -> AppResult<Response> {
    if !expense_form.amount.is_finite() || expense_form.amount < 0.0 {
        return Err(AppError::Validation("Amount must be a non-negative number.".into()));
    }

    let record = finance_service.add_expense(
        expense_form.date,
        &expense_form.sector,
        expense_form.amount,
    )?;
    tracing::info!("Expense added: {} {} {:.2}", record.date, record.sector, record.amount);
    Ok(notice("Expense added!"))
}

pub async fn handle_clear_dashboard(
    State((finance_service, _)): State<(FinanceService, Config)>,
) -> AppResult<Response> {
    finance_service.clear_expenses()?;
    Ok(notice("Dashboard cleared!"))
}

fn expense_rows(summary: &DashboardSummary, symbol: &str, language: Language) -> String {
    if summary.records.is_empty() {
        return format!(
            r#"<tr><td colspan="3" class="empty">{}</td></tr>"#,
            escape_html(translate(language, "No expenses recorded yet."))
        );
    }

    summary
        .records
        .iter()
        .map(|record| {
            format!(
                "<tr>\n    <td>{}</td>\n    <td>{}</td>\n    <td class=\"amount\">{}</td>\n</tr>",
                record.date.format("%Y-%m-%d"),
                escape_html(&record.sector),
                format_currency(symbol, record.amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// A chart that fails to render leaves a placeholder instead of failing the page
fn chart_slot(rendered: Result<String, ChartError>, language: Language) -> String {
    match rendered {
        Ok(svg) => format!(r#"<figure class="chart">{}</figure>"#, svg),
        Err(ChartError::NoData) => format!(
            r#"<p class="placeholder">{}</p>"#,
            escape_html(translate(language, "No expenses recorded yet."))
        ),
        Err(e) => {
            tracing::warn!("Chart rendering failed: {}", e);
            format!(
                r#"<p class="placeholder">{}</p>"#,
                escape_html(translate(language, "Chart unavailable."))
            )
        }
    }
}

fn forecast_section(summary: &DashboardSummary, symbol: &str, language: Language) -> String {
    let Some(forecast) = &summary.forecast else {
        return format!(
            r#"<div class="message warning">{}</div>"#,
            escape_html(translate(language, "Not enough data for prediction."))
        );
    };

    format!(
        "{}\n{}",
        prediction_table(translate(language, "Remaining Days Predictions"), &forecast.remaining_days, symbol),
        prediction_table(translate(language, "Next Month Predictions"), &forecast.next_month, symbol),
    )
}

fn prediction_table(title: &str, predictions: &[Prediction], symbol: &str) -> String {
    let rows = predictions
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td class=\"amount\">{}</td></tr>",
                p.date.format("%Y-%m-%d"),
                format_currency(symbol, p.amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<h3>{}</h3>\n<table class=\"predictions\">\n<tbody>\n{}\n</tbody>\n</table>",
        escape_html(title),
        rows
    )
}
