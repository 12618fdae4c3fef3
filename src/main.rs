mod analytics;
mod config;
mod errors;
mod handlers;
mod i18n;
mod middleware;
mod models;
mod services;
mod views;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
};
use tower_http::{
    services::ServeDir,
    limit::RequestBodyLimitLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use crate::{
    services::FinanceService,
    config::Config,
};

fn build_router(finance_service: FinanceService, config: Config) -> Router {
    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    let max_body_size = config.server.max_body_size;

    Router::new()
        // Auth routes
        .route("/", get(handlers::serve_login_page))
        .route("/login", post(handlers::handle_login))
        .route("/register", post(handlers::handle_register))
        .route("/logout", get(handlers::handle_logout))
        .route("/language", post(handlers::handle_language))

        // Dashboard routes
        .route("/dashboard", get(handlers::serve_dashboard))
        .route("/salary", post(handlers::handle_save_salary))
        .route("/expenses", post(handlers::handle_add_expense))
        .route("/clear", post(handlers::handle_clear_dashboard))
        .route("/api/summary", get(handlers::get_summary))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Add middleware
        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)

        // Form bodies are small, cap them from config
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))

        // Add state
        .with_state((finance_service, config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Create missing data files before serving
    let finance_service = FinanceService::open(&config.storage)
        .context("Failed to prepare data files")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(finance_service, config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server to {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Failed to start server")?;

    Ok(())
}
