use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::Request,
    body::Body,
};
use tower_sessions::Session;
use crate::handlers::USER_KEY;

const PUBLIC_PATHS: [&str; 4] = ["/", "/login", "/register", "/language"];

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || path.starts_with("/static/")
}

pub async fn require_auth(
    session: Session,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    if is_public(&path) {
        return next.run(req).await;
    }

    match session.get::<String>(USER_KEY).await {
        Ok(Some(_)) => next.run(req).await,
        _ => {
            tracing::debug!("Redirecting unauthenticated request for {}", path);
            Redirect::to("/").into_response()
        }
    }
}
