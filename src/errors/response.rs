use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use crate::errors::{AppError, StoreError};

// Converts AppError into an HTTP response: auth and validation problems go back
// to a page with a message, storage problems become status codes.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors redirect to login
            AppError::Auth(msg) => {
                tracing::warn!("Authentication failure: {}", msg);
                Redirect::to(&format!("/?error={}", urlencoding::encode(&msg)))
                    .into_response()
            }

            // Validation errors are shown on the dashboard
            AppError::Validation(msg) => {
                Redirect::to(&format!("/dashboard?error={}", urlencoding::encode(&msg)))
                    .into_response()
            }

            AppError::Store(err) => convert_store_error(err),

            // Missing templates are a server problem
            AppError::File(e) => {
                tracing::error!("File error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("File error: {}", e)
                ).into_response()
            }
        }
    }
}

fn convert_store_error(err: StoreError) -> Response {
    match err {
        StoreError::AlreadyExists(username) => (
            StatusCode::CONFLICT,
            format!("Username {} already exists", username)
        ).into_response(),

        StoreError::InvalidAmount(amount) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid amount: {}", amount)
        ).into_response(),

        // Everything else means the data files could not be read or written
        _ => {
            tracing::error!("Storage error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", err)
            ).into_response()
        }
    }
}
