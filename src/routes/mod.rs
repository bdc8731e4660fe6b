//! API Routes
//!
//! - `/api/plan` - run the travel planning pipeline
//! - `/api/options` - choices offered by the trip form
//! - `/api/health` - Health checks

pub mod health;
pub mod plan;

use axum::{http::StatusCode, Json, Router};
use crate::middleware::apply_cors;
use crate::models::{AppState, ErrorResponse};
use crate::types::AppError;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();
    let router = Router::new()
        .merge(plan::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Precondition and input problems are the caller's fault; everything else
/// is ours.
pub fn error_response(error: AppError) -> ApiError {
    let status = match &error {
        AppError::Precondition(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string().into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreconditionError;

    #[test]
    fn test_error_status_mapping() {
        let (status, body) = error_response(PreconditionError::MissingApiKey.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error, "Please enter your OpenAI API key.");

        let (status, _) = error_response(AppError::LLMApi("upstream timeout".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
