//! HTTP route handlers for PanVerify.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
};
use idcheck_common::{ErrorBody, VerifyError};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod verify;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.server.max_upload_bytes;
    let request_timeout = state.config.server.request_timeout();

    let router = Router::new()
        .route("/verify-pan", post(verify::verify_pan))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state);

    // Operator backstop; the handler itself never times out
    match request_timeout {
        Some(timeout) => router.layer(middleware::from_fn_with_state(timeout, enforce_timeout)),
        None => router,
    }
}

/// Abort the request once `timeout` elapses.
///
/// Dropping the inner future drops the handler's scratch guard, so the upload
/// is removed before the 408 goes out.
async fn enforce_timeout(State(timeout): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "Request timed out");
            ApiError::from(VerifyError::Timeout).into_response()
        }
    }
}

/// A [`VerifyError`] rendered as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError(VerifyError);

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "Verification request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Verification request rejected");
        }

        (status, Json(ErrorBody::new(self.0.public_message()))).into_response()
    }
}
