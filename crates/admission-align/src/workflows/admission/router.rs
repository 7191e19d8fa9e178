use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::{AdmissionRequestError, AdmissionService, OptimizeRequest};

/// Router builder exposing the alignment pipeline over HTTP.
pub fn admission_router(service: Arc<AdmissionService>) -> Router {
    Router::new()
        .route("/api/optimize", post(optimize_handler))
        .with_state(service)
}

pub(crate) async fn optimize_handler(
    State(service): State<Arc<AdmissionService>>,
    payload: Result<axum::Json<OptimizeRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.optimize(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => {
            let status = match error {
                AdmissionRequestError::MissingNotes => StatusCode::BAD_REQUEST,
                AdmissionRequestError::EmptyGuideline => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}
