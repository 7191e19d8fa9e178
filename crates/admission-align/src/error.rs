use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::admission::{AdmissionRequestError, ExportError, RubricError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Rubric(RubricError),
    Request(AdmissionRequestError),
    Export(ExportError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Rubric(err) => write!(f, "rubric error: {}", err),
            AppError::Request(err) => write!(f, "invalid request: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Rubric(err) => Some(err),
            AppError::Request(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Request(AdmissionRequestError::MissingNotes) => StatusCode::BAD_REQUEST,
            AppError::Request(AdmissionRequestError::EmptyGuideline) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Rubric(_)
            | AppError::Export(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RubricError> for AppError {
    fn from(value: RubricError) -> Self {
        Self::Rubric(value)
    }
}

impl From<AdmissionRequestError> for AppError {
    fn from(value: AdmissionRequestError) -> Self {
        Self::Request(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_to_client_statuses() {
        let missing = AppError::from(AdmissionRequestError::MissingNotes).into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let empty = AppError::from(AdmissionRequestError::EmptyGuideline).into_response();
        assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn rubric_errors_are_server_faults() {
        let error = AppError::from(RubricError::MissingCaptureGroup {
            lab: "crp".to_string(),
        });
        assert!(error.to_string().contains("crp"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
