use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use backend_application::AppError;
use backend_domain::SyncError;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{message}")]
    BadGateway {
        message: String,
        upstream_status: Option<u16>,
    },
    #[error("{0}")]
    GatewayTimeout(String),
    #[error("{0}")]
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::NotFound(what) => HttpError::NotFound(what),
            AppError::Validation(err) if err.is_configuration() => HttpError::Internal(err.to_string()),
            AppError::Validation(err) => HttpError::BadRequest(err.to_string()),
            AppError::Sync(err) => HttpError::from(err),
            AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

impl From<SyncError> for HttpError {
    fn from(value: SyncError) -> Self {
        let message = value.to_string();
        match value {
            SyncError::UpstreamTimeout { .. } => HttpError::GatewayTimeout(message),
            SyncError::UpstreamConnection { .. } => HttpError::BadGateway {
                message,
                upstream_status: None,
            },
            SyncError::UpstreamProtocol { status, .. } => HttpError::BadGateway {
                message,
                upstream_status: status,
            },
            SyncError::ValidationPassthrough { .. } => HttpError::BadRequest(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            HttpError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let upstream_status = match &self {
            HttpError::BadGateway { upstream_status, .. } => *upstream_status,
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            upstream_status,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{EventAction, FieldViolation, ValidationError};

    #[test]
    fn validation_errors_are_client_errors_unless_configuration() {
        let field = AppError::Validation(ValidationError::Field {
            field: "eventName".to_string(),
            reason: FieldViolation::Missing,
        });
        assert!(matches!(HttpError::from(field), HttpError::BadRequest(_)));

        let config = AppError::Validation(ValidationError::Configuration("no action".to_string()));
        assert!(matches!(HttpError::from(config), HttpError::Internal(_)));
    }

    #[test]
    fn sync_errors_map_to_gateway_statuses() {
        let timeout = SyncError::UpstreamTimeout {
            action: EventAction::Create,
            detail: "operation timed out".to_string(),
        };
        assert_eq!(
            HttpError::from(timeout).into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );

        let protocol = SyncError::protocol("bad request: Invalid control character", Some(500));
        match HttpError::from(protocol) {
            HttpError::BadGateway {
                message,
                upstream_status,
            } => {
                assert_eq!(message, "bad request: Invalid control character");
                assert_eq!(upstream_status, Some(500));
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }
}
