use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tms_core::error::ExportError;

#[derive(Debug)]
pub enum AppError {
    NotFoundError(String),
    ConflictError(serde_json::Value),
    SubmissionRejected(serde_json::Value),
    InternalServerError(String),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NotFound(message) => AppError::NotFoundError(message),
            ExportError::Recoverable(details) => AppError::ConflictError(
                serde_json::to_value(&details).unwrap_or_else(|_| json!("export failed")),
            ),
            ExportError::Transport {
                message,
                code,
                endpoint,
            } => AppError::ConflictError(json!({
                "message": message,
                "code": code,
                "endpoint": endpoint,
            })),
            ExportError::SubmissionRejected(confirmation) => AppError::SubmissionRejected(
                serde_json::to_value(&confirmation).unwrap_or_default(),
            ),
            ExportError::Store(err) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFoundError(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": true, "error_description": message})),
            )
                .into_response(),
            AppError::ConflictError(details) => (
                StatusCode::CONFLICT,
                Json(json!({"error": true, "error_description": details})),
            )
                .into_response(),
            AppError::SubmissionRejected(model) => {
                (StatusCode::BAD_REQUEST, Json(json!({"model": model}))).into_response()
            }
            AppError::InternalServerError(message) => {
                tracing::error!("Internal Server Error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tms_core::store::StoreError;
    use tms_shared::carrier::ErrorDetails;
    use tms_shared::confirmation::ShipmentConfirmation;

    #[test]
    fn not_found_maps_to_404() {
        let response =
            AppError::from(ExportError::NotFound("gone".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn recoverable_maps_to_409() {
        let err = ExportError::Recoverable(ErrorDetails::from_message("missing config"));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn transport_fault_maps_to_409() {
        let err = ExportError::Transport {
            message: "boom".to_string(),
            code: None,
            endpoint: None,
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn rejected_submission_maps_to_400() {
        let err = ExportError::SubmissionRejected(ShipmentConfirmation {
            status: 418,
            result_code: String::new(),
            message: String::new(),
            data: None,
            meta: None,
        });
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_fault_maps_to_500() {
        let err = ExportError::Store(StoreError::Connection("down".to_string()));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
