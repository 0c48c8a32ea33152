use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfare_core::{CoreError, FieldError, INTERNAL_ERROR_MESSAGE};

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    BadRequest(String),
    Core(CoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = Vec::new();

        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Core(err) => {
                // Non-HTTP upstream codes fall back to 500.
                let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = match err {
                    CoreError::ValidationError(errors) => {
                        details = errors;
                        "Validation failed".to_string()
                    }
                    CoreError::ConflictError(msg)
                    | CoreError::NotFoundError(msg)
                    | CoreError::UpstreamError { message: msg, .. } => msg,
                    CoreError::InternalError(msg) => {
                        tracing::error!("Internal Server Error: {}", msg);
                        INTERNAL_ERROR_MESSAGE.to_string()
                    }
                    err @ CoreError::MalformedId(_) => err.to_string(),
                };
                (status, message)
            }
        };

        let mut body = json!({
            "statusCode": status.as_u16(),
            "error": error_message,
        });
        if !details.is_empty() {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Core(CoreError::ValidationError(errors))
    }
}
