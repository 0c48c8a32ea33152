use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

// ============================================================================
// API Key Gate
// ============================================================================

/// Lets the request through only when `x-api-key` matches the configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("API key is required".to_string()))?;

    if provided != state.auth.api_key {
        return Err(AppError::AuthenticationError("Invalid API key".to_string()));
    }

    Ok(next.run(req).await)
}
