use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;
use crate::auth::Identity;
use crate::error::AppError;

/// Authentication middleware. Verifies the bearer token and stores the
/// resolved identity in request extensions; requests without a valid
/// token never reach a protected handler.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthenticated)?;

    let claims = state.tokens.verify(token)?;

    request.extensions_mut().insert(Identity {
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Reject requests acting on another user's resources.
pub fn ensure_correct_user(identity: &Identity, target_username: &str) -> Result<(), AppError> {
    if identity.username == target_username {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
