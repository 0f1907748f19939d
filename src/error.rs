use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid username/password")]
    InvalidCredentials,

    #[error("message not found")]
    MessageNotFound,

    #[error("{0}")]
    NoMessages(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("invalid or malformed token")]
    InvalidToken,

    #[error("you do not have access to this resource")]
    Forbidden,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match self {
            AppError::DuplicateUsername | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::MessageNotFound | AppError::NoMessages(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
