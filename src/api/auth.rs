use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::error::AppError;
use crate::users::{NewUser, UserService};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub username: String,
    pub token: String,
}

/// POST /auth/register - register and log straight in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let profile = UserService::register(
        &state.db,
        state.config.bcrypt_cost,
        NewUser {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        },
    )
    .await?;

    let token = state.tokens.issue(&profile.username)?;

    tracing::info!("New user registered: {}", profile.username);

    Ok(Json(AuthResponse {
        username: profile.username,
        token,
    }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if !UserService::authenticate(&state.db, &req.username, &req.password).await? {
        return Err(AppError::InvalidCredentials);
    }

    UserService::update_login_timestamp(&state.db, &req.username).await?;

    let token = state.tokens.issue(&req.username)?;

    Ok(Json(AuthResponse {
        username: req.username,
        token,
    }))
}
