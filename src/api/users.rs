use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::api::middleware::ensure_correct_user;
use crate::api::state::AppState;
use crate::auth::Identity;
use crate::db::models::{ReceivedMessage, SentMessage, User, UserProfile};
use crate::db::MessageRepository;
use crate::error::AppError;
use crate::users::UserService;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct SentMessagesResponse {
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Serialize)]
pub struct ReceivedMessagesResponse {
    pub messages: Vec<ReceivedMessage>,
}

/// GET /users (requires auth)
pub async fn list(State(state): State<AppState>) -> Result<Json<UsersResponse>, AppError> {
    let users = UserService::all(&state.db).await?;
    Ok(Json(UsersResponse { users }))
}

/// GET /users/:username (requires auth; only the user themselves)
pub async fn detail(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    ensure_correct_user(&identity, &username)?;

    let user = UserService::get(&state.db, &username).await?;
    Ok(Json(UserResponse { user }))
}

/// GET /users/:username/to - messages received by this user, each with
/// its own sender resolved.
pub async fn messages_to(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> Result<Json<ReceivedMessagesResponse>, AppError> {
    ensure_correct_user(&identity, &username)?;

    let messages = MessageRepository::messages_to(&state.db, &username).await?;
    Ok(Json(ReceivedMessagesResponse { messages }))
}

/// GET /users/:username/from - messages sent by this user, each with
/// its own recipient resolved.
pub async fn messages_from(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> Result<Json<SentMessagesResponse>, AppError> {
    ensure_correct_user(&identity, &username)?;

    let messages = MessageRepository::messages_from(&state.db, &username).await?;
    Ok(Json(SentMessagesResponse { messages }))
}
