use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::auth::{policy, Identity};
use crate::db::models::{Message, MessageDetail};
use crate::db::MessageRepository;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to_username: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct MessageDetailResponse {
    pub message: MessageDetail,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Message,
}

/// GET /messages/:id - only the sender or recipient may read it. The
/// policy check runs after the fetch and before anything is returned.
pub async fn detail(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<MessageDetailResponse>, AppError> {
    let message = MessageRepository::get(&state.db, id).await?;
    policy::authorize_view(&identity, &message)?;

    Ok(Json(MessageDetailResponse { message }))
}

/// POST /messages - the sender is the verified identity, never a field
/// of the request body.
pub async fn send(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let message =
        MessageRepository::create(&state.db, &identity.username, &req.to_username, &req.body)
            .await?;

    Ok(Json(MessageResponse { message }))
}

/// POST /messages/:id/read - only the recipient may mark a message
/// read; anyone else gets Forbidden and read_at is left untouched.
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = MessageRepository::get(&state.db, id).await?;
    policy::authorize_mark_read(&identity, &message)?;

    let message = MessageRepository::mark_read(&state.db, id).await?;
    Ok(Json(MessageResponse { message }))
}
