use crate::auth::Identity;
use crate::db::models::MessageDetail;
use crate::error::AppError;

/// Only the sender or the recipient may view a message.
pub fn can_view(identity: &Identity, message: &MessageDetail) -> bool {
    identity.username == message.from_user.username
        || identity.username == message.to_user.username
}

/// Only the recipient may mark a message read.
pub fn can_mark_read(identity: &Identity, message: &MessageDetail) -> bool {
    identity.username == message.to_user.username
}

pub fn authorize_view(identity: &Identity, message: &MessageDetail) -> Result<(), AppError> {
    if can_view(identity, message) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub fn authorize_mark_read(identity: &Identity, message: &MessageDetail) -> Result<(), AppError> {
    if can_mark_read(identity, message) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
