use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: i64,
    pub last_login_at: i64,
}

/// The public fields of a user; everything a counterpart is allowed to see.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: i64,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: i64,
    pub read_at: Option<i64>,
}

/// A message with both parties resolved to their public profiles.
#[derive(Debug, Clone, Serialize)]
pub struct MessageDetail {
    pub id: i64,
    pub body: String,
    pub sent_at: i64,
    pub read_at: Option<i64>,
    pub from_user: UserProfile,
    pub to_user: UserProfile,
}

/// A message as seen from the sender's outbox; `to_user` is the
/// recipient of this particular message.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SentMessage {
    pub id: i64,
    pub body: String,
    pub sent_at: i64,
    pub read_at: Option<i64>,
    #[sqlx(flatten)]
    pub to_user: UserProfile,
}

/// A message as seen from the recipient's inbox; `from_user` is the
/// sender of this particular message.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReceivedMessage {
    pub id: i64,
    pub body: String,
    pub sent_at: i64,
    pub read_at: Option<i64>,
    #[sqlx(flatten)]
    pub from_user: UserProfile,
}
