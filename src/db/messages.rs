use sqlx::{FromRow, Pool, Sqlite};

use crate::db::models::{Message, MessageDetail, ReceivedMessage, SentMessage, UserProfile};
use crate::error::AppError;

/// Flat join row for a single message with both parties; folded into a
/// `MessageDetail` before it leaves this module.
#[derive(FromRow)]
struct MessageDetailRow {
    id: i64,
    body: String,
    sent_at: i64,
    read_at: Option<i64>,
    from_username: String,
    from_first_name: String,
    from_last_name: String,
    from_phone: String,
    to_username: String,
    to_first_name: String,
    to_last_name: String,
    to_phone: String,
}

impl From<MessageDetailRow> for MessageDetail {
    fn from(row: MessageDetailRow) -> Self {
        MessageDetail {
            id: row.id,
            body: row.body,
            sent_at: row.sent_at,
            read_at: row.read_at,
            from_user: UserProfile {
                username: row.from_username,
                first_name: row.from_first_name,
                last_name: row.from_last_name,
                phone: row.from_phone,
            },
            to_user: UserProfile {
                username: row.to_username,
                first_name: row.to_first_name,
                last_name: row.to_last_name,
                phone: row.to_phone,
            },
        }
    }
}

pub struct MessageRepository;

impl MessageRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> Result<Message, AppError> {
        let sent_at = chrono::Utc::now().timestamp();

        let message = sqlx::query_as::<_, Message>(
            r#"
INSERT INTO messages (from_username, to_username, body, sent_at, read_at)
VALUES (?, ?, ?, ?, NULL)
RETURNING id, from_username, to_username, body, sent_at, read_at
            "#,
        )
        .bind(from_username)
        .bind(to_username)
        .bind(body)
        .bind(sent_at)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    /// Fetch a message with both sender and recipient resolved to their
    /// public profiles.
    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<MessageDetail, AppError> {
        let row = sqlx::query_as::<_, MessageDetailRow>(
            r#"
SELECT m.id, m.body, m.sent_at, m.read_at,
       f.username   AS from_username,
       f.first_name AS from_first_name,
       f.last_name  AS from_last_name,
       f.phone      AS from_phone,
       t.username   AS to_username,
       t.first_name AS to_first_name,
       t.last_name  AS to_last_name,
       t.phone      AS to_phone
FROM messages m
JOIN users f ON f.username = m.from_username
JOIN users t ON t.username = m.to_username
WHERE m.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::MessageNotFound)?;

        Ok(row.into())
    }

    /// Stamp `read_at` with the current time. Re-invocation stamps it
    /// again; last write wins.
    pub async fn mark_read(pool: &Pool<Sqlite>, id: i64) -> Result<Message, AppError> {
        let read_at = chrono::Utc::now().timestamp();

        let message = sqlx::query_as::<_, Message>(
            r#"
UPDATE messages SET read_at = ?
WHERE id = ?
RETURNING id, from_username, to_username, body, sent_at, read_at
            "#,
        )
        .bind(read_at)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::MessageNotFound)?;

        Ok(message)
    }

    /// Messages sent by `username`. The recipient profile is joined per
    /// row, so each message carries its own counterpart.
    pub async fn messages_from(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Vec<SentMessage>, AppError> {
        let messages = sqlx::query_as::<_, SentMessage>(
            r#"
SELECT m.id, m.body, m.sent_at, m.read_at,
       u.username, u.first_name, u.last_name, u.phone
FROM messages m
JOIN users u ON u.username = m.to_username
WHERE m.from_username = ?
ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(pool)
        .await?;

        if messages.is_empty() {
            return Err(AppError::NoMessages(format!(
                "no messages from {}",
                username
            )));
        }

        Ok(messages)
    }

    /// Messages received by `username`, sender profile joined per row.
    pub async fn messages_to(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Vec<ReceivedMessage>, AppError> {
        let messages = sqlx::query_as::<_, ReceivedMessage>(
            r#"
SELECT m.id, m.body, m.sent_at, m.read_at,
       u.username, u.first_name, u.last_name, u.phone
FROM messages m
JOIN users u ON u.username = m.from_username
WHERE m.to_username = ?
ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(pool)
        .await?;

        if messages.is_empty() {
            return Err(AppError::NoMessages(format!("no messages to {}", username)));
        }

        Ok(messages)
    }
}
