use sqlx::{Pool, Sqlite};

use crate::db::models::{User, UserProfile};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    /// Insert a new user. A username collision surfaces as
    /// `DuplicateUsername`; the unique constraint serializes racing
    /// registrations, first writer wins.
    pub async fn create(
        pool: &Pool<Sqlite>,
        username: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<User, AppError> {
        let now = chrono::Utc::now().timestamp();

        let user = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (username, password_hash, first_name, last_name, phone, join_at, last_login_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateUsername,
            _ => AppError::Database(e),
        })?;

        Ok(user)
    }

    /// Stored hash for a username, or None if the user does not exist.
    /// The hash never leaves the db layer except through here.
    pub async fn password_hash(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Option<String>, AppError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(hash)
    }

    pub async fn update_login_timestamp(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<(), AppError> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query("UPDATE users SET last_login_at = ? WHERE username = ?")
            .bind(now)
            .bind(username)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }

        Ok(())
    }

    pub async fn all(pool: &Pool<Sqlite>) -> Result<Vec<UserProfile>, AppError> {
        let users = sqlx::query_as::<_, UserProfile>(
            "SELECT username, first_name, last_name, phone FROM users",
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    pub async fn get(pool: &Pool<Sqlite>, username: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }
}
