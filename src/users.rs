use sqlx::{Pool, Sqlite};

use crate::auth::password;
use crate::db::models::{User, UserProfile};
use crate::db::UserRepository;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Registration, authentication, and login bookkeeping over the
/// credential store. The plaintext password is hashed before it reaches
/// the store and the hash never leaves it.
pub struct UserService;

impl UserService {
    pub async fn register(
        pool: &Pool<Sqlite>,
        bcrypt_cost: u32,
        new_user: NewUser,
    ) -> Result<UserProfile, AppError> {
        let NewUser {
            username,
            password,
            first_name,
            last_name,
            phone,
        } = new_user;

        // bcrypt at a real work factor is CPU-heavy; keep it off the
        // async worker threads.
        let password_hash = tokio::task::spawn_blocking(move || password::hash(&password, bcrypt_cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

        let user = UserRepository::create(
            pool,
            &username,
            &password_hash,
            &first_name,
            &last_name,
            &phone,
        )
        .await?;

        Ok(user.into())
    }

    /// Is this username/password pair valid? An unknown username yields
    /// `false`, indistinguishable from a wrong password.
    pub async fn authenticate(
        pool: &Pool<Sqlite>,
        username: &str,
        plaintext: &str,
    ) -> Result<bool, AppError> {
        let Some(stored_hash) = UserRepository::password_hash(pool, username).await? else {
            return Ok(false);
        };

        let plaintext = plaintext.to_string();
        let valid = tokio::task::spawn_blocking(move || password::verify(&plaintext, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

        Ok(valid)
    }

    pub async fn update_login_timestamp(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<(), AppError> {
        UserRepository::update_login_timestamp(pool, username).await
    }

    pub async fn all(pool: &Pool<Sqlite>) -> Result<Vec<UserProfile>, AppError> {
        UserRepository::all(pool).await
    }

    pub async fn get(pool: &Pool<Sqlite>, username: &str) -> Result<User, AppError> {
        UserRepository::get(pool, username).await
    }
}
