/// Common test utilities and fixtures
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use courier::db::models::UserProfile;
use courier::users::{NewUser, UserService};

/// Minimum bcrypt cost; keeps tests fast.
pub const TEST_COST: u32 = 4;

/// Create an in-memory database with migrations applied.
pub async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// Register a user with fixture profile fields.
#[allow(dead_code)]
pub async fn register(pool: &Pool<Sqlite>, username: &str, password: &str) -> UserProfile {
    UserService::register(
        pool,
        TEST_COST,
        NewUser {
            username: username.to_string(),
            password: password.to_string(),
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            phone: "+15550001111".to_string(),
        },
    )
    .await
    .expect("registration failed")
}
