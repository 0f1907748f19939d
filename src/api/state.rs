use std::sync::Arc;

use sqlx::{Pool, Sqlite};

use crate::auth::TokenSigner;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub tokens: Arc<TokenSigner>,
    pub config: Arc<Config>,
}
