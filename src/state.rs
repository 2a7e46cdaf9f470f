use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::repository::DrinkRepository;

/// Explicitly constructed application context, built once in `main` and
/// handed to every handler via axum state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool, verifier: TokenVerifier) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            verifier: Arc::new(verifier),
        }
    }

    pub fn drinks(&self) -> DrinkRepository {
        DrinkRepository::new(self.pool.clone())
    }
}
