//! Shared handler state.
//!
//! `FromRef` impls let extractors pull out just the piece they need, so
//! the token extractor does not have to know about the pool.

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: TokenService,
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
