/**
 * Startup
 *
 * Opens (or creates) the SQLite database, applies migrations, and builds
 * the router around the shared state. Tests call `run_migrations` against
 * their own in-memory pools.
 */

use std::str::FromStr;

use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::auth::TokenService;
use crate::config::Config;
use crate::routes::create_router;
use crate::server::state::AppState;

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Full application bring-up from configuration to a serveable router.
pub async fn create_app(config: &Config) -> Result<Router, Box<dyn std::error::Error>> {
    let pool = connect(&config.database_url).await?;
    run_migrations(&pool).await?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let state = AppState {
        pool,
        tokens: TokenService::new(&config.jwt_secret, config.jwt_ttl_secs),
    };

    Ok(create_router(state))
}
