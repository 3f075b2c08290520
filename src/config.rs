/**
 * Server Configuration
 *
 * All configuration comes from environment variables (a `.env` file is
 * loaded by `main` before this runs). Nothing here is a process-global:
 * the resulting `Config` is passed explicitly into server initialization.
 *
 * | Variable              | Default                  |
 * |-----------------------|--------------------------|
 * | `PORT`                | 5000                     |
 * | `DATABASE_URL`        | `sqlite://pressbox.db`   |
 * | `JWT_SECRET`          | dev-only fallback (warn) |
 * | `JWT_EXPIRES_IN_SECS` | 86400 (one day)          |
 */

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://pressbox.db";
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Missing values fall back to development defaults. A missing
    /// `JWT_SECRET` is tolerated (with a warning) so local development works
    /// out of the box, but a real deployment must set it.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using an insecure development secret");
            "insecure-dev-secret-change-me".to_string()
        });

        let jwt_ttl_secs = std::env::var("JWT_EXPIRES_IN_SECS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Self {
            port,
            database_url,
            jwt_secret,
            jwt_ttl_secs,
        }
    }
}
