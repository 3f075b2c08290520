//! Application wiring: shared state, the database pool, and startup.

pub mod init;
pub mod state;

pub use init::{create_app, run_migrations};
pub use state::AppState;
