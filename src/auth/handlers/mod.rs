//! HTTP handlers for the authentication endpoints.
//!
//! - `POST /api/auth/register` - create an account, answer 201 + token
//! - `POST /api/auth/login` - verify credentials, answer 200 + token
//! - `GET  /api/auth/me` - return the caller's profile (no hash)

pub mod login;
pub mod me;
pub mod register;
pub mod types;

pub use login::login;
pub use me::me;
pub use register::register;
pub use types::{AuthData, LoginRequest, RegisterRequest};
