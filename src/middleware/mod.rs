//! Request-pipeline guards: authentication extractors and the enveloped
//! JSON body extractor.

pub mod auth;
pub mod json;

pub use auth::{ensure_owner_or_admin, AdminUser, CurrentUser};
pub use json::AppJson;
