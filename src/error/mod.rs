//! Error taxonomy and its HTTP rendering.
//!
//! - `types` - the `ApiError` enum and `FieldError` records
//! - `conversion` - `IntoResponse`, mapping every error to the envelope

pub mod conversion;
pub mod types;

pub use types::{ApiError, FieldError};
