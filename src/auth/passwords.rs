//! Password hashing.
//!
//! bcrypt with `DEFAULT_COST`: salted, deliberately slow, and verified in
//! constant time by the library. Plaintext passwords exist only on the
//! stack of these two functions and are never stored or logged.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::ApiError;

/// Hash a plaintext password for storage.
pub fn hash_password(plaintext: &str) -> Result<String, ApiError> {
    hash(plaintext, DEFAULT_COST).map_err(|err| {
        tracing::error!(error = %err, "password hashing failed");
        ApiError::Internal("password hashing failed".to_string())
    })
}

/// Check a plaintext password against a stored hash. Any bcrypt error
/// (e.g. a corrupt hash) counts as a mismatch rather than surfacing detail.
pub fn verify_password(plaintext: &str, hashed: &str) -> bool {
    verify(plaintext, hashed).unwrap_or(false)
}
