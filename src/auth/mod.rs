//! Authentication: credential storage, password hashing, token lifecycle,
//! and the register/login/me endpoints.
//!
//! # Flow
//!
//! 1. **Register**: validate input → hash password → insert user → issue token
//! 2. **Login**: look up by normalized email → verify hash → issue token
//! 3. **Me**: `CurrentUser` extractor verifies the token → profile lookup
//!
//! Tokens are stateless HS256 JWTs carrying `{sub, role, iat, exp}`; the
//! server holds only the signing secret. There is no revocation list —
//! logout is client-side, an accepted trade-off for a content site.

pub mod handlers;
pub mod passwords;
pub mod tokens;
pub mod users;

pub use handlers::{login, me, register};
pub use tokens::{Claims, TokenError, TokenService};
