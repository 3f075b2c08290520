//! News posts: user-authored articles in a sport category.
//!
//! Anyone may read; creating requires a token; updating and deleting
//! require ownership or the admin role.

pub mod db;
pub mod handlers;
