//! Comments on articles.
//!
//! Comments reference their article by an opaque string ref of the form
//! `category-type-number` (e.g. `basketball-news-1`) and are not foreign-
//! keyed to the posts table, so seeded/static article pages can carry
//! comment threads too. See DESIGN.md for the rationale.

pub mod db;
pub mod handlers;

pub use handlers::is_valid_post_ref;
