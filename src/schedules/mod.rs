//! Game schedules: the fixture calendar.
//!
//! Read by anyone (with derived `upcoming` and `live` views); created,
//! updated, and deleted by admins only.

pub mod db;
pub mod handlers;
