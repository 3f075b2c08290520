//! HTTP surface: the route table and its shared layers.

pub mod router;

pub use router::create_router;
