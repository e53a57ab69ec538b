//! PostgreSQL lowering for resolved filter and sort trees.

pub mod error;
pub mod lower;
pub mod query;

pub use error::QueryError;
pub use lower::{push_filter, push_order_by, quote_ident};
pub use query::{apply_filter, apply_sort};
