//! Resolution of user-facing filter and sort expressions into typed,
//! storage-agnostic trees.
//!
//! The input is a generic syntax tree from [`filterql_syntax`]; all domain
//! knowledge comes from a [`ResolverAdapter`].

pub mod adapter;
pub mod error;
pub mod expr;
pub mod literal;
pub mod resolver;
pub mod schema;
pub mod sort;

pub use adapter::{Name, NameKind, ResolverAdapter};
pub use error::FilterError;
pub use expr::{FilterExpr, InExpr, InTableExpr, OpKind, Table, Value, ValueList};
pub use resolver::Resolver;
pub use schema::{Schema, SchemaAdapter};
pub use sort::{parse_sort, SortExpr, SortItem, SortOrder};
