use filterql_syntax::Expr;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::expr::{FilterExpr, Table};
use crate::resolver::Resolver;
use crate::sort::SortOrder;

/// Semantic type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameKind {
    String,
    Number,
}

/// A user-facing field name resolved to its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub kind: NameKind,
    pub name: String,
    pub nullable: bool,
}

impl Name {
    pub fn new(kind: NameKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Domain knowledge the [`Resolver`] needs from its host.
///
/// Implementations are expected to wrap read-only schema metadata, so they
/// can be shared between threads once built.
pub trait ResolverAdapter: Sized {
    /// Map a human-entered name of type `typ` (e.g. a tag) to a stable id.
    /// An empty id means "no id" and is dropped from membership tests.
    fn resolve_name_to_id(&self, typ: &str, name: &str) -> Option<String>;

    fn resolve_variable_name(&self, name: &str) -> Option<Name>;

    fn resolve_table(&self, typ: &str) -> Option<Table>;

    /// Expand a domain function. Arguments are handed over unresolved; the
    /// adapter re-enters `resolver` for them.
    fn resolve_function_call(
        &self,
        resolver: &Resolver<Self>,
        name: &str,
        args: &[Expr],
    ) -> Result<FilterExpr, FilterError>;

    fn default_sort(&self) -> (String, SortOrder);
}
