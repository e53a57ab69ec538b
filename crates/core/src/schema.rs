//! A [`ResolverAdapter`] configured from data instead of code.
//!
//! ```json
//! {
//!   "defaultSort": { "column": "media.title" },
//!   "fields": {
//!     "title": { "column": "media.title", "kind": "string" },
//!     "malId": { "column": "media.mal_id", "kind": "string", "nullable": true }
//!   },
//!   "tables": {
//!     "tags": { "name": "media_tags", "selectName": "media_id", "whereName": "tag_slug" }
//!   },
//!   "ids": { "tags": "slug" },
//!   "functions": {
//!     "hasTag": { "kind": "inTable", "type": "tags", "idSelector": "media.id" },
//!     "hasStatus": { "kind": "in", "field": "status" }
//!   }
//! }
//! ```

use std::collections::HashMap;

use filterql_syntax::Expr;
use serde::{Deserialize, Serialize};

use crate::adapter::{Name, NameKind, ResolverAdapter};
use crate::error::FilterError;
use crate::expr::{FilterExpr, Table};
use crate::resolver::Resolver;
use crate::sort::SortOrder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub default_sort: DefaultSort,
    #[serde(default)]
    pub fields: HashMap<String, FieldDef>,
    #[serde(default)]
    pub tables: HashMap<String, Table>,
    #[serde(default)]
    pub ids: HashMap<String, IdStrategy>,
    #[serde(default)]
    pub functions: HashMap<String, FunctionDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSort {
    pub column: String,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub column: String,
    pub kind: NameKind,
    #[serde(default)]
    pub nullable: bool,
}

/// How human-entered names of one type turn into ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdStrategy {
    /// The id is the slug of the name.
    Slug,
    /// The name is already the id.
    Identity,
    /// Fixed lookup; names missing from the map are unknown.
    Map(HashMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FunctionDef {
    /// Membership through the join table registered for `type`.
    #[serde(rename_all = "camelCase")]
    InTable {
        #[serde(rename = "type")]
        typ: String,
        id_selector: String,
    },
    /// Membership of `field` in the literal arguments.
    In { field: String },
}

impl Schema {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Adapter answering every question from a [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaAdapter {
    schema: Schema,
}

impl SchemaAdapter {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }
}

impl ResolverAdapter for SchemaAdapter {
    fn resolve_name_to_id(&self, typ: &str, name: &str) -> Option<String> {
        match self.schema.ids.get(typ)? {
            IdStrategy::Slug => Some(slug::slugify(name)),
            IdStrategy::Identity => Some(name.to_string()),
            IdStrategy::Map(ids) => ids.get(name).cloned(),
        }
    }

    fn resolve_variable_name(&self, name: &str) -> Option<Name> {
        self.schema.fields.get(name).map(|field| Name {
            kind: field.kind,
            name: field.column.clone(),
            nullable: field.nullable,
        })
    }

    fn resolve_table(&self, typ: &str) -> Option<Table> {
        self.schema.tables.get(typ).cloned()
    }

    fn resolve_function_call(
        &self,
        resolver: &Resolver<Self>,
        name: &str,
        args: &[Expr],
    ) -> Result<FilterExpr, FilterError> {
        match self.schema.functions.get(name) {
            Some(FunctionDef::InTable { typ, id_selector }) => resolver
                .in_table(name, typ, id_selector, args)
                .map(FilterExpr::InTable),
            Some(FunctionDef::In { field }) => {
                resolver.in_list(name, field, args).map(FilterExpr::In)
            }
            None => Err(FilterError::UnknownFunction(name.to_string())),
        }
    }

    fn default_sort(&self) -> (String, SortOrder) {
        let sort = &self.schema.default_sort;
        (sort.column.clone(), sort.order)
    }
}
