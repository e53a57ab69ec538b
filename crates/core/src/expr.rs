use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// A resolved, fully typed filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterExpr {
    And {
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },
    Or {
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },
    IsNull {
        name: String,
        not: bool,
    },
    Op {
        kind: OpKind,
        name: String,
        value: Value,
    },
    InTable(InTableExpr),
    In(InExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpKind {
    Equal,
    NotEqual,
    Like,
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

/// Literal operand of an [`FilterExpr::Op`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(i64),
}

/// Join table used by membership tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    pub select_name: String,
    pub where_name: String,
}

/// Does `id_selector` appear among the rows of `table` matching `ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InTableExpr {
    pub not: bool,
    pub id_selector: String,
    pub table: Table,
    pub ids: Vec<String>,
}

/// Does column `name` hold one of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InExpr {
    pub not: bool,
    pub name: String,
    pub values: ValueList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueList {
    Strings(Vec<String>),
    Numbers(Vec<i64>),
}

impl FilterExpr {
    pub fn and(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Flip the `not` flag of a membership test.
    ///
    /// Only membership tests carry their own negation; every other variant
    /// is rejected.
    pub fn negate(self) -> Result<Self, FilterError> {
        match self {
            FilterExpr::InTable(mut expr) => {
                expr.not = !expr.not;
                Ok(FilterExpr::InTable(expr))
            }
            FilterExpr::In(mut expr) => {
                expr.not = !expr.not;
                Ok(FilterExpr::In(expr))
            }
            _ => Err(FilterError::UnsupportedNegation),
        }
    }
}

impl From<InTableExpr> for FilterExpr {
    fn from(expr: InTableExpr) -> Self {
        FilterExpr::InTable(expr)
    }
}

impl From<InExpr> for FilterExpr {
    fn from(expr: InExpr) -> Self {
        FilterExpr::In(expr)
    }
}
