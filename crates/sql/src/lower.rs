//! Lowering of resolved trees into PostgreSQL clauses.

use filterql_core::{FilterExpr, OpKind, SortExpr, SortOrder, Value, ValueList};
use sqlx::{Postgres, QueryBuilder};

use crate::error::QueryError;

/// Quote a possibly qualified identifier: `media.title` -> `"media"."title"`.
pub fn quote_ident(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn op_symbol(kind: OpKind) -> &'static str {
    match kind {
        OpKind::Equal => "=",
        OpKind::NotEqual => "<>",
        OpKind::Like => "LIKE",
        OpKind::Greater => ">",
        OpKind::GreaterEqual => ">=",
        OpKind::Lesser => "<",
        OpKind::LesserEqual => "<=",
    }
}

/// Append `expr` as a boolean SQL expression, binding every literal.
pub fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, expr: &FilterExpr) {
    match expr {
        FilterExpr::And { left, right } => push_connective(qb, "AND", left, right),
        FilterExpr::Or { left, right } => push_connective(qb, "OR", left, right),
        FilterExpr::IsNull { name, not } => {
            let not = if *not { "NOT " } else { "" };
            qb.push(format!("({} IS {not}NULL)", quote_ident(name)));
        }
        FilterExpr::Op { kind, name, value } => {
            qb.push(format!("({} {} ", quote_ident(name), op_symbol(*kind)));
            match value {
                Value::String(s) => qb.push_bind(s.clone()),
                Value::Number(n) => qb.push_bind(*n),
            };
            qb.push(")");
        }
        FilterExpr::InTable(expr) => {
            let op = if expr.not { "NOT IN" } else { "IN" };
            qb.push(format!(
                "({} {op} (SELECT {} FROM {} WHERE {} = ANY(",
                quote_ident(&expr.id_selector),
                quote_ident(&expr.table.select_name),
                quote_ident(&expr.table.name),
                quote_ident(&expr.table.where_name),
            ));
            qb.push_bind(expr.ids.clone());
            qb.push(")))");
        }
        FilterExpr::In(expr) => {
            let op = if expr.not { "<> ALL" } else { "= ANY" };
            qb.push(format!("({} {op}(", quote_ident(&expr.name)));
            match &expr.values {
                ValueList::Strings(values) => qb.push_bind(values.clone()),
                ValueList::Numbers(values) => qb.push_bind(values.clone()),
            };
            qb.push("))");
        }
    }
}

fn push_connective(
    qb: &mut QueryBuilder<'_, Postgres>,
    keyword: &str,
    left: &FilterExpr,
    right: &FilterExpr,
) {
    qb.push("(");
    push_filter(qb, left);
    qb.push(format!(" {keyword} "));
    push_filter(qb, right);
    qb.push(")");
}

/// Append ` ORDER BY ...` for a resolved sort.
pub fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, sort: &SortExpr) -> Result<(), QueryError> {
    match sort {
        SortExpr::Sort(items) if items.is_empty() => {}
        SortExpr::Sort(items) => {
            qb.push(" ORDER BY ");
            let mut list = qb.separated(", ");
            for item in items {
                let order = match item.order {
                    SortOrder::Asc => "ASC",
                    SortOrder::Desc => "DESC",
                };
                list.push(format!("{} {order} NULLS LAST", quote_ident(&item.name)));
            }
        }
        SortExpr::Random => {
            qb.push(" ORDER BY RANDOM()");
        }
        SortExpr::Default => return Err(QueryError::UnresolvedSort),
    }
    Ok(())
}
