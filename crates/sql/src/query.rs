use filterql_core::{parse_sort, FilterExpr, Resolver, ResolverAdapter, SortExpr};
use sqlx::{Postgres, QueryBuilder};

use crate::error::QueryError;
use crate::lower::{push_filter, push_order_by};

/// Parse, resolve and append a filter string as a ` WHERE` clause.
///
/// An empty filter leaves the query untouched and returns `None`.
pub fn apply_filter<A: ResolverAdapter>(
    qb: &mut QueryBuilder<'_, Postgres>,
    resolver: &Resolver<A>,
    filter: &str,
) -> Result<Option<FilterExpr>, QueryError> {
    if filter.trim().is_empty() {
        return Ok(None);
    }

    let ast = filterql_syntax::parse(filter)?;
    let expr = resolver.resolve(&ast).map_err(QueryError::Filter)?;

    qb.push(" WHERE ");
    push_filter(qb, &expr);
    tracing::debug!(filter, sql = qb.sql(), "applied filter");

    Ok(Some(expr))
}

/// Parse, resolve and append a sort string as an ` ORDER BY` clause.
pub fn apply_sort<A: ResolverAdapter>(
    qb: &mut QueryBuilder<'_, Postgres>,
    resolver: &Resolver<A>,
    sort: &str,
) -> Result<SortExpr, QueryError> {
    let parsed = parse_sort(sort).map_err(QueryError::Sort)?;
    let resolved = resolver.resolve_sort(parsed).map_err(QueryError::Sort)?;

    push_order_by(qb, &resolved)?;
    tracing::debug!(sort, sql = qb.sql(), "applied sort");

    Ok(resolved)
}
