use filterql_core::{FilterExpr, Resolver, ResolverAdapter, SortExpr};
use filterql_sql::{apply_filter, apply_sort};
use serde::Serialize;
use sqlx::{Postgres, QueryBuilder};

use crate::error::CliError;

/// Everything produced for one invocation.
#[derive(Debug, Serialize)]
pub struct Resolved {
    pub filter: Option<FilterExpr>,
    pub sort: SortExpr,
    pub sql: String,
}

/// Resolve `filter` and `sort` and append them to `select`.
pub fn run<A: ResolverAdapter>(
    select: &str,
    resolver: &Resolver<A>,
    filter: &str,
    sort: &str,
) -> Result<Resolved, CliError> {
    let mut qb = QueryBuilder::<Postgres>::new(select);

    let filter = apply_filter(&mut qb, resolver, filter)?;
    let sort = apply_sort(&mut qb, resolver, sort)?;

    Ok(Resolved {
        filter,
        sort,
        sql: qb.sql().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filterql_core::{Schema, SchemaAdapter};
    use serde_json::json;

    fn resolver() -> Resolver<SchemaAdapter> {
        let schema = Schema::from_json(
            &json!({
                "defaultSort": { "column": "shows.name" },
                "fields": {
                    "name": { "column": "shows.name", "kind": "string" },
                    "type": { "column": "shows.type", "kind": "string" },
                },
                "functions": { "hasType": { "kind": "in", "field": "type" } },
            })
            .to_string(),
        )
        .unwrap();
        Resolver::new(SchemaAdapter::new(schema))
    }

    #[test]
    fn renders_json_document() {
        let resolved = run("SELECT * FROM shows", &resolver(), "hasType(\"movie\")", "random").unwrap();
        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({
                "filter": { "type": "in", "not": false, "name": "shows.type", "values": ["movie"] },
                "sort": { "mode": "random" },
                "sql": "SELECT * FROM shows WHERE (\"shows\".\"type\" = ANY($1)) ORDER BY RANDOM()",
            })
        );
    }

    #[test]
    fn bad_input_exits_with_two() {
        let err = run("SELECT 1", &resolver(), "year == 1", "").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "invalid filter: unknown name: year");
    }

    #[test]
    fn deeply_nested_filter_is_bad_input() {
        let filter = format!("{}name == \"x\"{}", "(".repeat(5_000), ")".repeat(5_000));
        let err = run("SELECT 1", &resolver(), &filter, "").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bundled_media_schema() {
        let schema = Schema::from_json(include_str!("../schemas/media.json")).unwrap();
        let resolver = Resolver::new(SchemaAdapter::new(schema));
        let resolved = run(
            "SELECT * FROM media",
            &resolver,
            "airingSeason != null && hasTag(\"Slice of Life\")",
            "sort=-score,title",
        )
        .unwrap();
        assert_eq!(
            resolved.sql,
            "SELECT * FROM media WHERE ((\"media\".\"airing_season\" IS NOT NULL) AND \
             (\"media\".\"id\" IN (SELECT \"media_id\" FROM \"media_tags\" WHERE \"tag_slug\" = ANY($1)))) \
             ORDER BY \"media\".\"score\" DESC NULLS LAST, \"media\".\"title\" ASC NULLS LAST"
        );
    }
}
