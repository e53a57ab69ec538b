use std::sync::Arc;

use filterql_core::{
    parse_sort, FilterError, FilterExpr, InTableExpr, Name, NameKind, OpKind, Resolver,
    ResolverAdapter, SortExpr, SortItem, SortOrder, Table, Value,
};
use filterql_syntax::{parse, Expr};

/// Hand-written adapter for a media library.
struct MediaAdapter;

impl ResolverAdapter for MediaAdapter {
    fn resolve_name_to_id(&self, typ: &str, name: &str) -> Option<String> {
        match typ {
            "tags" => Some(name.to_lowercase().replace(' ', "-")),
            // Only known collections resolve; "Inbox" has no backing id.
            "collections" => match name {
                "Watchlist" => Some("col_1".into()),
                "Inbox" => Some(String::new()),
                _ => None,
            },
            _ => None,
        }
    }

    fn resolve_variable_name(&self, name: &str) -> Option<Name> {
        match name {
            "id" => Some(Name::new(NameKind::String, "media.id")),
            "title" => Some(Name::new(NameKind::String, "media.title")),
            "year" => Some(Name::new(NameKind::Number, "media.year")),
            "score" => Some(Name::new(NameKind::Number, "media.score").nullable()),
            "userList" => Some(Name::new(NameKind::String, "user_data.list").nullable()),
            _ => None,
        }
    }

    fn resolve_table(&self, typ: &str) -> Option<Table> {
        let (name, select_name, where_name) = match typ {
            "tags" => ("media_tags", "media_id", "tag_slug"),
            "collections" => ("collection_media", "media_id", "collection_id"),
            _ => return None,
        };
        Some(Table {
            name: name.into(),
            select_name: select_name.into(),
            where_name: where_name.into(),
        })
    }

    fn resolve_function_call(
        &self,
        resolver: &Resolver<Self>,
        name: &str,
        args: &[Expr],
    ) -> Result<FilterExpr, FilterError> {
        match name {
            "hasTag" => resolver.in_table(name, "tags", "media.id", args).map(Into::into),
            "inCollection" => resolver
                .in_table(name, "collections", "media.id", args)
                .map(Into::into),
            _ => Err(FilterError::UnknownFunction(name.to_string())),
        }
    }

    fn default_sort(&self) -> (String, SortOrder) {
        ("media.title".into(), SortOrder::Asc)
    }
}

fn resolver() -> Resolver<MediaAdapter> {
    Resolver::new(MediaAdapter)
}

fn resolve(input: &str) -> Result<FilterExpr, FilterError> {
    resolver().resolve(&parse(input).unwrap())
}

fn op(kind: OpKind, name: &str, value: Value) -> FilterExpr {
    FilterExpr::Op {
        kind,
        name: name.into(),
        value,
    }
}

#[test]
fn number_field_equality() {
    for field in ["year", "score"] {
        let column = MediaAdapter.resolve_variable_name(field).unwrap().name;
        assert_eq!(
            resolve(&format!("{field} == 5")).unwrap(),
            op(OpKind::Equal, &column, Value::Number(5))
        );
    }
}

#[test]
fn nullable_fields_compare_to_null() {
    for (field, column) in [("score", "media.score"), ("userList", "user_data.list")] {
        assert_eq!(
            resolve(&format!("{field} == null")).unwrap(),
            FilterExpr::IsNull {
                name: column.into(),
                not: false
            }
        );
        assert_eq!(
            resolve(&format!("{field} != null")).unwrap(),
            FilterExpr::IsNull {
                name: column.into(),
                not: true
            }
        );
    }
}

#[test]
fn non_nullable_field_rejects_null() {
    let err = resolve("year == null").unwrap_err();
    assert_eq!(err, FilterError::NotNullable("year".into()));
    assert!(!err.is_internal());
}

#[test]
fn negated_membership() {
    match resolve("not inCollection(\"Watchlist\")").unwrap() {
        FilterExpr::InTable(expr) => {
            assert!(expr.not);
            assert_eq!(expr.ids, vec!["col_1".to_string()]);
        }
        other => panic!("expected InTable, got {other:?}"),
    }
}

#[test]
fn double_negation_cancels_out() {
    assert_eq!(
        resolve("!!hasTag(\"Action\")").unwrap(),
        resolve("hasTag(\"Action\")").unwrap()
    );
}

#[test]
fn connectives_preserve_operand_order() {
    let a = op(OpKind::Equal, "media.year", Value::Number(1));
    let b = op(OpKind::Equal, "media.title", Value::String("x".into()));

    assert_eq!(
        resolve("year == 1 && title == \"x\"").unwrap(),
        FilterExpr::and(a.clone(), b.clone())
    );
    assert_eq!(
        resolve("year == 1 || title == \"x\"").unwrap(),
        FilterExpr::or(a, b)
    );
}

#[test]
fn sort_string_resolves_to_columns() {
    let sort = parse_sort("sort=+title,-year").unwrap();
    assert_eq!(
        resolver().resolve_sort(sort).unwrap(),
        SortExpr::Sort(vec![
            SortItem {
                order: SortOrder::Asc,
                name: "media.title".into()
            },
            SortItem {
                order: SortOrder::Desc,
                name: "media.year".into()
            },
        ])
    );
}

#[test]
fn default_sort_uses_adapter() {
    let (name, order) = MediaAdapter.default_sort();
    for input in ["", "default"] {
        assert_eq!(
            resolver().resolve_sort(parse_sort(input).unwrap()).unwrap(),
            SortExpr::Sort(vec![SortItem {
                order,
                name: name.clone()
            }])
        );
    }
}

#[test]
fn unknown_names_are_reported_exactly() {
    assert_eq!(
        resolve("title == \"x\" && rating > 3"),
        Err(FilterError::UnknownName("rating".into()))
    );
    assert_eq!(
        resolver().resolve_sort(parse_sort("sort=title,-rating").unwrap()),
        Err(FilterError::UnknownName("rating".into()))
    );
}

#[test]
fn membership_with_only_empty_ids_matches_nothing() {
    assert_eq!(
        resolve("inCollection(\"Inbox\", \"Inbox\")").unwrap(),
        FilterExpr::InTable(InTableExpr {
            not: false,
            id_selector: "media.id".into(),
            table: Table {
                name: "collection_media".into(),
                select_name: "media_id".into(),
                where_name: "collection_id".into(),
            },
            ids: vec![],
        })
    );
}

#[test]
fn unknown_function_is_distinct_from_unknown_name() {
    assert_eq!(
        resolve("inPlaylist(\"x\")"),
        Err(FilterError::UnknownFunction("inPlaylist".into()))
    );
    assert_eq!(
        resolve("inCollection(\"Nope\")"),
        Err(FilterError::UnknownName("Nope".into()))
    );
}

#[test]
fn resolution_is_deterministic() {
    let resolver = resolver();
    let tree = parse("(year >= 2000 || score == null) && !hasTag(\"Slice of Life\")").unwrap();
    let first = resolver.resolve(&tree).unwrap();
    let second = resolver.resolve(&tree).unwrap();
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_resolver_across_tasks() {
    let resolver = Arc::new(resolver());
    let tree = Arc::new(parse("year > 1990 && hasTag(\"Drama\")").unwrap());
    let expected = resolver.resolve(&tree).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            let tree = Arc::clone(&tree);
            tokio::spawn(async move { resolver.resolve(&tree) })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), expected);
    }
}
