use serde_json::json;
use strata_query::{QueryValue, Sort, parse_filter};
use strata_schema::{Field, FieldCatalog};
use strata_sql::{SqlWhere, compile_into, compile_order_by};

fn catalog() -> FieldCatalog {
    FieldCatalog::new([
        Field::root("f_status", "status"),
        Field::root("f_score", "score"),
        Field::root("f_owner", "owner"),
        Field::root("f_meta", "meta").structured(),
        Field::child("f_region", "region", "f_meta"),
        Field::child("f_flags", "flags", "f_meta"),
    ])
}

#[test]
fn filter_compiles_end_to_end_into_a_builder() {
    let filter = parse_filter(&json!({
        "status": { "eq": "active" },
        "OR": [
            { "meta": { "region": { "in": ["us", "eu"] } } },
            { "score": { "gte": 90 } },
        ],
    }))
    .unwrap();

    let mut sink = SqlWhere::new();
    compile_into("records", &catalog(), &mut sink, &filter);

    let (sql, params) = sink.into_parts();
    assert_eq!(
        sql,
        "\"records\".\"data\"->>'f_status' = :6b65793a616374697665 \
         AND (\"records\".\"data\"->'f_meta'->>'f_region' IN (:...6b65793a75732c6575) \
         OR \"records\".\"data\"->>'f_score' >= :6b65793a3930)"
    );

    assert_eq!(params.len(), 3);
    assert_eq!(params[0].1, QueryValue::String("active".into()));
    assert_eq!(
        params[1].1,
        QueryValue::List(vec![
            QueryValue::String("us".into()),
            QueryValue::String("eu".into()),
        ])
    );
    assert_eq!(params[2].1, QueryValue::Int(90));
}

#[test]
fn unknown_entries_leave_the_builder_untouched() {
    let filter = parse_filter(&json!({
        "mistyped": { "eq": 1 },
        "meta": { "nope": { "eq": 2 } },
    }))
    .unwrap();

    let mut sink = SqlWhere::new();
    compile_into("records", &catalog(), &mut sink, &filter);
    assert!(sink.is_empty());
    assert!(sink.params().is_empty());
}

#[test]
fn order_by_uses_the_same_path_dialect() {
    let terms = compile_order_by(
        "records",
        &catalog(),
        &[Sort::desc(["meta", "region"]), Sort::asc(["status"])],
    );
    assert_eq!(
        terms,
        vec![
            "\"records\".\"data\"->'f_meta'->>'f_region' DESC",
            "\"records\".\"data\"->>'f_status' ASC",
        ]
    );
}
