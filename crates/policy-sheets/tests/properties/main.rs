//! Property tests over generated policy records.

use policy_sheets::{ColumnSchema, ReportRenderer, TableBuilder};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 /._-]{0,24}".prop_map(Value::from),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Objects that use the real field names with arbitrary values, in either shape
fn policy_record() -> impl Strategy<Value = Value> {
    let keys = prop::sample::subsequence(
        vec![
            "id",
            "name",
            "type",
            "location",
            "displayName",
            "description",
            "metadata",
            "policyType",
            "mode",
            "policyRule",
            "parameters",
            "versions",
        ],
        0..12,
    );
    (keys, prop::collection::vec(json_value(), 12), any::<bool>()).prop_map(
        |(keys, values, wrapped)| {
            let body: Map<String, Value> = keys
                .into_iter()
                .zip(values)
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            if wrapped {
                json!({"name": "wrapped", "properties": Value::Object(body)})
            } else {
                Value::Object(body)
            }
        },
    )
}

proptest! {
    #[test]
    fn flattener_never_omits_a_column(records in prop::collection::vec(policy_record(), 0..8)) {
        let schema = ColumnSchema::detailed();
        let table = TableBuilder::new(schema.clone()).build(&records).unwrap();

        prop_assert_eq!(table.len(), records.len());
        for row in table.rows() {
            prop_assert!(row.columns().eq(schema.columns().into_iter()));
        }
    }

    #[test]
    fn rows_keep_input_order(names in prop::collection::vec("[a-z]{1,10}", 0..12)) {
        let records: Vec<Value> = names.iter().map(|n| json!({"displayName": n})).collect();
        let table = TableBuilder::new(ColumnSchema::definitions()).build(&records).unwrap();

        let shown: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r.get(policy_sheets::Column::DisplayName).unwrap_or_default())
            .collect();
        prop_assert_eq!(shown, names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn rendering_is_deterministic(records in prop::collection::vec(policy_record(), 0..5)) {
        let table = TableBuilder::new(ColumnSchema::detailed()).build(&records).unwrap();
        let renderer = ReportRenderer::default();

        let first = renderer.render(&table).unwrap();
        let second = renderer.render(&table).unwrap();
        prop_assert_eq!(first.bytes(), second.bytes());
    }
}
