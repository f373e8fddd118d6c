//! Property-based tests for the taxonomy, values and report pipeline.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p channel-report --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p channel-report --test property_tests
//! ```

use std::cmp::Ordering;

use proptest::prelude::*;

use channel_report::entity::prune;
use channel_report::parse::{FieldParser, SequenceParser};
use channel_report::taxonomy::Column;
use channel_report::transform::{finalize_report, merge_missing};
use channel_report::{ReportTable, Value};

// =============================================================================
// Test Strategies
// =============================================================================

fn any_column() -> impl Strategy<Value = Column> {
    (0..Column::all().len()).prop_map(|i| Column::all()[i])
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-50i64..50).prop_map(Value::Int),
        (-50.0f64..50.0).prop_map(Value::Float),
        // Same magnitude as either kind
        (-50i64..50, any::<bool>())
            .prop_map(|(n, float)| if float { Value::Float(n as f64) } else { Value::Int(n) }),
        // Integers past f64 precision
        (-2i64..3, any::<bool>()).prop_map(|(offset, float)| {
            let n = (1i64 << 53) + offset;
            if float { Value::Float(n as f64) } else { Value::Int(n) }
        }),
        "[a-c]{0,3}".prop_map(|s| Value::infer(&s)),
        (1u32..28, 0u32..24).prop_map(|(d, h)| Value::infer(&format!("2024-03-{:02}T{:02}:00:00", d, h))),
    ]
}

/// Rows of three cells each.
fn rows() -> impl Strategy<Value = Vec<Vec<Value>>> {
    prop::collection::vec(prop::collection::vec(cell(), 3), 0..20)
}

fn table(rows: Vec<Vec<Value>>) -> ReportTable {
    ReportTable::from_rows(
        vec!["campaign.spend".to_string(), "campaign.id".to_string(), "daily.time".to_string()],
        rows,
    )
}

fn order() -> Vec<String> {
    ["campaign.spend", "campaign.id", "daily.time"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn rendered_csv(report: &ReportTable) -> Vec<u8> {
    let mut out = Vec::new();
    report.write_csv(&mut out, b',').unwrap();
    out
}

fn json_tree() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        (0i64..10).prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

fn has_vacancy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.is_empty() || items.iter().any(has_vacancy),
        serde_json::Value::Object(map) => map.is_empty() || map.values().any(has_vacancy),
        _ => false,
    }
}

// =============================================================================
// Taxonomy
// =============================================================================

proptest! {
    #[test]
    fn column_comparison_is_antisymmetric(a in any_column(), b in any_column()) {
        match (a.try_cmp(b), b.try_cmp(a)) {
            (Ok(forward), Ok(backward)) => prop_assert_eq!(forward, backward.reverse()),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "comparison defined in one direction only"),
        }
    }

    #[test]
    fn column_names_round_trip(column in any_column()) {
        let parsed: Column = column.name().parse().unwrap();
        prop_assert_eq!(parsed, column);
    }
}

// =============================================================================
// Values
// =============================================================================

proptest! {
    #[test]
    fn infer_never_panics(raw in "\\PC{0,40}") {
        let _ = Value::infer(&raw);
    }

    #[test]
    fn value_order_is_total(a in cell(), b in cell()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        if a.cmp(&b) == Ordering::Equal {
            prop_assert_eq!(&a, &b);
        }
    }

    #[test]
    fn value_order_is_transitive(a in cell(), b in cell(), c in cell()) {
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
        if a >= b && b >= c {
            prop_assert!(a >= c);
        }
    }

    #[test]
    fn null_sorts_last(a in cell()) {
        prop_assert_ne!(a.cmp(&Value::Null), Ordering::Greater);
    }
}

// =============================================================================
// Pipeline
// =============================================================================

proptest! {
    #[test]
    fn finalize_ignores_input_row_order(
        (original, shuffled) in rows().prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
    ) {
        let a = finalize_report(&table(original), &order()).unwrap();
        let b = finalize_report(&table(shuffled), &order()).unwrap();
        prop_assert_eq!(a.digest(), b.digest());
        prop_assert_eq!(rendered_csv(&a), rendered_csv(&b));
        prop_assert_eq!(
            serde_json::to_string(&a.records()).unwrap(),
            serde_json::to_string(&b.records()).unwrap()
        );
    }

    #[test]
    fn finalize_leaves_no_empty_rows_or_columns(rows in rows()) {
        let finalized = finalize_report(&table(rows), &order()).unwrap();
        for name in finalized.column_names() {
            prop_assert!(finalized.column(name).unwrap().iter().any(|v| !v.is_empty()));
        }
        for row in finalized.rows() {
            prop_assert!(row.iter().any(|v| !v.is_empty()));
        }
    }

    #[test]
    fn merge_never_replaces_values(
        existing in prop::collection::vec(cell(), 8),
        incoming in prop::collection::vec(cell(), 8),
    ) {
        let mut report = ReportTable::from_columns([("campaign.id", existing.clone())]).unwrap();
        merge_missing(&mut report, "campaign.id", incoming.clone()).unwrap();
        let merged = report.column("campaign.id").unwrap();
        for i in 0..8 {
            if existing[i].is_empty() {
                prop_assert!(merged[i] == incoming[i] || incoming[i].is_empty());
            } else {
                prop_assert_eq!(&merged[i], &existing[i]);
            }
        }
    }
}

// =============================================================================
// Collaborators
// =============================================================================

proptest! {
    #[test]
    fn sequence_parser_without_targets_reassembles_input(input in "[a-z_]{0,30}") {
        let fields = SequenceParser::new("_", None).parse(&input);
        let joined: Vec<&str> = fields.values().map(String::as_str).collect();
        prop_assert_eq!(joined.join("_"), input);
    }

    #[test]
    fn prune_leaves_no_vacancies(tree in json_tree()) {
        let pruned = prune(tree);
        match &pruned {
            serde_json::Value::Object(map) => prop_assert!(map.values().all(|v| !has_vacancy(v))),
            serde_json::Value::Array(items) => prop_assert!(items.iter().all(|v| !has_vacancy(v))),
            _ => {}
        }
    }
}
