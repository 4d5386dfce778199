use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use till_model::{Conflict, IssueReporter, Record, SchemaRegistry};
use till_sync::ConflictDetector;

fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

fn menu(name: &str, price: f64, ts: i64) -> Record {
    record(json!({
        "id": "m1",
        "name": name,
        "category": "Coffee",
        "price": price,
        "ingredients": [{"ingredientId": "milk", "quantity": 0.2}],
        "lastUpdated": ts,
    }))
}

#[derive(Default)]
struct Recording(Mutex<Vec<String>>);

impl IssueReporter for Recording {
    fn unknown_kind(&self, kind: &str) {
        self.0.lock().unwrap().push(kind.to_string());
    }
}

#[test]
fn identical_records_have_no_conflicts() {
    let a = menu("Latte", 4.5, 100);
    let result = ConflictDetector::new().detect(&a, &a.clone(), "menu");
    assert!(!result.has_conflicts);
    assert!(result.conflicts.is_empty());
}

#[test]
fn equal_timestamps_short_circuit_without_comparing() {
    let local = menu("Latte", 4.5, 100);
    let remote = menu("Flat white", 5.0, 100);
    let result = ConflictDetector::new().detect(&local, &remote, "menu");
    assert!(!result.has_conflicts);
}

#[test]
fn numerically_equal_timestamps_short_circuit() {
    let local = menu("Latte", 4.5, 100);
    let mut remote = menu("Mocha", 4.5, 0);
    remote.insert("lastUpdated", 100.0);
    assert!(!ConflictDetector::new().detect(&local, &remote, "menu").has_conflicts);
}

#[test]
fn differing_fields_become_conflicts_in_schema_order() {
    let local = menu("Latte", 4.5, 100);
    let remote = menu("Flat white", 5.0, 200);
    let result = ConflictDetector::new().detect(&local, &remote, "menu");
    assert!(result.has_conflicts);
    let fields: Vec<_> = result.conflicts.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "price", "lastUpdated"]);
    assert_eq!(
        result.conflicts[0],
        Conflict {
            field: "name".into(),
            local_value: Some(json!("Latte")),
            remote_value: Some(json!("Flat white")),
            local_timestamp: 100,
            remote_timestamp: 200,
        }
    );
}

#[test]
fn nested_sequences_compare_deeply() {
    let local = menu("Latte", 4.5, 100);
    let mut remote = menu("Latte", 4.5, 200);
    remote.insert("ingredients", json!([{"ingredientId": "milk", "quantity": 0.3}]));
    let result = ConflictDetector::new().detect(&local, &remote, "menu");
    let fields: Vec<_> = result.conflicts.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["ingredients", "lastUpdated"]);
}

#[test]
fn field_present_on_one_side_only() {
    let local = menu("Latte", 4.5, 100);
    let remote = menu("Latte", 4.5, 200).with("description", "Milky");
    let result = ConflictDetector::new().detect(&local, &remote, "menu");
    let description = result
        .conflicts
        .iter()
        .find(|c| c.field == "description")
        .unwrap();
    assert_eq!(description.local_value, None);
    assert_eq!(description.remote_value, Some(json!("Milky")));
}

#[test]
fn undeclared_fields_are_ignored() {
    let local = menu("Latte", 4.5, 100).with("colour", "brown");
    let remote = menu("Latte", 4.5, 200).with("colour", "white");
    let result = ConflictDetector::new().detect(&local, &remote, "menu");
    assert!(result.conflicts.iter().all(|c| c.field != "colour"));
}

#[test]
fn missing_timestamps_default_to_zero() {
    let local = record(json!({"id": "i1", "name": "Salt"}));
    let remote = record(json!({"id": "i1", "name": "Sea salt", "lastUpdated": 5}));
    let result = ConflictDetector::new().detect(&local, &remote, "ingredient");
    assert_eq!(result.conflicts[0].local_timestamp, 0);
    assert_eq!(result.conflicts[0].remote_timestamp, 5);
}

#[test]
fn unknown_kind_reports_nothing_but_is_flagged() {
    let reporter = Arc::new(Recording::default());
    let detector = ConflictDetector::with_schemas(SchemaRegistry::builtin(), reporter.clone());
    let result = detector.detect(&menu("a", 1.0, 1), &menu("b", 2.0, 2), "customer");
    assert!(!result.has_conflicts);
    assert_eq!(*reporter.0.lock().unwrap(), vec!["customer".to_string()]);
}

#[test]
fn detection_result_serializes_camel_case() {
    let result = ConflictDetector::new().detect(&menu("a", 1.0, 1), &menu("a", 1.0, 2), "menu");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["hasConflicts"], json!(true));
    assert_eq!(json["conflicts"][0]["field"], json!("lastUpdated"));
}
