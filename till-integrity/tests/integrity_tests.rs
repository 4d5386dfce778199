use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use till_integrity::{
    IntegrityChecker, IntegrityRule, RuleContext, Validator, FUTURE_SKEW_TOLERANCE_MS,
};
use till_model::{EntityKind, EntityRecord, Record};
use till_types::FixedClock;

const NOW: i64 = 1_700_000_000_000;

fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

fn validator() -> Validator {
    Validator::builder().clock(Arc::new(FixedClock::new(NOW))).build()
}

fn transaction(items: Value, total: Value) -> Value {
    json!({
        "id": "tx-1",
        "type": "sale",
        "items": items,
        "total": total,
        "createdAt": NOW,
    })
}

// ── Transactions ─────────────────────────────────────────────────

#[test]
fn total_equal_to_line_sum_is_valid() {
    let tx = transaction(json!([{"totalPrice": 40}, {"totalPrice": 60}]), json!(100));
    let result = validator().validate("transaction", &record(tx));
    assert!(result.valid, "{:?}", result.errors);
}

#[test]
fn total_mismatch_names_both_amounts() {
    let tx = transaction(json!([{"totalPrice": 40}, {"totalPrice": 60}]), json!(90));
    let result = validator().validate("transaction", &record(tx));
    assert!(!result.valid);
    assert_eq!(
        result.errors,
        vec!["total mismatch: expected 100.00 (sum of line totals), got 90.00"]
    );
}

#[test]
fn total_within_a_cent_is_valid() {
    let tx = transaction(json!([{"totalPrice": 10.1}, {"totalPrice": 20.2}]), json!(30.305));
    assert!(validator().validate("transaction", &record(tx)).valid);
}

#[test]
fn line_items_validated_against_sale_schema() {
    let tx = transaction(
        json!([{"menuId": "m1", "quantity": 0, "totalPrice": 5}]),
        json!(5),
    );
    let result = validator().validate("transaction", &record(tx));
    assert_eq!(result.errors, vec!["items[0]: quantity must be at least 1"]);
}

#[test]
fn purchase_lines_use_purchase_schema() {
    let mut tx = transaction(
        json!([{"ingredientId": "i1", "quantity": 0.5, "unit": "kg", "totalPrice": 2}]),
        json!(2),
    );
    tx["type"] = json!("purchase");
    assert!(validator().validate("transaction", &record(tx)).valid);
}

#[test]
fn line_integrity_errors_are_prefixed() {
    let tx = transaction(
        json!([
            {"totalPrice": 10},
            {"quantity": 2, "unitPrice": 50, "totalPrice": 101},
        ]),
        json!(111),
    );
    let result = validator().validate("transaction", &record(tx));
    assert_eq!(
        result.errors,
        vec!["items[1]: totalPrice mismatch: expected 100.00 (quantity x unitPrice), got 101.00"]
    );
}

#[test]
fn non_object_line_is_missing_its_total() {
    let tx = transaction(json!(["oops"]), json!(0));
    let result = validator().validate("transaction", &record(tx));
    assert_eq!(result.errors, vec!["items[0]: totalPrice is required"]);
}

#[test]
fn future_timestamp_within_skew_is_valid() {
    let mut tx = transaction(json!([{"totalPrice": 1}]), json!(1));
    tx["createdAt"] = json!(NOW + FUTURE_SKEW_TOLERANCE_MS);
    assert!(validator().validate("transaction", &record(tx)).valid);
}

#[test]
fn future_timestamp_beyond_skew_is_error() {
    let mut tx = transaction(json!([{"totalPrice": 1}]), json!(1));
    tx["lastUpdated"] = json!(NOW + 120_000);
    let result = validator().validate("transaction", &record(tx));
    assert_eq!(
        result.errors,
        vec!["timestamp is 120s in the future (allowed skew is 60s)"]
    );
}

// ── Line items ───────────────────────────────────────────────────

#[test]
fn purchase_item_total_outside_tolerance() {
    let item = json!({"quantity": 2, "unitPrice": 50, "totalPrice": 101});
    let result = validator().validate("purchaseItem", &record(item));
    assert_eq!(
        result.errors,
        vec!["totalPrice mismatch: expected 100.00 (quantity x unitPrice), got 101.00"]
    );
}

#[test]
fn purchase_item_total_within_tolerance() {
    let item = json!({"quantity": 2, "unitPrice": 50, "totalPrice": 100.004});
    assert!(validator().validate("purchaseItem", &record(item)).valid);
}

#[test]
fn sale_item_uses_same_rule() {
    let item = json!({"menuId": "m1", "quantity": 3, "unitPrice": 2.5, "totalPrice": 7});
    assert!(!validator().validate("saleItem", &record(item)).valid);
}

// ── Menus ────────────────────────────────────────────────────────

fn menu(extra: Value) -> Value {
    let mut base = json!({
        "id": "m1",
        "name": "Latte",
        "category": "Coffee",
        "price": 4.5,
        "lastUpdated": NOW,
    });
    for (k, v) in extra.as_object().unwrap() {
        base[k] = v.clone();
    }
    base
}

#[test]
fn recipe_lines_need_id_and_positive_quantity() {
    let m = menu(json!({"ingredients": [
        {"ingredientId": "milk", "quantity": 0.2},
        {"quantity": 1},
        {"ingredientId": "beans", "quantity": 0},
    ]}));
    let result = validator().validate("menu", &record(m));
    assert_eq!(
        result.errors,
        vec![
            "ingredients[1]: ingredientId is required",
            "ingredients[2]: quantity must be greater than 0",
        ]
    );
}

#[test]
fn price_below_cost_is_error() {
    let result = validator().validate("menu", &record(menu(json!({"cost": 5}))));
    assert_eq!(result.errors, vec!["price (4.50) must not be lower than cost (5.00)"]);
}

#[test]
fn price_equal_to_cost_is_valid() {
    assert!(validator().validate("menu", &record(menu(json!({"cost": 4.5})))).valid);
}

// ── Registry ─────────────────────────────────────────────────────

fn no_notes(record: &EntityRecord, _: &RuleContext<'_>) -> Vec<String> {
    match record {
        EntityRecord::Ingredient(i) if i.name.as_deref() == Some("forbidden") => {
            vec!["name is reserved".to_string()]
        }
        _ => Vec::new(),
    }
}

#[test]
fn registered_rule_runs_without_touching_dispatch() {
    let mut checker = IntegrityChecker::with_default_rules();
    checker.register(EntityKind::Ingredient, IntegrityRule::new("reserved-name", no_notes));
    assert_eq!(checker.rules(EntityKind::Ingredient).len(), 2);

    let validator = Validator::builder()
        .clock(Arc::new(FixedClock::new(NOW)))
        .checker(checker)
        .build();
    let result = validator.validate(
        "ingredient",
        &record(json!({
            "id": "i", "name": "forbidden", "unit": "g", "currentStock": 1, "lastUpdated": NOW
        })),
    );
    assert_eq!(result.errors, vec!["name is reserved"]);
}

#[test]
fn check_integrity_alone() {
    let outcome = validator().check_integrity(
        EntityKind::PurchaseItem,
        &record(json!({"quantity": 1, "unitPrice": 1, "totalPrice": 3})),
    );
    assert!(!outcome.valid);
    assert_eq!(outcome.errors.len(), 1);
}

#[test]
fn default_rule_inventory() {
    let checker = IntegrityChecker::with_default_rules();
    let names: Vec<_> = checker
        .rules(EntityKind::Transaction)
        .iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["line-items-valid", "total-matches-lines", "timestamp-not-future"]);
    assert!(IntegrityChecker::new().rules(EntityKind::Menu).is_empty());
}
