use pretty_assertions::assert_eq;
use till_model::{EntityKind, FieldDecl, FieldType, Schema, SchemaRegistry};

// ── FieldDecl constructors ───────────────────────────────────────

#[test]
fn string_field_with_length() {
    let f = FieldDecl::string("name").required().length(1, 100);
    assert_eq!(f.name, "name");
    assert_eq!(f.field_type, FieldType::String);
    assert!(f.required);
    assert_eq!(f.min_length, Some(1));
    assert_eq!(f.max_length, Some(100));
}

#[test]
fn optional_by_default() {
    let f = FieldDecl::number("cost");
    assert!(!f.required);
    assert_eq!(f.min, None);
    assert_eq!(f.max, None);
}

#[test]
fn enumeration_keeps_values_in_order() {
    let f = FieldDecl::enumeration("unit", &["kg", "g"]);
    assert_eq!(f.field_type, FieldType::Enum);
    assert_eq!(f.values, vec!["kg".to_string(), "g".to_string()]);
}

#[test]
fn array_item_bounds() {
    let f = FieldDecl::array("items").items(1, 500);
    assert_eq!(f.min_items, Some(1));
    assert_eq!(f.max_items, Some(500));
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn field_decl_serializes_camel_case_and_skips_unset_bounds() {
    let f = FieldDecl::number("price").required().min(0.0);
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"name": "price", "type": "number", "required": true, "min": 0.0})
    );
}

#[test]
fn field_decl_deserializes_with_defaults() {
    let f: FieldDecl =
        serde_json::from_str(r#"{"name":"notes","type":"string","maxLength":10}"#).unwrap();
    assert!(!f.required);
    assert_eq!(f.max_length, Some(10));
    assert!(f.values.is_empty());
}

// ── Schema ───────────────────────────────────────────────────────

#[test]
fn schema_field_lookup() {
    let s = Schema::new(
        EntityKind::Menu,
        vec![FieldDecl::string("id"), FieldDecl::number("price")],
    );
    assert!(s.declares("price"));
    assert!(!s.declares("colour"));
    assert_eq!(s.field("id").map(|f| f.field_type), Some(FieldType::String));
    assert_eq!(s.field_names().collect::<Vec<_>>(), vec!["id", "price"]);
}

// ── Registry ─────────────────────────────────────────────────────

#[test]
fn builtin_registry_has_every_kind() {
    let registry = SchemaRegistry::builtin();
    assert_eq!(registry.kinds(), EntityKind::ALL.to_vec());
}

#[test]
fn builtin_registry_is_shared() {
    let a = SchemaRegistry::builtin();
    let b = SchemaRegistry::builtin();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn lookup_by_wire_name() {
    let registry = SchemaRegistry::builtin();
    assert_eq!(
        registry.lookup("purchaseItem").map(|s| s.kind),
        Some(EntityKind::PurchaseItem)
    );
    assert!(registry.lookup("customer").is_none());
}

#[test]
fn empty_registry_has_no_kinds() {
    let registry = SchemaRegistry::new();
    assert!(registry.kinds().is_empty());
    assert!(registry.get(EntityKind::Menu).is_none());
}

#[test]
fn insert_replaces_existing_schema() {
    let mut registry = SchemaRegistry::with_builtin_schemas();
    let replaced = registry.insert(Schema::new(EntityKind::Menu, vec![FieldDecl::string("id")]));
    assert!(replaced.is_some());
    assert_eq!(registry.get(EntityKind::Menu).unwrap().fields.len(), 1);
}

#[test]
fn every_builtin_schema_declares_a_timestamp_or_total() {
    let registry = SchemaRegistry::builtin();
    for kind in [EntityKind::Ingredient, EntityKind::Menu, EntityKind::Transaction] {
        let schema = registry.get(kind).unwrap();
        assert!(schema.declares("lastUpdated"), "{kind} lacks lastUpdated");
    }
    for kind in [EntityKind::PurchaseItem, EntityKind::SaleItem] {
        let schema = registry.get(kind).unwrap();
        assert!(schema.field("totalPrice").unwrap().required);
    }
}

#[test]
fn transaction_type_is_enum_of_sale_and_purchase() {
    let registry = SchemaRegistry::builtin();
    let ty = registry.get(EntityKind::Transaction).unwrap().field("type").unwrap();
    assert_eq!(ty.field_type, FieldType::Enum);
    assert_eq!(ty.values, vec!["sale", "purchase"]);
}
