use till_model::{EntityKind, ModelError};

#[test]
fn wire_names() {
    assert_eq!(EntityKind::Ingredient.as_str(), "ingredient");
    assert_eq!(EntityKind::PurchaseItem.as_str(), "purchaseItem");
    assert_eq!(EntityKind::SaleItem.to_string(), "saleItem");
}

#[test]
fn parse_round_trips_every_kind() {
    for kind in EntityKind::ALL {
        assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
    }
}

#[test]
fn parse_is_case_sensitive() {
    assert!("Menu".parse::<EntityKind>().is_err());
}

#[test]
fn unknown_kind_error_names_the_kind() {
    let err = "customer".parse::<EntityKind>().unwrap_err();
    assert!(matches!(err, ModelError::UnknownKind(ref k) if k == "customer"));
    assert_eq!(err.to_string(), "unknown entity kind: customer");
}

#[test]
fn serde_uses_wire_names() {
    let json = serde_json::to_string(&EntityKind::SaleItem).unwrap();
    assert_eq!(json, "\"saleItem\"");
    let kind: EntityKind = serde_json::from_str("\"purchaseItem\"").unwrap();
    assert_eq!(kind, EntityKind::PurchaseItem);
}

#[test]
fn line_item_kinds() {
    assert!(EntityKind::SaleItem.is_line_item());
    assert!(EntityKind::PurchaseItem.is_line_item());
    assert!(!EntityKind::Transaction.is_line_item());
}
