//! Typed per-kind views over untyped records.
//!
//! Storage and sync keep records as plain maps; integrity rules and repairs
//! read them through these views so field access is checked at compile time.
//! Projection never fails: a malformed value projects to `None` and is left
//! for the validator to report.

use crate::{EntityKind, Record, CREATED_AT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use till_types::Millis;

/// A record viewed through its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Ingredient(Ingredient),
    Menu(Menu),
    Transaction(Transaction),
    PurchaseItem(LineItem),
    SaleItem(LineItem),
}

impl EntityRecord {
    /// Projects `record` into the typed view for `kind`.
    pub fn project(kind: EntityKind, record: &Record) -> Self {
        match kind {
            EntityKind::Ingredient => EntityRecord::Ingredient(Ingredient::from_record(record)),
            EntityKind::Menu => EntityRecord::Menu(Menu::from_record(record)),
            EntityKind::Transaction => EntityRecord::Transaction(Transaction::from_record(record)),
            EntityKind::PurchaseItem => EntityRecord::PurchaseItem(LineItem::from_record(record)),
            EntityKind::SaleItem => EntityRecord::SaleItem(LineItem::from_record(record)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Ingredient(_) => EntityKind::Ingredient,
            EntityRecord::Menu(_) => EntityKind::Menu,
            EntityRecord::Transaction(_) => EntityKind::Transaction,
            EntityRecord::PurchaseItem(_) => EntityKind::PurchaseItem,
            EntityRecord::SaleItem(_) => EntityKind::SaleItem,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingredient {
    pub id: Option<String>,
    pub name: Option<String>,
    pub current_stock: Option<f64>,
    /// Purchase-unit to stock-unit multiplier, when the two differ.
    pub conversion_ratio: Option<f64>,
    pub is_active: Option<bool>,
    pub last_updated: Option<Millis>,
}

impl Ingredient {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: owned_str(record, "id"),
            name: owned_str(record, "name"),
            current_stock: record.get_number("currentStock"),
            conversion_ratio: record.get_number("conversionRatio"),
            is_active: record.get_bool("isActive"),
            last_updated: record.last_updated(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Menu {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub ingredients: Vec<MenuIngredient>,
    pub is_active: Option<bool>,
    pub last_updated: Option<Millis>,
}

impl Menu {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: owned_str(record, "id"),
            name: owned_str(record, "name"),
            price: record.get_number("price"),
            cost: record.get_number("cost"),
            ingredients: record
                .get_array("ingredients")
                .map(|lines| lines.iter().map(MenuIngredient::from_value).collect())
                .unwrap_or_default(),
            is_active: record.get_bool("isActive"),
            last_updated: record.last_updated(),
        }
    }
}

/// One recipe line of a menu item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuIngredient {
    pub ingredient_id: Option<String>,
    pub quantity: Option<f64>,
}

impl MenuIngredient {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let line = Record::from(map.clone());
                Self {
                    ingredient_id: owned_str(&line, "ingredientId"),
                    quantity: line.get_number("quantity"),
                }
            }
            _ => Self::default(),
        }
    }
}

/// Whether a transaction sells menu items or buys ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Purchase,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sale" => Some(TransactionType::Sale),
            "purchase" => Some(TransactionType::Purchase),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub id: Option<String>,
    pub transaction_type: Option<TransactionType>,
    /// Raw line records, validated against the line-item schema.
    pub items: Vec<Record>,
    pub total: Option<f64>,
    pub created_at: Option<Millis>,
    pub last_updated: Option<Millis>,
}

impl Transaction {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: owned_str(record, "id"),
            transaction_type: record.get_str("type").and_then(TransactionType::parse),
            items: record
                .get_array("items")
                .map(|items| {
                    items
                        .iter()
                        .map(|item| match item {
                            Value::Object(map) => Record::from(map.clone()),
                            _ => Record::new(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            total: record.get_number("total"),
            created_at: record.timestamp(CREATED_AT),
            last_updated: record.last_updated(),
        }
    }

    /// Schema for the lines: sales carry sale items, everything else
    /// (including an unrecognised type) carries purchase items.
    pub fn line_item_kind(&self) -> EntityKind {
        match self.transaction_type {
            Some(TransactionType::Sale) => EntityKind::SaleItem,
            _ => EntityKind::PurchaseItem,
        }
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(LineItem::from_record).collect()
    }

    /// Sum of line totals; a line without a total contributes nothing.
    pub fn line_total_sum(&self) -> f64 {
        self.line_items()
            .iter()
            .map(|line| line.total_price.unwrap_or(0.0))
            .sum()
    }

    /// The most recent of the modification and creation times.
    pub fn effective_timestamp(&self) -> Option<Millis> {
        self.last_updated.into_iter().chain(self.created_at).max()
    }
}

/// A purchase or sale line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    /// `ingredientId` for purchases, `menuId` for sales.
    pub item_ref: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
}

impl LineItem {
    pub fn from_record(record: &Record) -> Self {
        Self {
            item_ref: owned_str(record, "ingredientId").or_else(|| owned_str(record, "menuId")),
            quantity: record.get_number("quantity"),
            unit_price: record.get_number("unitPrice"),
            total_price: record.get_number("totalPrice"),
        }
    }

    /// `quantity * unitPrice`, when both are present.
    pub fn expected_total(&self) -> Option<f64> {
        Some(self.quantity? * self.unit_price?)
    }
}

fn owned_str(record: &Record, field: &str) -> Option<String> {
    record.get_str(field).map(str::to_string)
}
