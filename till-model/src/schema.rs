//! Schema registry: per-kind ordered field declarations.
//!
//! Schemas are immutable once built. [`SchemaRegistry::builtin`] returns the
//! process-wide registry holding the five point-of-sale entity kinds.

use crate::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
    Enum,
    Timestamp,
}

/// One field of a schema with its type-specific bounds.
///
/// Bounds only apply to the matching type: `min_length`/`max_length` to
/// strings, `min`/`max` to numbers, `min_items`/`max_items` to arrays and
/// `values` to enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl FieldDecl {
    fn simple(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            min_items: None,
            max_items: None,
            values: Vec::new(),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::simple(name, FieldType::String)
    }

    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldType::Number)
    }

    pub fn boolean(name: &str) -> Self {
        Self::simple(name, FieldType::Boolean)
    }

    pub fn array(name: &str) -> Self {
        Self::simple(name, FieldType::Array)
    }

    pub fn timestamp(name: &str) -> Self {
        Self::simple(name, FieldType::Timestamp)
    }

    /// An enum field restricted to `values`.
    pub fn enumeration(name: &str, values: &[&str]) -> Self {
        Self {
            values: values.iter().map(|v| (*v).to_string()).collect(),
            ..Self::simple(name, FieldType::Enum)
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// String length bounds (inclusive).
    #[must_use]
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Array length bounds (inclusive).
    #[must_use]
    pub fn items(mut self, min: usize, max: usize) -> Self {
        self.min_items = Some(min);
        self.max_items = Some(max);
        self
    }

    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }
}

/// Ordered field declarations for one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub kind: EntityKind,
    pub fields: Vec<FieldDecl>,
}

impl Schema {
    pub fn new(kind: EntityKind, fields: Vec<FieldDecl>) -> Self {
        Self { kind, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Holds one [`Schema`] per entity kind.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<EntityKind, Schema>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry populated with the built-in point-of-sale schemas.
    pub fn with_builtin_schemas() -> Self {
        let mut registry = Self::new();
        for schema in builtin_schemas() {
            registry.insert(schema);
        }
        registry
    }

    /// The shared, process-wide built-in registry.
    pub fn builtin() -> Arc<SchemaRegistry> {
        static BUILTIN: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Arc::new(Self::with_builtin_schemas()))
            .clone()
    }

    /// Registers a schema, replacing any previous schema for the same kind.
    pub fn insert(&mut self, schema: Schema) -> Option<Schema> {
        self.schemas.insert(schema.kind, schema)
    }

    pub fn get(&self, kind: EntityKind) -> Option<&Schema> {
        self.schemas.get(&kind)
    }

    /// Looks up a schema by wire name; unknown names return `None`.
    pub fn lookup(&self, kind: &str) -> Option<&Schema> {
        kind.parse::<EntityKind>().ok().and_then(|k| self.get(k))
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|k| self.schemas.contains_key(k))
            .collect()
    }
}

const UNITS: &[&str] = &["kg", "g", "l", "ml", "pcs"];

// Line items only insist on `totalPrice`: ad-hoc lines (discounts, service
// charges) carry no product reference, quantity, or unit price.
fn builtin_schemas() -> Vec<Schema> {
    vec![
        Schema::new(
            EntityKind::Ingredient,
            vec![
                FieldDecl::string("id").required().length(1, 64),
                FieldDecl::string("name").required().length(1, 100),
                FieldDecl::enumeration("unit", UNITS).required(),
                FieldDecl::number("currentStock").required().min(0.0),
                FieldDecl::number("minimumStock").min(0.0),
                FieldDecl::number("costPerUnit").min(0.0),
                FieldDecl::number("conversionRatio"),
                FieldDecl::enumeration("purchaseUnit", UNITS),
                FieldDecl::string("category").max_length(50),
                FieldDecl::boolean("isActive"),
                FieldDecl::timestamp("lastUpdated").required(),
            ],
        ),
        Schema::new(
            EntityKind::Menu,
            vec![
                FieldDecl::string("id").required().length(1, 64),
                FieldDecl::string("name").required().length(1, 100),
                FieldDecl::string("category").required().length(1, 50),
                FieldDecl::number("price").required().min(0.0),
                FieldDecl::number("cost").min(0.0),
                FieldDecl::array("ingredients").max_items(50),
                FieldDecl::string("description").max_length(500),
                FieldDecl::boolean("isActive"),
                FieldDecl::timestamp("lastUpdated").required(),
            ],
        ),
        Schema::new(
            EntityKind::Transaction,
            vec![
                FieldDecl::string("id").required().length(1, 64),
                FieldDecl::enumeration("type", &["sale", "purchase"]).required(),
                FieldDecl::array("items").required().items(1, 500),
                FieldDecl::number("total").required().min(0.0),
                FieldDecl::enumeration("paymentMethod", &["cash", "card", "transfer", "other"]),
                FieldDecl::string("partyName").max_length(100),
                FieldDecl::string("notes").max_length(1000),
                FieldDecl::timestamp("createdAt").required(),
                FieldDecl::timestamp("lastUpdated"),
            ],
        ),
        Schema::new(
            EntityKind::PurchaseItem,
            vec![
                FieldDecl::string("ingredientId").length(1, 64),
                FieldDecl::string("name").max_length(100),
                FieldDecl::number("quantity").min(0.001),
                FieldDecl::enumeration("unit", UNITS),
                FieldDecl::number("unitPrice").min(0.0),
                FieldDecl::number("totalPrice").required().min(0.0),
            ],
        ),
        Schema::new(
            EntityKind::SaleItem,
            vec![
                FieldDecl::string("menuId").length(1, 64),
                FieldDecl::string("name").max_length(100),
                FieldDecl::number("quantity").min(1.0).max(999.0),
                FieldDecl::number("unitPrice").min(0.0),
                FieldDecl::number("totalPrice").required().min(0.0),
            ],
        ),
    ]
}
