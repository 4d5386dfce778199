use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a record. Determines which schema and integrity rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Ingredient,
    Menu,
    Transaction,
    PurchaseItem,
    SaleItem,
}

impl EntityKind {
    /// Every declared kind, in registration order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Ingredient,
        EntityKind::Menu,
        EntityKind::Transaction,
        EntityKind::PurchaseItem,
        EntityKind::SaleItem,
    ];

    /// The wire name used by stores and UI (`"purchaseItem"`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Ingredient => "ingredient",
            EntityKind::Menu => "menu",
            EntityKind::Transaction => "transaction",
            EntityKind::PurchaseItem => "purchaseItem",
            EntityKind::SaleItem => "saleItem",
        }
    }

    /// True for the two line-item kinds nested inside transactions.
    #[must_use]
    pub const fn is_line_item(&self) -> bool {
        matches!(self, EntityKind::PurchaseItem | EntityKind::SaleItem)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}
