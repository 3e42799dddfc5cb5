//! Catalog records: products, categories, colors, sizes. Read-only from the
//! order workflow's perspective — creation snapshots a product's price but
//! never touches stock_quantity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "category_kind", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryKind {
    Men,
    Women,
    Kids,
    Accessories,
}

impl CategoryKind {
    /// Case-insensitive name lookup; `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MEN" => Some(Self::Men),
            "WOMEN" => Some(Self::Women),
            "KIDS" => Some(Self::Kids),
            "ACCESSORIES" => Some(Self::Accessories),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: CategoryKind,
    /// Parent by id, not by object reference; children are found by
    /// querying for this id.
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category_id: Option<Uuid>,
    pub material: Option<String>,
    pub featured: bool,
    pub new_arrival: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Color {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Size {
    pub id: Uuid,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_kind_parses_any_case() {
        assert_eq!(CategoryKind::parse("men"), Some(CategoryKind::Men));
        assert_eq!(CategoryKind::parse("Women"), Some(CategoryKind::Women));
        assert_eq!(CategoryKind::parse("ACCESSORIES"), Some(CategoryKind::Accessories));
    }

    #[test]
    fn category_kind_rejects_unknown_names() {
        assert_eq!(CategoryKind::parse("unisex"), None);
        assert_eq!(CategoryKind::parse(""), None);
    }
}
