//! Wire shapes for the order workflow. Field names are camelCase on the
//! wire to match the storefront client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::identity::{Address, User};
use crate::domain::order::{Order, OrderStatus};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    pub items: Vec<OrderItemRequest>,
    pub shipping_address_id: Uuid,
    pub billing_address_id: Uuid,
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Fully rendered order: denormalized user fields, expanded addresses,
/// product name/image per line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub items: Vec<OrderItemSummary>,
    pub shipping_address: AddressSummary,
    pub billing_address: AddressSummary,
    pub total_amount: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
    pub tracking_number: Option<String>,
    pub order_date: DateTime<Utc>,
    pub processed_date: Option<DateTime<Utc>>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OrderSummary {
    pub fn from_parts(
        order: Order,
        user: &User,
        shipping: Address,
        billing: Address,
        items: Vec<OrderItemSummary>,
    ) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            user_id: user.id,
            user_email: user.email.clone(),
            user_name: user.display_name(),
            items,
            shipping_address: shipping.into(),
            billing_address: billing.into(),
            total_amount: order.total_amount,
            shipping_cost: order.shipping_cost,
            tax_amount: order.tax_amount,
            status: order.status,
            payment_method: order.payment_method,
            payment_id: order.payment_id,
            tracking_number: order.tracking_number,
            order_date: order.order_date,
            processed_date: order.processed_date,
            shipped_date: order.shipped_date,
            delivered_date: order.delivered_date,
            created_at: order.created_at,
        }
    }
}

/// One rendered line; produced directly from the order_items/products join.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemSummary {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSummary {
    pub id: Uuid,
    pub street_address: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone_number: Option<String>,
}

impl From<Address> for AddressSummary {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            street_address: a.street_address,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            phone_number: a.phone_number,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    /// Normalized (page, per_page): page starts at 1, per_page defaults to
    /// 20 and is capped at 100.
    pub fn normalize(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        (page, per_page)
    }

    pub fn limit_offset(&self) -> (i64, i64) {
        let (page, per_page) = self.normalize();
        // Widen before multiplying; a huge client-supplied page must not
        // overflow u32.
        (per_page as i64, (page as i64 - 1) * per_page as i64)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Role;
    use chrono::TimeZone;

    fn sample_user() -> User {
        User {
            id: Uuid::now_v7(),
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: "Tran".into(),
            role: Role::Customer,
        }
    }

    fn sample_address(user_id: Uuid) -> Address {
        Address {
            id: Uuid::now_v7(),
            user_id,
            street_address: "12 Mill Lane".into(),
            city: "Leeds".into(),
            state: None,
            postal_code: "LS1 4AB".into(),
            country: "GB".into(),
            phone_number: Some("+44 113 000 0000".into()),
        }
    }

    #[test]
    fn summary_denormalizes_user_and_addresses() {
        let user = sample_user();
        let shipping = sample_address(user.id);
        let billing = sample_address(user.id);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let order = Order {
            id: Uuid::now_v7(),
            order_number: "ORD-1-1".into(),
            user_id: user.id,
            shipping_address_id: shipping.id,
            billing_address_id: billing.id,
            total_amount: Decimal::new(14997, 2),
            shipping_cost: Decimal::new(599, 2),
            tax_amount: Decimal::new(14997, 3),
            status: OrderStatus::Pending,
            payment_method: Some("card".into()),
            payment_id: None,
            tracking_number: None,
            order_date: now,
            processed_date: None,
            shipped_date: None,
            delivered_date: None,
            created_at: now,
        };
        let shipping_id = shipping.id;
        let summary = OrderSummary::from_parts(order, &user, shipping, billing, vec![]);
        assert_eq!(summary.user_name, "Ana Tran");
        assert_eq!(summary.user_email, "ana@example.com");
        assert_eq!(summary.shipping_address.id, shipping_id);
        assert_eq!(summary.status, OrderStatus::Pending);
    }

    #[test]
    fn summary_serializes_camel_case_with_uppercase_status() {
        let user = sample_user();
        let shipping = sample_address(user.id);
        let billing = sample_address(user.id);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let order = Order {
            id: Uuid::now_v7(),
            order_number: "ORD-1-1".into(),
            user_id: user.id,
            shipping_address_id: shipping.id,
            billing_address_id: billing.id,
            total_amount: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            status: OrderStatus::Shipped,
            payment_method: None,
            payment_id: None,
            tracking_number: None,
            order_date: now,
            processed_date: None,
            shipped_date: Some(now),
            delivered_date: None,
            created_at: now,
        };
        let summary = OrderSummary::from_parts(order, &user, shipping, billing, vec![]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "SHIPPED");
        assert!(json.get("orderNumber").is_some());
        assert!(json.get("totalAmount").is_some());
        assert!(json.get("shippedDate").is_some());
    }

    #[test]
    fn page_params_clamp_to_sane_bounds() {
        let p = PageParams { page: Some(0), per_page: Some(500) };
        assert_eq!(p.normalize(), (1, 100));
        let d = PageParams::default();
        assert_eq!(d.normalize(), (1, 20));
        assert_eq!(d.limit_offset(), (20, 0));
    }

    #[test]
    fn page_params_survive_maximum_page() {
        let p = PageParams { page: Some(u32::MAX), per_page: Some(100) };
        let (limit, offset) = p.limit_offset();
        assert_eq!(limit, 100);
        assert_eq!(offset, (u32::MAX as i64 - 1) * 100);
    }

    #[test]
    fn create_order_request_rejects_empty_items() {
        let empty = CreateOrderRequest {
            items: vec![],
            shipping_address_id: Uuid::now_v7(),
            billing_address_id: Uuid::now_v7(),
            payment_method: None,
            payment_id: None,
        };
        assert!(empty.validate().is_err());

        let filled = CreateOrderRequest {
            items: vec![OrderItemRequest {
                product_id: Uuid::now_v7(),
                quantity: 1,
                selected_size: Some("M".into()),
                selected_color: None,
            }],
            shipping_address_id: Uuid::now_v7(),
            billing_address_id: Uuid::now_v7(),
            payment_method: Some("card".into()),
            payment_id: None,
        };
        assert!(filled.validate().is_ok());
    }
}
