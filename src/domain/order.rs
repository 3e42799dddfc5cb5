//! Order and line-item records, status parsing, and the timestamp latches
//! driven by status changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Case-insensitive name lookup; `None` for anything outside the seven
    /// variants.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PROCESSING" => Some(Self::Processing),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            "REFUNDED" => Some(Self::Refunded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Refunded => "REFUNDED",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub shipping_address_id: Uuid,
    pub billing_address_id: Uuid,
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

impl Order {
    /// Assigns a new status and fires the matching timestamp latch.
    ///
    /// Any status may replace any other; transitions are deliberately
    /// unconstrained. Each of processed/shipped/delivered date is set the
    /// first time its status is entered and never overwritten, so jumping
    /// straight to DELIVERED sets only delivered_date.
    pub fn set_status(&mut self, next: OrderStatus, now: DateTime<Utc>) {
        self.status = next;
        match next {
            OrderStatus::Processing if self.processed_date.is_none() => {
                self.processed_date = Some(now);
            }
            OrderStatus::Shipped if self.shipped_date.is_none() => {
                self.shipped_date = Some(now);
            }
            OrderStatus::Delivered if self.delivered_date.is_none() => {
                self.delivered_date = Some(now);
            }
            _ => {}
        }
    }
}

/// One purchased line. `price` is the unit price copied from the product at
/// creation; later product price changes never reach persisted orders.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

/// Human-readable order number: prefix, creation millis, random suffix.
/// Uniqueness is probabilistic, not constraint-backed.
pub fn order_number_at(now: DateTime<Utc>, suffix: u32) -> String {
    format!("ORD-{}-{}", now.timestamp_millis(), suffix % 1000)
}

pub fn generate_order_number() -> String {
    order_number_at(Utc::now(), rand::random::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn blank_order() -> Order {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Order {
            id: Uuid::now_v7(),
            order_number: "ORD-1-1".into(),
            user_id: Uuid::now_v7(),
            shipping_address_id: Uuid::now_v7(),
            billing_address_id: Uuid::now_v7(),
            total_amount: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
            payment_method: None,
            payment_id: None,
            tracking_number: None,
            order_date: now,
            processed_date: None,
            shipped_date: None,
            delivered_date: None,
            created_at: now,
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("SHIPPED"), Some(OrderStatus::Shipped));
    }

    #[test]
    fn status_parse_rejects_unknown_names() {
        assert_eq!(OrderStatus::parse("bogus"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn delivered_latch_fires_without_earlier_stages() {
        let mut order = blank_order();
        let t = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        order.set_status(OrderStatus::Delivered, t);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.delivered_date, Some(t));
        assert!(order.processed_date.is_none());
        assert!(order.shipped_date.is_none());
    }

    #[test]
    fn processed_latch_is_idempotent() {
        let mut order = blank_order();
        let first = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap();
        order.set_status(OrderStatus::Processing, first);
        order.set_status(OrderStatus::Shipped, first);
        order.set_status(OrderStatus::Processing, second);
        assert_eq!(order.processed_date, Some(first));
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn any_transition_is_allowed() {
        let mut order = blank_order();
        let t = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        order.set_status(OrderStatus::Cancelled, t);
        order.set_status(OrderStatus::Pending, t);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn order_number_has_prefix_millis_and_bounded_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let number = order_number_at(now, 123_456);
        let parts: Vec<&str> = number.splitn(3, '-').collect();
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2], "456");
    }
}
