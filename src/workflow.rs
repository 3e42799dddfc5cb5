//! The order workflow: creation with price snapshotting, status updates
//! with one-shot timestamps, and the ownership predicate.
//!
//! Every operation takes the acting user's id explicitly; there is no
//! ambient session state. Mutations run inside a single transaction, so a
//! failure mid-sequence rolls back everything.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::{generate_order_number, Order, OrderItem, OrderStatus};
use crate::domain::pricing;
use crate::dto::{CreateOrderRequest, OrderSummary, PageParams, Paginated};
use crate::error::AppError;
use crate::store;

/// Creates a PENDING order for `actor_id` from the requested lines.
///
/// Each line's unit price is copied from the product at this moment;
/// later product price changes never alter the persisted order. Stock is
/// neither checked nor decremented, and address ownership is not verified
/// (see DESIGN.md for both).
pub async fn create_order(
    db: &PgPool,
    actor_id: Uuid,
    req: CreateOrderRequest,
) -> Result<OrderSummary, AppError> {
    let mut tx = db.begin().await?;

    // Missing user for an authenticated session is an integrity error;
    // surface it as NotFound like any other dangling reference.
    let user = store::identity::find_user(&mut *tx, actor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {actor_id}")))?;
    let shipping = store::identity::find_address(&mut *tx, req.shipping_address_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "shipping address not found: {}",
                req.shipping_address_id
            ))
        })?;
    let billing = store::identity::find_address(&mut *tx, req.billing_address_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "billing address not found: {}",
                req.billing_address_id
            ))
        })?;

    let now = Utc::now();
    let order_id = Uuid::now_v7();
    let mut items = Vec::with_capacity(req.items.len());
    let mut lines = Vec::with_capacity(req.items.len());
    for line in &req.items {
        if line.quantity < 1 {
            return Err(AppError::InvalidArgument(format!(
                "quantity must be positive for product {}",
                line.product_id
            )));
        }
        let product = store::catalog::find_product(&mut *tx, line.product_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("product not found: {}", line.product_id))
            })?;
        items.push(OrderItem {
            id: Uuid::now_v7(),
            order_id,
            product_id: product.id,
            quantity: line.quantity,
            price: product.price,
            selected_size: line.selected_size.clone(),
            selected_color: line.selected_color.clone(),
        });
        lines.push((product.price, line.quantity));
    }

    let totals = pricing::totals_for(lines);
    let order = Order {
        id: order_id,
        order_number: generate_order_number(),
        user_id: user.id,
        shipping_address_id: shipping.id,
        billing_address_id: billing.id,
        total_amount: totals.total_amount,
        shipping_cost: totals.shipping_cost,
        tax_amount: totals.tax_amount,
        status: OrderStatus::Pending,
        payment_method: req.payment_method,
        payment_id: req.payment_id,
        tracking_number: None,
        order_date: now,
        processed_date: None,
        shipped_date: None,
        delivered_date: None,
        created_at: now,
    };

    store::orders::insert_order(&mut *tx, &order).await?;
    for item in &items {
        store::orders::insert_item(&mut *tx, item).await?;
    }
    tx.commit().await?;

    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        user_id = %user.id,
        total = %order.total_amount,
        "order created"
    );
    render_summary(db, order).await
}

/// Sets the order's status from a client-supplied name.
///
/// The name is matched case-insensitively; anything outside the seven
/// variants is InvalidArgument and leaves the stored status untouched.
/// Transitions are not gated — any status may replace any other — but the
/// processed/shipped/delivered timestamps latch on first entry only.
pub async fn update_order_status(
    db: &PgPool,
    order_id: Uuid,
    status_name: &str,
) -> Result<OrderSummary, AppError> {
    let status = OrderStatus::parse(status_name).ok_or_else(|| {
        AppError::InvalidArgument(format!("invalid order status: {status_name}"))
    })?;

    let mut tx = db.begin().await?;
    let mut order = store::orders::find_order(&mut *tx, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order not found: {order_id}")))?;
    order.set_status(status, Utc::now());
    store::orders::update_status(&mut *tx, &order).await?;
    tx.commit().await?;

    tracing::info!(order_id = %order.id, status = status.as_str(), "order status updated");
    render_summary(db, order).await
}

/// True only if the order exists and belongs to `actor_id`. A missing
/// order or a mismatch is `false`, not an error.
pub async fn is_order_owner(
    db: &PgPool,
    order_id: Uuid,
    actor_id: Uuid,
) -> Result<bool, AppError> {
    let owner = store::orders::order_owner(db, order_id).await?;
    Ok(owns_order(owner, actor_id))
}

/// Ownership decision: `owner` is the order's user id if the order exists.
fn owns_order(owner: Option<Uuid>, actor_id: Uuid) -> bool {
    owner == Some(actor_id)
}

pub async fn get_order(db: &PgPool, order_id: Uuid) -> Result<OrderSummary, AppError> {
    let order = store::orders::find_order(db, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order not found: {order_id}")))?;
    render_summary(db, order).await
}

/// The actor's own orders, newest first.
pub async fn orders_for_user(
    db: &PgPool,
    user_id: Uuid,
) -> Result<Vec<OrderSummary>, AppError> {
    let orders = store::orders::list_for_user(db, user_id).await?;
    let mut summaries = Vec::with_capacity(orders.len());
    for order in orders {
        summaries.push(render_summary(db, order).await?);
    }
    Ok(summaries)
}

/// Admin-facing page over all orders.
pub async fn list_orders(
    db: &PgPool,
    params: &PageParams,
) -> Result<Paginated<OrderSummary>, AppError> {
    let (page, _) = params.normalize();
    let (limit, offset) = params.limit_offset();
    let orders = store::orders::list_page(db, limit, offset).await?;
    let total = store::orders::count_all(db).await?;
    let mut data = Vec::with_capacity(orders.len());
    for order in orders {
        data.push(render_summary(db, order).await?);
    }
    Ok(Paginated { data, total, page })
}

/// Expands a persisted order into its response shape: denormalized user
/// fields, both addresses inline, product name/image per line. Dangling
/// references mean the database integrity is broken; surfaced as NotFound.
async fn render_summary(db: &PgPool, order: Order) -> Result<OrderSummary, AppError> {
    let user = store::identity::find_user(db, order.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {}", order.user_id)))?;
    let shipping = store::identity::find_address(db, order.shipping_address_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "shipping address not found: {}",
                order.shipping_address_id
            ))
        })?;
    let billing = store::identity::find_address(db, order.billing_address_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "billing address not found: {}",
                order.billing_address_id
            ))
        })?;
    let items = store::orders::item_summaries(db, order.id).await?;
    Ok(OrderSummary::from_parts(order, &user, shipping, billing, items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_order_is_not_owned() {
        assert!(!owns_order(None, Uuid::now_v7()));
    }

    #[test]
    fn mismatched_owner_is_not_owned() {
        assert!(!owns_order(Some(Uuid::now_v7()), Uuid::now_v7()));
    }

    #[test]
    fn exact_owner_match_is_owned() {
        let actor = Uuid::now_v7();
        assert!(owns_order(Some(actor), actor));
    }
}
