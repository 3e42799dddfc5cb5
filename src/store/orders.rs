//! Order persistence. Inserts happen inside the workflow's transaction;
//! reads go through whatever executor the caller holds.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::domain::order::{Order, OrderItem};
use crate::dto::OrderItemSummary;

pub async fn insert_order<'e>(db: impl PgExecutor<'e>, order: &Order) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, shipping_address_id, \
         billing_address_id, total_amount, shipping_cost, tax_amount, status, \
         payment_method, payment_id, tracking_number, order_date, processed_date, \
         shipped_date, delivered_date, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.user_id)
    .bind(order.shipping_address_id)
    .bind(order.billing_address_id)
    .bind(order.total_amount)
    .bind(order.shipping_cost)
    .bind(order.tax_amount)
    .bind(order.status)
    .bind(&order.payment_method)
    .bind(&order.payment_id)
    .bind(&order.tracking_number)
    .bind(order.order_date)
    .bind(order.processed_date)
    .bind(order.shipped_date)
    .bind(order.delivered_date)
    .bind(order.created_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_item<'e>(db: impl PgExecutor<'e>, item: &OrderItem) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, product_id, quantity, price, \
         selected_size, selected_color) VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.price)
    .bind(&item.selected_size)
    .bind(&item.selected_color)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_order<'e>(db: impl PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Order>> {
    sqlx::query_as::<_, Order>(
        "SELECT id, order_number, user_id, shipping_address_id, billing_address_id, \
         total_amount, shipping_cost, tax_amount, status, payment_method, payment_id, \
         tracking_number, order_date, processed_date, shipped_date, delivered_date, \
         created_at FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Writes back the status and latch timestamps computed by
/// `Order::set_status`.
pub async fn update_status<'e>(db: impl PgExecutor<'e>, order: &Order) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE orders SET status = $2, processed_date = $3, shipped_date = $4, \
         delivered_date = $5 WHERE id = $1",
    )
    .bind(order.id)
    .bind(order.status)
    .bind(order.processed_date)
    .bind(order.shipped_date)
    .bind(order.delivered_date)
    .execute(db)
    .await?;
    Ok(())
}

/// Owning user of an order, if the order exists.
pub async fn order_owner<'e>(db: impl PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Uuid>> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|(user_id,)| user_id))
}

pub async fn list_for_user<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
) -> sqlx::Result<Vec<Order>> {
    sqlx::query_as::<_, Order>(
        "SELECT id, order_number, user_id, shipping_address_id, billing_address_id, \
         total_amount, shipping_cost, tax_amount, status, payment_method, payment_id, \
         tracking_number, order_date, processed_date, shipped_date, delivered_date, \
         created_at FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn list_page<'e>(
    db: impl PgExecutor<'e>,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Order>> {
    sqlx::query_as::<_, Order>(
        "SELECT id, order_number, user_id, shipping_address_id, billing_address_id, \
         total_amount, shipping_cost, tax_amount, status, payment_method, payment_id, \
         tracking_number, order_date, processed_date, shipped_date, delivered_date, \
         created_at FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_all<'e>(db: impl PgExecutor<'e>) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Rendered line items for one order: the snapshot fields plus the
/// product's current name and primary image.
pub async fn item_summaries<'e>(
    db: impl PgExecutor<'e>,
    order_id: Uuid,
) -> sqlx::Result<Vec<OrderItemSummary>> {
    sqlx::query_as::<_, OrderItemSummary>(
        "SELECT oi.id, oi.product_id, p.name AS product_name, \
         (SELECT url FROM product_images i WHERE i.product_id = p.id AND i.is_primary LIMIT 1) \
             AS product_image, \
         oi.quantity, oi.price, oi.selected_size, oi.selected_color \
         FROM order_items oi JOIN products p ON p.id = oi.product_id \
         WHERE oi.order_id = $1 ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(db)
    .await
}
