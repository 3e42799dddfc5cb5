//! Catalog reads: products, categories, colors, sizes.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::domain::catalog::{Category, CategoryKind, Color, Product, Size};

pub async fn find_product<'e>(
    db: impl PgExecutor<'e>,
    id: Uuid,
) -> sqlx::Result<Option<Product>> {
    sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, description, price, stock_quantity, category_id, material, \
         featured, new_arrival, created_at, updated_at \
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Filtered product page. Null filters match everything.
pub async fn list_products<'e>(
    db: impl PgExecutor<'e>,
    category_id: Option<Uuid>,
    search: Option<&str>,
    featured: Option<bool>,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Product>> {
    sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, description, price, stock_quantity, category_id, material, \
         featured, new_arrival, created_at, updated_at \
         FROM products \
         WHERE ($1::uuid IS NULL OR category_id = $1) \
           AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
           AND ($3::bool IS NULL OR featured = $3) \
         ORDER BY created_at DESC LIMIT $4 OFFSET $5",
    )
    .bind(category_id)
    .bind(search)
    .bind(featured)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_products<'e>(
    db: impl PgExecutor<'e>,
    category_id: Option<Uuid>,
    search: Option<&str>,
    featured: Option<bool>,
) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM products \
         WHERE ($1::uuid IS NULL OR category_id = $1) \
           AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
           AND ($3::bool IS NULL OR featured = $3)",
    )
    .bind(category_id)
    .bind(search)
    .bind(featured)
    .fetch_one(db)
    .await?;
    Ok(count)
}

pub async fn find_category<'e>(
    db: impl PgExecutor<'e>,
    id: Uuid,
) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, description, kind, parent_id FROM categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn list_categories<'e>(
    db: impl PgExecutor<'e>,
    kind: Option<CategoryKind>,
    parent_id: Option<Uuid>,
) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, description, kind, parent_id FROM categories \
         WHERE ($1::category_kind IS NULL OR kind = $1) \
           AND ($2::uuid IS NULL OR parent_id = $2) \
         ORDER BY name",
    )
    .bind(kind)
    .bind(parent_id)
    .fetch_all(db)
    .await
}

pub async fn list_colors<'e>(db: impl PgExecutor<'e>) -> sqlx::Result<Vec<Color>> {
    sqlx::query_as::<_, Color>("SELECT id, name FROM colors ORDER BY name")
        .fetch_all(db)
        .await
}

pub async fn list_sizes<'e>(db: impl PgExecutor<'e>) -> sqlx::Result<Vec<Size>> {
    sqlx::query_as::<_, Size>("SELECT id, name FROM sizes ORDER BY name")
        .fetch_all(db)
        .await
}
