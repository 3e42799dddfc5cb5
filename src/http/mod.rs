//! HTTP surface: routing, handlers, and the auth extractors. Handlers
//! parse input, call the workflow, and let `AppError` pick status codes.

pub mod auth;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;
use validator::Validate;

use crate::domain::catalog::{Category, CategoryKind, Color, Product, Size};
use crate::dto::{
    CreateOrderRequest, OrderSummary, PageParams, Paginated, UpdateStatusRequest,
};
use crate::error::AppError;
use crate::http::auth::{AdminUser, AuthUser};
use crate::{store, workflow, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(list_products))
        .route("/api/products/:id", get(get_product))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:id", get(get_category))
        .route("/api/colors", get(list_colors))
        .route("/api/sizes", get(list_sizes))
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/user", get(my_orders))
        .route("/api/orders/:id", get(get_order))
        .route("/api/orders/:id/status", put(update_order_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "threadline" }))
}

// --- orders -----------------------------------------------------------

async fn create_order(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderSummary>), AppError> {
    req.validate()
        .map_err(|e| AppError::InvalidArgument(e.to_string()))?;
    let summary = workflow::create_order(&s.db, user.id, req).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn get_order(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderSummary>, AppError> {
    if !user.is_admin() && !workflow::is_order_owner(&s.db, id, user.id).await? {
        return Err(AppError::Forbidden);
    }
    Ok(Json(workflow::get_order(&s.db, id).await?))
}

async fn my_orders(
    State(s): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    Ok(Json(workflow::orders_for_user(&s.db, user.id).await?))
}

async fn list_orders(
    State(s): State<AppState>,
    AdminUser(_): AdminUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<OrderSummary>>, AppError> {
    Ok(Json(workflow::list_orders(&s.db, &params).await?))
}

async fn update_order_status(
    State(s): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<OrderSummary>, AppError> {
    Ok(Json(
        workflow::update_order_status(&s.db, id, &req.status).await?,
    ))
}

// --- catalog ----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProductListParams {
    page: Option<u32>,
    per_page: Option<u32>,
    category: Option<Uuid>,
    search: Option<String>,
    featured: Option<bool>,
}

async fn list_products(
    State(s): State<AppState>,
    Query(p): Query<ProductListParams>,
) -> Result<Json<Paginated<Product>>, AppError> {
    let paging = PageParams { page: p.page, per_page: p.per_page };
    let (page, _) = paging.normalize();
    let (limit, offset) = paging.limit_offset();
    let data = store::catalog::list_products(
        &s.db,
        p.category,
        p.search.as_deref(),
        p.featured,
        limit,
        offset,
    )
    .await?;
    let total =
        store::catalog::count_products(&s.db, p.category, p.search.as_deref(), p.featured)
            .await?;
    Ok(Json(Paginated { data, total, page }))
}

async fn get_product(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    store::catalog::find_product(&s.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product not found: {id}")))
}

#[derive(Debug, Deserialize)]
struct CategoryListParams {
    #[serde(rename = "type")]
    kind: Option<String>,
    parent_id: Option<Uuid>,
}

async fn list_categories(
    State(s): State<AppState>,
    Query(p): Query<CategoryListParams>,
) -> Result<Json<Vec<Category>>, AppError> {
    let kind = match p.kind.as_deref() {
        Some(name) => Some(CategoryKind::parse(name).ok_or_else(|| {
            AppError::InvalidArgument(format!("invalid category type: {name}"))
        })?),
        None => None,
    };
    Ok(Json(
        store::catalog::list_categories(&s.db, kind, p.parent_id).await?,
    ))
}

async fn get_category(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, AppError> {
    store::catalog::find_category(&s.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category not found: {id}")))
}

async fn list_colors(State(s): State<AppState>) -> Result<Json<Vec<Color>>, AppError> {
    Ok(Json(store::catalog::list_colors(&s.db).await?))
}

async fn list_sizes(State(s): State<AppState>) -> Result<Json<Vec<Size>>, AppError> {
    Ok(Json(store::catalog::list_sizes(&s.db).await?))
}
