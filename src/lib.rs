//! Threadline - apparel shop back office API
//!
//! REST service over PostgreSQL. The core is the order workflow: creation
//! with immutable price snapshots and computed totals, status updates with
//! one-shot timestamps, and owner-gated reads. Catalog and identity are
//! supporting stores the workflow resolves by id.

pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod http;
pub mod store;
pub mod workflow;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
}
