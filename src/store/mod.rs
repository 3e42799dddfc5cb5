//! Persistence layer. Functions take any `PgExecutor` so the workflow can
//! run them against the pool or inside a transaction.

pub mod catalog;
pub mod identity;
pub mod orders;
