//! User and address lookups.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::domain::identity::{Address, User};

pub async fn find_user<'e>(
    db: impl PgExecutor<'e>,
    id: Uuid,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, first_name, last_name, role FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_user_by_token<'e>(
    db: impl PgExecutor<'e>,
    token: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, first_name, last_name, role FROM users WHERE api_token = $1",
    )
    .bind(token)
    .fetch_optional(db)
    .await
}

pub async fn find_address<'e>(
    db: impl PgExecutor<'e>,
    id: Uuid,
) -> sqlx::Result<Option<Address>> {
    sqlx::query_as::<_, Address>(
        "SELECT id, user_id, street_address, city, state, postal_code, country, phone_number \
         FROM addresses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
