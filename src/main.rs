//! Service bootstrap: config, tracing, pool, migrations, router.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use threadline::config::Config;
use threadline::{http, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = PgPoolOptions::new()
        .max_connections(config.max_db_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let app = http::router(AppState { db });
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("threadline listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
