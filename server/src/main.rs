use anyhow::{Context, Result};
use refinery::config::{Config, ConfigDbType};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::sync::Arc;
use tracing::info;

use server::db::postgres::PgScoreStore;
use server::http_server::run_http_server;

mod migrations {
    use refinery::embed_migrations;
    embed_migrations!("./migrations");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Database setup
    let db_host = env::var("SERPENTINE_DB_HOST")
        .context("SERPENTINE_DB_HOST must be set in environment or .env file")?;
    let db_port = env::var("SERPENTINE_DB_PORT")
        .context("SERPENTINE_DB_PORT must be set in environment or .env file")?;
    let db_user = env::var("SERPENTINE_DB_USER")
        .context("SERPENTINE_DB_USER must be set in environment or .env file")?;
    let db_pass = env::var("SERPENTINE_DB_PASS")
        .context("SERPENTINE_DB_PASS must be set in environment or .env file")?;
    let db_name = env::var("SERPENTINE_DB_NAME")
        .context("SERPENTINE_DB_NAME must be set in environment or .env file")?;

    let db_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        db_user, db_pass, db_host, db_port, db_name
    );

    // Run migrations
    let mut db_config = Config::new(ConfigDbType::Postgres)
        .set_db_host(&db_host)
        .set_db_port(&db_port)
        .set_db_user(&db_user)
        .set_db_pass(&db_pass)
        .set_db_name(&db_name);

    migrations::migrations::runner()
        .run_async(&mut db_config)
        .await?;
    info!("Database migrations completed");

    // Create database pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("Failed to create PostgreSQL connection pool")?;

    let http_port = env::var("SERPENTINE_HTTP_PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", http_port);

    let store = Arc::new(PgScoreStore::new(db_pool));
    run_http_server(&addr, store).await
}
