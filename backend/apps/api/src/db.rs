//! Database Connection
//!
//! The database container may still be starting when the server boots, so
//! the first connection is retried. A missing database is created.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::{Connection, PgConnection};

use crate::config::DatabaseConfig;

/// Maintenance database used to create the application database
const MAINTENANCE_DATABASE: &str = "postgres";

/// Connect, retrying up to `connect_retries` times
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;

    loop {
        match try_connect(&config.options).await {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(e) if attempt < config.connect_retries => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = config.connect_retries,
                    "Database not ready, retrying in {:?}",
                    config.retry_interval
                );
                attempt += 1;
                tokio::time::sleep(config.retry_interval).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn try_connect(options: &PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    let pool_options = || PgPoolOptions::new().max_connections(5);

    match pool_options().connect_with(options.clone()).await {
        Err(e) if is_missing_database(&e) => {
            create_database(options).await?;
            pool_options().connect_with(options.clone()).await
        }
        result => result,
    }
}

/// Postgres `invalid_catalog_name`
fn is_missing_database(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "3D000")
}

async fn create_database(options: &PgConnectOptions) -> Result<(), sqlx::Error> {
    let Some(name) = options.get_database().map(str::to_string) else {
        return Err(sqlx::Error::Configuration(
            "no database name to create".into(),
        ));
    };

    tracing::info!(database = %name, "Database does not exist, creating it");

    let mut conn =
        PgConnection::connect_with(&options.clone().database(MAINTENANCE_DATABASE)).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&name)
            .fetch_one(&mut conn)
            .await?;

    if !exists {
        sqlx::query(&format!("CREATE DATABASE {}", quote_identifier(&name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %name, "Database created");
    }

    conn.close().await
}

/// Double-quote an identifier for use in DDL
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
