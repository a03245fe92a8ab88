//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;
mod db;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{
    AdminBootstrapConfig, AdminBootstrapper, AuthConfig, AuthGate, BootstrapOutcome,
    PgUserRepository, SessionSecret,
};
use content::PgContentRepository;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,content=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    if config.uses_default_jwt_secret() {
        tracing::warn!("JWT_SECRET is not set; using the default signing secret");
    }

    // Database connection
    let pool = db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = AuthConfig::new(
        SessionSecret::new(config.jwt_secret.as_bytes()),
        AdminBootstrapConfig::new(&config.admin_email, &config.admin_password),
    )
    .with_token_ttl(config.token_ttl)
    .with_bootstrap_required(config.admin_bootstrap_required);
    let (codec, admin_config, bootstrap_required) = auth_config.into_parts();

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let content_store = Arc::new(PgContentRepository::new(pool.clone()));

    // Ensure the administrator account exists
    // Errors here should not prevent server startup unless required
    match AdminBootstrapper::new(users.clone(), admin_config).run().await {
        Ok(BootstrapOutcome::Created(user_id)) => {
            tracing::info!(user_id = %user_id, "Admin user created");
        }
        Ok(BootstrapOutcome::AlreadyPresent) => {
            tracing::info!("Admin user already exists");
        }
        Err(warning) if bootstrap_required => {
            return Err(warning).context("Admin bootstrap is required");
        }
        Err(warning) => {
            tracing::warn!(error = %warning, "Admin bootstrap failed, continuing anyway");
        }
    }

    // Seed gallery images from disk on first start
    match content::seed_images(content_store.as_ref(), &config.image_seed_dir).await {
        Ok(report) if report.inserted > 0 => {
            tracing::info!(inserted = report.inserted, "Gallery images seeded");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Image seeding failed, continuing anyway");
        }
    }

    // Build router
    let gate = AuthGate::new(Arc::new(codec));
    let app = app::build_router(users, content_store, &gate, &config.frontend_origins);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
