//! Server Configuration
//!
//! Read once at startup from the environment (and `.env`). Everything below
//! the binary receives plain values through constructors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use platform::env::{Env, EnvError};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

/// Signing secret used when `JWT_SECRET` is unset
pub const DEFAULT_JWT_SECRET: &str = "change-this-secret";

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Configuration could not be built
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),

    #[error("invalid DB_SSLMODE {0:?}")]
    SslMode(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub options: PgConnectOptions,
    /// Initial connection attempts before giving up
    pub connect_retries: u32,
    /// Pause between connection attempts
    pub retry_interval: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("database", &self.options.get_database())
            .field("connect_retries", &self.connect_retries)
            .finish_non_exhaustive()
    }
}

/// Complete server configuration
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub server_port: u16,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_bootstrap_required: bool,
    pub frontend_origins: Vec<String>,
    pub image_seed_dir: PathBuf,
}

impl Config {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&Env::process())
    }

    /// Build from any variable source
    pub fn load(env: &Env) -> Result<Self, ConfigError> {
        let token_ttl_hours: u64 = env.parse_or("TOKEN_TTL_HOURS", 24)?;
        if token_ttl_hours == 0 {
            return Err(ConfigError::Zero("TOKEN_TTL_HOURS"));
        }
        let token_ttl_secs = token_ttl_hours
            .checked_mul(3600)
            .ok_or(ConfigError::OutOfRange("TOKEN_TTL_HOURS"))?;

        let connect_retries: u32 = env.parse_or("DB_CONNECT_RETRIES", 30)?;
        if connect_retries == 0 {
            return Err(ConfigError::Zero("DB_CONNECT_RETRIES"));
        }

        let frontend_origins = env
            .var_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database: DatabaseConfig {
                options: database_options(env)?,
                connect_retries,
                retry_interval: Duration::from_secs(2),
            },
            jwt_secret: env.var_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            token_ttl: Duration::from_secs(token_ttl_secs),
            server_port: env.parse_or("SERVER_PORT", 8080)?,
            admin_email: env.var_or("ADMIN_EMAIL", "admin@example.com"),
            admin_password: env.var_or("ADMIN_PASSWORD", "changeme"),
            admin_bootstrap_required: env.flag_or("ADMIN_BOOTSTRAP_REQUIRED", false)?,
            frontend_origins,
            image_seed_dir: PathBuf::from(env.var_or("IMAGE_SEED_DIR", "./public/images")),
        })
    }

    /// True when the signing secret was left at its published default
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// `DATABASE_URL` wins over the individual `DB_*` variables
fn database_options(env: &Env) -> Result<PgConnectOptions, ConfigError> {
    if let Some(url) = env.var("DATABASE_URL") {
        return PgConnectOptions::from_str(&url).map_err(ConfigError::DatabaseUrl);
    }

    let sslmode = env.var_or("DB_SSLMODE", "disable");
    let ssl_mode = PgSslMode::from_str(&sslmode).map_err(|_| ConfigError::SslMode(sslmode))?;

    Ok(PgConnectOptions::new()
        .host(&env.var_or("DB_HOST", "localhost"))
        .port(env.parse_or("DB_PORT", 5432)?)
        .username(&env.var_or("DB_USER", "testwebsite"))
        .password(&env.var_or("DB_PASSWORD", "changeme"))
        .database(&env.var_or("DB_NAME", "testwebsite_db"))
        .ssl_mode(ssl_mode))
}
