//! Router Assembly
//!
//! Mounts the auth and content routers under `/api` and applies the
//! cross-cutting layers.

use std::sync::Arc;

use auth::AuthGate;
use auth::domain::UserRepository;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use content::ContentStore;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full application router
pub fn build_router<U, C>(
    users: Arc<U>,
    store: Arc<C>,
    gate: &AuthGate,
    origins: &[String],
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    C: ContentStore,
{
    let api = auth::auth_router(users, gate).merge(content::content_router(store, gate));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]))
        .allow_credentials(true)
}
