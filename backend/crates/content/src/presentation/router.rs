//! Content Router

use auth::AuthGate;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use std::sync::Arc;

use crate::domain::repository::ContentStore;
use crate::presentation::handlers::{self, ContentState};

/// Multipart uploads may carry several photos at once
const UPLOAD_BODY_LIMIT: usize = 100 * 1024 * 1024;

/// Create the content router for any store implementation
///
/// Reads and the contact form are public; everything that changes site
/// content (and reading contact submissions) sits behind both gates.
pub fn content_router<R>(repo: Arc<R>, gate: &AuthGate) -> Router
where
    R: ContentStore,
{
    let state = ContentState { repo };

    let public = Router::new()
        .route("/about", get(handlers::list_about::<R>))
        .route("/resume", get(handlers::list_resume::<R>))
        .route("/carbuild", get(handlers::list_car_builds::<R>))
        .route("/contact", post(handlers::create_contact::<R>))
        .route("/images", get(handlers::list_images::<R>))
        .route("/image/{id}", get(handlers::get_image::<R>));

    let admin = Router::new()
        .route("/about", post(handlers::create_about::<R>))
        .route(
            "/about/{id}",
            put(handlers::update_about::<R>).delete(handlers::delete_about::<R>),
        )
        .route("/resume", post(handlers::create_resume::<R>))
        .route(
            "/resume/{id}",
            put(handlers::update_resume::<R>).delete(handlers::delete_resume::<R>),
        )
        .route("/carbuild", post(handlers::create_car_build::<R>))
        .route(
            "/carbuild/{id}",
            put(handlers::update_car_build::<R>).delete(handlers::delete_car_build::<R>),
        )
        .route("/contact", get(handlers::list_contacts::<R>))
        .route("/contact/{id}", delete(handlers::delete_contact::<R>))
        .route(
            "/gallery/upload",
            post(handlers::upload_images::<R>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/image/{id}", delete(handlers::delete_image::<R>));

    public.merge(gate.protect_admin(admin)).with_state(state)
}
