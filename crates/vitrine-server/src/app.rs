//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware::{access_log, security};
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `static_dir` - Directory served under `/static`, if any
pub(crate) fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::pages::get_home))
        .route("/about", get(handlers::pages::get_about))
        .route("/collections", get(handlers::pages::get_collections))
        .route("/detail/{uid}", get(handlers::pages::get_detail));

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(access_log::access_log))
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
