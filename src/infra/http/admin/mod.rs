mod forms;
mod health;
mod posts;
mod state;

pub use state::AdminState;

use axum::{
    Router, middleware,
    response::Redirect,
    routing::get,
};

use super::middleware::{log_responses, require_admin, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/posts") }))
        .route("/posts", get(posts::admin_posts))
        .route(
            "/posts/{slug}",
            get(posts::admin_post_editor).post(posts::admin_post_write),
        )
        .route("/export", get(posts::admin_export))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ))
        // The liveness probe stays outside the auth boundary.
        .route("/healthz", get(health::admin_health))
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
        .with_state(state)
}
