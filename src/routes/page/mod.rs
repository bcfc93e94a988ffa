use crate::state::NestedRouter;
use axum::routing::get;

mod home;
mod post;

/// Paths are registered without trailing slashes; the app trims them from
/// incoming requests before routing.
pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(home::root))
        .route("/posts", get(home::get))
        .route("/posts/:id", get(post::get).post(post::post))
}
