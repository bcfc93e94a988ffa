use std::sync::Arc;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

pub mod blog;
pub mod config;
pub mod error;
pub mod form;
pub mod logger;
pub mod publish;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;

/// The whole site. Trailing slashes are trimmed before routing, so
/// `/posts/1/` and `/posts/1` reach the same handler.
pub fn app(state: Arc<state::State>) -> NormalizePath<axum::Router> {
    NormalizePathLayer::trim_trailing_slash().layer(
        routes::route()
            .with_state(state)
            .layer(CompressionLayer::new().br(true))
            .layer(TraceLayer::new_for_http()),
    )
}
