use crate::state::NestedRouter;
use axum::routing::get;

pub mod media;
pub mod page;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .merge(page::route())
        .route("/media/*path", get(media::get))
        .fallback(not_found)
}

async fn not_found() -> crate::error::AppError {
    crate::error::AppError::NotFound
}
