use crate::error::Result;
use crate::state::SharedState;
use crate::templates::PostListTemplate;
use askama::Template;
use axum::extract::State;
use axum::response::{Html, Redirect};

pub(super) async fn root() -> Redirect {
    Redirect::to("/posts/")
}

pub(super) async fn get(State(state): SharedState) -> Result<Html<String>> {
    let posts = crate::store::post::all_newest_first(&state.db).await?;

    Ok(Html(PostListTemplate { posts: &posts }.render()?))
}
