use crate::blog::{Post, PostID};
use crate::error::{AppError, Result};
use crate::form::{CommentForm, FormErrors};
use crate::state::{SharedState, State};
use crate::templates::PostDetailTemplate;
use askama::Template;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Path};
use axum::response::{Html, IntoResponse, Redirect, Response};

pub(super) async fn get(
    axum::extract::State(state): SharedState,
    post_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let post = find_post(&state, post_id).await?;

    render(&state, &post, &CommentForm::default(), &FormErrors::default()).await
}

/// The post is looked up before the body is looked at, so unknown posts are
/// always a 404. A request that isn't form-encoded at all counts as an empty
/// form; a form body that can't be read or decoded is rejected.
pub(super) async fn post(
    axum::extract::State(state): SharedState,
    post_id: std::result::Result<Path<String>, PathRejection>,
    form: std::result::Result<Form<CommentForm>, FormRejection>,
) -> Result<Response> {
    let post = find_post(&state, post_id).await?;
    let form = match form {
        Ok(Form(form)) => form,
        Err(FormRejection::InvalidFormContentType(_)) => CommentForm::default(),
        Err(rejection) => return Err(AppError::Form(rejection)),
    };

    match form.validate() {
        Ok(comment) => {
            let comment =
                crate::store::comment::insert(&state.db, post.id, &comment, chrono::Utc::now())
                    .await?;
            tracing::info!(post_id = post.id, comment_id = comment.id, "comment added");

            Ok(Redirect::to(&post.detail_url()).into_response())
        }
        Err(errors) => {
            tracing::debug!(post_id = post.id, ?errors, "rejected comment");
            render(&state, &post, &form, &errors).await
        }
    }
}

/// Only plain decimal ids can exist. Anything else, including a path that
/// doesn't decode, is a 404 like any other missing post.
async fn find_post(
    state: &State,
    post_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Post> {
    let Ok(Path(post_id)) = post_id else {
        return Err(AppError::NotFound);
    };
    let Some(post_id) = parse_post_id(&post_id) else {
        return Err(AppError::NotFound);
    };

    crate::store::post::find_by_id(&state.db, post_id)
        .await?
        .ok_or(AppError::NotFound)
}

fn parse_post_id(raw: &str) -> Option<PostID> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    raw.parse().ok()
}

async fn render(
    state: &State,
    post: &Post,
    form: &CommentForm,
    errors: &FormErrors,
) -> Result<Response> {
    let comments = crate::store::comment::for_post(&state.db, post.id).await?;
    let page = PostDetailTemplate {
        post,
        comments: &comments,
        form,
        errors,
    };

    Ok(Html(page.render()?).into_response())
}
