use crate::error::{AppError, Result};
use crate::state::SharedState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::path::Component;
use tokio_util::io::ReaderStream;

pub(super) async fn get(State(state): SharedState, Path(path): Path<String>) -> Result<Response> {
    let Some(relative_path) = media_relative_path(&path) else {
        return Err(AppError::NotFound);
    };
    let file_path = state.media_root.join(relative_path);

    let file = match tokio::fs::File::open(&file_path).await {
        Ok(it) => it,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                return Err(AppError::NotFound);
            }
            return Err(err.into());
        }
    };
    if !file.metadata().await?.is_file() {
        return Err(AppError::NotFound);
    }

    let body = Body::from_stream(ReaderStream::new(file));

    if let Some(mime_guess) = new_mime_guess::from_path(&file_path).first() {
        Ok(([(header::CONTENT_TYPE, mime_guess.to_string())], body).into_response())
    } else {
        Ok(body.into_response())
    }
}

/// `None` unless every component is a plain name, so requests can't climb
/// out of the media root.
fn media_relative_path(path: &str) -> Option<&std::path::Path> {
    let path = std::path::Path::new(path);
    let mut components = path.components().peekable();
    components.peek()?;

    components
        .all(|component| matches!(component, Component::Normal(_)))
        .then_some(path)
}
