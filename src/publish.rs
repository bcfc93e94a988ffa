//! Creating posts from the command line. The web pages never write posts.

use crate::blog::{NewPost, Post, POST_IMAGE_DIR, TITLE_MAX_CHARS};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title has {0} characters, at most {TITLE_MAX_CHARS} are allowed")]
    TitleTooLong(usize),

    #[error("body must not be empty")]
    EmptyBody,

    #[error("image {0:?} has no file name")]
    ImageName(PathBuf),

    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not copy image into the media folder: {0}")]
    CopyImage(std::io::Error),

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub title: String,
    pub body_file: PathBuf,
    pub image: Option<PathBuf>,
}

pub async fn publish(
    db: &sqlx::SqlitePool,
    media_root: &Path,
    request: PublishRequest,
) -> Result<Post, PublishError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(PublishError::EmptyTitle);
    }
    let title_len = title.chars().count();
    if title_len > TITLE_MAX_CHARS {
        return Err(PublishError::TitleTooLong(title_len));
    }

    let body = match tokio::fs::read_to_string(&request.body_file).await {
        Ok(it) => it,
        Err(source) => {
            return Err(PublishError::Read {
                path: request.body_file,
                source,
            })
        }
    };
    if body.trim().is_empty() {
        return Err(PublishError::EmptyBody);
    }

    let now = chrono::Utc::now();
    let image = match &request.image {
        Some(image_path) => Some(copy_image(media_root, image_path, now).await?),
        None => None,
    };

    let new_post = NewPost {
        title: title.to_string(),
        body,
        image,
    };
    let post = match crate::store::post::insert(db, &new_post, now).await {
        Ok(it) => it,
        Err(err) => {
            if let Some(image) = &new_post.image {
                remove_copied_image(&media_root.join(image)).await;
            }
            return Err(err.into());
        }
    };
    tracing::info!(post_id = post.id, title = %post.title, "published post");

    Ok(post)
}

/// Copies the image under `<media root>/post_images/` and returns its path
/// relative to the media root. The file name gets a timestamp prefix so
/// re-used names don't overwrite older images.
async fn copy_image(
    media_root: &Path,
    image_path: &Path,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<String, PublishError> {
    let Some(file_name) = image_path.file_name().and_then(|name| name.to_str()) else {
        return Err(PublishError::ImageName(image_path.to_path_buf()));
    };
    let stored_name = format!("{}-{file_name}", now.format("%Y%m%d%H%M%S%6f"));

    let image_dir = media_root.join(POST_IMAGE_DIR);
    tokio::fs::create_dir_all(&image_dir)
        .await
        .map_err(PublishError::CopyImage)?;
    tokio::fs::copy(image_path, image_dir.join(&stored_name))
        .await
        .map_err(PublishError::CopyImage)?;

    Ok(format!("{POST_IMAGE_DIR}/{stored_name}"))
}

async fn remove_copied_image(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => (),
        Err(err) => tracing::error!(error = %err, path = ?path, "could not remove copied image"),
    }
}
