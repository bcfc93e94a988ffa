pub type PostID = i64;
pub type CommentID = i64;

pub const TITLE_MAX_CHARS: usize = 200;
pub const COMMENT_NAME_MAX_CHARS: usize = 100;

/// Folder under the media root that published post images are copied into
pub const POST_IMAGE_DIR: &str = "post_images";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: PostID,
    pub title: String,
    /// Markdown source
    pub body: String,
    /// Path relative to the media root
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentID,
    pub post_id: PostID,
    pub name: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A post that has not been written to the store yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
}

/// A validated comment, not yet attached to a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub body: String,
}

impl Post {
    pub fn detail_url(&self) -> String {
        detail_url(self.id)
    }

    pub fn image_url(&self) -> Option<String> {
        self.image.as_deref().map(media_url)
    }

    /// Renders the Markdown body. Raw HTML in the source is not passed through.
    pub fn body_html(&self) -> String {
        comrak::markdown_to_html(&self.body, &comrak::Options::default())
    }
}

pub fn detail_url(post_id: PostID) -> String {
    format!("/posts/{post_id}/")
}

pub fn media_url(relative_path: &str) -> String {
    relative_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(String::from("/media"), |mut url, segment| {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
            url
        })
}
