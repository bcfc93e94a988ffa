use crate::blog::{Comment, Post};
use crate::form::{CommentForm, FormErrors};
use askama::Template;

#[derive(Template)]
#[template(path = "post_list.html")]
pub struct PostListTemplate<'a> {
    pub posts: &'a [Post],
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailTemplate<'a> {
    pub post: &'a Post,
    pub comments: &'a [Comment],
    pub form: &'a CommentForm,
    pub errors: &'a FormErrors,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: &'static str,
}
