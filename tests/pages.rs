use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use blog::blog::{NewComment, NewPost, Post};
use blog::config::DatabaseConfig;
use blog::state::State;
use chrono::TimeZone;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup() -> (TempDir, Arc<State>) {
    let dir = tempfile::tempdir().unwrap();
    let db = blog::store::connect(&DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("blog.db").display()),
        max_connections: 2,
    })
    .await
    .unwrap();
    let media_root = dir.path().join("media");

    (dir, Arc::new(State::new(db, media_root)))
}

async fn add_post(
    state: &State,
    title: &str,
    body: &str,
    at: chrono::DateTime<chrono::Utc>,
) -> Post {
    let post = NewPost {
        title: title.to_string(),
        body: body.to_string(),
        image: None,
    };
    blog::store::post::insert(&state.db, &post, at).await.unwrap()
}

async fn add_comment(state: &State, post: &Post, body: &str) {
    let comment = NewComment {
        name: String::from("Grace"),
        body: body.to_string(),
    };
    blog::store::comment::insert(&state.db, post.id, &comment, chrono::Utc::now())
        .await
        .unwrap();
}

async fn comment_count(state: &State) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&state.db)
        .await
        .unwrap()
}

async fn get(state: &Arc<State>, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    blog::app(state.clone()).oneshot(request).await.unwrap()
}

async fn submit(state: &Arc<State>, uri: &str, form: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    blog::app(state.clone()).oneshot(request).await.unwrap()
}

async fn text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn at(day: u32) -> chrono::DateTime<chrono::Utc> {
    chrono::Utc.with_ymd_and_hms(2024, 5, day, 8, 30, 0).unwrap()
}

#[tokio::test]
async fn listing_shows_newest_post_first() {
    let (_dir, state) = setup().await;
    add_post(&state, "Hello", "World", at(1)).await;
    add_post(&state, "Sequel", "Again", at(2)).await;

    let response = get(&state, "/posts/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = text(response).await;
    let newer = page.find("Sequel").unwrap();
    let older = page.find("Hello").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn listing_without_posts() {
    let (_dir, state) = setup().await;

    let page = text(get(&state, "/posts").await).await;
    assert!(page.contains("No posts yet."));
}

#[tokio::test]
async fn root_redirects_to_listing() {
    let (_dir, state) = setup().await;

    let response = get(&state, "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/posts/");
}

#[tokio::test]
async fn detail_shows_post_and_only_its_comments() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;
    let other = add_post(&state, "Elsewhere", "Other body", at(2)).await;
    add_comment(&state, &post, "first reply").await;
    add_comment(&state, &post, "second reply").await;
    add_comment(&state, &other, "unrelated reply").await;

    let response = get(&state, &format!("/posts/{}/", post.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = text(response).await;
    assert!(page.contains("Hello"));
    assert!(page.contains("<p>World</p>"));
    assert!(page.contains("Comments (2)"));
    assert!(page.contains("first reply"));
    assert!(page.contains("second reply"));
    assert!(!page.contains("unrelated reply"));
    assert!(!page.contains("class=\"error\""));
}

#[tokio::test]
async fn unknown_post_is_not_found_and_creates_nothing() {
    let (_dir, state) = setup().await;
    add_post(&state, "Hello", "World", at(1)).await;

    for uri in [
        "/posts/999/",
        "/posts/abc/",
        "/posts/-1",
        "/posts/+1/",
        "/posts/%2B1/",
        "/posts/%FF/",
    ] {
        assert_eq!(get(&state, uri).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            submit(&state, uri, "name=Ada&body=hi").await.status(),
            StatusCode::NOT_FOUND
        );
    }
    assert_eq!(comment_count(&state).await, 0);
}

#[tokio::test]
async fn valid_comment_is_saved_and_redirects() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;
    let detail = format!("/posts/{}/", post.id);

    let response = submit(&state, &detail, "name=Ada&body=Nice+post").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], detail.as_str());

    let comments = blog::store::comment::for_post(&state.db, post.id)
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, post.id);
    assert_eq!(comments[0].name, "Ada");
    assert_eq!(comments[0].body, "Nice post");

    let page = text(get(&state, &detail).await).await;
    assert!(page.contains("Nice post"));
}

#[tokio::test]
async fn empty_comment_rerenders_with_errors() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;
    add_comment(&state, &post, "existing reply").await;
    let detail = format!("/posts/{}", post.id);

    let response = submit(&state, &detail, "name=Ada&body=+++").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = text(response).await;
    assert!(page.contains("This field is required."));
    assert!(page.contains("existing reply"));
    assert!(page.contains("value=\"Ada\""));
    assert_eq!(comment_count(&state).await, 1);
}

#[tokio::test]
async fn submission_without_form_body_rerenders() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;

    let request = Request::post(format!("/posts/{}/", post.id))
        .body(Body::empty())
        .unwrap();
    let response = blog::app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("This field is required."));
    assert_eq!(comment_count(&state).await, 0);
}

#[tokio::test]
async fn oversized_comment_is_rejected_not_rerendered() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;
    let form = format!("name=Ada&body={}", "x".repeat(3 * 1024 * 1024));

    let response = submit(&state, &format!("/posts/{}/", post.id), &form).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!text(response).await.contains("This field is required."));
    assert_eq!(comment_count(&state).await, 0);
}

#[tokio::test]
async fn undecodable_comment_form_is_a_bad_request() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;

    let response = submit(
        &state,
        &format!("/posts/{}/", post.id),
        "name=Ada&body=first&body=second",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!text(response).await.contains("This field is required."));
    assert_eq!(comment_count(&state).await, 0);
}

#[tokio::test]
async fn comment_text_is_escaped() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;
    add_comment(&state, &post, "<b>bold</b>").await;

    let page = text(get(&state, &format!("/posts/{}/", post.id)).await).await;
    assert!(page.contains("&lt;b&gt;bold"));
    assert!(!page.contains("<b>bold"));
}

#[tokio::test]
async fn reads_never_change_the_store() {
    let (_dir, state) = setup().await;
    let post = add_post(&state, "Hello", "World", at(1)).await;
    add_comment(&state, &post, "reply").await;

    for _ in 0..3 {
        get(&state, "/posts/").await;
        get(&state, &format!("/posts/{}/", post.id)).await;
    }

    assert_eq!(comment_count(&state).await, 1);
    assert_eq!(
        blog::store::post::all_newest_first(&state.db)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn serves_media_files() {
    let (_dir, state) = setup().await;
    let image_dir = state.media_root.join("post_images");
    tokio::fs::create_dir_all(&image_dir).await.unwrap();
    tokio::fs::write(image_dir.join("cat.png"), b"png bytes")
        .await
        .unwrap();

    let response = get(&state, "/media/post_images/cat.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(text(response).await, "png bytes");

    for uri in [
        "/media/post_images/dog.png",
        "/media/post_images",
        "/media/..%2Fblog.db",
    ] {
        assert_eq!(get(&state, uri).await.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn detail_links_post_image() {
    let (_dir, state) = setup().await;
    let post = NewPost {
        title: String::from("Pictured"),
        body: String::from("Look"),
        image: Some(String::from("post_images/cat.png")),
    };
    let post = blog::store::post::insert(&state.db, &post, at(3))
        .await
        .unwrap();

    let page = text(get(&state, &format!("/posts/{}/", post.id)).await).await;
    assert!(page.contains("<img src="));
    assert!(page.contains("cat.png"));
}
