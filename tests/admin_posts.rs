//! Behavior tests for the admin post surface, run against an in-memory
//! store plugged into the repository seam.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{
        Method, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE, LOCATION},
    },
};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use tower::ServiceExt;

use pressroom::application::admin::posts::AdminPostService;
use pressroom::application::repos::{PostsRepo, PostsWriteRepo, RepoError, StoreHealth};
use pressroom::domain::posts::{PostDraft, PostRecord, PostSummary};
use pressroom::infra::http::{AdminState, build_admin_router};

const TOKEN: &str = "test-token";

#[derive(Default)]
struct MemoryStore {
    posts: Mutex<BTreeMap<String, PostRecord>>,
}

impl MemoryStore {
    fn seed(&self, slug: &str, title: &str, markdown: &str, author_id: &str) {
        let record = PostRecord {
            slug: slug.to_string(),
            title: title.to_string(),
            markdown: markdown.to_string(),
            author_id: author_id.to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        self.posts
            .lock()
            .unwrap()
            .insert(slug.to_string(), record);
    }

    fn slugs(&self) -> Vec<String> {
        self.posts.lock().unwrap().keys().cloned().collect()
    }

    fn materialize(draft: &PostDraft) -> PostRecord {
        let now = OffsetDateTime::now_utc();
        PostRecord {
            slug: draft.slug.clone(),
            title: draft.title.clone(),
            markdown: draft.markdown.clone(),
            author_id: draft.author_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl PostsRepo for MemoryStore {
    async fn list_all(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.posts.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.posts.lock().unwrap().get(slug).cloned())
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .values()
            .map(PostRecord::summary)
            .collect())
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryStore {
    async fn create_post(&self, draft: PostDraft) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.contains_key(&draft.slug) {
            return Err(RepoError::Duplicate {
                constraint: "posts_pkey".to_string(),
            });
        }
        let record = Self::materialize(&draft);
        posts.insert(draft.slug.clone(), record.clone());
        Ok(record)
    }

    async fn update_post(&self, slug: &str, draft: PostDraft) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.remove(slug).is_none() {
            return Err(RepoError::NotFound);
        }
        let record = Self::materialize(&draft);
        posts.insert(draft.slug.clone(), record.clone());
        Ok(record)
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.remove(slug).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

fn admin_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let posts = AdminPostService::new(store.clone(), store.clone());
    let state = AdminState {
        posts,
        health: store.clone(),
        admin_token: TOKEN.into(),
    };
    (build_admin_router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .expect("request builds")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn requests_without_the_admin_token_are_rejected() {
    let (app, store) = admin_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/posts")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A wrong token is just as dead.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts/new")
        .header(AUTHORIZATION, "Bearer wrong")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("intent=create&title=T&slug=a&markdown=M&author_id=u1"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.slugs().is_empty());
}

#[tokio::test]
async fn health_probe_needs_no_token() {
    let (app, _store) = admin_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn the_new_sentinel_renders_a_blank_editor() {
    let (app, _store) = admin_app();

    let response = app.oneshot(get("/posts/new")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("value=\"create\""));
    assert!(!html.contains("value=\"delete\""));
}

#[tokio::test]
async fn reading_an_unknown_slug_is_a_404_page() {
    let (app, _store) = admin_app();

    let response = app.oneshot(get("/posts/does-not-exist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("does not exist"));
}

#[tokio::test]
async fn create_redirects_and_round_trips_all_four_fields() {
    let (app, store) = admin_app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/posts/new",
            "intent=create&title=T&slug=a&markdown=M&author_id=u1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        "/posts"
    );
    assert_eq!(store.slugs(), vec!["a".to_string()]);

    let response = app.oneshot(get("/posts/a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("value=\"T\""));
    assert!(html.contains("value=\"a\""));
    assert!(html.contains(">M</textarea>"));
    assert!(html.contains("value=\"u1\""));
}

#[tokio::test]
async fn missing_fields_rerender_with_one_message_each_and_no_write() {
    let (app, store) = admin_app();

    let response = app
        .oneshot(post_form("/posts/new", "intent=create&title=Kept"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response).await;
    assert!(html.contains("A slug is required."));
    assert!(html.contains("A markdown body is required."));
    assert!(html.contains("An author id is required."));
    assert!(!html.contains("A title is required."));
    // The submitted value survives the re-render.
    assert!(html.contains("value=\"Kept\""));
    assert!(store.slugs().is_empty());
}

#[tokio::test]
async fn empty_values_count_as_missing() {
    let (app, store) = admin_app();

    let response = app
        .oneshot(post_form(
            "/posts/new",
            "intent=create&title=T&slug=&markdown=M&author_id=u1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response).await;
    assert!(html.contains("A slug is required."));
    assert!(!html.contains("A title is required."));
    assert!(store.slugs().is_empty());
}

#[tokio::test]
async fn update_is_keyed_by_the_route_slug_and_renames() {
    let (app, store) = admin_app();
    store.seed("a", "Old", "M", "u1");

    let response = app
        .oneshot(post_form(
            "/posts/a",
            "intent=update&title=New&slug=b&markdown=M2&author_id=u1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(store.slugs(), vec!["b".to_string()]);
    let posts = store.posts.lock().unwrap();
    let post = posts.get("b").unwrap();
    assert_eq!(post.title, "New");
    assert_eq!(post.markdown, "M2");
}

#[tokio::test]
async fn updating_an_unknown_route_slug_propagates_the_store_error() {
    let (app, _store) = admin_app();

    let response = app
        .oneshot(post_form(
            "/posts/ghost",
            "intent=update&title=T&slug=ghost&markdown=M&author_id=u1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_redirects_without_confirmation() {
    let (app, store) = admin_app();
    store.seed("a", "T", "M", "u1");

    let response = app
        .oneshot(post_form("/posts/a", "intent=delete"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        "/posts"
    );
    assert!(store.slugs().is_empty());
}

#[tokio::test]
async fn deleting_an_unknown_slug_is_an_error_not_a_redirect() {
    let (app, _store) = admin_app();

    let response = app
        .oneshot(post_form("/posts/ghost", "intent=delete"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(LOCATION).is_none());
}

#[tokio::test]
async fn unknown_intents_are_rejected_before_any_business_logic() {
    let (app, store) = admin_app();
    store.seed("a", "T", "M", "u1");

    let response = app
        .oneshot(post_form(
            "/posts/a",
            "intent=publish&title=T&slug=a&markdown=M&author_id=u1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.slugs(), vec!["a".to_string()]);
}

#[tokio::test]
async fn duplicate_slugs_surface_as_a_conflict() {
    let (app, store) = admin_app();
    store.seed("a", "T", "M", "u1");

    let response = app
        .oneshot(post_form(
            "/posts/new",
            "intent=create&title=T&slug=a&markdown=M&author_id=u1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn the_listing_never_leaks_markdown_but_the_export_carries_it() {
    let (app, store) = admin_app();
    store.seed("a", "Visible", "SECRETBODY", "u1");

    let response = app.clone().oneshot(get("/posts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Visible"));
    assert!(html.contains("/posts/a"));
    assert!(!html.contains("SECRETBODY"));

    let response = app.oneshot(get("/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("export is json");
    let posts = json.as_array().expect("array of posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "a");
    assert_eq!(posts[0]["markdown"], "SECRETBODY");
}

#[tokio::test]
async fn the_admin_root_redirects_to_the_listing() {
    let (app, _store) = admin_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        "/posts"
    );
}
