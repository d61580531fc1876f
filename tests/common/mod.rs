//! In-process fake of the Newsroom backend
//!
//! Serves the same JSON shapes as the real service on an ephemeral port and
//! records every `Authorization` header it receives.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};

use newsroom::{ApiClient, Session};

type Reply = (StatusCode, Json<Value>);
type Shared = Arc<Mutex<Backend>>;

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct FakeArticle {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: i64,
    pub views: u32,
    pub photo: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct FakeComment {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: String,
}

/// Photo part seen in a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub users: Vec<FakeUser>,
    pub articles: Vec<FakeArticle>,
    pub comments: Vec<FakeComment>,
    pub likes: HashSet<(i64, i64)>,
    /// `Authorization` values per request, in arrival order
    pub auth_log: Vec<(String, Vec<String>)>,
    pub last_upload: Option<Upload>,
    next_id: i64,
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_for(&self, headers: &HeaderMap) -> Option<FakeUser> {
        let token = headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer token-")?;
        let id: i64 = token.parse().ok()?;
        self.users.iter().find(|u| u.id == id).cloned()
    }

    fn username(&self, id: i64) -> String {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn article_json(&self, article: &FakeArticle) -> Value {
        json!({
            "id": article.id,
            "slug": article.slug,
            "title": article.title,
            "content": article.content,
            "category": article.category,
            "author_id": article.author_id,
            "author_name": self.username(article.author_id),
            "views": article.views,
            "likes_count": self.likes.iter().filter(|(_, a)| *a == article.id).count(),
            "comments_count": self.comments.iter().filter(|c| c.article_id == article.id).count(),
            "location_lat": null,
            "location_lng": null,
            "photo": article.photo,
            "created_at": article.created_at,
            "updated_at": null,
        })
    }

    fn comment_json(&self, comment: &FakeComment) -> Value {
        json!({
            "id": comment.id,
            "article_id": comment.article_id,
            "user_id": comment.user_id,
            "username": self.username(comment.user_id),
            "text": comment.text,
            "created_at": comment.created_at,
        })
    }

    fn user_json(&self, user: &FakeUser, with_counts: bool) -> Value {
        let mut value = json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "role": "user",
            "photo": null,
            "created_at": now(),
        });
        if with_counts {
            value["articles_count"] = json!(self.articles.iter().filter(|a| a.author_id == user.id).count());
            value["likes_count"] = json!(self.likes.iter().filter(|(u, _)| *u == user.id).count());
            value["comments_count"] = json!(self.comments.iter().filter(|c| c.user_id == user.id).count());
        }
        value
    }

    fn find_article(&self, slug: &str) -> Option<usize> {
        self.articles.iter().position(|a| a.slug == slug)
    }

    fn new_article(&mut self, author_id: i64, fields: &Value, photo: Option<String>) -> Result<Value, Reply> {
        let title = fields["title"].as_str().unwrap_or_default().to_string();
        let content = fields["content"].as_str().unwrap_or_default().to_string();
        if title.is_empty() || content.is_empty() {
            return Err(error(StatusCode::BAD_REQUEST, "Title and content required"));
        }
        let id = self.next_id();
        let article = FakeArticle {
            id,
            slug: format!("{}-{id}", title.to_lowercase().replace(' ', "-")),
            title,
            content,
            category: fields["category"].as_str().unwrap_or("general").to_string(),
            author_id,
            views: 0,
            photo,
            created_at: now(),
        };
        let value = self.article_json(&article);
        self.articles.push(article);
        Ok(value)
    }
}

/// Running fake backend
pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    /// Client with a fresh in-memory session
    pub fn client(&self) -> ApiClient {
        self.client_with(Arc::new(Session::in_memory()))
    }

    /// Client using `session`
    pub fn client_with(&self, session: Arc<Session>) -> ApiClient {
        ApiClient::new(&self.base_url, session)
    }

    pub fn backend(&self) -> MutexGuard<'_, Backend> {
        self.state.lock().unwrap()
    }

    /// `Authorization` values of the most recent request to `path`
    pub fn auth_for(&self, path: &str) -> Vec<String> {
        self.backend()
            .auth_log
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, values)| values.clone())
            .unwrap_or_default()
    }

    /// Client logged in as a freshly registered user
    pub async fn signed_in(&self, username: &str) -> ApiClient {
        let api = self.client();
        api.register(username, &format!("{username}@example.com"), "secret")
            .await
            .unwrap();
        api
    }
}

/// Start the fake backend
pub async fn spawn() -> FakeBackend {
    let state: Shared = Arc::new(Mutex::new(Backend::default()));
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/test", get(test))
        .route("/api/broken", get(broken))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/users/profile", get(profile).put(update_profile))
        .route("/api/users/articles", get(user_articles))
        .route("/api/users/likes", get(user_likes))
        .route("/api/users/comments", get(user_comments))
        .route("/api/users/favorites", get(favorites))
        .route("/api/users/{id}/statistics", get(user_statistics))
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/{slug}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route(
            "/api/articles/{slug}/comments",
            get(list_comments).post(add_comment),
        )
        .route("/api/articles/{slug}/like", post(toggle_like))
        .route("/api/ai/generate-article", post(generate))
        .route("/api/ai/analytics", post(analytics))
        .route("/api/ai/recommendations", get(recommendations))
        .layer(middleware::from_fn_with_state(state.clone(), record_auth))
        .with_state(state)
}

async fn record_auth(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let values: Vec<String> = request
        .headers()
        .get_all(AUTHORIZATION)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    let path = request.uri().path().to_string();
    state.lock().unwrap().auth_log.push((path, values));
    next.run(request).await
}

fn now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

fn ok(value: Value) -> Reply {
    (StatusCode::OK, Json(value))
}

fn unauthorized() -> Reply {
    error(StatusCode::UNAUTHORIZED, "Token is invalid")
}

async fn test() -> Reply {
    ok(json!({ "message": "Backend is running" }))
}

async fn broken() -> impl IntoResponse {
    (StatusCode::OK, "<html>maintenance</html>")
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut backend = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if backend.users.iter().any(|u| u.email == email) {
        return error(StatusCode::BAD_REQUEST, "User already exists");
    }
    let user = FakeUser {
        id: backend.next_id(),
        username: body["username"].as_str().unwrap_or_default().to_string(),
        email,
        password: body["password"].as_str().unwrap_or_default().to_string(),
    };
    let value = backend.user_json(&user, false);
    let token = format!("token-{}", user.id);
    backend.users.push(user);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": value, "token": token })),
    )
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let backend = state.lock().unwrap();
    let found = backend.users.iter().find(|u| {
        Some(u.email.as_str()) == body["email"].as_str()
            && Some(u.password.as_str()) == body["password"].as_str()
    });
    match found {
        Some(user) => ok(json!({
            "message": "Login successful",
            "user": backend.user_json(user, false),
            "token": format!("token-{}", user.id),
        })),
        None => error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let backend = state.lock().unwrap();
    match backend.user_for(&headers) {
        Some(user) => ok(backend.user_json(&user, true)),
        None => unauthorized(),
    }
}

async fn update_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let Some(stored) = backend.users.iter_mut().find(|u| u.id == user.id) else {
        return unauthorized();
    };
    if let Some(username) = body["username"].as_str() {
        stored.username = username.to_string();
    }
    if let Some(email) = body["email"].as_str() {
        stored.email = email.to_string();
    }
    let updated = stored.clone();
    ok(json!({ "message": "Profile updated", "user": backend.user_json(&updated, false) }))
}

async fn user_articles(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let articles: Vec<Value> = backend
        .articles
        .iter()
        .rev()
        .filter(|a| a.author_id == user.id)
        .map(|a| backend.article_json(a))
        .collect();
    ok(json!(articles))
}

async fn user_likes(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let likes: Vec<Value> = backend
        .articles
        .iter()
        .filter(|a| backend.likes.contains(&(user.id, a.id)))
        .map(|a| json!({ "id": a.id, "article_id": a.id, "title": a.title, "slug": a.slug, "created_at": now() }))
        .collect();
    ok(json!(likes))
}

async fn user_comments(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let comments: Vec<Value> = backend
        .comments
        .iter()
        .rev()
        .filter(|c| c.user_id == user.id)
        .map(|c| {
            let mut value = backend.comment_json(c);
            if let Some(article) = backend.articles.iter().find(|a| a.id == c.article_id) {
                value["title"] = json!(article.title);
                value["slug"] = json!(article.slug);
            }
            value
        })
        .collect();
    ok(json!(comments))
}

async fn favorites(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let articles: Vec<Value> = backend
        .articles
        .iter()
        .filter(|a| backend.likes.contains(&(user.id, a.id)))
        .map(|a| backend.article_json(a))
        .collect();
    ok(json!(articles))
}

async fn user_statistics(State(state): State<Shared>, Path(id): Path<i64>) -> Reply {
    let backend = state.lock().unwrap();
    if !backend.users.iter().any(|u| u.id == id) {
        return error(StatusCode::NOT_FOUND, "User not found");
    }
    let views: u32 = backend
        .articles
        .iter()
        .filter(|a| a.author_id == id)
        .map(|a| a.views)
        .sum();
    ok(json!({
        "total_articles": backend.articles.iter().filter(|a| a.author_id == id).count(),
        "total_views": views,
    }))
}

async fn list_articles(State(state): State<Shared>) -> Reply {
    let backend = state.lock().unwrap();
    let articles: Vec<Value> = backend
        .articles
        .iter()
        .rev()
        .map(|a| backend.article_json(a))
        .collect();
    ok(json!(articles))
}

async fn create_article(State(state): State<Shared>, request: Request) -> Reply {
    let headers = request.headers().clone();
    let Some(user) = state.lock().unwrap().user_for(&headers) else {
        return unauthorized();
    };

    let is_multipart = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let (fields, photo) = if is_multipart {
        let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
            return error(StatusCode::BAD_REQUEST, "Bad multipart body");
        };
        let mut fields = json!({});
        let mut photo = None;
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            if name == "photo" {
                let upload_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
                state.lock().unwrap().last_upload = Some(Upload {
                    file_name: upload_name.clone(),
                    content_type,
                    size,
                });
                photo = Some(format!("uploads/{upload_name}"));
            } else {
                fields[name] = json!(field.text().await.unwrap_or_default());
            }
        }
        (fields, photo)
    } else {
        let Ok(Json(body)) = Json::<Value>::from_request(request, &()).await else {
            return error(StatusCode::BAD_REQUEST, "Bad JSON body");
        };
        let photo = body["photo"].as_str().map(str::to_string);
        (body, photo)
    };

    match state.lock().unwrap().new_article(user.id, &fields, photo) {
        Ok(article) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Article created successfully", "article": article })),
        ),
        Err(reply) => reply,
    }
}

async fn get_article(State(state): State<Shared>, Path(slug): Path<String>) -> Reply {
    let mut backend = state.lock().unwrap();
    let Some(index) = backend.find_article(&slug) else {
        return error(StatusCode::NOT_FOUND, "Article not found");
    };
    backend.articles[index].views += 1;
    let article = backend.articles[index].clone();
    ok(backend.article_json(&article))
}

async fn update_article(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let Some(index) = backend.find_article(&slug) else {
        return error(StatusCode::NOT_FOUND, "Article not found");
    };
    if backend.articles[index].author_id != user.id {
        return error(StatusCode::FORBIDDEN, "Unauthorized");
    }
    let article = &mut backend.articles[index];
    if let Some(title) = body["title"].as_str() {
        article.title = title.to_string();
    }
    if let Some(content) = body["content"].as_str() {
        article.content = content.to_string();
    }
    if let Some(category) = body["category"].as_str() {
        article.category = category.to_string();
    }
    let article = article.clone();
    ok(json!({ "message": "Article updated successfully", "article": backend.article_json(&article) }))
}

async fn delete_article(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Reply {
    let mut backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let Some(index) = backend.find_article(&slug) else {
        return error(StatusCode::NOT_FOUND, "Article not found");
    };
    if backend.articles[index].author_id != user.id {
        return error(StatusCode::FORBIDDEN, "Unauthorized");
    }
    let removed = backend.articles.remove(index);
    backend.comments.retain(|c| c.article_id != removed.id);
    backend.likes.retain(|(_, a)| *a != removed.id);
    ok(json!({ "message": "Article deleted successfully" }))
}

async fn list_comments(State(state): State<Shared>, Path(slug): Path<String>) -> Reply {
    let backend = state.lock().unwrap();
    let Some(index) = backend.find_article(&slug) else {
        return error(StatusCode::NOT_FOUND, "Article not found");
    };
    let article_id = backend.articles[index].id;
    // Newest first, like the real service
    let comments: Vec<Value> = backend
        .comments
        .iter()
        .rev()
        .filter(|c| c.article_id == article_id)
        .map(|c| backend.comment_json(c))
        .collect();
    ok(json!(comments))
}

async fn add_comment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let Some(index) = backend.find_article(&slug) else {
        return error(StatusCode::NOT_FOUND, "Article not found");
    };
    let text = body["text"].as_str().unwrap_or_default().to_string();
    if text.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Comment text required");
    }
    let comment = FakeComment {
        id: backend.next_id(),
        article_id: backend.articles[index].id,
        user_id: user.id,
        text,
        created_at: now(),
    };
    let value = backend.comment_json(&comment);
    backend.comments.push(comment);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Comment added successfully", "comment": value })),
    )
}

async fn toggle_like(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Reply {
    let mut backend = state.lock().unwrap();
    let Some(user) = backend.user_for(&headers) else {
        return unauthorized();
    };
    let Some(index) = backend.find_article(&slug) else {
        return error(StatusCode::NOT_FOUND, "Article not found");
    };
    let key = (user.id, backend.articles[index].id);
    let message = if backend.likes.remove(&key) {
        "Like removed"
    } else {
        backend.likes.insert(key);
        "Like added"
    };
    let likes_count = backend.likes.iter().filter(|(_, a)| *a == key.1).count();
    ok(json!({ "message": message, "likes_count": likes_count }))
}

async fn generate(Json(body): Json<Value>) -> Reply {
    let topic = body["topic"].as_str().unwrap_or_default();
    match topic {
        "fail" => error(StatusCode::INTERNAL_SERVER_ERROR, "Generation backend unavailable"),
        "silence" => ok(json!({ "title": "Nothing", "content": "" })),
        _ => ok(json!({
            "title": format!("AI: {topic}"),
            "content": format!("A {} article about {topic}.", body["style"].as_str().unwrap_or("news")),
            "style": body["style"],
            "length": body["length"],
        })),
    }
}

async fn analytics(Json(body): Json<Value>) -> Reply {
    let articles = body["articles"].as_array().cloned().unwrap_or_default();
    let total_views: u64 = articles.iter().filter_map(|a| a["views"].as_u64()).sum();
    let avg_views = if articles.is_empty() {
        0.0
    } else {
        total_views as f64 / articles.len() as f64
    };
    ok(json!({
        "insights": format!("You wrote {} articles ({}).", articles.len(), body["period"].as_str().unwrap_or("")),
        "recommendations": "Keep writing.",
        "stats": { "total_articles": articles.len(), "total_views": total_views, "avg_views": avg_views },
    }))
}

async fn recommendations() -> Reply {
    ok(json!([{ "title": "Rust in production", "category": "tech", "reason": "Popular" }]))
}
