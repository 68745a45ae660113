#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request};
use axum::Router;
use sqlx::SqlitePool;
use todolist_api::{build_app, config::Environment, infrastructure::db};
use tower::ServiceExt;

pub async fn pool() -> SqlitePool {
    // use in-memory sqlite for tests
    let pool = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

pub async fn app() -> Router { build_app(pool().await, Environment::Development) }

pub async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<Body> {
    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(res: hyper::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}

/// Sends the request and returns status plus parsed envelope.
pub async fn call(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> (u16, serde_json::Value) {
    let res = request(app, method, path, body).await;
    let status = res.status().as_u16();
    (status, body_json(res).await)
}
