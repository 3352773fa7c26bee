#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use investestate::{app, state::AppState};

/// Build a router over a fresh demo state; the state is returned too so
/// tests can peek at the store (e.g. to read an issued OTP code).
pub fn test_app() -> (Router, AppState) {
    let state = AppState::demo();
    (app::build_app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn get_auth(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

fn json_request(method: Method, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, cookie: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(cookie))).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, cookie: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(cookie))).await
}

pub async fn delete_auth(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` pair from a response's Set-Cookie header, ready to be
/// sent back in a Cookie header.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Register a user directly through the profile route and return the
/// session cookie.
pub async fn create_profile(app: &Router, phone_number: &str, name: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/create-profile",
        serde_json::json!({ "phoneNumber": phone_number, "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}
