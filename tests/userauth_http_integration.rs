//! Integration tests for the broadcaster authorization handshake.
//!
//! Drives `/userauth/start` and `/userauth/finish` through the full router,
//! carrying the CSRF state from the redirect into the finish request the way
//! Twitch does.

mod common;

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use url::Url;

use common::*;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn redirect_query(response: &Response<Body>) -> HashMap<String, String> {
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    Url::parse(location)
        .unwrap()
        .query_pairs()
        .into_owned()
        .collect()
}

fn finish_uri(state: &str, scope: &str) -> String {
    let mut url = Url::parse("http://localhost/userauth/finish").unwrap();
    url.query_pairs_mut()
        .append_pair("code", "gulfwdmys5lsm6qyz4xiz9q32l10")
        .append_pair("scope", scope)
        .append_pair("state", state);
    format!("{}?{}", url.path(), url.query().unwrap())
}

async fn start(app: &TestApp) -> HashMap<String, String> {
    let response = app.send(get("/userauth/start")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    redirect_query(&response)
}

#[tokio::test]
async fn start_redirects_to_twitch_with_catalog_scopes() {
    let app = TestApp::with_catalog(FakeEventSub::new());

    let response = app.send(get("/userauth/start")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = Url::parse(response.headers()[header::LOCATION].to_str().unwrap()).unwrap();
    assert_eq!(location.host_str(), Some("id.twitch.tv"));
    assert_eq!(location.path(), "/oauth2/authorize");

    let query = redirect_query(&response);
    assert_eq!(query["response_type"], "code");
    assert_eq!(query["client_id"], "my-client-id");
    assert_eq!(query["redirect_uri"], "https://hooks.example.com/userauth/finish");
    assert_eq!(
        query["scope"],
        "channel:read:hype_train moderator:read:followers bits:read channel:read:subscriptions"
    );
    assert!(!query["state"].is_empty());
}

#[tokio::test]
async fn finish_with_all_scopes_shows_success_page() {
    let app = TestApp::with_catalog(FakeEventSub::new());
    let query = start(&app).await;

    let response = app.send(get(&finish_uri(&query["state"], &query["scope"]))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(body_string(response).await.contains("Access granted"));
}

#[tokio::test]
async fn finish_cannot_be_replayed() {
    let app = TestApp::with_catalog(FakeEventSub::new());
    let query = start(&app).await;
    let uri = finish_uri(&query["state"], &query["scope"]);

    assert_eq!(app.send(get(&uri)).await.status(), StatusCode::OK);

    let response = app.send(get(&uri)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("CSRF"));
}

#[tokio::test]
async fn finish_with_forged_state_is_rejected() {
    let app = TestApp::with_catalog(FakeEventSub::new());

    let response = app
        .send(get(&finish_uri("0123456789abcdef0123456789abcdef", "bits:read")))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn finish_without_state_is_rejected() {
    let app = TestApp::with_catalog(FakeEventSub::new());

    let response = app.send(get("/userauth/finish?scope=bits%3Aread")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "'state' value not found in URL query params"
    );
}

#[tokio::test]
async fn finish_with_missing_scope_names_it() {
    let app = TestApp::with_catalog(FakeEventSub::new());
    let query = start(&app).await;

    let response = app
        .send(get(&finish_uri(
            &query["state"],
            "channel:read:hype_train bits:read channel:read:subscriptions",
        )))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("moderator:read:followers"));
}

#[tokio::test]
async fn declined_consent_is_rejected() {
    let app = TestApp::with_catalog(FakeEventSub::new());
    let query = start(&app).await;

    let uri = format!(
        "/userauth/finish?error=access_denied&error_description=The+user+denied+you+access&state={}",
        query["state"]
    );
    let response = app.send(get(&uri)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
