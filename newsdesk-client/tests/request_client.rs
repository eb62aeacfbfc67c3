mod common;

use std::rc::Rc;

use axum::http::Method;
use client::{
    ApiClient, ClientError, CredentialStore, HttpMethod, MemoryStore, RequestOptions,
    SessionState, ViewScope,
    store::{TOKEN_KEY, USER_KEY},
};
use common::{MockBackend, logged_in, session};
use serde_json::json;

#[tokio::test]
async fn attaches_bearer_and_json_content_type() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::GET, "/categories", 200, json!({"success": true, "data": {"categories": []}}));

    let body = api.request("/categories", RequestOptions::get()).await.unwrap();

    assert_eq!(body, json!({"success": true, "data": {"categories": []}}));
    let request = backend.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.header("authorization").as_deref(), Some("Bearer t1"));
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/banners/admin", 200, json!({"success": true, "data": []}));
    let api = ApiClient::new(session(&backend, &Rc::new(MemoryStore::new())));

    api.request("/banners/admin", RequestOptions::get()).await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.header("authorization"), None);
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));
}

#[tokio::test]
async fn caller_headers_win_case_insensitively() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::POST, "/articles", 200, json!({"success": true}));

    let options = RequestOptions::json(HttpMethod::Post, &json!({"title": "x"}))
        .unwrap()
        .header("content-type", "application/merge-patch+json")
        .header("Authorization", "Bearer override")
        .header("X-Request-Source", "tests");
    api.request("/articles", options).await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.headers.get_all("content-type").iter().count(), 1);
    assert_eq!(
        request.header("content-type").as_deref(),
        Some("application/merge-patch+json")
    );
    assert_eq!(request.header("authorization").as_deref(), Some("Bearer override"));
    assert_eq!(request.header("x-request-source").as_deref(), Some("tests"));
    assert_eq!(request.json(), json!({"title": "x"}));
}

#[tokio::test]
async fn each_method_is_sent_as_requested() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    for (method, expected) in [
        (HttpMethod::Put, Method::PUT),
        (HttpMethod::Patch, Method::PATCH),
        (HttpMethod::Delete, Method::DELETE),
    ] {
        backend.respond(expected.clone(), "/categories/4", 200, json!({"success": true}));
        api.request("/categories/4", RequestOptions::method(method))
            .await
            .unwrap();
        assert_eq!(backend.last_request().method, expected);
    }
}

#[tokio::test]
async fn unauthorized_logs_out_regardless_of_body() {
    for (status, body) in [(401, "<html>denied</html>"), (403, r#"{"success":false}"#), (401, "")] {
        let backend = MockBackend::start().await;
        let (session, api, store) = logged_in(&backend).await;
        backend.respond_raw(Method::GET, "/users", status, body);

        let err = api.request("/users", RequestOptions::get()).await.unwrap_err();

        assert_eq!(err, ClientError::SessionExpired);
        assert!(err.is_session_expired());
        assert_eq!(session.current_user(), None);
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USER_KEY), None);
    }
}

#[tokio::test]
async fn other_failures_carry_status_and_message() {
    let backend = MockBackend::start().await;
    let (session, api, _store) = logged_in(&backend).await;

    backend.respond(
        Method::GET,
        "/articles/99",
        404,
        json!({"success": false, "message": "Article not found"}),
    );
    assert_eq!(
        api.request("/articles/99", RequestOptions::get()).await.unwrap_err(),
        ClientError::Request {
            status: 404,
            message: "Article not found".into()
        }
    );

    backend.respond(Method::GET, "/articles/stats", 500, json!({"error": "boom"}));
    assert_eq!(
        api.request("/articles/stats", RequestOptions::get()).await.unwrap_err(),
        ClientError::Request {
            status: 500,
            message: "Request failed".into()
        }
    );
    assert!(session.current_user().is_some(), "non-auth failures keep the session");
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let backend = MockBackend::start().await;
    let (session, api, _store) = logged_in(&backend).await;
    backend.respond_raw(Method::GET, "/categories", 200, "<!doctype html>");

    let err = api.request("/categories", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));

    backend.respond_raw(Method::GET, "/categories", 500, "Internal Server Error");
    let err = api.request("/categories", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
    assert!(session.current_user().is_some());
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let url = common::closed_port_url().await;
    let session = client::SessionManager::new(
        shared::config::ClientConfig::from_url(&url).unwrap(),
        Rc::new(MemoryStore::new()),
    );
    let api = ApiClient::new(session);

    let err = api.request("/articles", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn request_data_unwraps_envelope() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::GET, "/answer", 200, json!({"success": true, "data": 42}));
    backend.respond(
        Method::GET,
        "/refused",
        200,
        json!({"success": false, "message": "Slot already taken"}),
    );

    let answer: u32 = api.request_data("/answer", RequestOptions::get()).await.unwrap();
    assert_eq!(answer, 42);

    let refused = api.request_data::<u32>("/refused", RequestOptions::get()).await;
    assert_eq!(refused, Err(ClientError::Rejected("Slot already taken".into())));
}

#[tokio::test]
async fn upload_sends_multipart_with_bearer() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::POST,
        "/upload/image",
        200,
        json!({"success": true, "data": {"url": "https://cdn.example.com/cover.png"}}),
    );

    let image = api
        .uploads()
        .image("cover.png", vec![0x89, b'P', b'N', b'G'], "image/png")
        .await
        .unwrap();

    assert_eq!(image.url, "https://cdn.example.com/cover.png");
    let request = backend.last_request();
    assert_eq!(request.header("authorization").as_deref(), Some("Bearer t1"));
    assert!(
        request
            .header("content-type")
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    );
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="image""#));
    assert!(body.contains(r#"filename="cover.png""#));
}

#[tokio::test]
async fn upload_expiry_logs_out() {
    let backend = MockBackend::start().await;
    let (session, api, store) = logged_in(&backend).await;
    backend.respond(Method::POST, "/upload/image", 401, json!({}));

    let err = api
        .upload_image("a.png", vec![1, 2, 3], "image/png")
        .await
        .unwrap_err();

    assert_eq!(err, ClientError::SessionExpired);
    assert_eq!(session.current_user(), None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn cancelled_scope_sends_nothing() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    let before = backend.requests().len();
    let scope = ViewScope::new();
    scope.cancel();

    let result = scope.run(api.categories().list()).await;

    assert_eq!(result, Err(ClientError::Cancelled));
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn scope_passes_results_through() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::GET,
        "/categories",
        200,
        json!({"success": true, "data": {"categories": [{"id": 1, "name": "Sport", "slug": "sport"}]}}),
    );
    let scope = ViewScope::new();

    let categories = scope.run(api.categories().list()).await.unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(scope.in_flight(), 0);
}
