mod common;

use axum::http::Method;
use client::ClientError;
use common::{MockBackend, logged_in, logged_in_as};
use serde_json::json;
use shared::models::{
    ArticleDraft, ArticleQuery, BannerDraft, BannerKind, CategoryDraft, CreateUserRequest,
    SubmissionFilter, SubmissionStatus, UserQuery, UserRole,
};

fn article(id: i64, title: &str) -> serde_json::Value {
    json!({"id": id, "title": title, "slug": title.to_lowercase(), "status": "published"})
}

fn valid_draft() -> ArticleDraft {
    ArticleDraft {
        title: "Election night".into(),
        slug: "election-night".into(),
        category_id: 2,
        content: "<p>Results</p>".into(),
        ..ArticleDraft::default()
    }
}

#[tokio::test]
async fn recent_articles_query_string() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::GET,
        "/articles",
        200,
        json!({"success": true, "data": {"articles": [article(1, "One"), article(2, "Two")]}}),
    );

    let articles = api.articles().list(&ArticleQuery::recent(5)).await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].title, "Two");
    assert_eq!(
        backend.last_request().query.as_deref(),
        Some("limit=5&sort=created_at&order=desc")
    );
}

#[tokio::test]
async fn article_crud_round_trips() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::GET, "/articles/7", 200, json!({"success": true, "data": article(7, "Seven")}));
    backend.respond(Method::POST, "/articles", 201, json!({"success": true, "message": "Created"}));
    backend.respond(Method::PUT, "/articles/7", 200, json!({"success": true}));
    backend.respond(Method::DELETE, "/articles/7", 200, json!({"success": true}));

    let articles = api.articles();
    assert_eq!(articles.get(7).await.unwrap().title, "Seven");

    articles.create(&valid_draft()).await.unwrap();
    let created = backend.last_request();
    assert_eq!(created.json()["show_author"], 0);
    assert_eq!(created.json()["category_id"], 2);

    articles.update(7, &valid_draft()).await.unwrap();
    assert_eq!(backend.last_request().method, Method::PUT);

    articles.delete(7).await.unwrap();
    assert_eq!(backend.last_request().method, Method::DELETE);
}

#[tokio::test]
async fn invalid_article_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    let before = backend.requests().len();

    let draft = ArticleDraft {
        title: String::new(),
        ..valid_draft()
    };
    assert_eq!(
        api.articles().create(&draft).await,
        Err(ClientError::Validation("title is required".into()))
    );
    assert_eq!(
        api.articles().featured_slot(6).await.unwrap_err(),
        ClientError::Validation("featured priority must be between 1 and 5".into())
    );
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn taken_featured_slots_skip_own_article_and_failures() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    let free = json!({"success": true, "data": {"taken": false}});
    backend.respond(
        Method::GET,
        "/articles/featured/check/1",
        200,
        json!({"success": true, "data": {"taken": true, "article": article(10, "Lead")}}),
    );
    backend.respond(Method::GET, "/articles/featured/check/2", 500, json!({"success": false}));
    backend.respond(
        Method::GET,
        "/articles/featured/check/3",
        200,
        json!({"success": true, "data": {"taken": true, "article": article(42, "Mine")}}),
    );
    backend.respond(Method::GET, "/articles/featured/check/4", 200, free.clone());
    backend.respond(Method::GET, "/articles/featured/check/5", 200, free);

    let taken = api.articles().taken_featured_slots(Some(42)).await.unwrap();

    assert_eq!(taken.keys().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(taken[&1].id, 10);
}

#[tokio::test]
async fn featured_scan_stops_on_expiry() {
    let backend = MockBackend::start().await;
    let (session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::GET, "/articles/featured/check/1", 401, json!({}));

    let result = api.articles().taken_featured_slots(None).await;

    assert_eq!(result, Err(ClientError::SessionExpired));
    assert!(session.current_user().is_none());
    assert_eq!(backend.requests_to("/articles/featured/check/2").len(), 0);
}

#[tokio::test]
async fn category_drafts_are_trimmed() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::POST, "/categories", 200, json!({"success": true}));

    let draft = CategoryDraft {
        name: "  World News ".into(),
        slug: " world-news ".into(),
        description: String::new(),
    };
    api.categories().create(draft).await.unwrap();

    assert_eq!(
        backend.last_request().json(),
        json!({"name": "World News", "slug": "world-news", "description": ""})
    );
    assert!(matches!(
        api.categories().update(1, CategoryDraft::default()).await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn banners_use_admin_listing_and_toggle() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::GET,
        "/banners/admin",
        200,
        json!({"success": true, "data": [
            {"id": 1, "title": "Sale", "type": "vertical", "image_url": "https://cdn/x.png", "is_active": 0, "display_order": 2}
        ]}),
    );
    backend.respond(Method::PATCH, "/banners/1/toggle", 200, json!({"success": true}));
    backend.respond(Method::POST, "/banners", 200, json!({"success": true}));

    let banners = api.banners().list().await.unwrap();
    assert_eq!(banners[0].kind, BannerKind::Vertical);
    assert!(!banners[0].is_active);

    api.banners().toggle(1).await.unwrap();
    assert_eq!(backend.last_request().method, Method::PATCH);

    let draft = BannerDraft {
        title: "Promo".into(),
        image_url: "https://cdn/promo.png".into(),
        ..BannerDraft::default()
    };
    api.banners().create(&draft).await.unwrap();
    let body = backend.last_request().json();
    assert_eq!(body["type"], "horizontal");
    assert_eq!(body["is_active"], 1);

    assert!(matches!(
        api.banners().create(&BannerDraft::default()).await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn users_listing_and_guards() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::GET,
        "/users",
        200,
        json!({"success": true, "data": {"users": [{"id": 2, "role": "editor", "username": "ed"}]}}),
    );
    backend.respond(
        Method::GET,
        "/users/stats/overview",
        200,
        json!({"success": true, "data": {"total": 3, "admins": 1, "editors": 1, "authors": 1}}),
    );
    backend.respond(Method::DELETE, "/users/2", 200, json!({"success": true}));

    let query = UserQuery {
        role: Some(UserRole::Editor),
        search: Some("ed".into()),
    };
    let users = api.users().list(&query).await.unwrap();
    assert_eq!(users[0].role, UserRole::Editor);
    assert_eq!(backend.last_request().query.as_deref(), Some("role=editor&search=ed"));

    assert_eq!(api.users().stats().await.unwrap().total, 3);

    assert!(matches!(
        api.users().delete(1).await,
        Err(ClientError::Validation(_))
    ));
    api.users().delete(2).await.unwrap();

    let before = backend.requests().len();
    assert!(matches!(
        api.users().change_password(2, "12345").await,
        Err(ClientError::Validation(_))
    ));
    let short = CreateUserRequest {
        username: "new".into(),
        email: "new@example.com".into(),
        password: "abc".into(),
        full_name: String::new(),
        role: UserRole::Author,
        avatar: String::new(),
    };
    assert!(matches!(
        api.users().create(&short).await,
        Err(ClientError::Validation(_))
    ));
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn change_password_patches() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(Method::PATCH, "/users/5/password", 200, json!({"success": true}));

    api.users().change_password(5, "longer-secret").await.unwrap();

    assert_eq!(backend.last_request().json(), json!({"password": "longer-secret"}));
}

#[tokio::test]
async fn author_hitting_admin_endpoint_is_logged_out() {
    let backend = MockBackend::start().await;
    let (session, api, store) =
        logged_in_as(&backend, json!({"id": 9, "role": "author"})).await;
    backend.respond(Method::GET, "/users", 403, json!({"success": false, "message": "Forbidden"}));

    let err = api.users().list(&UserQuery::default()).await.unwrap_err();

    assert_eq!(err, ClientError::SessionExpired);
    assert!(session.current_user().is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn submissions_filter_and_moderate() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::GET,
        "/submissions",
        200,
        json!({"submissions": [
            {"id": 1, "name": "Reader", "title": "Pothole", "content": "Main st", "status": "pending"}
        ]}),
    );
    backend.respond(Method::PATCH, "/submissions/1/status", 200, json!({"success": true}));
    backend.respond(Method::DELETE, "/submissions/1", 200, json!({"success": true}));

    let pending = api
        .submissions()
        .list(SubmissionFilter::Only(SubmissionStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(backend.last_request().query.as_deref(), Some("status=pending"));

    api.submissions().list(SubmissionFilter::All).await.unwrap();
    assert_eq!(backend.last_request().query, None);

    api.submissions()
        .set_status(1, SubmissionStatus::Approved)
        .await
        .unwrap();
    assert_eq!(backend.last_request().json(), json!({"status": "approved"}));

    assert!(matches!(
        api.submissions().set_status(1, SubmissionStatus::Pending).await,
        Err(ClientError::Validation(_))
    ));

    api.submissions().delete(1).await.unwrap();
    assert_eq!(backend.last_request().method, Method::DELETE);
}

#[tokio::test]
async fn submission_moderation_accepts_plain_message_replies() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    backend.respond(
        Method::PATCH,
        "/submissions/4/status",
        200,
        json!({"message": "Status updated"}),
    );
    backend.respond(Method::DELETE, "/submissions/4", 200, json!({"message": "Deleted"}));
    backend.respond(
        Method::DELETE,
        "/submissions/5",
        200,
        json!({"success": false, "message": "Submission is locked"}),
    );

    assert_eq!(
        api.submissions().set_status(4, SubmissionStatus::Rejected).await,
        Ok(())
    );
    assert_eq!(api.submissions().delete(4).await, Ok(()));
    assert_eq!(
        api.submissions().delete(5).await,
        Err(ClientError::Rejected("Submission is locked".into()))
    );
}

#[tokio::test]
async fn upload_rejects_unsupported_types_locally() {
    let backend = MockBackend::start().await;
    let (_session, api, _store) = logged_in(&backend).await;
    let before = backend.requests().len();

    assert!(matches!(
        api.uploads().image("notes.txt", b"hi".to_vec(), "text/plain").await,
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        api.uploads().image("empty.png", Vec::new(), "image/png").await,
        Err(ClientError::Validation(_))
    ));
    assert_eq!(backend.requests().len(), before);
}
