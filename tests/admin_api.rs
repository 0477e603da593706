use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use folio::auth::AdminSession;
use folio::config::Config;
use folio::state::AppState;
use folio::{db, routes};

fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let pool = db::create_pool(&db_path).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let state = AppState {
        db: pool,
        config: Config::default(),
    };
    (routes::router().with_state(state), temp_dir)
}

/// Sign in with the default credentials and return the session cookie
/// pair (`folio_admin=...`).
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=admin&password=admin123"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set the session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, cookie: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn api_rejects_requests_without_a_session() {
    let (app, _guard) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/admin/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_rejects_an_expired_session_cookie() {
    let (app, _guard) = test_app();

    let mut session = AdminSession::new("admin");
    session.login_time -= 86_400_001;
    let cookie = format!("folio_admin={}", session.encode());

    let response = app
        .oneshot(get("/api/admin/projects", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_rejects_a_garbage_session_cookie() {
    let (app, _guard) = test_app();
    let response = app
        .oneshot(get("/api/admin/projects", "folio_admin=definitely-not-a-session"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_wrong_password_shows_error_and_sets_no_cookie() {
    let (app, _guard) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=admin&password=wrong"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Invalid credentials"));
    // The form comes back with the username kept and the password gone
    assert!(html.contains(r#"value="admin""#));
    assert!(!html.contains("wrong"));
}

#[tokio::test]
async fn login_then_editor_pages_are_reachable() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    for uri in ["/admin", "/admin/projects", "/admin/tutorials"] {
        let response = app.clone().oneshot(get(uri, &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "expected 200 for {}", uri);
    }
}

#[tokio::test]
async fn editor_pages_redirect_to_login_without_a_session() {
    let (app, _guard) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/admin/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin");
}

#[tokio::test]
async fn projects_replace_round_trips_the_collection() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    let collection = json!([
        {
            "id": "project-1",
            "title": "First",
            "description": "One",
            "stack": ["Rust"],
            "image": "/images/first.png",
            "link": "https://example.com/first",
            "featured": true
        },
        {
            "id": "project-2",
            "title": "Second",
            "description": "Two",
            "stack": ["Rust", "SQLite"],
            "image": "",
            "link": "",
            "featured": false
        }
    ]);

    let response = app
        .clone()
        .oneshot(post_json("/api/admin/projects", &cookie, &collection))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    assert_eq!(saved["success"], json!(true));

    let response = app
        .clone()
        .oneshot(get("/api/admin/projects", &cookie))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    let mut ids: Vec<_> = listed.iter().map(|p| p["id"].as_str().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["project-1", "project-2"]);
    // Store assigns timestamps on write
    assert!(listed.iter().all(|p| p["created_at"].is_string()));
}

#[tokio::test]
async fn replacing_with_an_empty_collection_empties_the_table() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    let one = json!([{ "id": "p", "title": "P" }]);
    app.clone()
        .oneshot(post_json("/api/admin/projects", &cookie, &one))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/admin/projects", &cookie, &json!([])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/admin/projects", &cookie))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn saved_tutorial_appears_exactly_once_on_reload() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    let tutorial = json!({
        "slug": "hello-axum",
        "title": "Hello Axum",
        "date": "2026-03-01",
        "description": "Getting started",
        "tags": ["rust", "web"],
        "content": "# Hello\n\nFirst post."
    });

    let response = app
        .clone()
        .oneshot(post_json("/api/admin/tutorials", &cookie, &tutorial))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/admin/tutorials", &cookie))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let matching: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["slug"] == "hello-axum")
        .collect();
    assert_eq!(matching.len(), 1);
}

#[tokio::test]
async fn resaving_a_slug_overwrites_in_place() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    let original = json!({ "slug": "post", "title": "Draft", "date": "2026-01-01" });
    let revised = json!({ "slug": "post", "title": "Final", "date": "2026-01-02" });

    for body in [&original, &revised] {
        let response = app
            .clone()
            .oneshot(post_json("/api/admin/tutorials", &cookie, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get("/api/admin/tutorials", &cookie))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Final");
    assert_eq!(listed[0]["date"], "2026-01-02");
}

#[tokio::test]
async fn delete_without_slug_is_rejected_before_the_store() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    let tutorial = json!({ "slug": "keep-me", "title": "Keep", "date": "2026-01-01" });
    app.clone()
        .oneshot(post_json("/api/admin/tutorials", &cookie, &tutorial))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/admin/tutorials")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was deleted
    let response = app
        .clone()
        .oneshot(get("/api/admin/tutorials", &cookie))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_by_slug_removes_only_that_tutorial() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    for body in [
        json!({ "slug": "first", "title": "First", "date": "2026-01-01" }),
        json!({ "slug": "second", "title": "Second", "date": "2026-01-02" }),
    ] {
        app.clone()
            .oneshot(post_json("/api/admin/tutorials", &cookie, &body))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/admin/tutorials?slug=first")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/admin/tutorials", &cookie))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["slug"], "second");
}

#[tokio::test]
async fn read_failure_surfaces_as_an_empty_collection() {
    let temp_dir = TempDir::new().unwrap();
    let pool = db::create_pool(&temp_dir.path().join("test.db"))
        .expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let state = AppState {
        db: pool.clone(),
        config: Config::default(),
    };
    let app = routes::router().with_state(state);
    let cookie = login(&app).await;

    // Break the read path out from under the handlers
    let conn = pool.get().unwrap();
    conn.execute_batch("DROP TABLE projects; DROP TABLE tutorials;")
        .unwrap();
    drop(conn);

    for uri in ["/api/admin/projects", "/api/admin/tutorials"] {
        let response = app.clone().oneshot(get(uri, &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "expected 200 for {}", uri);
        assert_eq!(body_json(response).await, json!([]));
    }
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, _guard) = test_app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("folio_admin=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
