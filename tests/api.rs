use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use pricelist_api::auth::{credentials, token::TokenSigner};
use pricelist_api::{rest, AppState};

const SECRET: &str = "test_secret";

async fn test_state() -> AppState {
    // One connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    credentials::provision(&pool, "testuser", "Password123")
        .await
        .unwrap();
    AppState {
        db: pool,
        tokens: TokenSigner::with_default_ttl(SECRET),
    }
}

async fn test_app() -> Router {
    rest::router(test_state().await)
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn with_body(method: &str, path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        with_body(
            "POST",
            "/api/login",
            None,
            json!({ "username": "testuser", "password": "Password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_liveness() {
    let app = test_app().await;
    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn seeded_login_scenario() {
    let app = test_app().await;

    let token = login(&app).await;
    assert!(!token.is_empty());

    let (status, body) = send(&app, get("/api/products", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());

    let (status, body) = send(&app, get("/api/products", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Missing token" }));
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = test_app().await;

    for body in [
        json!({ "username": "testuser" }),
        json!({ "password": "Password123" }),
        json!({ "username": "", "password": "Password123" }),
        json!({}),
    ] {
        let (status, response) = send(&app, with_body("POST", "/api/login", None, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Username and password required");
    }
}

#[tokio::test]
async fn bad_credentials_do_not_reveal_account_existence() {
    let app = test_app().await;

    let wrong_password = json!({ "username": "testuser", "password": "wrong" });
    let unknown_user = json!({ "username": "nobody", "password": "Password123" });
    for body in [wrong_password, unknown_user] {
        let (status, response) = send(&app, with_body("POST", "/api/login", None, body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn malformed_auth_headers_are_rejected() {
    let app = test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/products")
        .header(header::AUTHORIZATION, "not-a-bearer-header")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid auth header");

    let (status, body) = send(&app, get("/api/products", Some("garbage.token.here"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected_even_with_the_right_secret() {
    let app = test_app().await;

    let expired = TokenSigner::new(SECRET, chrono::Duration::hours(-1))
        .issue(&pricelist_api::models::user::UserIdentity {
            id: 1,
            username: "testuser".into(),
        })
        .unwrap();

    let (status, body) = send(&app, get("/api/products", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let app = test_app().await;

    let forged = TokenSigner::with_default_ttl("other_secret")
        .issue(&pricelist_api::models::user::UserIdentity {
            id: 1,
            username: "testuser".into(),
        })
        .unwrap();

    let (status, _) = send(&app, get("/api/products", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_language_yields_empty_object() {
    let app = test_app().await;
    let (status, body) = send(&app, get("/api/texts/xx", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn seeded_languages_are_served_without_auth() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/texts/en", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login.title"], "Log in");

    let (status, body) = send(&app, get("/api/texts/se", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login.title"], "Logga in");
}

#[tokio::test]
async fn update_round_trip_is_exact_and_isolated() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, first) = send(
        &app,
        with_body(
            "POST",
            "/api/products",
            Some(&token),
            json!({ "article_no": "A100", "product_service": "Chair", "price": "100" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = send(
        &app,
        with_body(
            "POST",
            "/api/products",
            Some(&token),
            json!({ "article_no": "A200", "product_service": "Lamp", "price": "50" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = first["id"].as_i64().unwrap();
    let second_id = second["id"].as_i64().unwrap();
    assert_ne!(first_id, second_id);

    let (status, body) = send(
        &app,
        with_body(
            "PUT",
            &format!("/api/products/{}", first_id),
            Some(&token),
            json!({
                "article_no": "A100",
                "product_service": "Office Chair",
                "in_price": "60",
                "price": "149",
                "unit": "pcs",
                "in_stock": "12",
                "description": "Ergonomic"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, list) = send(&app, get("/api/products", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    // Ordered by id ascending.
    assert_eq!(list[0]["id"].as_i64().unwrap(), first_id);

    assert_eq!(list[0]["product_service"], "Office Chair");
    assert_eq!(list[0]["price"], "149");
    assert_eq!(list[0]["in_stock"], "12");
    // The other row is untouched.
    assert_eq!(list[1]["product_service"], "Lamp");
    assert_eq!(list[1]["price"], "50");
}

#[tokio::test]
async fn update_replaces_omitted_fields_with_null() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, created) = send(
        &app,
        with_body(
            "POST",
            "/api/products",
            Some(&token),
            json!({ "article_no": "A100", "description": "keep me?" }),
        ),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        with_body(
            "PUT",
            &format!("/api/products/{}", id),
            Some(&token),
            json!({ "article_no": "A100" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, get("/api/products", Some(&token))).await;
    assert_eq!(list[0]["description"], Value::Null);
}

#[tokio::test]
async fn unknown_json_fields_are_ignored() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        with_body(
            "POST",
            "/api/products",
            Some(&token),
            json!({ "article_no": "A100", "not_a_column": "whatever" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["article_no"], "A100");
    assert!(created.get("not_a_column").is_none());
}

#[tokio::test]
async fn deleted_id_never_reappears() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, created) = send(
        &app,
        with_body(
            "POST",
            "/api/products",
            Some(&token),
            json!({ "article_no": "A100" }),
        ),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, delete(&format!("/api/products/{}", id), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, list) = send(&app, get("/api/products", Some(&token))).await;
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"].as_i64().unwrap() != id));

    // A later create gets a fresh id, not the deleted one.
    let (_, recreated) = send(
        &app,
        with_body(
            "POST",
            "/api/products",
            Some(&token),
            json!({ "article_no": "A100" }),
        ),
    )
    .await;
    assert_ne!(recreated["id"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn deleting_or_updating_a_missing_id_is_well_formed() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, delete("/api/products/999", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));

    let (status, body) = send(
        &app,
        with_body(
            "PUT",
            "/api/products/999",
            Some(&token),
            json!({ "article_no": "A100" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn every_product_route_requires_a_token() {
    let app = test_app().await;

    let requests = [
        get("/api/products", None),
        with_body("POST", "/api/products", None, json!({ "article_no": "A" })),
        with_body("PUT", "/api/products/1", None, json!({ "article_no": "A" })),
        delete("/api/products/1", None),
    ];
    for req in requests {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing token");
    }
}
