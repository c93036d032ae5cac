use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::auth::{credentials, extract::AuthUser};
use crate::error::AppError;
use crate::models::product::{Product, ProductFields};
use crate::models::user::{LoginRequest, LoginResponse};
use crate::repo;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/login", post(login))
        .route("/api/texts/:lang", get(texts))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/:id", put(update_product).delete(delete_product))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Username and password required"));
    }

    let identity = credentials::verify(&state.db, &req.username, &req.password).await?;
    let token = state.tokens.issue(&identity)?;
    tracing::debug!("Issued session token for {}", identity.username);

    Ok(Json(LoginResponse { token }))
}

async fn texts(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let map = repo::texts::lookup(&state.db, &lang).await?;
    Ok(Json(map))
}

async fn list_products(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = repo::products::list(&state.db).await?;
    Ok(Json(products))
}

async fn create_product(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(fields): Json<ProductFields>,
) -> Result<impl IntoResponse, AppError> {
    let product = repo::products::create(&state.db, &fields).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<ProductFields>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !repo::products::update(&state.db, id, &fields).await? {
        return Err(AppError::NotFound("Product not found"));
    }
    Ok(Json(json!({ "success": true })))
}

async fn delete_product(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !repo::products::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Product not found"));
    }
    Ok(Json(json!({ "success": true })))
}
