pub mod editor;
pub mod session;

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::models::product::{Product, ProductFields};
use crate::models::user::LoginResponse;

#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    /// The server rejected the bearer token (or it was never attached).
    /// Callers must route this through the session holder so the user drops
    /// back to the login screen.
    Unauthorized,
    Api {
        status: StatusCode,
        message: String,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(inner: reqwest::Error) -> Self {
        ClientError::Http(inner)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Unauthorized => write!(f, "unauthorized"),
            ClientError::Api { status, message } => write!(f, "{}: {}", status, message),
        }
    }
}

impl std::error::Error for ClientError {}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Typed client for the price-list API. Holds no token itself; protected
/// calls take the bearer token from the caller's session holder.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let res = check(res).await?;
        let body: LoginResponse = res.json().await?;
        Ok(body.token)
    }

    pub async fn texts(&self, lang: &str) -> Result<BTreeMap<String, String>, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/texts/{}", self.base_url, lang))
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn list_products(&self, token: &str) -> Result<Vec<Product>, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/products", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn create_product(
        &self,
        token: &str,
        fields: &ProductFields,
    ) -> Result<Product, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/products", self.base_url))
            .bearer_auth(token)
            .json(fields)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn update_product(
        &self,
        token: &str,
        id: i64,
        fields: &ProductFields,
    ) -> Result<(), ClientError> {
        let res = self
            .http
            .put(format!("{}/api/products/{}", self.base_url, id))
            .bearer_auth(token)
            .json(fields)
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }

    pub async fn delete_product(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(format!("{}/api/products/{}", self.base_url, id))
            .bearer_auth(token)
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }
}

async fn check(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(ClientError::Api { status, message })
}
