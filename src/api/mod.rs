//! HTTP boundary: a thin reqwest wrapper plus the response-envelope
//! decoder. All JSON crosses into typed payloads here; nothing past this
//! module re-checks response shapes.

pub mod envelope;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::errors::AppError;

pub use envelope::{ListPayload, decode_ack, decode_entity, decode_list};

/// The seam between the view-models and the wire. One implementation per
/// entity collection endpoint; tests substitute an in-memory fake.
#[async_trait]
pub trait Backend<T>: Send + Sync {
    async fn fetch(&self) -> Result<ListPayload<T>, AppError>;
    async fn create(&self, payload: &Value) -> Result<(), AppError>;
    async fn update(&self, id: i64, payload: &Value) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Backend API client. Cheap to clone; the underlying connection pool is
/// shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(ApiClient { base_url: config.base_url.clone(), client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET returning the raw JSON body; non-2xx becomes a fetch error.
    pub async fn get_json(&self, path: &str) -> Result<Value, AppError> {
        let resp = self.client.get(self.url(path)).send().await?;
        Self::read_body(resp).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, AppError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::read_body(resp).await
    }

    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, AppError> {
        let resp = self.client.put(self.url(path)).json(body).send().await?;
        Self::read_body(resp).await
    }

    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, AppError> {
        let resp = self.client.patch(self.url(path)).json(body).send().await?;
        Self::read_body(resp).await
    }

    pub async fn delete_json(&self, path: &str) -> Result<Value, AppError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        Self::read_body(resp).await
    }

    /// A `Backend` bound to one collection path, e.g. `fair-risks`.
    pub fn collection<T>(&self, path: &str) -> RestBackend<T> {
        RestBackend {
            client: self.clone(),
            path: path.trim_matches('/').to_string(),
            _marker: PhantomData,
        }
    }

    async fn read_body(resp: reqwest::Response) -> Result<Value, AppError> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("HTTP {status}: {detail}")));
        }
        if resp.content_length() == Some(0) {
            return Ok(Value::Null);
        }
        // Tolerate empty 204-style bodies from delete endpoints
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(AppError::from)
    }
}

/// Rewrap a transport/envelope error with the mutation's operation name,
/// keeping the inner message free of the "Fetch error" prefix.
fn mutation_err(op: &'static str, err: AppError) -> AppError {
    let message = match err {
        AppError::Fetch(m) | AppError::Parse(m) => m,
        other => other.to_string(),
    };
    AppError::Mutation { op, message }
}

/// REST implementation of [`Backend`] for a single collection endpoint:
/// `GET /{path}`, `POST /{path}`, `PUT /{path}/{id}`, `DELETE /{path}/{id}`.
#[derive(Debug, Clone)]
pub struct RestBackend<T> {
    client: ApiClient,
    path: String,
    _marker: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T: DeserializeOwned + Send + Sync> Backend<T> for RestBackend<T> {
    async fn fetch(&self) -> Result<ListPayload<T>, AppError> {
        let body = self.client.get_json(&self.path).await?;
        decode_list(body)
    }

    async fn create(&self, payload: &Value) -> Result<(), AppError> {
        let body = self
            .client
            .post_json(&self.path, payload)
            .await
            .map_err(|e| mutation_err("create", e))?;
        decode_ack(&body).map_err(|e| mutation_err("create", e))
    }

    async fn update(&self, id: i64, payload: &Value) -> Result<(), AppError> {
        let path = format!("{}/{id}", self.path);
        let body = self
            .client
            .put_json(&path, payload)
            .await
            .map_err(|e| mutation_err("update", e))?;
        decode_ack(&body).map_err(|e| mutation_err("update", e))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let path = format!("{}/{id}", self.path);
        let body = self
            .client
            .delete_json(&path)
            .await
            .map_err(|e| mutation_err("delete", e))?;
        decode_ack(&body).map_err(|e| mutation_err("delete", e))
    }
}
