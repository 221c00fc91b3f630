//! Hosted document store client.
//!
//! Documents live under `{base}/v1/collections/{collection}/documents/{key}`
//! and field-equality queries go to `documents:query`. The store is
//! schemaless; records are plain JSON objects.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use super::{base_url, error_detail, http_client};
use crate::auth::{DocumentStore, StoreError};

pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl RestDocumentStore {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(url: &str, api_key: Option<SecretString>) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url(url)?,
            api_key,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let request = self.client.request(method, url);
        match &self.api_key {
            Some(key) => request.query(&[("key", key.expose_secret())]),
            None => request,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(StatusCode, Option<Value>), StoreError> {
        let mut request = self.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok((status, None));
        }
        if !status.is_success() {
            let detail = error_detail(response).await;
            return Err(StoreError::Unavailable(format!(
                "{method} {path} - {status}, {detail}"
            )));
        }

        let body = response.json::<Value>().await.ok();
        Ok((status, body))
    }
}

fn document_path(collection: &str, key: &str) -> String {
    format!("/v1/collections/{collection}/documents/{key}")
}

fn query_path(collection: &str) -> String {
    format!("/v1/collections/{collection}/documents:query")
}

// `send` lets 404 through so `get` and `delete` can treat it as absence.
// Writes and queries never target an absent path legitimately; for them a
// 404 means a broken base URL or collection path and must surface.
fn require_found(method: &Method, path: &str, status: StatusCode) -> Result<(), StoreError> {
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::Unavailable(format!(
            "{method} {path} - {status}, target path does not exist"
        )));
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn write(&self, collection: &str, key: &str, record: Value) -> Result<(), StoreError> {
        let path = document_path(collection, key);
        let (status, _) = self.send(Method::PUT, &path, Some(&record)).await?;
        require_found(&Method::PUT, &path, status)?;
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let (status, body) = self
            .send(Method::GET, &document_path(collection, key), None)
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(body)
    }

    async fn update(&self, collection: &str, key: &str, changes: Value) -> Result<(), StoreError> {
        let (status, _) = self
            .send(Method::PATCH, &document_path(collection, key), Some(&changes))
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        // A 404 means the document is already gone; that is the outcome the
        // caller asked for.
        self.send(Method::DELETE, &document_path(collection, key), None)
            .await?;
        Ok(())
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let payload = json!({ "field": field, "equals": value });
        let path = query_path(collection);
        let (status, body) = self.send(Method::POST, &path, Some(&payload)).await?;
        require_found(&Method::POST, &path, status)?;

        let rows = body
            .as_ref()
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let key = row["id"].as_str()?.to_string();
                Some((key, row["document"].clone()))
            })
            .collect())
    }
}
