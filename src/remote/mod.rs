//! REST clients for the hosted backends.
//!
//! Both clients speak plain JSON over HTTP: the identity provider through
//! Firebase-style `accounts:` endpoints, the document store through a
//! collection/document path scheme. Each call is a single request; there
//! are no retries, and every failure is terminal for that attempt.

pub mod identity;
pub mod store;

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::APP_USER_AGENT;

/// Validate a backend base URL and normalize away any trailing slash.
pub(crate) fn base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("Invalid backend URL: {raw}"))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("Unsupported backend URL scheme: {scheme}")),
    }
    if url.host_str().is_none() {
        return Err(anyhow!("Backend URL must include a host: {raw}"));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Pull the human-readable detail out of an error response body.
///
/// Both backends use the `{"error": {"message": "..."}}` envelope; fall
/// back to the raw body when the shape differs.
pub(crate) async fn error_detail(response: Response) -> String {
    match response.json::<Value>().await {
        Ok(body) => body["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::base_url;

    #[test]
    fn base_url_normalizes_trailing_slash() -> anyhow::Result<()> {
        assert_eq!(
            base_url("https://identity.example.com/")?,
            "https://identity.example.com"
        );
        assert_eq!(
            base_url("http://localhost:9099")?,
            "http://localhost:9099"
        );
        Ok(())
    }

    #[test]
    fn base_url_rejects_bad_input() {
        assert!(base_url("not a url").is_err());
        assert!(base_url("ftp://identity.example.com").is_err());
        assert!(base_url("unix:/var/run/store.sock").is_err());
    }
}
