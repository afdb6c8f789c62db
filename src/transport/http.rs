//! HTTP client for the admin endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::TreePath;
use crate::transport::remote::{RemoteTree, WriteMode};
use crate::tree::TreeValue;

/// Admin endpoint connection settings.
///
/// There is no process-wide default client; construct one of these and pass
/// it to [`HttpRemoteTree::new`] explicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the admin endpoint.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2019".to_string(),
            timeout_secs: 30,
        }
    }
}

/// [`RemoteTree`] implementation speaking the admin HTTP API.
///
/// Path-addressed entries live under `{base}/config`, id-addressed entries
/// under `{base}/id`. Every call is one request/response exchange; failures
/// carry the HTTP status and, when the endpoint returns an
/// `{"error": "..."}` body, the remote message.
#[derive(Debug, Clone)]
pub struct HttpRemoteTree {
    client: reqwest::Client,
    base_url: url::Url,
}

impl HttpRemoteTree {
    /// Build a client for the given endpoint.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base_url: url::Url = config.base_url.parse().map_err(|e| Error::Transport {
            status: None,
            message: format!("invalid admin endpoint URL '{}': {}", config.base_url, e),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base_url })
    }

    fn config_url(&self, path: &TreePath) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}/config{}", base, path)
    }

    fn id_url(&self, id: &str, suffix: &TreePath) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}/id/{}{}", base, id, suffix)
    }

    async fn exchange(
        &self,
        method: Method,
        url: String,
        body: Option<&TreeValue>,
        missing: String,
    ) -> Result<reqwest::Response> {
        tracing::debug!(method = %method, url = %url, "admin request");
        let mut request = self.client.request(method, url.as_str());
        if let Some(value) = body {
            request = request.json(value);
        }
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(missing));
        }
        if !status.is_success() {
            let message = remote_message(response).await;
            tracing::warn!(status = status.as_u16(), url = %url, "admin request rejected");
            return Err(Error::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }
        Ok(response)
    }

    async fn decode(response: reqwest::Response) -> Result<TreeValue> {
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(TreeValue::null());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract the endpoint's error message from a failed response, falling
/// back to the raw body.
async fn remote_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(message) = parsed.get("error").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    body
}

fn write_method(mode: WriteMode) -> Method {
    match mode {
        WriteMode::Replace => Method::PUT,
        WriteMode::Insert => Method::POST,
    }
}

#[async_trait]
impl RemoteTree for HttpRemoteTree {
    async fn read(&self, path: &TreePath) -> Result<TreeValue> {
        let url = self.config_url(path);
        let response = self
            .exchange(Method::GET, url, None, path.to_string())
            .await?;
        Self::decode(response).await
    }

    async fn write(&self, path: &TreePath, value: TreeValue, mode: WriteMode) -> Result<()> {
        let url = self.config_url(path);
        self.exchange(write_method(mode), url, Some(&value), path.to_string())
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &TreePath) -> Result<()> {
        let url = self.config_url(path);
        self.exchange(Method::DELETE, url, None, path.to_string())
            .await?;
        Ok(())
    }

    async fn read_by_id(&self, id: &str) -> Result<TreeValue> {
        let url = self.id_url(id, &TreePath::root());
        let response = self.exchange(Method::GET, url, None, id.to_string()).await?;
        Self::decode(response).await
    }

    async fn write_by_id(
        &self,
        id: &str,
        suffix: &TreePath,
        value: TreeValue,
        mode: WriteMode,
    ) -> Result<()> {
        let url = self.id_url(id, suffix);
        self.exchange(write_method(mode), url, Some(&value), id.to_string())
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let url = self.id_url(id, &TreePath::root());
        self.exchange(Method::DELETE, url, None, id.to_string())
            .await?;
        Ok(())
    }
}
