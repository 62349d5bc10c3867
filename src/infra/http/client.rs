use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::usecase::ports::remote::{Binary, Envelope, FetchError, QueryParams, RemoteClient};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pulls a structured `{"error": "..."}` message out of a failed response.
pub fn structured_error(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    render_timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            render_timeout: config.render_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(
        &self,
        path: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<reqwest::Response, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| {
                warn!(url = %url, error = %err, "request failed");
                FetchError::Transport(err.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        let error = structured_error(&body);
        warn!(url = %url, status = status.as_u16(), error = ?error, "request rejected");
        Err(FetchError::Status {
            status: status.as_u16(),
            error,
        })
    }
}

impl RemoteClient for HttpClient {
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Envelope<T>, FetchError> {
        let response = self.get(path, params, self.timeout).await?;
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        serde_json::from_slice::<Envelope<T>>(&body).map_err(|err| {
            warn!(path, error = %err, "malformed response body");
            FetchError::Decode(err.to_string())
        })
    }

    async fn get_binary(&self, path: &str, params: &QueryParams) -> Result<Binary, FetchError> {
        let response = self.get(path, params, self.render_timeout).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string());
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Binary {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
