//! HTTP implementation of [`PersonnelApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{ApiResult, PersonnelApi};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{ApiErrorBody, CreateInput, Department, Record, UpdateInput};

/// Resource path under the API root.
pub const RESOURCE: &str = "personnel";

/// Network client for the personnel endpoints.
#[derive(Debug, Clone)]
pub struct HttpPersonnelClient {
    client: Client,
    base_url: Url,
}

impl HttpPersonnelClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> ApiResult<Self> {
        Self::with_timeout(&config.api_url, config.request_timeout)
    }

    pub fn with_timeout(api_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(api_url.trim_end_matches('/'))
            .map_err(|e| AppError::transport(format!("Invalid API URL {:?}: {}", api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::transport(format!(
                "API URL {:?} cannot be used as a base",
                api_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Build `{base}/personnel/{segments..}`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::transport("API URL cannot be used as a base"))?;
            path.pop_if_empty().push(RESOURCE);
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("Making {} request to {}", method, url.path());
        self.client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Could not read error body on {}: {}", path, e);
                String::new()
            }
        };
        let message = ApiErrorBody::message_from(&text);
        tracing::warn!("API error {} on {}: {}", status, path, text);

        Err(match status {
            StatusCode::NOT_FOUND => {
                AppError::NotFound(message.unwrap_or_else(|| format!("Not found: {}", path)))
            }
            _ => AppError::Transport {
                status: Some(status.as_u16()),
                message: message.unwrap_or_else(|| fallback_message(status, &text)),
            },
        })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments)?;
        self.json(self.request(Method::GET, url)).await
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!(
            "Server responded with {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("error")
        )
    } else {
        body.to_string()
    }
}

#[async_trait]
impl PersonnelApi for HttpPersonnelClient {
    async fn list_all(&self) -> ApiResult<Vec<Record>> {
        self.get_json(&[]).await
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Record> {
        self.get_json(&[&id.to_string()]).await
    }

    async fn create(&self, input: &CreateInput) -> ApiResult<Record> {
        let url = self.url(&[])?;
        self.json(self.request(Method::POST, url).json(input)).await
    }

    async fn update(&self, id: i64, input: &UpdateInput) -> ApiResult<Record> {
        let url = self.url(&[&id.to_string()])?;
        self.json(self.request(Method::PUT, url).json(input)).await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&[&id.to_string()])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn list_by_department(&self, department: Department) -> ApiResult<Vec<Record>> {
        self.get_json(&["department", department.as_str()]).await
    }

    async fn list_active(&self) -> ApiResult<Vec<Record>> {
        self.get_json(&["active"]).await
    }

    async fn search_by_name(&self, first: &str, last: &str) -> ApiResult<Vec<Record>> {
        let url = self.url(&["search"])?;
        let request = self
            .request(Method::GET, url)
            .query(&[("first", first), ("last", last)]);
        self.json(request).await
    }

    async fn list_departments(&self) -> ApiResult<Vec<String>> {
        self.get_json(&["departments"]).await
    }

    async fn list_positions(&self) -> ApiResult<Vec<String>> {
        self.get_json(&["positions"]).await
    }
}
