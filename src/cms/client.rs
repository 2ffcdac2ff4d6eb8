//! HTTP client for the hosted content API

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::instrument;

use super::{query_for, CmsError, ContentStore};
use crate::config::CmsConfig;
use crate::content::DocumentKind;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

/// Content store reached over HTTPS
#[derive(Debug, Clone)]
pub struct CmsClient {
    config: CmsConfig,
    http: reqwest::Client,
}

impl CmsClient {
    /// Build a client; fails when no project or dataset is configured
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        if !config.is_configured() {
            return Err(CmsError::NotConfigured);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout.max(1)))
            .build()
            .map_err(|e| CmsError::Request(format!("client build failed: {e}")))?;

        Ok(Self {
            config: config.clone(),
            http,
        })
    }

    /// Reads may go through the CDN; authenticated reads never do
    pub fn query_url(&self) -> String {
        let host = if self.config.use_cdn && self.config.token.is_none() {
            "apicdn"
        } else {
            "api"
        };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.config.project_id,
            host,
            self.config.api_version.trim_start_matches('v'),
            self.config.dataset
        )
    }

    pub fn mutate_url(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v{}/data/mutate/{}",
            self.config.project_id,
            self.config.api_version.trim_start_matches('v'),
            self.config.dataset
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, CmsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CmsError::Status {
            status: status.as_u16(),
            body: truncate_body(&body, status),
        })
    }
}

#[async_trait]
impl ContentStore for CmsClient {
    #[instrument(name = "cms_fetch", skip(self))]
    async fn fetch(&self, kind: DocumentKind) -> Result<Value, CmsError> {
        let request = self
            .http
            .get(self.query_url())
            .query(&[("query", query_for(kind))]);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| CmsError::Request(e.to_string()))?;
        let response = Self::check(response).await?;

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        tracing::debug!("Fetched {} documents", kind);
        Ok(body.result)
    }

    #[instrument(name = "cms_create", skip(self, document))]
    async fn create(&self, document: Value) -> Result<String, CmsError> {
        let request = self
            .http
            .post(self.mutate_url())
            .query(&[("returnIds", "true")])
            .json(&json!({ "mutations": [{ "create": document }] }));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| CmsError::Request(e.to_string()))?;
        let response = Self::check(response).await?;

        let body: MutateResponse = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;

        body.results
            .into_iter()
            .map(|result| result.id)
            .find(|id| !id.is_empty())
            .ok_or_else(|| CmsError::Decode("mutation returned no document id".to_string()))
    }
}

/// Keep error bodies short enough for a log line
fn truncate_body(body: &str, status: StatusCode) -> String {
    const LIMIT: usize = 200;
    let body = body.trim();
    if body.is_empty() {
        return status.canonical_reason().unwrap_or("no body").to_string();
    }
    body.chars().take(LIMIT).collect()
}
