use std::future::Future;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{QueryParams, ResponseSource, SourceError};
use crate::config::SourceConfig;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Screendoor responses API.
///
/// Pages are fetched sequentially until the API returns a short page or `max_count`
/// responses have been collected.
pub struct ScreendoorClient {
    http: Client,
    host: String,
    api_key: String,
    api_version: String,
}

impl ScreendoorClient {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn responses_url(&self, project_id: &str) -> String {
        format!("{}/api/projects/{}/responses", self.host, project_id)
    }

    fn query_pairs(&self, params: &QueryParams, page: usize) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("api_key", self.api_key.clone()),
            ("v", self.api_version.clone()),
            ("per_page", params.per_page.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(label) = &params.label {
            pairs.push(("label", label.clone()));
        }
        if let Some(filter) = &params.advanced_search {
            pairs.push(("advanced_search", filter.clone()));
        }
        pairs
    }

    async fn fetch_page(
        &self,
        url: &str,
        params: &QueryParams,
        page: usize,
    ) -> Result<Value, SourceError> {
        let response = self
            .http
            .get(url)
            .query(&self.query_pairs(params, page))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let payload = serde_json::from_str(&body).unwrap_or(Value::String(body));

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                payload,
            });
        }
        Ok(payload)
    }
}

impl std::fmt::Debug for ScreendoorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreendoorClient")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl ResponseSource for ScreendoorClient {
    fn get_project_responses(
        &self,
        project_id: &str,
        params: &QueryParams,
        max_count: usize,
    ) -> impl Future<Output = Result<Value, SourceError>> + Send {
        async move {
            let url = self.responses_url(project_id);
            let per_page = params.per_page.max(1);
            let mut page = params.page.max(1);
            let mut collected: Vec<Value> = Vec::new();

            loop {
                let payload = self.fetch_page(&url, params, page).await?;
                let Value::Array(items) = payload else {
                    return Ok(payload);
                };

                let received = items.len();
                collected.extend(items);
                debug!(page, received, total = collected.len(), "fetched response page");

                if received < per_page || collected.len() >= max_count {
                    break;
                }
                page += 1;
            }

            collected.truncate(max_count);
            Ok(Value::Array(collected))
        }
    }
}
