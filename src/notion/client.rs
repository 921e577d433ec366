//! HTTP client for the Notion REST API

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::source::ContentSource;
use super::types::{Block, DatabaseInfo, ListResponse, QuerySort, RawRecord};
use crate::config::NotionConfig;
use crate::error::{BlogError, Result};

/// Pause before the single retry of a transient failure
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Error body returned by the Notion API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// A failed attempt, tagged with whether it is worth retrying
struct Failure {
    error: BlogError,
    transient: bool,
}

impl Failure {
    fn permanent(error: BlogError) -> Self {
        Self {
            error,
            transient: false,
        }
    }
}

/// Notion API client
pub struct HttpNotionClient {
    client: Client,
    config: NotionConfig,
}

impl HttpNotionClient {
    /// Create a client; fails when no secret is configured
    pub fn new(config: NotionConfig) -> Result<Self> {
        let secret = config
            .secret
            .as_deref()
            .ok_or_else(|| BlogError::Connection("Notion secret is not set".to_string()))?;

        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", secret))
            .map_err(|_| BlogError::Connection("Notion secret is not a valid header".into()))?;
        headers.insert(header::AUTHORIZATION, auth);
        let version = header::HeaderValue::from_str(&config.api_version)
            .map_err(|_| BlogError::Connection("Invalid Notion API version".into()))?;
        headers.insert("Notion-Version", version);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .user_agent(concat!("notion-blog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BlogError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build an endpoint URL from path segments; each segment is encoded on its own
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.trim().is_empty() || **s == "." || **s == "..")
        {
            return Err(BlogError::NotFound(format!("Invalid Notion ID: {:?}", bad)));
        }

        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| BlogError::Connection(format!("Invalid Notion API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| BlogError::Connection("Notion API URL cannot have a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn endpoint_with_page_size(&self, segments: &[&str], page_size: u32) -> Result<Url> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .append_pair("page_size", &page_size.to_string());
        Ok(url)
    }

    /// Send a request, retrying once on transient failures when enabled
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<T> {
        let attempts = if self.config.retry_transient { 2 } else { 1 };
        let mut attempt = 1;

        loop {
            match self.send_once(method.clone(), url.clone(), body).await {
                Ok(value) => return Ok(value),
                Err(failure) if failure.transient && attempt < attempts => {
                    warn!(
                        path = %url.path(),
                        attempt,
                        "Transient Notion error, retrying: {}",
                        failure.error
                    );
                    attempt += 1;
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> std::result::Result<T, Failure> {
        debug!(method = %method, url = %url, "Notion request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| Failure {
            transient: e.is_timeout() || e.is_connect(),
            error: BlogError::Connection(e.to_string()),
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                Failure::permanent(BlogError::Source(format!(
                    "Invalid response from Notion: {}",
                    e
                )))
            });
        }

        let text = response.text().await.unwrap_or_else(|e| {
            debug!(status = %status, "Failed to read Notion error body: {}", e);
            String::new()
        });
        Err(Failure {
            error: error_from_response(status, &text),
            transient: is_transient(status),
        })
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::INTERNAL_SERVER_ERROR
        || status == StatusCode::BAD_GATEWAY
        || status == StatusCode::SERVICE_UNAVAILABLE
        || status == StatusCode::GATEWAY_TIMEOUT
}

/// Map a non-success response onto an error kind
fn error_from_response(status: StatusCode, body: &str) -> BlogError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(api) if !api.code.is_empty() => {
            let message = if api.message.is_empty() {
                format!("HTTP {}", status)
            } else {
                api.message
            };
            BlogError::from_api_code(&api.code, message)
        }
        _ => match status {
            StatusCode::NOT_FOUND => BlogError::NotFound(format!("HTTP {}", status)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                BlogError::AccessDenied(format!("HTTP {}", status))
            }
            _ => BlogError::Source(format!("HTTP {}", status)),
        },
    }
}

#[async_trait]
impl ContentSource for HttpNotionClient {
    async fn list_users(&self) -> Result<()> {
        let url = self.endpoint_with_page_size(&["users"], 1)?;
        let _: ListResponse<Value> = self.send(Method::GET, url, None).await?;
        Ok(())
    }

    async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseInfo> {
        let url = self.endpoint(&["databases", database_id])?;
        self.send(Method::GET, url, None).await
    }

    async fn query_database(
        &self,
        database_id: &str,
        sort: Option<&QuerySort>,
    ) -> Result<Vec<RawRecord>> {
        let mut body = json!({ "page_size": self.config.page_size });
        if let Some(sort) = sort {
            body["sorts"] = json!([sort]);
        }

        let url = self.endpoint(&["databases", database_id, "query"])?;
        let response: ListResponse<RawRecord> = self.send(Method::POST, url, Some(&body)).await?;
        if response.has_more {
            debug!(database_id = %database_id, "Query has more results; only the first page is used");
        }
        Ok(response.results)
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawRecord> {
        let url = self.endpoint(&["pages", page_id])?;
        self.send(Method::GET, url, None).await
    }

    async fn list_block_children(&self, block_id: &str) -> Result<Vec<Block>> {
        let url =
            self.endpoint_with_page_size(&["blocks", block_id, "children"], self.config.page_size)?;
        let response: ListResponse<Value> = self.send(Method::GET, url, None).await?;
        if response.has_more {
            debug!(block_id = %block_id, "Block list has more results; only the first page is used");
        }

        // Decode each block on its own so one malformed entry only drops itself
        let blocks = response
            .results
            .into_iter()
            .filter_map(|value| {
                let id = value
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>")
                    .to_string();
                match serde_json::from_value::<Block>(value) {
                    Ok(block) => Some(block),
                    Err(e) => {
                        warn!(block_id = %id, "Skipping malformed block: {}", e);
                        None
                    }
                }
            })
            .collect();
        Ok(blocks)
    }
}
