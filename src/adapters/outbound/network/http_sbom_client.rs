use crate::ports::outbound::{
    GetSbomForDepGraphRequest, GetSbomForDepGraphResult, SbomClient, SbomSubject,
};
use crate::sbom_retrieval::domain::DepGraphLocator;
use crate::shared::error::SbomError;
use crate::shared::{CallContext, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;

const X_REQUEST_ID: &str = "X-Request-Id";

/// HttpSbomClient adapter for the SBOM service REST API
///
/// Implements the SbomClient port with an async reqwest client:
/// `POST {api_url}/orgs/{org}/projects/{project}/sbom?format={format}`
/// with the dependency graph as the JSON body.
///
/// # Behavior
/// - Identifiers are validated and percent-encoded before any I/O
/// - The whole exchange (send and body read) runs under the call context
/// - Does not retry; wrap it in `RetryingSbomClient` for that
#[derive(Clone)]
pub struct HttpSbomClient {
    client: reqwest::Client,
    api_url: String,
}

impl std::fmt::Debug for HttpSbomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSbomClient")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl HttpSbomClient {
    pub const DEFAULT_API_URL: &'static str = "https://api.example.com/rest";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client for the service rooted at `api_url`
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the SBOM service (http or https)
    /// * `timeout` - Per-request transport timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(SbomError::Validation {
                message: format!("API URL must start with http:// or https://: {}", api_url),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depgraph-sbom/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, locator: &DepGraphLocator, request: &GetSbomForDepGraphRequest) -> String {
        format!(
            "{}/{}?format={}",
            self.api_url,
            locator.sbom_path(),
            urlencoding::encode(request.format.as_str())
        )
    }

    async fn exchange(
        &self,
        ctx: &CallContext,
        locator: &DepGraphLocator,
        request: &GetSbomForDepGraphRequest,
    ) -> Result<GetSbomForDepGraphResult> {
        let url = self.endpoint(locator, request);
        let body = ApiRequest {
            dep_graph: &request.dep_graph,
            subject: request.subject.as_ref(),
        };

        tracing::debug!(
            trace_id = %ctx.trace_id(),
            dep_graph = %locator,
            format = %request.format,
            "requesting SBOM"
        );

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, request.format.media_type())
            .header(X_REQUEST_ID, ctx.trace_id().to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| request.format.media_type().to_string());
        let text = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            tracing::warn!(
                trace_id = %ctx.trace_id(),
                dep_graph = %locator,
                status = status.as_u16(),
                "SBOM service rejected request: {}",
                message
            );
            return Err(SbomError::ServiceError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        if text.trim().is_empty() {
            return Err(SbomError::EmptyDocument {
                org_id: locator.org_id().to_string(),
                project_id: locator.project_id().to_string(),
            }
            .into());
        }

        tracing::debug!(
            trace_id = %ctx.trace_id(),
            bytes = text.len(),
            media_type = %media_type,
            "received SBOM"
        );

        Ok(GetSbomForDepGraphResult::new(text, media_type))
    }
}

#[async_trait]
impl SbomClient for HttpSbomClient {
    async fn get_sbom_for_dep_graph(
        &self,
        ctx: &CallContext,
        org_id: &str,
        project_id: &str,
        request: &GetSbomForDepGraphRequest,
    ) -> Result<GetSbomForDepGraphResult> {
        let locator = DepGraphLocator::new(org_id, project_id)?;
        ctx.run(self.exchange(ctx, &locator, request)).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    dep_graph: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a SbomSubject>,
}

/// Pulls a human-readable message out of a JSON error body.
///
/// Understands `{"error": {"message": ..}}`, `{"message": ..}` and
/// JSON:API style `{"errors": [{"detail": ..}]}`; falls back to the raw
/// text for short non-JSON bodies.
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return (trimmed.len() <= 512).then(|| trimmed.to_string());
    };

    if let Some(message) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(message.to_string());
    }

    if let Some(message) = parsed.get("message").and_then(|message| message.as_str()) {
        return Some(message.to_string());
    }

    parsed
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|error| error.get("detail"))
        .and_then(|detail| detail.as_str())
        .map(ToOwned::to_owned)
}
