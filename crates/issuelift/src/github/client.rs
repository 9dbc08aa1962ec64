//! GitHub API client for issue and comment creation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{CreatedIssue, GitHubRateLimitResponse, RateLimitResource};
use crate::convert::{TargetComment, TargetIssue};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::tracker::IssueTracker;

/// Public GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Value of the `X-GitHub-Api-Version` header sent with every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

const USER_AGENT: &str = "issuelift";

/// Per-request timeout of the default transport.
const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// GitHub API client.
///
/// All requests carry bearer authentication and the pinned API version. In
/// dry-run mode requests are fully built and validated, traced, and then
/// answered locally with the expected status and an empty JSON object.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    token: String,
    dry_run: bool,
    debug: bool,
    requests: Arc<AtomicUsize>,
}

impl GitHubClient {
    /// Create a client for api.github.com backed by reqwest.
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        Self::with_api_url(GITHUB_API_URL, token)
    }

    /// Create a client for another endpoint, e.g. GitHub Enterprise.
    pub fn with_api_url(api_url: &str, token: &str) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(DEFAULT_TIMEOUT)?;
        Self::new_with_transport(api_url, token, Arc::new(transport))
    }

    pub fn new_with_transport(
        api_url: &str,
        token: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, GitHubError> {
        if token.trim().is_empty() {
            return Err(GitHubError::AuthRequired);
        }
        Ok(Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            dry_run: false,
            debug: false,
            requests: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Suppress network calls while still building every request.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Trace request and response details at debug level.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<HttpRequest, GitHubError> {
        let body = match body {
            Some(payload) => serde_json::to_vec(payload)?,
            None => Vec::new(),
        };

        let mut headers = vec![
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
            (
                "X-GitHub-Api-Version".to_string(),
                GITHUB_API_VERSION.to_string(),
            ),
        ];
        if !body.is_empty() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            url: format!("{}/{}", self.api_url, path.trim_start_matches('/')),
            headers,
            body,
        })
    }

    /// Send a request and require `expected_status`, returning the body.
    async fn execute(
        &self,
        request: HttpRequest,
        expected_status: u16,
    ) -> Result<Vec<u8>, GitHubError> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        if self.dry_run {
            tracing::info!(
                method = %request.method,
                url = %request.url,
                body = %String::from_utf8_lossy(&request.body),
                "[dry-run] request suppressed"
            );
            return Ok(b"{}".to_vec());
        }

        if self.debug {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                body = %String::from_utf8_lossy(&request.body),
                "[http] request"
            );
        }

        let response: HttpResponse = self.transport.send(request).await?;

        if self.debug {
            tracing::debug!(status = response.status, "[http] response");
        }

        if response.status != expected_status {
            let body = String::from_utf8_lossy(&response.body).to_string();
            if self.debug {
                tracing::debug!(body = %body, "[http] response body");
            }
            return Err(GitHubError::UnexpectedStatus {
                status: response.status,
                expected: expected_status,
                body,
            });
        }

        Ok(response.body)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GitHubError> {
        let request = self.build_request(HttpMethod::Post, path, Some(body))?;
        let response = self.execute(request, 201).await?;
        Ok(serde_json::from_slice(&response)?)
    }
}

/// Check that `repo` looks like `owner/name`.
pub fn validate_repo(repo: &str) -> Result<(), GitHubError> {
    match repo.split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok(())
        }
        _ => Err(GitHubError::InvalidRepo(repo.to_string())),
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn create_issue(
        &self,
        repo: &str,
        issue: &TargetIssue,
    ) -> Result<CreatedIssue, GitHubError> {
        validate_repo(repo)?;
        self.post(&format!("/repos/{repo}/issues"), issue).await
    }

    async fn create_comment(
        &self,
        repo: &str,
        number: u64,
        comment: &TargetComment,
    ) -> Result<(), GitHubError> {
        validate_repo(repo)?;
        let _: serde_json::Value = self
            .post(&format!("/repos/{repo}/issues/{number}/comments"), comment)
            .await?;
        Ok(())
    }

    async fn rate_limit(&self) -> Result<RateLimitResource, GitHubError> {
        if self.dry_run {
            return Err(GitHubError::DryRun("rate limit query"));
        }
        let request = self.build_request(HttpMethod::Get, "/rate_limit", None::<&()>)?;
        let body = self.execute(request, 200).await?;
        let response: GitHubRateLimitResponse = serde_json::from_slice(&body)?;
        Ok(response.resources.core)
    }

    fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

/// Fetch every rate limit resource, for display.
pub async fn get_rate_limits(client: &GitHubClient) -> Result<GitHubRateLimitResponse, GitHubError> {
    if client.dry_run {
        return Err(GitHubError::DryRun("rate limit query"));
    }
    let request = client.build_request(HttpMethod::Get, "/rate_limit", None::<&()>)?;
    let body = client.execute(request, 200).await?;
    Ok(serde_json::from_slice(&body)?)
}
