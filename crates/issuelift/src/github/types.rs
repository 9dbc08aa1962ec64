//! GitHub API data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single rate limit resource entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResource {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Requests used in current period.
    pub used: usize,
    /// Remaining requests in current period.
    pub remaining: usize,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
}

impl RateLimitResource {
    /// Get the reset time as a DateTime.
    pub fn reset_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.reset as i64, 0).unwrap_or_else(Utc::now)
    }
}

/// The rate limit resources relevant to issue creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRateLimits {
    /// Core REST API limit; issue and comment creation count against it.
    pub core: RateLimitResource,
    #[serde(default)]
    pub search: Option<RateLimitResource>,
    #[serde(default)]
    pub graphql: Option<RateLimitResource>,
}

/// Response of `GET /rate_limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRateLimitResponse {
    pub resources: GitHubRateLimits,
}

/// The fields of a created issue we care about.
///
/// Both are absent for issues "created" by a dry-run client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_resource_reset_at() {
        let resource = RateLimitResource {
            limit: 5000,
            used: 100,
            remaining: 4900,
            reset: 2000000000,
        };

        assert_eq!(resource.reset_at().timestamp(), 2000000000);
    }

    #[test]
    fn test_rate_limit_response_optional_resources() {
        let json = r#"{
            "resources": {
                "core": {"limit": 5000, "used": 100, "remaining": 4900, "reset": 1700000000},
                "graphql": {"limit": 5000, "used": 0, "remaining": 5000, "reset": 1700000000},
                "integration_manifest": {"limit": 5000, "used": 0, "remaining": 5000, "reset": 1700000000}
            },
            "rate": {"limit": 5000, "used": 100, "remaining": 4900, "reset": 1700000000}
        }"#;

        let response: GitHubRateLimitResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.resources.core.remaining, 4900);
        assert!(response.resources.search.is_none());
        assert_eq!(response.resources.graphql.unwrap().limit, 5000);
    }

    #[test]
    fn test_created_issue_from_api_and_empty_body() {
        let created: CreatedIssue = serde_json::from_str(
            r#"{"number": 12, "html_url": "https://github.com/o/r/issues/12", "title": "x"}"#,
        )
        .unwrap();
        assert_eq!(created.number, Some(12));

        let empty: CreatedIssue = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CreatedIssue::default());
    }
}
