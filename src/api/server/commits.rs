//
//  stash-client
//  api/server/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Stash commit lookups.
//!
//! ```text
//! GET /rest/api/1.0/projects/{projectKey}/repos/{slug}/commits/{hash}
//! GET /rest/api/1.0/projects/{projectKey}/repos/{slug}/commits?since&until&limit=1000
//! ```
//!
//! The range query is a single request with a page size of
//! [`COMMIT_PAGE_LIMIT`]; ranges larger than that are truncated by the server.

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::classify::ResponseSpec;
use crate::api::client::{ApiRequest, StashClient};
use crate::api::common::{PagedResponse, Result, COMMIT_PAGE_LIMIT};
use crate::auth::AuthPolicy;

static GET_COMMITS: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::BAD_REQUEST, "Bad Request"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
        (StatusCode::NOT_FOUND, "Not found"),
    ],
);

/// Commit attribute key carrying linked JIRA issues.
pub const JIRA_KEY_ATTRIBUTE: &str = "jira-key";

/// A commit.
///
/// # Example
///
/// ```rust
/// use stash_client::api::server::Commit;
///
/// let commit: Commit = serde_json::from_str(r#"{
///     "id": "6782bf94782450a4e6a0d548e4c803692ca38b94",
///     "displayId": "6782bf9",
///     "authorTimestamp": 1459802103000,
///     "attributes": {"jira-key": ["PROJ-12"]}
/// }"#).unwrap();
///
/// assert_eq!(commit.display_id, "6782bf9");
/// assert_eq!(commit.jira_keys(), ["PROJ-12"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    /// Full commit hash.
    pub id: String,

    /// Abbreviated hash.
    #[serde(rename = "displayId")]
    pub display_id: String,

    /// Commit author.
    pub author: CommitAuthor,

    /// Author time in milliseconds since the Unix epoch.
    #[serde(rename = "authorTimestamp")]
    pub author_timestamp: i64,

    /// Full commit message.
    pub message: String,

    /// Parent commits.
    pub parents: Vec<CommitRef>,

    /// Server-side attributes, e.g. `jira-key`. Values are kept as sent;
    /// plugins may attach attributes of any shape.
    pub attributes: HashMap<String, Value>,
}

impl Commit {
    /// JIRA issue keys linked to the commit.
    ///
    /// A single string value counts as one key; anything else is ignored.
    pub fn jira_keys(&self) -> Vec<&str> {
        match self.attributes.get(JIRA_KEY_ATTRIBUTE) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(key)) => vec![key.as_str()],
            _ => Vec::new(),
        }
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Author of a commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    /// Name, as recorded in the commit.
    pub name: String,

    /// E-mail address, as recorded in the commit.
    #[serde(rename = "emailAddress")]
    pub email_address: String,

    /// Display name of the matching Stash user, if any.
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// A reference to another commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitRef {
    /// Full commit hash.
    pub id: String,

    /// Abbreviated hash.
    #[serde(rename = "displayId")]
    pub display_id: String,
}

impl StashClient {
    /// Fetches one commit by hash.
    pub async fn get_commit(&self, project: &str, slug: &str, hash: &str) -> Result<Commit> {
        let url = self.repo_url(project, slug, &["commits", hash])?;
        let request = ApiRequest::new("get commit", Method::GET, url, &GET_COMMITS).auth(AuthPolicy::IfPresent);
        self.execute_json(&request).await
    }

    /// Lists the commits reachable from `until` but not from `since`, newest first.
    pub async fn get_commits(&self, project: &str, slug: &str, since: &str, until: &str) -> Result<Vec<Commit>> {
        let mut url = self.repo_url(project, slug, &["commits"])?;
        url.query_pairs_mut()
            .append_pair("since", since)
            .append_pair("until", until)
            .append_pair("limit", &COMMIT_PAGE_LIMIT.to_string());

        let request = ApiRequest::new("list commits", Method::GET, url, &GET_COMMITS).auth(AuthPolicy::IfPresent);
        let page: PagedResponse<Commit> = self.execute_json(&request).await?;
        if page.has_next() && page.next_start().is_some() {
            tracing::debug!(
                "Commit range {}..{} has more than {} commits; the rest is not fetched",
                since,
                until,
                COMMIT_PAGE_LIMIT
            );
        }
        Ok(page.values)
    }
}
