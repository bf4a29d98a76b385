//
//  stash-client
//  api/server/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stash Pull Request API
//!
//! This module provides types and operations for pull requests and their
//! comments. Pull requests are addressed by project key, repository slug and
//! the numeric pull request id, which is unique within the repository.
//!
//! ## API Endpoints
//!
//! ```text
//! GET  .../pull-requests?state&start&limit          (paged)
//! GET  .../pull-requests/{id}
//! POST .../pull-requests                            (create, 201)
//! PUT  .../pull-requests/{id}                       (update, 200)
//! POST .../pull-requests/{id}/decline?version={v}   (200)
//! POST .../pull-requests/{id}/comments              (201)
//! ```
//!
//! All paths are relative to `/rest/api/1.0/projects/{projectKey}/repos/{slug}`.
//!
//! ## Versions
//!
//! Stash uses optimistic locking: updating or declining a pull request requires
//! the `version` the caller last saw. A stale version is answered with 409.
//!
//! ## Request bodies
//!
//! Create and update share [`PullRequestResource`]. Empty fields are left out
//! of the JSON entirely, so an update without a target branch does not touch
//! the pull request's `toRef`.
//!
//! ```rust
//! use stash_client::api::server::{PullRequestResource, RefSpec};
//!
//! let update = PullRequestResource {
//!     version: Some(3),
//!     title: "New title".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"version":3,"title":"New title"}"#);
//!
//! let retarget = PullRequestResource {
//!     to_ref: Some(RefSpec::new("develop", "PROJ", "trunk")),
//!     ..update
//! };
//! assert!(serde_json::to_string(&retarget).unwrap().contains(r#""toRef":{"id":"develop""#));
//! ```

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::repositories::Repository;
use crate::api::classify::ResponseSpec;
use crate::api::client::{ApiRequest, StashClient};
use crate::api::common::Result;
use crate::auth::AuthPolicy;

const PROJECT_NOT_FOUND: &str = "The resource was not found. Does the project key exist?";

static LIST_PULL_REQUESTS: ResponseSpec = ResponseSpec::new(StatusCode::OK, &[(StatusCode::BAD_REQUEST, "Bad request.")]);

static GET_PULL_REQUEST: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::BAD_REQUEST, "Bad request."),
        (
            StatusCode::UNAUTHORIZED,
            "The currently authenticated user has insufficient permissions to see a pull request.",
        ),
        (StatusCode::NOT_FOUND, PROJECT_NOT_FOUND),
    ],
);

static CREATE_PULL_REQUEST: ResponseSpec = ResponseSpec::new(
    StatusCode::CREATED,
    &[
        (
            StatusCode::BAD_REQUEST,
            "The pull-request was not created due to a validation error.",
        ),
        (
            StatusCode::UNAUTHORIZED,
            "The currently authenticated user has insufficient permissions to create a pull-request.",
        ),
        (StatusCode::NOT_FOUND, PROJECT_NOT_FOUND),
        (StatusCode::CONFLICT, "A pull-request with same name already exists."),
    ],
);

static UPDATE_PULL_REQUEST: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (
            StatusCode::BAD_REQUEST,
            "The pull-request was not updated due to a validation error.",
        ),
        (
            StatusCode::UNAUTHORIZED,
            "The currently authenticated user has insufficient permissions to edit a pull-request.",
        ),
        (StatusCode::NOT_FOUND, PROJECT_NOT_FOUND),
        (
            StatusCode::CONFLICT,
            "The pull-request was not updated due to a conflict. Are the `from` and new `to` branches different?",
        ),
    ],
);

static DECLINE_PULL_REQUEST: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::CONFLICT, "Conflict"),
    ],
);

static CREATE_COMMENT: ResponseSpec = ResponseSpec::new(
    StatusCode::CREATED,
    &[
        (
            StatusCode::BAD_REQUEST,
            "The comment was not created due to a validation error.",
        ),
        (
            StatusCode::UNAUTHORIZED,
            "The currently authenticated user has insufficient permissions to create a comment.",
        ),
        (StatusCode::NOT_FOUND, PROJECT_NOT_FOUND),
    ],
);

/// A pull request.
///
/// # Fields
///
/// * `id` - Repository-scoped pull request id
/// * `version` - Optimistic locking version, required to update or decline
/// * `state` - `OPEN`, `DECLINED` or `MERGED`
/// * `from_ref` / `to_ref` - Source and target branches
/// * `created_date` / `updated_date` - Milliseconds since the Unix epoch
///
/// # Notes
///
/// - Every field tolerates being absent from the server response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    /// Pull request id, unique within the repository.
    pub id: u64,

    /// Version used for optimistic locking.
    pub version: u64,

    /// Title of the pull request.
    pub title: String,

    /// Description in Markdown.
    pub description: String,

    /// `OPEN`, `DECLINED` or `MERGED`.
    pub state: String,

    /// Whether the pull request is open.
    pub open: bool,

    /// Whether the pull request is closed.
    pub closed: bool,

    /// Creation time in milliseconds since the epoch.
    #[serde(rename = "createdDate")]
    pub created_date: i64,

    /// Last update time in milliseconds since the epoch.
    #[serde(rename = "updatedDate")]
    pub updated_date: i64,

    /// Source branch.
    #[serde(rename = "fromRef")]
    pub from_ref: PullRequestRef,

    /// Target branch.
    #[serde(rename = "toRef")]
    pub to_ref: PullRequestRef,

    /// Author of the pull request.
    pub author: Option<Participant>,

    /// Requested reviewers.
    pub reviewers: Vec<Participant>,

    /// Other participants (commenters).
    pub participants: Vec<Participant>,
}

/// A branch reference inside a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestRef {
    /// Fully qualified ref name, e.g. `refs/heads/feature/x`.
    pub id: String,

    /// Short branch name.
    #[serde(rename = "displayId")]
    pub display_id: String,

    /// Head commit of the branch.
    #[serde(rename = "latestCommit", alias = "latestChangeset")]
    pub latest_commit: String,

    /// Repository the branch lives in.
    pub repository: Repository,
}

/// A user taking part in a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    /// The user.
    pub user: User,

    /// `AUTHOR`, `REVIEWER` or `PARTICIPANT`.
    pub role: String,

    /// Whether the participant approved the pull request.
    pub approved: bool,

    /// `APPROVED`, `UNAPPROVED` or `NEEDS_WORK` on servers that report it.
    pub status: Option<String>,
}

/// A Stash user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Numeric user id.
    pub id: u64,

    /// Login name.
    pub name: String,

    /// Name shown in the UI.
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// E-mail address.
    #[serde(rename = "emailAddress")]
    pub email_address: String,

    /// URL-safe user slug.
    pub slug: String,

    /// Whether the account is active.
    pub active: bool,
}

/// A comment on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// Comment id.
    pub id: u64,

    /// Version used for optimistic locking.
    pub version: u64,

    /// Comment text in Markdown.
    pub text: String,

    /// Author of the comment.
    pub author: Option<User>,

    /// Creation time in milliseconds since the epoch.
    #[serde(rename = "createdDate")]
    pub created_date: i64,

    /// Last update time in milliseconds since the epoch.
    #[serde(rename = "updatedDate")]
    pub updated_date: i64,
}

/// Body of a pull request create or update request.
///
/// Empty fields are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PullRequestResource {
    /// Version being updated. Absent on create.
    ///
    /// `Some(0)` is sent as `"version":0`: a pull request that was never
    /// updated is at version 0, and the server rejects an update without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// Title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Source branch.
    #[serde(rename = "fromRef", skip_serializing_if = "Option::is_none")]
    pub from_ref: Option<RefSpec>,

    /// Target branch.
    #[serde(rename = "toRef", skip_serializing_if = "Option::is_none")]
    pub to_ref: Option<RefSpec>,

    /// Reviewers by user name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<Reviewer>,
}

/// A branch in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefSpec {
    /// Branch name or fully qualified ref.
    pub id: String,

    /// Repository containing the branch.
    pub repository: RepositorySpec,
}

impl RefSpec {
    /// A branch of the repository `project/slug`.
    pub fn new(branch: &str, project: &str, slug: &str) -> Self {
        Self {
            id: branch.to_string(),
            repository: RepositorySpec {
                slug: slug.to_string(),
                name: String::new(),
                project: ProjectSpec {
                    key: project.to_string(),
                },
            },
        }
    }
}

/// A repository in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositorySpec {
    /// Repository slug.
    pub slug: String,

    /// Repository name, omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Project containing the repository.
    pub project: ProjectSpec,
}

/// A project in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectSpec {
    /// Project key.
    pub key: String,
}

/// A reviewer in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reviewer {
    /// The reviewer.
    pub user: UserName,
}

/// A user reference by login name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserName {
    /// Login name.
    pub name: String,
}

/// Body of a comment create request.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResource<'a> {
    /// Comment text.
    pub text: &'a str,
}

fn reviewers(names: &[String]) -> Vec<Reviewer> {
    names
        .iter()
        .map(|name| Reviewer {
            user: UserName { name: name.clone() },
        })
        .collect()
}

impl StashClient {
    /// Lists the pull requests of a repository in the given state, in server order.
    ///
    /// `state` is one of `OPEN`, `DECLINED`, `MERGED` or `ALL`.
    pub async fn get_pull_requests(&self, project: &str, slug: &str, state: &str) -> Result<Vec<PullRequest>> {
        let mut url = self.repo_url(project, slug, &["pull-requests"])?;
        url.query_pairs_mut().append_pair("state", state);
        self.get_paged(
            "list pull requests",
            url,
            AuthPolicy::Required,
            &LIST_PULL_REQUESTS,
            Vec::new(),
            |acc: &mut Vec<PullRequest>, page: Vec<PullRequest>| acc.extend(page),
        )
        .await
    }

    /// Fetches one pull request.
    pub async fn get_pull_request(&self, project: &str, slug: &str, id: u64) -> Result<PullRequest> {
        let id = id.to_string();
        let url = self.repo_url(project, slug, &["pull-requests", id.as_str()])?;
        let request = ApiRequest::new("get pull request", Method::GET, url, &GET_PULL_REQUEST).auth(AuthPolicy::IfPresent);
        self.execute_json(&request).await
    }

    /// Opens a pull request from `from` into `to` within the same repository.
    ///
    /// Made with a single attempt.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_pull_request(
        &self,
        project: &str,
        slug: &str,
        title: &str,
        description: &str,
        from: &str,
        to: &str,
        reviewer_names: &[String],
    ) -> Result<PullRequest> {
        let body = PullRequestResource {
            version: None,
            title: title.to_string(),
            description: description.to_string(),
            from_ref: Some(RefSpec::new(from, project, slug)),
            to_ref: Some(RefSpec::new(to, project, slug)),
            reviewers: reviewers(reviewer_names),
        };

        let url = self.repo_url(project, slug, &["pull-requests"])?;
        let request = ApiRequest::new("create pull request", Method::POST, url, &CREATE_PULL_REQUEST)
            .json(&body)?
            .single_attempt();
        self.execute_json(&request).await
    }

    /// Updates title, description, target branch and reviewers.
    ///
    /// An empty `to` leaves the target branch unchanged. Made with a single
    /// attempt.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_pull_request(
        &self,
        project: &str,
        slug: &str,
        id: u64,
        version: u64,
        title: &str,
        description: &str,
        to: &str,
        reviewer_names: &[String],
    ) -> Result<PullRequest> {
        let body = PullRequestResource {
            version: Some(version),
            title: title.to_string(),
            description: description.to_string(),
            from_ref: None,
            to_ref: (!to.is_empty()).then(|| RefSpec::new(to, project, slug)),
            reviewers: reviewers(reviewer_names),
        };

        let id = id.to_string();
        let url = self.repo_url(project, slug, &["pull-requests", id.as_str()])?;
        let request = ApiRequest::new("update pull request", Method::PUT, url, &UPDATE_PULL_REQUEST)
            .json(&body)?
            .single_attempt();
        self.execute_json(&request).await
    }

    /// Declines a pull request at the given version.
    pub async fn decline_pull_request(&self, project: &str, slug: &str, id: u64, version: u64) -> Result<()> {
        let id = id.to_string();
        let mut url = self.repo_url(project, slug, &["pull-requests", id.as_str(), "decline"])?;
        url.query_pairs_mut().append_pair("version", &version.to_string());
        let request = ApiRequest::new("decline pull request", Method::POST, url, &DECLINE_PULL_REQUEST);
        self.execute(&request).await?;
        Ok(())
    }

    /// Adds a comment to a pull request. Made with a single attempt.
    pub async fn create_comment(&self, project: &str, slug: &str, pull_request: u64, text: &str) -> Result<Comment> {
        let id = pull_request.to_string();
        let url = self.repo_url(project, slug, &["pull-requests", id.as_str(), "comments"])?;
        let request = ApiRequest::new("create comment", Method::POST, url, &CREATE_COMMENT)
            .json(&CommentResource { text })?
            .single_attempt();
        self.execute_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::retry::RetryPolicy;

    #[test]
    fn test_update_body_keeps_version_zero() {
        let update = PullRequestResource {
            version: Some(0),
            title: "t".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"version":0,"title":"t"}"#);

        let create = PullRequestResource {
            title: "t".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&create).unwrap(), r#"{"title":"t"}"#);
    }
    use mockito::Matcher;
    use std::time::Duration;

    const PULL_REQUEST: &str = r#"{
        "id": 2,
        "version": 0,
        "title": "a title",
        "description": "a description",
        "state": "OPEN",
        "open": true,
        "closed": false,
        "createdDate": 1435759062673,
        "updatedDate": 1435759062673,
        "fromRef": {
            "id": "refs/heads/feature/file1",
            "displayId": "feature/file1",
            "latestChangeset": "aead30bdfe27e176316bb2e2aedd530052730092",
            "repository": {"slug": "test-repo", "id": 1419, "name": "test-repo", "project": {"key": "PLAT", "id": 349}}
        },
        "toRef": {
            "id": "refs/heads/develop",
            "displayId": "develop",
            "latestChangeset": "3558d035edf10cb54e316374b9e8403a686995ac",
            "repository": {"slug": "test-repo", "id": 1419, "name": "test-repo", "project": {"key": "PLAT", "id": 349}}
        },
        "author": {
            "user": {"name": "mike", "emailAddress": "mike@myemail.com", "id": 877, "displayName": "Mike", "active": true, "slug": "mike"},
            "role": "AUTHOR",
            "approved": false
        },
        "reviewers": [
            {"user": {"name": "bob", "displayName": "Bob", "id": 871}, "role": "REVIEWER", "approved": false},
            {"user": {"name": "bill", "displayName": "Bill", "id": 872}, "role": "REVIEWER", "approved": true}
        ],
        "participants": []
    }"#;

    fn client(server: &mockito::Server) -> StashClient {
        StashClient::builder(&server.url())
            .credentials("u", "p")
            .retry(RetryPolicy::default().with_delays(Duration::ZERO, Duration::ZERO))
            .build()
            .unwrap()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_pull_request_sends_exact_body() {
        let expected = r#"{"title":"a title","description":"a description","fromRef":{"id":"feature/file1","repository":{"slug":"bar","project":{"key":"proj"}}},"toRef":{"id":"develop","repository":{"slug":"bar","project":{"key":"proj"}}},"reviewers":[{"user":{"name":"bob"}},{"user":{"name":"bill"}}]}"#;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/1.0/projects/proj/repos/bar/pull-requests")
            .match_header("accept", "application/json")
            .match_header("authorization", "Basic dTpw")
            .match_body(Matcher::Exact(expected.to_string()))
            .with_status(201)
            .with_body(PULL_REQUEST)
            .create_async()
            .await;

        let pr = client(&server)
            .create_pull_request(
                "proj",
                "bar",
                "a title",
                "a description",
                "feature/file1",
                "develop",
                &names(&["bob", "bill"]),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(pr.id, 2);
        assert_eq!(pr.title, "a title");
        assert_eq!(pr.description, "a description");
        assert!(pr.open);
        assert_eq!(pr.state, "OPEN");
        assert_eq!(pr.from_ref.display_id, "feature/file1");
        assert_eq!(pr.from_ref.latest_commit, "aead30bdfe27e176316bb2e2aedd530052730092");
        assert_eq!(pr.to_ref.display_id, "develop");
        assert_eq!(pr.author.as_ref().map(|a| a.user.name.as_str()), Some("mike"));
        assert_eq!(pr.reviewers.len(), 2);
        assert!(pr.reviewers[1].approved);
    }

    #[tokio::test]
    async fn test_update_pull_request_with_target() {
        let expected = r#"{"version":100,"title":"a title","description":"a description","toRef":{"id":"develop","repository":{"slug":"bar","project":{"key":"proj"}}},"reviewers":[{"user":{"name":"bob"}},{"user":{"name":"bill"}}]}"#;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/rest/api/1.0/projects/proj/repos/bar/pull-requests/1")
            .match_header("accept", "application/json")
            .match_header("authorization", "Basic dTpw")
            .match_body(Matcher::Exact(expected.to_string()))
            .with_status(200)
            .with_body(r#"{"id": 1, "version": 101, "title": "a title", "state": "OPEN"}"#)
            .create_async()
            .await;

        let pr = client(&server)
            .update_pull_request("proj", "bar", 1, 100, "a title", "a description", "develop", &names(&["bob", "bill"]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(pr.version, 101);
    }

    #[tokio::test]
    async fn test_update_pull_request_without_target_omits_to_ref() {
        let expected = r#"{"version":7,"title":"retitled"}"#;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/rest/api/1.0/projects/proj/repos/bar/pull-requests/1")
            .match_body(Matcher::Exact(expected.to_string()))
            .with_status(200)
            .with_body(r#"{"id": 1, "version": 8}"#)
            .create_async()
            .await;

        client(&server)
            .update_pull_request("proj", "bar", 1, 7, "retitled", "", "", &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_pull_request_conflict_is_single_attempt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/rest/api/1.0/projects/proj/repos/bar/pull-requests/1")
            .with_status(409)
            .expect(1)
            .create_async()
            .await;

        let err = client(&server)
            .update_pull_request("proj", "bar", 1, 7, "t", "", "main", &[])
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.status_code(), Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_decline_pull_request() {
        for (status, ok) in [(200, true), (404, false), (409, false)] {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/rest/api/1.0/projects/proj/repos/bar/pull-requests/777/decline")
                .match_query(Matcher::UrlEncoded("version".into(), "1".into()))
                .match_header("x-atlassian-token", "no-check")
                .match_header("authorization", "Basic dTpw")
                .with_status(status)
                .create_async()
                .await;

            let result = client(&server).decline_pull_request("proj", "bar", 777, 1).await;

            mock.assert_async().await;
            assert_eq!(result.is_ok(), ok, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_get_pull_requests_keeps_server_order() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/pull-requests")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "OPEN".into()),
                Matcher::UrlEncoded("start".into(), "0".into()),
                Matcher::UrlEncoded("limit".into(), "25".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"isLastPage":false,"nextPageStart":2,"values":[{"id":9},{"id":4}]}"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/pull-requests")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "OPEN".into()),
                Matcher::UrlEncoded("start".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"isLastPage":true,"values":[{"id":7}]}"#)
            .create_async()
            .await;

        let prs = client(&server)
            .get_pull_requests("PROJ", "trunk", "OPEN")
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(prs.iter().map(|pr| pr.id).collect::<Vec<_>>(), vec![9, 4, 7]);
    }

    #[tokio::test]
    async fn test_get_pull_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/1.0/projects/PLAT/repos/test-repo/pull-requests/2")
            .match_header("authorization", "Basic dTpw")
            .with_status(200)
            .with_body(PULL_REQUEST)
            .create_async()
            .await;

        let pr = client(&server)
            .get_pull_request("PLAT", "test-repo", 2)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(pr.created_date, 1435759062673);
        assert_eq!(pr.to_ref.repository.project.key, "PLAT");
    }

    #[tokio::test]
    async fn test_create_comment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/1.0/projects/PROJ/repos/trunk/pull-requests/5/comments")
            .match_header("x-atlassian-token", "no-check")
            .match_body(Matcher::Exact(r#"{"text":"LGTM"}"#.to_string()))
            .with_status(201)
            .with_body(r#"{"id": 42, "version": 0, "text": "LGTM", "author": {"name": "u"}}"#)
            .create_async()
            .await;

        let comment = client(&server)
            .create_comment("PROJ", "trunk", 5, "LGTM")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(comment.id, 42);
        assert_eq!(comment.author.map(|a| a.name), Some("u".to_string()));
    }
}
