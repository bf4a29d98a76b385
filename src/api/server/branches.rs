//
//  stash-client
//  api/server/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stash Branch API
//!
//! Listing goes through the core REST API; deletion goes through the
//! branch-utils plugin, which takes the fully qualified ref name in a JSON body
//! on a `DELETE` request.
//!
//! ```text
//! GET    /rest/api/1.0/projects/{projectKey}/repos/{slug}/branches?start&limit
//! DELETE /rest/branch-utils/1.0/projects/{projectKey}/repos/{slug}/branches
//!        {"name": "refs/heads/{branch}", "dryRun": false}
//! ```

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::classify::ResponseSpec;
use crate::api::client::{ApiRequest, StashClient, BRANCH_UTILS_API};
use crate::api::common::Result;
use crate::auth::AuthPolicy;

static LIST_BRANCHES: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

static DELETE_BRANCH: ResponseSpec = ResponseSpec::new(
    StatusCode::NO_CONTENT,
    &[
        (StatusCode::BAD_REQUEST, "Bad Request"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

/// A branch of a repository.
///
/// # Example
///
/// ```rust
/// use stash_client::api::server::Branch;
///
/// let branch: Branch = serde_json::from_str(
///     r#"{"id": "refs/heads/master", "displayId": "master", "latestChangeset": "8d51122", "isDefault": true}"#,
/// ).unwrap();
/// assert_eq!(branch.display_id, "master");
/// assert!(branch.is_default);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    /// Fully qualified ref name, e.g. `refs/heads/master`.
    pub id: String,

    /// Short name, e.g. `master`. Used as the key of branch maps.
    #[serde(rename = "displayId")]
    pub display_id: String,

    /// Hash of the commit the branch points at.
    #[serde(rename = "latestChangeset")]
    pub latest_changeset: String,

    /// Whether this is the repository's default branch.
    #[serde(rename = "isDefault")]
    pub is_default: bool,
}

/// Body of a branch deletion request.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteBranchRequest {
    /// Fully qualified ref name.
    pub name: String,

    /// Validate only, without deleting.
    #[serde(rename = "dryRun")]
    pub dry_run: bool,
}

impl DeleteBranchRequest {
    /// Deletion of `refs/heads/{branch}`.
    pub fn for_branch(branch: &str) -> Self {
        Self {
            name: format!("refs/heads/{}", branch),
            dry_run: false,
        }
    }
}

impl StashClient {
    /// Lists the branches of a repository, keyed by display id.
    pub async fn get_branches(&self, project: &str, slug: &str) -> Result<HashMap<String, Branch>> {
        let url = self.repo_url(project, slug, &["branches"])?;
        self.get_paged(
            "list branches",
            url,
            AuthPolicy::Required,
            &LIST_BRANCHES,
            HashMap::new(),
            |acc: &mut HashMap<String, Branch>, page: Vec<Branch>| {
                acc.extend(page.into_iter().map(|branch| (branch.display_id.clone(), branch)));
            },
        )
        .await
    }

    /// Deletes a branch. Expects 204.
    pub async fn delete_branch(&self, project: &str, slug: &str, branch: &str) -> Result<()> {
        let url = self.endpoint(
            BRANCH_UTILS_API
                .iter()
                .chain(&["projects", project, "repos", slug, "branches"]),
        )?;
        let request = ApiRequest::new("delete branch", Method::DELETE, url, &DELETE_BRANCH)
            .json(&DeleteBranchRequest::for_branch(branch))?;
        self.execute(&request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::retry::RetryPolicy;
    use mockito::Matcher;
    use std::time::Duration;

    fn client(server: &mockito::Server) -> StashClient {
        StashClient::builder(&server.url())
            .credentials("u", "p")
            .retry(RetryPolicy::default().with_delays(Duration::ZERO, Duration::ZERO))
            .build()
            .unwrap()
    }

    fn page_query(start: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("start".into(), start.into()),
            Matcher::UrlEncoded("limit".into(), "25".into()),
        ])
    }

    #[tokio::test]
    async fn test_get_branches_across_pages() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/branches")
            .match_query(page_query("0"))
            .match_header("authorization", "Basic dTpw")
            .with_status(200)
            .with_body(
                r#"{"size":2,"limit":25,"isLastPage":false,"start":0,"nextPageStart":25,"values":[
                    {"id":"refs/heads/master","displayId":"master","latestChangeset":"aaa","isDefault":true},
                    {"id":"refs/heads/develop","displayId":"develop","latestChangeset":"bbb","isDefault":false}
                ]}"#,
            )
            .create_async()
            .await;
        let second = server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/branches")
            .match_query(page_query("25"))
            .with_status(200)
            .with_body(
                r#"{"size":1,"limit":25,"isLastPage":true,"start":25,"values":[
                    {"id":"refs/heads/feature/x","displayId":"feature/x","latestChangeset":"ccc","isDefault":false}
                ]}"#,
            )
            .create_async()
            .await;

        let branches = client(&server).get_branches("PROJ", "trunk").await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(branches.len(), 3);
        assert!(branches["master"].is_default);
        assert_eq!(branches["develop"].latest_changeset, "bbb");
        assert_eq!(branches["feature/x"].id, "refs/heads/feature/x");
    }

    #[tokio::test]
    async fn test_get_branches_failure_on_second_page_returns_no_partial_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/branches")
            .match_query(page_query("0"))
            .with_status(200)
            .with_body(r#"{"isLastPage":false,"nextPageStart":25,"values":[{"displayId":"master"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/branches")
            .match_query(page_query("25"))
            .with_status(401)
            .create_async()
            .await;

        let err = client(&server).get_branches("PROJ", "trunk").await.unwrap_err();
        assert_eq!(err.status_code(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.to_string().starts_with("Unauthorized"));
    }

    #[tokio::test]
    async fn test_delete_branch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/rest/branch-utils/1.0/projects/PROJ/repos/trunk/branches")
            .match_header("x-atlassian-token", "no-check")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Exact(
                r#"{"name":"refs/heads/feature/x","dryRun":false}"#.to_string(),
            ))
            .with_status(204)
            .create_async()
            .await;

        client(&server)
            .delete_branch("PROJ", "trunk", "feature/x")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_branch_rejects_other_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/rest/branch-utils/1.0/projects/PROJ/repos/trunk/branches")
            .with_status(200)
            .create_async()
            .await;

        let err = client(&server)
            .delete_branch("PROJ", "trunk", "develop")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(StatusCode::OK));
    }
}
