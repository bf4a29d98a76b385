//
//  stash-client
//  api/server/restrictions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Branch Restrictions
//!
//! Branch restrictions are managed by the branch-permissions plugin. A
//! restriction limits who may push to a branch; everyone not listed in its
//! users or groups is denied.
//!
//! ```text
//! GET    /rest/branch-permissions/1.0/projects/{projectKey}/repos/{slug}/restricted
//! POST   /rest/branch-permissions/1.0/projects/{projectKey}/repos/{slug}/restricted
//! DELETE /rest/branch-permissions/1.0/projects/{projectKey}/repos/{slug}/restricted/{id}
//! ```
//!
//! Unlike the core API, creating a restriction answers with 200 rather than 201.

use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::branches::Branch;
use super::pullrequests::User;
use crate::api::classify::ResponseSpec;
use crate::api::client::{ApiRequest, StashClient, BRANCH_PERMISSIONS_API};
use crate::api::common::{PagedResponse, Result};

static GET_RESTRICTIONS: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

static CREATE_RESTRICTION: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (
            StatusCode::BAD_REQUEST,
            "The branch restriction was not created due to a validation error.",
        ),
        (
            StatusCode::UNAUTHORIZED,
            "The currently authenticated user has insufficient permissions to create a branch restriction.",
        ),
        (
            StatusCode::NOT_FOUND,
            "The resource was not found. Does the project key, repository, user or branch exist?",
        ),
        (StatusCode::CONFLICT, "A branch restriction with same name already exists."),
    ],
);

static DELETE_RESTRICTION: ResponseSpec = ResponseSpec::new(
    StatusCode::NO_CONTENT,
    &[
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

/// Restriction type that matches a single branch by name.
pub const BRANCH_RESTRICTION_TYPE: &str = "BRANCH";

/// A branch restriction as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchRestriction {
    /// Restriction id, used for deletion.
    pub id: u64,

    /// Matcher type, e.g. `BRANCH` or `PATTERN`.
    #[serde(rename = "type")]
    pub restriction_type: String,

    /// Matched value (branch name or pattern).
    pub value: String,

    /// The restricted branch, when the matcher is a single branch.
    pub branch: Option<Branch>,

    /// Users allowed to push.
    pub users: Vec<User>,

    /// Groups allowed to push.
    pub groups: Vec<String>,
}

/// Body of a branch restriction create request.
///
/// ```rust
/// use stash_client::api::server::BranchPermission;
///
/// let body = BranchPermission::for_user("release", "alice");
/// assert_eq!(
///     serde_json::to_string(&body).unwrap(),
///     r#"{"type":"BRANCH","value":"release","users":["alice"],"groups":[]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchPermission {
    /// Matcher type.
    #[serde(rename = "type")]
    pub restriction_type: String,

    /// Branch name.
    pub value: String,

    /// Users allowed to push.
    pub users: Vec<String>,

    /// Groups allowed to push.
    pub groups: Vec<String>,
}

impl BranchPermission {
    /// Restricts `branch` so that only `user` may push to it.
    pub fn for_user(branch: &str, user: &str) -> Self {
        Self {
            restriction_type: BRANCH_RESTRICTION_TYPE.to_string(),
            value: branch.to_string(),
            users: vec![user.to_string()],
            groups: Vec::new(),
        }
    }
}

impl StashClient {
    fn restrictions_url(&self, project: &str, slug: &str, id: Option<&str>) -> Result<Url> {
        self.endpoint(
            BRANCH_PERMISSIONS_API
                .iter()
                .chain(&["projects", project, "repos", slug, "restricted"])
                .chain(id.as_ref()),
        )
    }

    /// Lists the branch restrictions of a repository.
    pub async fn get_branch_restrictions(&self, project: &str, slug: &str) -> Result<Vec<BranchRestriction>> {
        let url = self.restrictions_url(project, slug, None)?;
        let request = ApiRequest::new("list branch restrictions", Method::GET, url, &GET_RESTRICTIONS);
        let page: PagedResponse<BranchRestriction> = self.execute_json(&request).await?;
        Ok(page.values)
    }

    /// Restricts pushes to `branch` to the given user. Made with a single attempt.
    pub async fn create_branch_restriction(
        &self,
        project: &str,
        slug: &str,
        branch: &str,
        user: &str,
    ) -> Result<BranchRestriction> {
        let url = self.restrictions_url(project, slug, None)?;
        let request = ApiRequest::new("create branch restriction", Method::POST, url, &CREATE_RESTRICTION)
            .json(&BranchPermission::for_user(branch, user))?
            .single_attempt();
        self.execute_json(&request).await
    }

    /// Removes a branch restriction by id. Expects 204.
    pub async fn delete_branch_restriction(&self, project: &str, slug: &str, id: u64) -> Result<()> {
        let id = id.to_string();
        let url = self.restrictions_url(project, slug, Some(&id))?;
        let request = ApiRequest::new("delete branch restriction", Method::DELETE, url, &DELETE_RESTRICTION);
        self.execute(&request).await?;
        Ok(())
    }
}
