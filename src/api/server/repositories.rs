//
//  stash-client
//  api/server/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stash Repository API
//!
//! This module provides the repository records and the operations to list,
//! read and create repositories. Repositories always belong to a project and
//! are addressed by project key and slug.
//!
//! ## API Endpoints
//!
//! ```text
//! GET  /rest/api/1.0/repos?start&limit                     (paged, every visible repository)
//! GET  /rest/api/1.0/projects/{projectKey}/repos/{slug}
//! POST /rest/api/1.0/projects/{projectKey}/repos           {"name": ..., "scmId": "git"}
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use stash_client::api::StashClient;
//! use stash_client::api::server::has_repository;
//!
//! # async fn example() -> stash_client::api::Result<()> {
//! let client = StashClient::new("https://stash.example.com", "alice", "secret")?;
//! let repositories = client.get_repositories().await?;
//!
//! if let Some(repo) = has_repository(&repositories, "ssh://git@stash.example.com:7999/proj/trunk.git") {
//!     println!("Found {} in {}", repo.slug, repo.project.key);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::classify::ResponseSpec;
use crate::api::client::{ApiRequest, StashClient};
use crate::api::common::Result;
use crate::auth::AuthPolicy;

static LIST_REPOSITORIES: ResponseSpec = ResponseSpec::new(StatusCode::OK, &[(StatusCode::BAD_REQUEST, "Bad request.")]);

static GET_REPOSITORY: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

static CREATE_REPOSITORY: ResponseSpec = ResponseSpec::new(
    StatusCode::CREATED,
    &[
        (
            StatusCode::BAD_REQUEST,
            "The repository was not created due to a validation error.",
        ),
        (
            StatusCode::UNAUTHORIZED,
            "The currently authenticated user has insufficient permissions to create a repository.",
        ),
        (
            StatusCode::NOT_FOUND,
            "The resource was not found. Does the project key exist?",
        ),
        (StatusCode::CONFLICT, "A repository with same name already exists."),
    ],
);

/// A repository on a Stash server.
///
/// # Fields
///
/// * `id` - Unique numeric identifier for the repository
/// * `slug` - URL-safe identifier used in API paths and clone URLs
/// * `name` - Human-readable display name
/// * `project` - Reference to the parent project
/// * `scm_id` - Source control management type (typically "git")
/// * `state` - Current state (e.g., "AVAILABLE", "INITIALISING")
/// * `links` - Clone and web UI links
///
/// # Example
///
/// ```rust
/// use stash_client::api::server::Repository;
///
/// let json = r#"{
///     "id": 536,
///     "slug": "trunk",
///     "name": "trunk",
///     "project": {"key": "PROJ"},
///     "links": {"clone": [{"href": "ssh://git@example.com:9999/PROJ/trunk.git", "name": "ssh"}]}
/// }"#;
///
/// let repo: Repository = serde_json::from_str(json).unwrap();
/// assert_eq!(repo.ssh_url(), "ssh://git@example.com:9999/PROJ/trunk.git");
/// ```
///
/// # Notes
///
/// - Every field tolerates being absent from the server response
/// - The `slug` is derived from the name but may differ (lowercase, hyphenated)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Unique numeric identifier assigned by the server.
    pub id: u64,

    /// URL-safe identifier used in API endpoints and clone URLs.
    pub slug: String,

    /// Human-readable display name of the repository.
    pub name: String,

    /// Optional description of the repository.
    pub description: Option<String>,

    /// The project that contains this repository.
    pub project: ProjectRef,

    /// Source control management identifier (typically "git").
    #[serde(rename = "scmId")]
    pub scm_id: String,

    /// Current state of the repository.
    pub state: String,

    /// Additional context about the state.
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,

    /// Whether the repository allows forking.
    pub forkable: bool,

    /// Whether the repository is publicly accessible.
    #[serde(rename = "public")]
    pub is_public: bool,

    /// Clone and web UI links.
    pub links: RepositoryLinks,
}

impl Repository {
    /// Returns the href of the clone link named `"ssh"`, or `""` if there is none.
    pub fn ssh_url(&self) -> &str {
        self.clone_url("ssh").unwrap_or("")
    }

    /// Returns the href of the clone link with the given protocol name.
    pub fn clone_url(&self, name: &str) -> Option<&str> {
        self.links
            .clone
            .iter()
            .find(|link| link.name == name)
            .map(|link| link.href.as_str())
    }

    /// Returns `true` if any clone link of this repository has the given href.
    pub fn has_clone_url(&self, href: &str) -> bool {
        self.links.clone.iter().any(|link| link.href == href)
    }
}

/// Reference to the project a repository belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRef {
    /// Unique numeric identifier for the project.
    pub id: u64,

    /// Short uppercase key used in URLs and API paths.
    pub key: String,

    /// Human-readable display name of the project.
    pub name: String,

    /// Whether the project is publicly accessible.
    #[serde(rename = "public")]
    pub is_public: bool,
}

/// Collection of links associated with a repository.
///
/// # Fields
///
/// * `clone` - Clone URLs (typically SSH and HTTP)
/// * `self_link` - Web UI URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryLinks {
    /// Clone URLs, one per protocol.
    pub clone: Vec<CloneLink>,

    /// Links to the repository in the web UI.
    #[serde(rename = "self")]
    pub self_link: Vec<SelfLink>,
}

/// A clone URL for one protocol.
///
/// # Notes
///
/// - SSH URLs typically start with `ssh://`
/// - The `name` is the protocol identifier, `"ssh"` or `"http"`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneLink {
    /// The full clone URL for this protocol.
    pub href: String,

    /// Protocol identifier for this clone URL.
    pub name: String,
}

/// Self-referential link to a resource in the web UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfLink {
    /// The full URL of the resource.
    pub href: String,
}

/// Request body for creating a repository.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepositoryRequest<'a> {
    /// Name for the new repository. The slug is derived from it.
    pub name: &'a str,

    /// Source control management type. Stash only supports "git".
    #[serde(rename = "scmId")]
    pub scm_id: &'a str,
}

/// Finds the repository that has a clone link with the given href.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use stash_client::api::server::{has_repository, CloneLink, Repository};
///
/// let mut repo = Repository { id: 1, slug: "trunk".to_string(), ..Default::default() };
/// repo.links.clone.push(CloneLink {
///     href: "http://example.com/scm/proj/trunk.git".to_string(),
///     name: "http".to_string(),
/// });
///
/// let repositories = HashMap::from([(repo.id, repo)]);
/// assert!(has_repository(&repositories, "http://example.com/scm/proj/trunk.git").is_some());
/// assert!(has_repository(&repositories, "http://example.com/scm/proj/other.git").is_none());
/// ```
pub fn has_repository<'a>(repositories: &'a HashMap<u64, Repository>, clone_url: &str) -> Option<&'a Repository> {
    repositories.values().find(|repo| repo.has_clone_url(clone_url))
}

impl StashClient {
    /// Lists every repository visible to the caller, keyed by repository id.
    pub async fn get_repositories(&self) -> Result<HashMap<u64, Repository>> {
        let url = self.rest_url(&["repos"])?;
        self.get_paged(
            "list repositories",
            url,
            AuthPolicy::IfPresent,
            &LIST_REPOSITORIES,
            HashMap::new(),
            |acc: &mut HashMap<u64, Repository>, page: Vec<Repository>| {
                acc.extend(page.into_iter().map(|repo| (repo.id, repo)));
            },
        )
        .await
    }

    /// Fetches one repository.
    ///
    /// # Errors
    ///
    /// A missing repository is an [`ApiError::Status`](crate::api::common::ApiError::Status)
    /// for which `is_repository_not_found()` is `true`.
    pub async fn get_repository(&self, project: &str, slug: &str) -> Result<Repository> {
        let url = self.repo_url(project, slug, &[])?;
        let request = ApiRequest::new("get repository", Method::GET, url, &GET_REPOSITORY).auth(AuthPolicy::IfPresent);
        self.execute_json(&request).await
    }

    /// Creates a git repository in the given project.
    ///
    /// Made with a single attempt; a name clash is reported as 409, for which
    /// `is_repository_exists()` is `true`.
    pub async fn create_repository(&self, project: &str, name: &str) -> Result<Repository> {
        let url = self.rest_url(&["projects", project, "repos"])?;
        let request = ApiRequest::new("create repository", Method::POST, url, &CREATE_REPOSITORY)
            .json(&CreateRepositoryRequest { name, scm_id: "git" })?
            .single_attempt();
        self.execute_json(&request).await
    }
}
