//
//  stash-client
//  api/stash.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The [`Stash`] trait: every operation of the client behind one object-safe
//! interface.
//!
//! Code that talks to Stash (the `stash` binary, or a deployment tool) can take
//! a `&dyn Stash` and be tested against an in-memory fake instead of a server.
//!
//! ```rust,no_run
//! use stash_client::api::{Stash, StashClient};
//!
//! async fn default_branch(stash: &dyn Stash, project: &str, slug: &str) -> Option<String> {
//!     let branches = stash.get_branches(project, slug).await.ok()?;
//!     branches.into_values().find(|b| b.is_default).map(|b| b.display_id)
//! }
//!
//! # async fn example() -> stash_client::api::Result<()> {
//! let client = StashClient::new("https://stash.example.com", "alice", "secret")?;
//! println!("{:?}", default_branch(&client, "PROJ", "trunk").await);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use super::client::StashClient;
use super::common::Result;
use super::server::{Branch, BranchRestriction, Comment, Commit, PullRequest, Repository, Tag};

/// Operations offered by a Stash server.
#[async_trait]
pub trait Stash: Send + Sync {
    /// Every repository visible to the caller, keyed by id.
    async fn get_repositories(&self) -> Result<HashMap<u64, Repository>>;

    /// One repository.
    async fn get_repository(&self, project: &str, slug: &str) -> Result<Repository>;

    /// Creates a git repository.
    async fn create_repository(&self, project: &str, name: &str) -> Result<Repository>;

    /// Branches keyed by display id.
    async fn get_branches(&self, project: &str, slug: &str) -> Result<HashMap<String, Branch>>;

    /// Deletes a branch.
    async fn delete_branch(&self, project: &str, slug: &str, branch: &str) -> Result<()>;

    /// Tags keyed by display id.
    async fn get_tags(&self, project: &str, slug: &str) -> Result<HashMap<String, Tag>>;

    /// Pull requests in a state, in server order.
    async fn get_pull_requests(&self, project: &str, slug: &str, state: &str) -> Result<Vec<PullRequest>>;

    /// One pull request.
    async fn get_pull_request(&self, project: &str, slug: &str, id: u64) -> Result<PullRequest>;

    /// Opens a pull request.
    #[allow(clippy::too_many_arguments)]
    async fn create_pull_request(
        &self,
        project: &str,
        slug: &str,
        title: &str,
        description: &str,
        from: &str,
        to: &str,
        reviewers: &[String],
    ) -> Result<PullRequest>;

    /// Updates a pull request; an empty `to` keeps the target branch.
    #[allow(clippy::too_many_arguments)]
    async fn update_pull_request(
        &self,
        project: &str,
        slug: &str,
        id: u64,
        version: u64,
        title: &str,
        description: &str,
        to: &str,
        reviewers: &[String],
    ) -> Result<PullRequest>;

    /// Declines a pull request.
    async fn decline_pull_request(&self, project: &str, slug: &str, id: u64, version: u64) -> Result<()>;

    /// Comments on a pull request.
    async fn create_comment(&self, project: &str, slug: &str, pull_request: u64, text: &str) -> Result<Comment>;

    /// One commit.
    async fn get_commit(&self, project: &str, slug: &str, hash: &str) -> Result<Commit>;

    /// Commits between two hashes.
    async fn get_commits(&self, project: &str, slug: &str, since: &str, until: &str) -> Result<Vec<Commit>>;

    /// Branch restrictions of a repository.
    async fn get_branch_restrictions(&self, project: &str, slug: &str) -> Result<Vec<BranchRestriction>>;

    /// Restricts pushes to a branch to one user.
    async fn create_branch_restriction(
        &self,
        project: &str,
        slug: &str,
        branch: &str,
        user: &str,
    ) -> Result<BranchRestriction>;

    /// Removes a branch restriction.
    async fn delete_branch_restriction(&self, project: &str, slug: &str, id: u64) -> Result<()>;

    /// Raw content of a file at a branch.
    async fn get_raw_file(&self, project: &str, slug: &str, branch: &str, path: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl Stash for StashClient {
    async fn get_repositories(&self) -> Result<HashMap<u64, Repository>> {
        StashClient::get_repositories(self).await
    }

    async fn get_repository(&self, project: &str, slug: &str) -> Result<Repository> {
        StashClient::get_repository(self, project, slug).await
    }

    async fn create_repository(&self, project: &str, name: &str) -> Result<Repository> {
        StashClient::create_repository(self, project, name).await
    }

    async fn get_branches(&self, project: &str, slug: &str) -> Result<HashMap<String, Branch>> {
        StashClient::get_branches(self, project, slug).await
    }

    async fn delete_branch(&self, project: &str, slug: &str, branch: &str) -> Result<()> {
        StashClient::delete_branch(self, project, slug, branch).await
    }

    async fn get_tags(&self, project: &str, slug: &str) -> Result<HashMap<String, Tag>> {
        StashClient::get_tags(self, project, slug).await
    }

    async fn get_pull_requests(&self, project: &str, slug: &str, state: &str) -> Result<Vec<PullRequest>> {
        StashClient::get_pull_requests(self, project, slug, state).await
    }

    async fn get_pull_request(&self, project: &str, slug: &str, id: u64) -> Result<PullRequest> {
        StashClient::get_pull_request(self, project, slug, id).await
    }

    async fn create_pull_request(
        &self,
        project: &str,
        slug: &str,
        title: &str,
        description: &str,
        from: &str,
        to: &str,
        reviewers: &[String],
    ) -> Result<PullRequest> {
        StashClient::create_pull_request(self, project, slug, title, description, from, to, reviewers).await
    }

    async fn update_pull_request(
        &self,
        project: &str,
        slug: &str,
        id: u64,
        version: u64,
        title: &str,
        description: &str,
        to: &str,
        reviewers: &[String],
    ) -> Result<PullRequest> {
        StashClient::update_pull_request(self, project, slug, id, version, title, description, to, reviewers).await
    }

    async fn decline_pull_request(&self, project: &str, slug: &str, id: u64, version: u64) -> Result<()> {
        StashClient::decline_pull_request(self, project, slug, id, version).await
    }

    async fn create_comment(&self, project: &str, slug: &str, pull_request: u64, text: &str) -> Result<Comment> {
        StashClient::create_comment(self, project, slug, pull_request, text).await
    }

    async fn get_commit(&self, project: &str, slug: &str, hash: &str) -> Result<Commit> {
        StashClient::get_commit(self, project, slug, hash).await
    }

    async fn get_commits(&self, project: &str, slug: &str, since: &str, until: &str) -> Result<Vec<Commit>> {
        StashClient::get_commits(self, project, slug, since, until).await
    }

    async fn get_branch_restrictions(&self, project: &str, slug: &str) -> Result<Vec<BranchRestriction>> {
        StashClient::get_branch_restrictions(self, project, slug).await
    }

    async fn create_branch_restriction(
        &self,
        project: &str,
        slug: &str,
        branch: &str,
        user: &str,
    ) -> Result<BranchRestriction> {
        StashClient::create_branch_restriction(self, project, slug, branch, user).await
    }

    async fn delete_branch_restriction(&self, project: &str, slug: &str, id: u64) -> Result<()> {
        StashClient::delete_branch_restriction(self, project, slug, id).await
    }

    async fn get_raw_file(&self, project: &str, slug: &str, branch: &str, path: &str) -> Result<Vec<u8>> {
        StashClient::get_raw_file(self, project, slug, branch, path).await
    }
}
