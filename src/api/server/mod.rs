//
//  stash-client
//  api/server/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stash Resource Operations
//!
//! Each submodule maps a group of endpoints onto the shared plumbing in
//! [`StashClient`](super::StashClient): it declares the expected status and
//! reason table of every endpoint, builds the URL from escaped path segments,
//! and adds the operations as inherent `async` methods on the client.
//!
//! ## Module Organization
//!
//! - [`repositories`] - List, read and create repositories
//! - [`branches`] - List and delete branches
//! - [`tags`] - List tags
//! - [`pullrequests`] - Pull requests and their comments
//! - [`commits`] - Single commits and commit ranges
//! - [`restrictions`] - Branch restrictions (branch-permissions plugin)
//! - [`files`] - Raw file content
//!
//! ## Notes
//!
//! - All records implement `Debug`, `Clone`, `Default`, `Serialize` and `Deserialize`
//! - Every record field is optional on the wire and falls back to its default
//! - Timestamps are Unix milliseconds

pub mod branches;
pub mod commits;
pub mod files;
pub mod pullrequests;
pub mod repositories;
pub mod restrictions;
pub mod tags;

pub use branches::{Branch, DeleteBranchRequest};
pub use commits::{Commit, CommitAuthor, CommitRef};
pub use pullrequests::{
    Comment, Participant, PullRequest, PullRequestRef, PullRequestResource, RefSpec, Reviewer, User,
};
pub use repositories::{has_repository, CloneLink, ProjectRef, Repository, RepositoryLinks};
pub use restrictions::{BranchPermission, BranchRestriction};
pub use tags::Tag;
