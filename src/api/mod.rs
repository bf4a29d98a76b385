//
//  stash-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Stash (Bitbucket Server) REST API.
//!
//! ## Architecture
//!
//! A call flows through four layers:
//!
//! - [`transport`]: one HTTP exchange, read to completion
//! - [`classify`]: maps a response onto success or an [`ApiError`]
//! - [`retry`]: repeats failed exchanges with exponential backoff
//! - [`common`]: error type and the paginator for list endpoints
//!
//! The operations themselves live in [`server`], one module per resource, as
//! methods on [`StashClient`]. The [`Stash`] trait exposes the same operations
//! as an object-safe interface.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stash_client::api::StashClient;
//!
//! # async fn example() -> stash_client::api::Result<()> {
//! let client = StashClient::new("https://stash.example.com", "alice", "secret")?;
//!
//! let repo = client.get_repository("PROJ", "trunk").await?;
//! println!("clone with {}", repo.ssh_url());
//!
//! for pr in client.get_pull_requests("PROJ", "trunk", "OPEN").await? {
//!     println!("#{} {}", pr.id, pr.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`]. Unexpected statuses become
//! [`ApiError::Status`] carrying the endpoint's reason string and any messages
//! from the server's error envelope:
//!
//! - 401: credentials missing or rejected
//! - 404: project, repository or object does not exist
//! - 409: conflicting resource (e.g. repository already exists)
//! - 5xx: server failure, retried by default

pub mod classify;

/// Core client: request building, header policy, execution and paging.
pub mod client;

/// Shared error type and page envelope.
pub mod common;

pub mod retry;

/// Resource operations, one module per REST resource.
pub mod server;

pub mod stash;

pub mod transport;

pub use client::{StashClient, StashClientBuilder};
pub use common::{ApiError, Result};
pub use retry::RetryPolicy;
pub use stash::Stash;
pub use transport::TransportOptions;
