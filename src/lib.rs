//
//  stash-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stash Client Library
//!
//! A typed client for the Atlassian Stash (Bitbucket Server) REST API, and the
//! `stash` command-line tool built on it.
//!
//! ## Features
//!
//! - **Repositories**: list, look up, create, and find by clone URL
//! - **Branches and tags**: list, and delete branches through branch-utils
//! - **Pull requests**: list, view, create, update, decline and comment
//! - **Commits**: single commits and commit ranges with JIRA keys
//! - **Branch permissions**: list, create and delete branch restrictions
//! - **Raw files**: fetch file content at a branch
//! - **Resilience**: bounded retries with exponential backoff and typed errors
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, response classification, retries and resources
//! - [`auth`]: HTTP Basic credentials
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`output`]: Table and JSON output
//! - [`util`]: Formatting helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stash_client::api::StashClient;
//!
//! # async fn example() -> stash_client::api::Result<()> {
//! let client = StashClient::new("https://stash.example.com", "alice", "secret")?;
//! for (name, branch) in client.get_branches("PROJ", "trunk").await? {
//!     println!("{} at {}", name, branch.latest_changeset);
//! }
//! # Ok(())
//! # }
//! ```

/// API client for the Stash REST API.
///
/// Handles request building, authentication, retries, pagination and error
/// classification.
pub mod api;

/// HTTP Basic credentials and the per-endpoint attach policy.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
///
/// The file lives in the platform config directory:
/// - Linux: `~/.config/stash/config.toml`
/// - macOS: `~/Library/Application Support/stash/config.toml`
/// - Windows: `%APPDATA%\stash\config.toml`
pub mod config;

/// Output formatting: tables for people, JSON for scripts.
pub mod output;

pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// ```rust,no_run
/// use clap::Parser;
/// use stash_client::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name: the binary name and configuration directory name.
pub const APP_NAME: &str = "stash";

/// Application version, from Cargo.toml.
///
/// ```rust
/// use stash_client::VERSION;
///
/// println!("stash version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Scripts can branch on these to tell failures apart:
///
/// - `0`: Success
/// - `1`: General error
/// - `4`: Authentication failed (HTTP 401)
/// - `8`: Resource not found (HTTP 404)
///
/// ```rust
/// use reqwest::StatusCode;
/// use stash_client::api::ApiError;
/// use stash_client::exit_codes;
///
/// let err = ApiError::Status {
///     status: StatusCode::UNAUTHORIZED,
///     reason: "Unauthorized".to_string(),
///     messages: vec![],
///     body: String::new(),
/// };
/// assert_eq!(exit_codes::for_api_error(&err), exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    use reqwest::StatusCode;

    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Authentication required or rejected by the server.
    ///
    /// Check `--username`/`--password` or the `[server]` section of the config.
    pub const AUTH_ERROR: i32 = 4;

    /// The project, repository or object does not exist, or is not visible
    /// to the caller.
    pub const NOT_FOUND: i32 = 8;

    /// Maps an API error onto an exit code.
    pub fn for_api_error(err: &ApiError) -> i32 {
        match err.status_code() {
            Some(StatusCode::UNAUTHORIZED) => AUTH_ERROR,
            Some(StatusCode::NOT_FOUND) => NOT_FOUND,
            _ => ERROR,
        }
    }

    /// Maps any command error onto an exit code, looking through context
    /// layers for an [`ApiError`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .map_or(ERROR, for_api_error)
    }

}
