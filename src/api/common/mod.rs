//
//  stash-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Stash REST API
//!
//! This module provides the types shared by every resource module: the unified
//! [`ApiError`] type, the [`Result`] alias used across the API layer, and the
//! page envelope used by list endpoints (re-exported from [`pagination`]).
//!
//! # Example
//!
//! ```rust
//! use stash_client::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     if err.is_repository_not_found() {
//!         "no such repository"
//!     } else if err.is_transport() {
//!         "server unreachable"
//!     } else {
//!         "request failed"
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - Callers needing fine-grained behavior should branch on
//!   [`ApiError::status_code`]; the reason string is advisory only
//! - Serialization/deserialization is handled via `serde` for JSON compatibility

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result alias used by every operation in the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Stash API operations.
///
/// `ApiError` separates the three ways a call can go wrong: the HTTP exchange
/// never completed ([`Transport`](Self::Transport)), the server answered with an
/// unexpected status ([`Status`](Self::Status)), or the answer could not be
/// decoded into the expected record ([`Decode`](Self::Decode)).
///
/// # Variants
///
/// | Variant | Description | Retryable by default |
/// |---------|-------------|----------------------|
/// | `Transport` | DNS, connect, timeout or body read failure | Yes |
/// | `Status` | Response with an unexpected status code | Only 5xx |
/// | `Decode` | Response body did not match the expected record | No |
/// | `Encode` | Request body could not be serialized | No |
/// | `InvalidUrl` | The base URL cannot carry path segments | No |
/// | `Pagination` | The server broke the paging protocol | No |
/// | `ClientSetup` | The HTTP client could not be built | No |
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use stash_client::api::common::ApiError;
///
/// let err = ApiError::Status {
///     status: StatusCode::CONFLICT,
///     reason: "A repository with same name already exists.".to_string(),
///     messages: vec![],
///     body: String::new(),
/// };
///
/// assert!(err.is_repository_exists());
/// assert_eq!(
///     err.to_string(),
///     "A repository with same name already exists. (409)"
/// );
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP exchange could not be completed.
    ///
    /// No response (or no complete response body) was received, so there is
    /// no status code to inspect.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status other than the one the endpoint expects.
    ///
    /// # Fields
    ///
    /// - `status` - The HTTP status code received
    /// - `reason` - Advisory text from the endpoint's reason table
    /// - `messages` - Messages from the server's `{"errors": [...]}` envelope, if any
    /// - `body` - The raw response body, kept when it was not a parsable envelope
    #[error("{reason} ({}){}", .status.as_u16(), format_messages(.messages))]
    Status {
        status: StatusCode,
        reason: String,
        messages: Vec<String>,
        body: String,
    },

    /// The response body could not be decoded into the expected record.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL cannot be extended with path segments.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The server reported more pages without telling where they start.
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join(" "))
    }
}

impl ApiError {
    /// Returns the HTTP status code carried by a [`Status`](Self::Status) error.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when no HTTP response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Default retry classification: transport failures and 5xx responses.
    ///
    /// Client errors (400, 401, 404, 409, ...) are permanent and retrying them
    /// only adds latency.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_repository_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` for a 409 response.
    pub fn is_repository_exists(&self) -> bool {
        self.status_code() == Some(StatusCode::CONFLICT)
    }
}

/// Error envelope returned by Stash for failed requests.
///
/// ```json
/// {"errors": [{"context": null, "message": "A detailed error message.", "exceptionName": null}]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Individual error entries.
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A single entry of an [`ErrorEnvelope`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// The field or entity the error relates to, when the server provides one.
    #[serde(default)]
    pub context: Option<String>,

    /// Human readable error message.
    #[serde(default)]
    pub message: String,

    /// Fully qualified name of the server-side exception.
    #[serde(default, rename = "exceptionName")]
    pub exception_name: Option<String>,
}
