//
//  stash-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Stash is accessed with HTTP Basic authentication. A client holds one pair of
//! [`Credentials`]; each endpoint decides through its [`AuthPolicy`] whether the
//! credentials are always sent or only when they are complete.
//!
//! ## Policies
//!
//! - **Required**: The `Authorization` header is always attached, even with an
//!   empty username or password. The server answers with 401 in that case.
//! - **IfPresent**: The header is attached only when both username and password
//!   are non-empty. Endpoints that work anonymously on public projects (reading
//!   a repository, its tags or a commit) use this policy.
//!
//! ## Example
//!
//! ```rust
//! use stash_client::auth::{AuthPolicy, Credentials};
//!
//! let credentials = Credentials::new("alice", "secret");
//! assert!(credentials.is_complete());
//! assert!(credentials.should_attach(AuthPolicy::IfPresent));
//!
//! let anonymous = Credentials::anonymous();
//! assert!(!anonymous.should_attach(AuthPolicy::IfPresent));
//! assert!(anonymous.should_attach(AuthPolicy::Required));
//! ```

use std::fmt;

use reqwest::RequestBuilder;

/// When an endpoint sends credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Always attach credentials.
    Required,

    /// Attach credentials only when both username and password are set.
    IfPresent,
}

/// Username and password used for HTTP Basic authentication.
///
/// The `Debug` output never contains the password.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Empty credentials, for anonymous access to public resources.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns `true` when both username and password are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Returns `true` when a request under `policy` carries these credentials.
    pub fn should_attach(&self, policy: AuthPolicy) -> bool {
        match policy {
            AuthPolicy::Required => true,
            AuthPolicy::IfPresent => self.is_complete(),
        }
    }

    /// Applies the credentials to a request according to `policy`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stash_client::auth::{AuthPolicy, Credentials};
    ///
    /// let client = reqwest::Client::new();
    /// let request = Credentials::new("u", "p")
    ///     .apply_to_request(client.get("https://stash.example.com"), AuthPolicy::Required)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(request.headers()["authorization"], "Basic dTpw");
    /// ```
    pub fn apply_to_request(&self, request: RequestBuilder, policy: AuthPolicy) -> RequestBuilder {
        if self.should_attach(policy) {
            request.basic_auth(&self.username, Some(&self.password))
        } else {
            request
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
