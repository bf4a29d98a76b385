//
//  stash-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Stash REST API
//!
//! [`StashClient`] owns the shared plumbing every endpoint goes through:
//!
//! ```text
//! ApiRequest -> RetryPolicy::run( build -> HttpTransport::send -> classify ) -> decode
//! ```
//!
//! Resource modules under [`super::server`] only describe their endpoint (path
//! segments, query, body, expected status, auth policy) as an [`ApiRequest`]
//! and hand it to [`StashClient::execute`], [`StashClient::execute_json`] or
//! [`StashClient::get_paged`].
//!
//! ## Headers
//!
//! - `Accept: application/json` on every request except raw file fetches
//! - `X-Atlassian-Token: no-check` and `Content-Type: application/json` on
//!   every mutating request (POST, PUT, DELETE)
//! - `Authorization: Basic ...` according to the endpoint's [`AuthPolicy`]
//!
//! ## Concurrency
//!
//! A `StashClient` is `Send + Sync` and can be shared between tasks behind an
//! `Arc`. The only shared state is the connection pool inside
//! [`HttpTransport`].

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::classify::{classify, ResponseSpec};
use super::common::{collect_pages, ApiError, PagedResponse, Result, PAGE_LIMIT};
use super::retry::RetryPolicy;
use super::transport::{HttpTransport, TransportOptions};
use crate::auth::{AuthPolicy, Credentials};

/// Header that disables Stash's XSRF check for API calls.
pub const ATLASSIAN_TOKEN: &str = "X-Atlassian-Token";

const JSON: &str = "application/json";

/// Root of the core REST API.
pub const REST_API: [&str; 3] = ["rest", "api", "1.0"];

/// Root of the branch permissions plugin API.
pub const BRANCH_PERMISSIONS_API: [&str; 3] = ["rest", "branch-permissions", "1.0"];

/// Root of the branch utilities plugin API.
pub const BRANCH_UTILS_API: [&str; 3] = ["rest", "branch-utils", "1.0"];

/// Description of one API call.
///
/// # Example
///
/// ```rust
/// use reqwest::{Method, StatusCode, Url};
/// use stash_client::api::classify::ResponseSpec;
/// use stash_client::api::client::ApiRequest;
/// use stash_client::auth::AuthPolicy;
///
/// static SPEC: ResponseSpec = ResponseSpec::new(StatusCode::OK, &[]);
///
/// let url = Url::parse("https://stash.example.com/rest/api/1.0/repos").unwrap();
/// let request = ApiRequest::new("list repositories", Method::GET, url, &SPEC)
///     .auth(AuthPolicy::IfPresent);
/// assert!(request.retry);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    /// Name used in log messages.
    pub label: &'a str,

    /// HTTP method.
    pub method: Method,

    /// Fully built request URL, query included.
    pub url: Url,

    /// Serialized JSON body, if any.
    pub body: Option<Vec<u8>>,

    /// When credentials are attached.
    pub auth: AuthPolicy,

    /// Whether `Accept: application/json` is sent.
    pub accept_json: bool,

    /// Whether the call runs under the client's retry policy or once.
    pub retry: bool,

    /// Expected status and reason table.
    pub spec: &'static ResponseSpec,
}

impl<'a> ApiRequest<'a> {
    /// Creates a request with the defaults: auth required, JSON accepted, retried.
    pub fn new(label: &'a str, method: Method, url: Url, spec: &'static ResponseSpec) -> Self {
        Self {
            label,
            method,
            url,
            body: None,
            auth: AuthPolicy::Required,
            accept_json: true,
            retry: true,
            spec,
        }
    }

    /// Sets the auth policy.
    pub fn auth(mut self, auth: AuthPolicy) -> Self {
        self.auth = auth;
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if serialization fails.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Does not send `Accept: application/json`.
    pub fn raw(mut self) -> Self {
        self.accept_json = false;
        self
    }

    /// Makes exactly one attempt regardless of the client's retry policy.
    pub fn single_attempt(mut self) -> Self {
        self.retry = false;
        self
    }

    fn is_mutating(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT || self.method == Method::DELETE
    }
}

/// Builder for [`StashClient`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use stash_client::api::StashClient;
/// use stash_client::api::retry::RetryPolicy;
/// use stash_client::api::transport::TransportOptions;
///
/// let client = StashClient::builder("https://stash.example.com/stash")
///     .credentials("alice", "secret")
///     .transport(TransportOptions { accept_invalid_certs: false, ..Default::default() })
///     .retry(RetryPolicy::default().retry_all_errors())
///     .build()
///     .unwrap();
///
/// assert_eq!(client.base_url().path(), "/stash");
/// ```
#[derive(Debug, Clone)]
pub struct StashClientBuilder {
    base_url: String,
    credentials: Credentials,
    transport: TransportOptions,
    retry: RetryPolicy,
}

impl StashClientBuilder {
    /// Sets the Basic auth credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    /// Sets the transport options.
    pub fn transport(mut self, options: TransportOptions) -> Self {
        self.transport = options;
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL does not parse or cannot
    /// carry path segments, and [`ApiError::ClientSetup`] if the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<StashClient> {
        let base_url = Url::parse(self.base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(self.base_url));
        }

        Ok(StashClient {
            transport: HttpTransport::new(&self.transport)?,
            base_url,
            credentials: self.credentials,
            retry: self.retry,
        })
    }
}

/// Client for one Stash server.
///
/// # Example
///
/// ```rust,no_run
/// use stash_client::api::StashClient;
///
/// # async fn example() -> stash_client::api::Result<()> {
/// let client = StashClient::new("https://stash.example.com", "alice", "secret")?;
/// let repo = client.get_repository("PROJ", "trunk").await?;
/// println!("{} -> {}", repo.name, repo.ssh_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StashClient {
    transport: HttpTransport,
    base_url: Url,
    credentials: Credentials,
    retry: RetryPolicy,
}

impl StashClient {
    /// Creates a client with default transport options and retry policy.
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        Self::builder(base_url).credentials(username, password).build()
    }

    /// Starts building a client for the server at `base_url`.
    ///
    /// The URL may carry a context path such as `https://host/stash`.
    pub fn builder(base_url: &str) -> StashClientBuilder {
        StashClientBuilder {
            base_url: base_url.to_string(),
            credentials: Credentials::anonymous(),
            transport: TransportOptions::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The retry policy applied to retried endpoints.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Appends percent-escaped path segments to the base URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stash_client::api::StashClient;
    ///
    /// let client = StashClient::new("https://stash.example.com/ctx/", "", "").unwrap();
    /// let url = client.endpoint(["rest", "api", "1.0", "projects", "MY PROJ"]).unwrap();
    /// assert_eq!(url.as_str(), "https://stash.example.com/ctx/rest/api/1.0/projects/MY%20PROJ");
    /// ```
    pub fn endpoint<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL under `rest/api/1.0`.
    pub fn rest_url(&self, segments: &[&str]) -> Result<Url> {
        self.endpoint(REST_API.iter().chain(segments))
    }

    /// URL under `rest/api/1.0/projects/{project}/repos/{slug}`.
    pub fn repo_url(&self, project: &str, slug: &str, segments: &[&str]) -> Result<Url> {
        self.endpoint(
            REST_API
                .iter()
                .chain(&["projects", project, "repos", slug])
                .chain(segments),
        )
    }

    fn build(&self, request: &ApiRequest<'_>) -> RequestBuilder {
        let mut builder = self
            .transport
            .request(request.method.clone(), request.url.clone());

        if request.accept_json {
            builder = builder.header(ACCEPT, JSON);
        }
        if request.is_mutating() {
            builder = builder
                .header(ATLASSIAN_TOKEN, "no-check")
                .header(CONTENT_TYPE, JSON);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        self.credentials.apply_to_request(builder, request.auth)
    }

    /// Runs a request through the retry loop and returns the success body.
    ///
    /// # Errors
    ///
    /// Returns the last [`ApiError::Transport`] or [`ApiError::Status`] once the
    /// retry policy gives up.
    pub async fn execute(&self, request: &ApiRequest<'_>) -> Result<Vec<u8>> {
        let policy = if request.retry {
            self.retry.clone()
        } else {
            RetryPolicy::single_attempt()
        };

        policy
            .run(request.label, || async {
                tracing::debug!("{} {} ({})", request.method, request.url, request.label);
                let response = self.transport.send(self.build(request)).await?;
                classify(response, request.spec)
            })
            .await
    }

    /// Runs a request and decodes the success body as JSON.
    ///
    /// Decoding happens after the retry loop; a decode failure is returned
    /// immediately as [`ApiError::Decode`].
    pub async fn execute_json<T: DeserializeOwned>(&self, request: &ApiRequest<'_>) -> Result<T> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    /// Fetches every page of a list endpoint and merges the items.
    ///
    /// `url` may already carry query parameters; `start` and `limit` are
    /// appended for each page. Each page is a separately retried request.
    pub async fn get_paged<T, C, M>(
        &self,
        label: &str,
        url: Url,
        auth: AuthPolicy,
        spec: &'static ResponseSpec,
        aggregate: C,
        merge: M,
    ) -> Result<C>
    where
        T: DeserializeOwned,
        M: FnMut(&mut C, Vec<T>),
    {
        collect_pages(
            |start| {
                let mut page_url = url.clone();
                page_url
                    .query_pairs_mut()
                    .append_pair("start", &start.to_string())
                    .append_pair("limit", &PAGE_LIMIT.to_string());
                let request = ApiRequest::new(label, Method::GET, page_url, spec).auth(auth);
                async move { self.execute_json::<PagedResponse<T>>(&request).await }
            },
            aggregate,
            merge,
        )
        .await
    }
}
