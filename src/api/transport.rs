//
//  stash-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The leaf of the API layer: performs exactly one HTTP exchange and hands back
//! the status code, content type and the complete body.
//!
//! ## TLS
//!
//! Stash servers are frequently deployed with self-signed certificates on
//! internal networks. [`TransportOptions::accept_invalid_certs`] therefore
//! defaults to `true`, which disables certificate verification entirely. This
//! is a compatibility setting and a real risk: it allows any party on the
//! network path to impersonate the server. A warning is logged every time a
//! transport is built with it enabled; turn it off for servers with valid
//! certificates.
//!
//! ## Connection release
//!
//! The `reqwest::Response` is owned by [`HttpTransport::send`] and dropped on
//! every exit path, including a failed body read, which returns the connection
//! to the pool (or closes it).

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};

use super::common::{ApiError, Result};

/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP transport.
///
/// Passed explicitly to client construction so that every client (and every
/// test) owns its own policy instead of sharing a process-wide one.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use stash_client::api::transport::TransportOptions;
///
/// let options = TransportOptions {
///     timeout: Duration::from_secs(15),
///     accept_invalid_certs: false,
///     ..Default::default()
/// };
/// assert_eq!(options.pool_max_idle_per_host, 8);
/// ```
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Overall timeout for a single request, body included.
    pub timeout: Duration,

    /// Timeout for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,

    /// Skip TLS certificate verification (trust-everything mode).
    pub accept_invalid_certs: bool,

    /// Maximum idle pooled connections kept per host.
    pub pool_max_idle_per_host: usize,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            accept_invalid_certs: true,
            pool_max_idle_per_host: 8,
            user_agent: format!("stash/{}", crate::VERSION),
        }
    }
}

/// A fully received HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code of the response.
    pub status: StatusCode,

    /// Value of the `Content-Type` header, if present and valid UTF-8.
    pub content_type: Option<String>,

    /// The complete response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns `true` when the response declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.trim_start().starts_with("application/json"))
            .unwrap_or(false)
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Pooled HTTP transport shared by every request of a client.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Builds a transport from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientSetup`] if the TLS backend cannot be initialised.
    pub fn new(options: &TransportOptions) -> Result<Self> {
        if options.accept_invalid_certs {
            tracing::warn!(
                "TLS certificate verification is disabled; set accept_invalid_certs = false for servers with valid certificates"
            );
        }

        let http = Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .build()
            .map_err(ApiError::ClientSetup)?;

        Ok(Self { http })
    }

    /// Starts a request with the given method and URL.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Sends a request and reads the complete response body.
    ///
    /// Error statuses are not treated as failures here; the body is always read
    /// so the classifier can inspect it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the request could not be sent or
    /// the body could not be read.
    pub async fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        let response = request.send().await.map_err(ApiError::Transport)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(ApiError::Transport)?;

        Ok(RawResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}
