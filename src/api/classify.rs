//
//  stash-client
//  api/classify.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Classification
//!
//! Decides whether a completed response is a success for the endpoint that was
//! called and, if not, turns it into an [`ApiError::Status`].
//!
//! Each endpoint declares a static [`ResponseSpec`]: the one status code it
//! treats as success plus a small table of human-readable reasons for the
//! status codes the Stash documentation lists for it. Any status not in the
//! table is reported with [`UNHANDLED_REASON`].
//!
//! ## Error bodies
//!
//! Stash reports failures as
//!
//! ```json
//! {"errors": [{"context": null, "message": "A detailed error message.", "exceptionName": null}]}
//! ```
//!
//! For error statuses with a JSON content type the messages are extracted and
//! attached to the error. A non-JSON body (proxies and load balancers often
//! answer with HTML) or an unparsable one is kept verbatim instead; a broken
//! error body never masks the status error itself.
//!
//! The classifier never retries; that decision belongs to [`super::retry`].

use reqwest::StatusCode;

use super::common::{ApiError, ErrorEnvelope, Result};
use super::transport::RawResponse;

/// Reason used for status codes an endpoint does not document.
pub const UNHANDLED_REASON: &str = "unhandled reason";

/// Expected outcome of one endpoint.
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use stash_client::api::classify::{ResponseSpec, UNHANDLED_REASON};
///
/// static GET_THING: ResponseSpec = ResponseSpec::new(
///     StatusCode::OK,
///     &[(StatusCode::NOT_FOUND, "Not found")],
/// );
///
/// assert_eq!(GET_THING.reason_for(StatusCode::NOT_FOUND), "Not found");
/// assert_eq!(GET_THING.reason_for(StatusCode::IM_A_TEAPOT), UNHANDLED_REASON);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResponseSpec {
    /// The only status treated as success.
    pub expected: StatusCode,

    /// Reasons for the documented failure statuses.
    pub reasons: &'static [(StatusCode, &'static str)],
}

impl ResponseSpec {
    /// Creates a spec from the success status and the reason table.
    pub const fn new(expected: StatusCode, reasons: &'static [(StatusCode, &'static str)]) -> Self {
        Self { expected, reasons }
    }

    /// Looks up the reason for a failure status.
    pub fn reason_for(&self, status: StatusCode) -> &'static str {
        self.reasons
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, reason)| *reason)
            .unwrap_or(UNHANDLED_REASON)
    }
}

/// Classifies a response against the endpoint's expectation.
///
/// Returns the response body on success.
///
/// # Errors
///
/// Returns [`ApiError::Status`] for any status other than
/// [`ResponseSpec::expected`].
pub fn classify(response: RawResponse, spec: &ResponseSpec) -> Result<Vec<u8>> {
    if response.status == spec.expected {
        return Ok(response.body);
    }

    let (messages, body) = if response.status.as_u16() >= 400 {
        match parse_error_messages(&response) {
            Some(messages) => (messages, String::new()),
            None => (Vec::new(), response.text()),
        }
    } else {
        (Vec::new(), response.text())
    };

    Err(ApiError::Status {
        status: response.status,
        reason: spec.reason_for(response.status).to_string(),
        messages,
        body,
    })
}

/// Extracts the messages of a Stash error envelope.
///
/// Returns `None` when the response is not declared as JSON or does not parse
/// as an envelope.
pub fn parse_error_messages(response: &RawResponse) -> Option<Vec<String>> {
    if !response.is_json() {
        return None;
    }

    match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => Some(
            envelope
                .errors
                .into_iter()
                .map(|detail| detail.message)
                .filter(|message| !message.is_empty())
                .collect(),
        ),
        Err(e) => {
            tracing::debug!("Error body is not a Stash error envelope: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SPEC: ResponseSpec = ResponseSpec::new(
        StatusCode::CREATED,
        &[
            (StatusCode::BAD_REQUEST, "Validation error."),
            (StatusCode::CONFLICT, "Already exists."),
        ],
    );

    fn response(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: content_type.map(str::to_string),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_expected_status_returns_body() {
        let body = classify(response(201, Some("application/json"), r#"{"id":1}"#), &SPEC).unwrap();
        assert_eq!(body, br#"{"id":1}"#);
    }

    #[test]
    fn test_other_success_status_is_an_error() {
        let err = classify(response(200, Some("application/json"), "{}"), &SPEC).unwrap_err();
        assert_eq!(err.status_code(), Some(StatusCode::OK));
        assert!(err.to_string().contains(UNHANDLED_REASON));
    }

    #[test]
    fn test_documented_status_uses_table_reason() {
        let err = classify(response(409, None, ""), &SPEC).unwrap_err();
        match err {
            ApiError::Status { status, reason, .. } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(reason, "Already exists.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_envelope_messages_are_attached() {
        let body = r#"{"errors":[{"context":"name","message":"Name is required.","exceptionName":null},{"context":null,"message":"Try again.","exceptionName":null}]}"#;
        let err = classify(response(400, Some("application/json;charset=UTF-8"), body), &SPEC).unwrap_err();
        match &err {
            ApiError::Status { messages, body, .. } => {
                assert_eq!(messages, &vec!["Name is required.".to_string(), "Try again.".to_string()]);
                assert!(body.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Validation error. (400): Name is required. Try again.");
    }

    #[test]
    fn test_non_json_error_body_is_kept_raw() {
        let err = classify(response(502, Some("text/html"), "<h1>Bad Gateway</h1>"), &SPEC).unwrap_err();
        match err {
            ApiError::Status { messages, body, reason, .. } => {
                assert!(messages.is_empty());
                assert_eq!(body, "<h1>Bad Gateway</h1>");
                assert_eq!(reason, UNHANDLED_REASON);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_json_error_body_falls_back_to_raw() {
        let err = classify(response(404, Some("application/json"), "not json at all"), &SPEC).unwrap_err();
        match err {
            ApiError::Status { status, messages, body, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(messages.is_empty());
                assert_eq!(body, "not json at all");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
