//! Immutable request/response snapshots.

use serde_json::Value;

use crate::body::{body_as_string, format_body, DiagnosticSink};
use crate::headers::HeaderMap;

/// A fully resolved outgoing request: every placeholder already
/// substituted, ready for the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRequest {
    /// HTTP method, passed through from the request file unchanged.
    pub method: String,
    /// Target URL, passed through unchanged apart from substitution.
    pub url: String,
    /// Request headers (canonical keys, last write wins).
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

/// Response body as decoded by the transport.
///
/// The tagged variants let downstream formatting branch exhaustively
/// instead of inspecting an untyped field at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Decoded textual payload.
    Text(String),
    /// JSON payload decoded into a structured value.
    Json(Value),
    /// Anything that is not valid UTF-8.
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Renders the body as text for presentation.
    pub fn as_text(&self) -> String {
        match self {
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// A completed transport response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedResponse {
    /// Numeric status code, always as reported by the transport — never
    /// inferred or defaulted.
    pub status: u16,
    /// Status text, e.g. `OK`.
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: ResponseBody,
}

/// Immutable pairing of a resolved request and its received response.
///
/// Created once per completed exchange and owned exclusively by the caller
/// that triggered it; nothing in this crate mutates or shares it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// The request exactly as dispatched.
    pub request: ResolvedRequest,
    /// The response exactly as received.
    pub response: ResolvedResponse,
}

impl Entity {
    /// Snapshots a completed exchange.
    ///
    /// Pure and infallible: the inputs are copied without interpretation
    /// or validation.
    pub fn new(request: ResolvedRequest, response: ResolvedResponse) -> Self {
        Entity { request, response }
    }

    /// Request body rendered as text.
    pub fn request_body(&self) -> String {
        body_as_string(self.request.body.as_deref())
    }

    /// Response body rendered as text, without formatting.
    pub fn response_body(&self) -> String {
        self.response.body.as_text()
    }

    /// Response body pretty-printed according to its content type.
    pub fn formatted_response_body(&self, sink: &dyn DiagnosticSink) -> String {
        format_body(
            &self.response_body(),
            self.response.headers.get("content-type"),
            sink,
        )
    }
}
