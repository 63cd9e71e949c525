//! HTTP transport behind a trait, plus retrying execution.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::ClientBuilder;

use crate::config::RunnerConfig;
use crate::entity::{Entity, ResolvedRequest, ResolvedResponse, ResponseBody};
use crate::error_handling::{InitializationError, TransportError};
use crate::headers::HeaderMap;
use crate::retry::retry;

/// Dispatches a resolved request and produces a structured response.
///
/// A non-2xx status is a *successful* [`ResolvedResponse`]; implementations
/// return `Err` only for connection-level failures where no response
/// arrived at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one delivery attempt.
    async fn send(&self, request: &ResolvedRequest) -> Result<ResolvedResponse, TransportError>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport from the runner configuration.
    ///
    /// The underlying client carries the configured timeout and User-Agent;
    /// a long-running attempt is bounded by that timeout rather than by
    /// the retry layer.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if client
    /// construction fails.
    pub fn new(config: &RunnerConfig) -> Result<Self, InitializationError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(HttpTransport { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ResolvedRequest) -> Result<ResolvedResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|error| {
            TransportError::Build(format!("invalid method {:?}: {error}", request.method))
        })?;

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(classify_error)?;

        let status = response.status();
        let status_text = status
            .canonical_reason()
            .unwrap_or("Unknown Status Code")
            .to_string();

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers() {
            headers.insert(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        let content_type = headers.get("content-type").map(str::to_string);

        let bytes = response.bytes().await.map_err(classify_error)?;
        let body = decode_body(&bytes, content_type.as_deref());

        debug!("{} {} -> {}", request.method, request.url, status.as_u16());

        Ok(ResolvedResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

/// Maps a reqwest failure onto the transport taxonomy. Timeouts and
/// connection failures are the retriable cases the retry executor sees
/// most often.
fn classify_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error)
    } else if error.is_connect() {
        TransportError::Connect(error)
    } else {
        TransportError::Other(error)
    }
}

/// Decodes a response body by content type: JSON becomes a structured
/// value, valid UTF-8 becomes text, anything else stays binary.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> ResponseBody {
    if let Some(content_type) = content_type {
        if content_type.starts_with("application/json") {
            if let Ok(text) = std::str::from_utf8(bytes) {
                if let Ok(value) = serde_json::from_str(text) {
                    return ResponseBody::Json(value);
                }
            }
        }
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => ResponseBody::Text(text.to_string()),
        Err(_) => ResponseBody::Binary(bytes.to_vec()),
    }
}

/// Dispatches `request` with bounded retry and records the exchange.
///
/// Connection-level failures trigger another sequential attempt; after
/// `attempts` consecutive failures the last one is returned verbatim. A
/// response — whatever its status — ends the loop and is snapshotted into
/// an [`Entity`] together with the request.
pub async fn execute(
    transport: &dyn Transport,
    request: &ResolvedRequest,
    attempts: u32,
) -> Result<Entity, TransportError> {
    let response = retry(attempts, |attempt| {
        if attempt > 1 {
            warn!(
                "Retrying {} {} (attempt {attempt}/{attempts})",
                request.method, request.url
            );
        }
        transport.send(request)
    })
    .await?;

    Ok(Entity::new(request.clone(), response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_parses_json_content() {
        let body = decode_body(b"{\"ok\": true}", Some("application/json"));
        assert_eq!(body, ResponseBody::Json(serde_json::json!({"ok": true})));
    }

    #[test]
    fn decode_body_falls_back_to_text_for_malformed_json() {
        let body = decode_body(b"not json", Some("application/json"));
        assert_eq!(body, ResponseBody::Text("not json".to_string()));
    }

    #[test]
    fn decode_body_keeps_non_utf8_payloads_binary() {
        let body = decode_body(&[0xff, 0xfe, 0x00], Some("application/octet-stream"));
        assert_eq!(body, ResponseBody::Binary(vec![0xff, 0xfe, 0x00]));
    }

    #[test]
    fn decode_body_without_content_type_is_text() {
        let body = decode_body(b"hello", None);
        assert_eq!(body, ResponseBody::Text("hello".to_string()));
    }

    #[test]
    fn transport_builds_from_default_config() {
        let transport = HttpTransport::new(&RunnerConfig::default());
        assert!(transport.is_ok());
    }
}
