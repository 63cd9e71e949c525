//! End-to-end pipeline tests: template resolution, retrying execution and
//! entity recording, driven through a scripted transport.

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use rest_runner::{
    execute, HeaderMap, LogSink, RandomSource, RequestTemplate, ResolvedRequest, ResolvedResponse,
    Resolver, ResponseBody, Transport, TransportError,
};

struct Fixed(f64);

impl RandomSource for Fixed {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Transport that fails a scripted number of times, then answers with a
/// canned response.
struct ScriptedTransport {
    fail_times: u32,
    status: u16,
    status_text: &'static str,
    calls: AtomicU32,
}

impl ScriptedTransport {
    fn new(fail_times: u32) -> Self {
        ScriptedTransport {
            fail_times,
            status: 201,
            status_text: "Created",
            calls: AtomicU32::new(0),
        }
    }

    fn with_status(status: u16, status_text: &'static str) -> Self {
        ScriptedTransport {
            fail_times: 0,
            status,
            status_text,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _request: &ResolvedRequest) -> Result<ResolvedResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.fail_times {
            return Err(TransportError::Build(format!("scripted failure {call}")));
        }

        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json");
        Ok(ResolvedResponse {
            status: self.status,
            status_text: self.status_text.to_string(),
            headers,
            body: ResponseBody::Json(json!({"ok": true, "id": 7})),
        })
    }
}

fn sample_template() -> RequestTemplate {
    RequestTemplate {
        method: "POST".to_string(),
        url: "https://example.com/items?n={{randomInt(100, 200)}}".to_string(),
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some("{\"value\": {{randomInt(100, 200)}}}".to_string()),
    }
}

#[tokio::test]
async fn resolves_and_executes_in_one_attempt() -> Result<()> {
    let mut resolver = Resolver::with_source(Box::new(Fixed(0.5)));
    let request = resolver.resolve_template(&sample_template())?;
    assert_eq!(request.url, "https://example.com/items?n=150");
    assert_eq!(request.body.as_deref(), Some("{\"value\": 150}".as_bytes()));

    let transport = ScriptedTransport::new(0);
    let entity = execute(&transport, &request, 3).await?;

    assert_eq!(transport.calls(), 1);
    assert_eq!(entity.response.status, 201);
    assert_eq!(entity.response.status_text, "Created");
    assert_eq!(entity.request.url, "https://example.com/items?n=150");
    Ok(())
}

#[tokio::test]
async fn retries_until_the_transport_recovers() -> Result<()> {
    let transport = ScriptedTransport::new(2);
    let request = ResolvedRequest {
        method: "GET".to_string(),
        url: "https://example.com/flaky".to_string(),
        ..Default::default()
    };

    let entity = execute(&transport, &request, 5).await?;

    assert_eq!(transport.calls(), 3);
    assert_eq!(entity.response.status, 201);
    Ok(())
}

#[tokio::test]
async fn exhausted_retries_surface_the_last_failure() {
    let transport = ScriptedTransport::new(u32::MAX);
    let request = ResolvedRequest::default();

    let error = execute(&transport, &request, 5).await.unwrap_err();

    assert_eq!(transport.calls(), 5);
    assert!(error.to_string().contains("scripted failure 5"));
}

#[tokio::test]
async fn non_2xx_responses_are_recorded_not_retried() -> Result<()> {
    let transport = ScriptedTransport::with_status(503, "Service Unavailable");
    let request = ResolvedRequest::default();

    let entity = execute(&transport, &request, 5).await?;

    assert_eq!(transport.calls(), 1);
    assert_eq!(entity.response.status, 503);
    assert_eq!(entity.response.status_text, "Service Unavailable");
    Ok(())
}

#[tokio::test]
async fn recorded_bodies_pretty_print_on_demand() -> Result<()> {
    let transport = ScriptedTransport::new(0);
    let request = ResolvedRequest::default();

    let entity = execute(&transport, &request, 1).await?;

    assert_eq!(
        entity.formatted_response_body(&LogSink),
        "{\n    \"ok\": true,\n    \"id\": 7\n}"
    );
    Ok(())
}
