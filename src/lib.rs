//! rest_runner library: request-file execution pipeline
//!
//! This library executes textual HTTP-request definition files (`.http` /
//! `.rest`). It discovers request files on disk, resolves embedded dynamic
//! placeholder expressions (identifiers, timestamps, random values,
//! formatted dates, environment lookups) into concrete request values,
//! dispatches the resolved request with bounded retry, and records each
//! exchange as an immutable [`Entity`]. Response bodies can be
//! pretty-printed (JSON / XML) on demand for presentation.
//!
//! The request-file grammar itself is supplied by an external parser that
//! produces a [`RequestTemplate`]; this crate takes over from there.
//!
//! # Example
//!
//! ```no_run
//! use rest_runner::{execute, expand_paths, HttpTransport, RequestTemplate, Resolver, RunnerConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunnerConfig::default();
//! let transport = HttpTransport::new(&config)?;
//! let mut resolver = Resolver::new();
//!
//! for path in expand_paths(["requests/*.http"]) {
//!     let path = path?;
//!     // An external parser turns the file text into request templates.
//!     let template = RequestTemplate {
//!         method: "GET".into(),
//!         url: "https://example.com/ping?id={{guid()}}".into(),
//!         ..Default::default()
//!     };
//!     let request = resolver.resolve_template(&template)?;
//!     let entity = execute(&transport, &request, config.attempts).await?;
//!     println!("{} -> {}", path.display(), entity.response.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Dispatching requests requires a Tokio runtime. Use `#[tokio::main]` in
//! your application or call [`execute`] from within an async context.

#![warn(missing_docs)]

mod args;
mod body;
mod config;
mod dates;
mod discover;
mod entity;
mod error_handling;
mod functions;
mod headers;
mod http;
mod logging;
mod retry;
mod template;

pub use args::{parse_args, Args};
pub use body::{
    body_as_string, format_body, json_format, safe_parse_json, xml_format, DiagnosticSink, LogSink,
};
pub use config::{LogFormat, LogLevel, RunnerConfig};
pub use dates::{apply_offset, format_date, resolve_duration, CalendarDuration};
pub use discover::{expand_paths, RequestFilePaths};
pub use entity::{Entity, ResolvedRequest, ResolvedResponse, ResponseBody};
pub use error_handling::{DiscoveryError, InitializationError, ResolveError, TransportError};
pub use functions::{basic_auth, guid, random_int, timestamp, RandomSource, ThreadRandom};
pub use headers::{canonical_header_name, HeaderMap};
pub use http::{execute, HttpTransport, Transport};
pub use logging::init_logger_with;
pub use retry::retry;
pub use template::{FunctionCall, RequestTemplate, Resolver};
