//! Error types for the request-execution pipeline.
//!
//! Each failure domain gets its own enum. Resolution degradations (unknown
//! duration units, unparsable date patterns, malformed bodies) are *not*
//! errors — they fall back to safe defaults inside the modules that own
//! them and at most emit a warning.

use std::path::PathBuf;

use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger (usually: already initialized).
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Failure while expanding request-file patterns.
///
/// Discovery failures are propagated to the caller, never swallowed.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The glob pattern itself is malformed.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A glob match could not be read back from the filesystem.
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Filesystem inspection of a matched path failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// The path that could not be inspected.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Failure while resolving a placeholder expression.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The expression names a function outside the closed set.
    #[error("Unknown placeholder function: {0}")]
    UnknownFunction(String),

    /// The function was called with missing or unparsable arguments.
    #[error("Invalid arguments for {function}: {message}")]
    InvalidArguments {
        /// The placeholder function that rejected its arguments.
        function: &'static str,
        /// What was wrong with them.
        message: String,
    },

    /// A `processEnv`/`dotenv` lookup named a variable that is not set.
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
}

/// Connection-level transport failure.
///
/// A non-2xx response is *not* a transport error: it still carries a
/// structured response and resolves successfully. These variants cover the
/// cases where no response arrived at all, which is what the retry
/// executor reacts to.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be constructed (bad method, URL, or header).
    #[error("Request build error: {0}")]
    Build(String),

    /// The request timed out before a response arrived.
    #[error("Request timeout: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The TCP/TLS connection could not be established.
    #[error("Connection error: {0}")]
    Connect(#[source] reqwest::Error),

    /// Any other failure without a structured response.
    #[error("Transport error: {0}")]
    Other(#[source] reqwest::Error),
}
