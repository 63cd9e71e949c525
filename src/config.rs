//! Runner configuration types.

/// Default User-Agent header sent with outgoing requests.
pub const DEFAULT_USER_AGENT: &str = concat!("rest_runner/", env!("CARGO_PKG_VERSION"));

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically by whichever process entry point embeds
/// the runner.
///
/// # Examples
///
/// ```
/// use rest_runner::RunnerConfig;
///
/// let config = RunnerConfig {
///     attempts: 5,
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.attempts, 5);
/// ```
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum delivery attempts per request (1 = no retry).
    pub attempts: u32,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value.
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
