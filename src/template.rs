//! Placeholder expressions and template resolution.
//!
//! A request template may embed `{{expr}}` placeholders in its URL, header
//! values and body. Each expression is a call into the closed set of
//! placeholder functions ([`FunctionCall`]); unknown names are a
//! resolution error, never a silent no-op.

use std::collections::HashMap;

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dates::{apply_offset, format_date};
use crate::entity::ResolvedRequest;
use crate::error_handling::ResolveError;
use crate::functions::{basic_auth, guid, random_int, timestamp, RandomSource, ThreadRandom};
use crate::headers::HeaderMap;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("placeholder regex is valid")
});
static CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*\((.*)\)$").expect("call regex is valid"));

/// Unresolved request descriptor, as produced by the request-file parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTemplate {
    /// HTTP method (passed through unchanged).
    pub method: String,
    /// Target URL; may embed placeholders.
    pub url: String,
    /// Ordered header pairs; values may embed placeholders.
    pub headers: Vec<(String, String)>,
    /// Body text; may embed placeholders.
    pub body: Option<String>,
}

/// The closed set of placeholder functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionCall {
    /// `guid()` — a fresh 36-character identifier.
    Guid,
    /// `randomInt(lower, upper)` — bounded random integer, inclusive.
    RandomInt {
        /// Inclusive lower bound.
        lower: i64,
        /// Inclusive upper bound.
        upper: i64,
    },
    /// `timestamp(offset?, unit?)` — Unix epoch seconds, optionally
    /// shifted by a calendar offset.
    Timestamp {
        /// Optional signed offset magnitude.
        offset: Option<String>,
        /// Optional unit code (`ms` … `y`).
        unit: Option<String>,
    },
    /// `datetime(pattern, offset?, unit?)` — formatted UTC instant.
    Datetime {
        /// Named format or custom token pattern.
        pattern: String,
        /// Optional signed offset magnitude.
        offset: Option<String>,
        /// Optional unit code.
        unit: Option<String>,
    },
    /// `localDatetime(pattern, offset?, unit?)` — formatted local instant.
    LocalDatetime {
        /// Named format or custom token pattern.
        pattern: String,
        /// Optional signed offset magnitude.
        offset: Option<String>,
        /// Optional unit code.
        unit: Option<String>,
    },
    /// `processEnv(name)` — process environment lookup.
    ProcessEnv(String),
    /// `dotenv(name)` — lookup in the injected `.env` map.
    Dotenv(String),
    /// `basicAuth(username, password)` — Basic-Auth header value.
    BasicAuth {
        /// Credential username.
        username: String,
        /// Credential password.
        password: String,
    },
}

impl FunctionCall {
    /// Parses `name(arg, ...)` — or a bare `name` — into the closed set.
    pub fn parse(expression: &str) -> Result<Self, ResolveError> {
        let expression = expression.trim();
        let (name, raw_args) = match CALL_RE.captures(expression) {
            Some(captures) => (captures[1].to_string(), captures[2].to_string()),
            None => (expression.to_string(), String::new()),
        };

        let args: Vec<String> = if raw_args.trim().is_empty() {
            Vec::new()
        } else {
            raw_args
                .split(',')
                .map(|arg| {
                    arg.trim()
                        .trim_matches(|c| c == '"' || c == '\'')
                        .to_string()
                })
                .collect()
        };

        match name.as_str() {
            "guid" => Ok(FunctionCall::Guid),
            "randomInt" => {
                let (lower, upper) = match (args.first(), args.get(1)) {
                    (Some(lower), Some(upper)) => (lower, upper),
                    _ => {
                        return Err(ResolveError::InvalidArguments {
                            function: "randomInt",
                            message: format!("expected 2 arguments, got {}", args.len()),
                        })
                    }
                };
                let parse = |bound: &str| {
                    bound.parse::<i64>().map_err(|_| ResolveError::InvalidArguments {
                        function: "randomInt",
                        message: format!("bound {bound:?} is not an integer"),
                    })
                };
                Ok(FunctionCall::RandomInt {
                    lower: parse(lower)?,
                    upper: parse(upper)?,
                })
            }
            "timestamp" => Ok(FunctionCall::Timestamp {
                offset: args.first().cloned(),
                unit: args.get(1).cloned(),
            }),
            "datetime" | "localDatetime" => {
                let Some(pattern) = args.first().cloned() else {
                    return Err(ResolveError::InvalidArguments {
                        function: if name == "datetime" {
                            "datetime"
                        } else {
                            "localDatetime"
                        },
                        message: "missing format pattern".to_string(),
                    });
                };
                let offset = args.get(1).cloned();
                let unit = args.get(2).cloned();
                if name == "datetime" {
                    Ok(FunctionCall::Datetime {
                        pattern,
                        offset,
                        unit,
                    })
                } else {
                    Ok(FunctionCall::LocalDatetime {
                        pattern,
                        offset,
                        unit,
                    })
                }
            }
            "processEnv" => match args.first() {
                Some(variable) => Ok(FunctionCall::ProcessEnv(variable.clone())),
                None => Err(ResolveError::InvalidArguments {
                    function: "processEnv",
                    message: "missing variable name".to_string(),
                }),
            },
            "dotenv" => match args.first() {
                Some(variable) => Ok(FunctionCall::Dotenv(variable.clone())),
                None => Err(ResolveError::InvalidArguments {
                    function: "dotenv",
                    message: "missing variable name".to_string(),
                }),
            },
            "basicAuth" => match (args.first(), args.get(1)) {
                (Some(username), Some(password)) => Ok(FunctionCall::BasicAuth {
                    username: username.clone(),
                    password: password.clone(),
                }),
                _ => Err(ResolveError::InvalidArguments {
                    function: "basicAuth",
                    message: format!("expected 2 arguments, got {}", args.len()),
                }),
            },
            other => Err(ResolveError::UnknownFunction(other.to_string())),
        }
    }
}

/// Resolves placeholder expressions into literal values.
///
/// Holds the random source and the injected `.env` map; everything else it
/// produces is derived fresh per call, so a single resolver can serve any
/// number of templates.
pub struct Resolver {
    random: Box<dyn RandomSource + Send>,
    dotenv: HashMap<String, String>,
}

impl Resolver {
    /// Resolver with the default random source and no `.env` values.
    pub fn new() -> Self {
        Self::with_source(Box::new(ThreadRandom))
    }

    /// Resolver with an injected random source.
    pub fn with_source(random: Box<dyn RandomSource + Send>) -> Self {
        Resolver {
            random,
            dotenv: HashMap::new(),
        }
    }

    /// Supplies the ambient `.env` key/value pairs for `dotenv` lookups.
    pub fn with_dotenv(mut self, vars: HashMap<String, String>) -> Self {
        self.dotenv = vars;
        self
    }

    /// Resolves one parsed call to its literal value.
    pub fn resolve(&mut self, call: &FunctionCall) -> Result<String, ResolveError> {
        match call {
            FunctionCall::Guid => Ok(guid()),
            FunctionCall::RandomInt { lower, upper } => {
                Ok(random_int(*lower, *upper, self.random.as_mut()))
            }
            FunctionCall::Timestamp { offset, unit } => Ok(timestamp(
                offset.as_deref(),
                unit.as_deref(),
            )
            .timestamp()
            .to_string()),
            FunctionCall::Datetime {
                pattern,
                offset,
                unit,
            } => {
                let date = timestamp(offset.as_deref(), unit.as_deref());
                Ok(format_date(&date, pattern))
            }
            FunctionCall::LocalDatetime {
                pattern,
                offset,
                unit,
            } => {
                let date = apply_offset(Local::now(), offset.as_deref(), unit.as_deref());
                Ok(format_date(&date, pattern))
            }
            FunctionCall::ProcessEnv(name) => {
                std::env::var(name).map_err(|_| ResolveError::UndefinedVariable(name.clone()))
            }
            FunctionCall::Dotenv(name) => self
                .dotenv
                .get(name)
                .cloned()
                .ok_or_else(|| ResolveError::UndefinedVariable(name.clone())),
            FunctionCall::BasicAuth { username, password } => Ok(basic_auth(username, password)),
        }
    }

    /// Parses and resolves one textual expression.
    pub fn resolve_expression(&mut self, expression: &str) -> Result<String, ResolveError> {
        let call = FunctionCall::parse(expression)?;
        self.resolve(&call)
    }

    /// Substitutes every `{{expr}}` occurrence in `text`.
    pub fn resolve_text(&mut self, text: &str) -> Result<String, ResolveError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for captures in PLACEHOLDER_RE.captures_iter(text) {
            let (Some(whole), Some(expression)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            out.push_str(&self.resolve_expression(expression.as_str())?);
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    /// Resolves a full template into a dispatchable request.
    pub fn resolve_template(
        &mut self,
        template: &RequestTemplate,
    ) -> Result<ResolvedRequest, ResolveError> {
        let url = self.resolve_text(&template.url)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &template.headers {
            headers.insert(name, self.resolve_text(value)?);
        }

        let body = match &template.body {
            Some(text) => Some(self.resolve_text(text)?.into_bytes()),
            None => None,
        };

        Ok(ResolvedRequest {
            method: template.method.clone(),
            url,
            headers,
            body,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
