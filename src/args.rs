//! Process invocation parsing.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static OPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-+(.+)$").unwrap());

/// A parsed process invocation.
///
/// Constructed once at process start and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// Path of the executable.
    pub exe: String,
    /// Path of the invoked script.
    pub script: String,
    /// Named options; boolean flags hold the literal string `"true"`.
    pub options: HashMap<String, String>,
    /// Positional arguments in order.
    pub args: Vec<String>,
}

/// Parses a raw argument list into [`Args`].
///
/// The first two tokens are the executable and script paths. A token of
/// the form `-name`/`--name` opens an option entry with the value
/// `"true"`. Names pre-declared in `flags` take no value; any other
/// option consumes the following token as its value, unless that token is
/// itself another option. Everything else is positional.
pub fn parse_args(flags: &[&str], argv: &[String]) -> Args {
    let mut tokens = argv.iter();
    let exe = tokens.next().cloned().unwrap_or_default();
    let script = tokens.next().cloned().unwrap_or_default();

    let mut options = HashMap::new();
    let mut args = Vec::new();
    let mut pending: Option<String> = None;

    for token in tokens {
        if let Some(captures) = OPTION_RE.captures(token) {
            let name = captures[1].to_string();
            options.insert(name.clone(), "true".to_string());
            pending = if flags.contains(&name.as_str()) {
                None
            } else {
                Some(name)
            };
        } else if let Some(name) = pending.take() {
            options.insert(name, token.clone());
        } else {
            args.push(token.clone());
        }
    }

    Args {
        exe,
        script,
        options,
        args,
    }
}
