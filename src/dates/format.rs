//! Named and custom-pattern date formatting.

use chrono::{DateTime, TimeZone, Utc};

/// Custom-pattern tokens, longest variant of each family first. Each maps
/// onto a chrono format specifier.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("SSS", "%3f"),
    ("A", "%p"),
    ("a", "%P"),
    ("ZZ", "%z"),
];

/// Renders `date` using a named format or a custom token pattern.
///
/// - `"rfc1123"` produces the fixed-width HTTP date, always UTC:
///   `Sat, 04 Mar 2000 05:06:07 GMT`.
/// - `"iso8601"` produces extended ISO-8601 with millisecond precision and
///   the UTC designator: `2000-03-04T05:06:07.008Z`.
/// - Anything else is treated as a custom pattern after stripping
///   surrounding single/double quotes. The token table covers year
///   (`YYYY`/`YY`), month (`MMMM`/`MMM`/`MM`/`M`), day (`DD`/`D`), weekday
///   (`dddd`/`ddd`), hours (`HH`/`H`/`hh`/`h`), minutes (`mm`/`m`),
///   seconds (`ss`/`s`), milliseconds (`SSS`), meridiem (`A`/`a`) and the
///   numeric zone offset (`ZZ`). A pattern containing any other alphabetic
///   run cannot be interpreted and is returned verbatim — this function
///   never fails.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match format {
        "rfc1123" => {
            return date
                .with_timezone(&Utc)
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string();
        }
        "iso8601" => {
            return date
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string();
        }
        _ => {}
    }

    let pattern = format.trim_matches(|c| c == '"' || c == '\'');
    match translate_pattern(pattern) {
        Some(spec) => date.format(&spec).to_string(),
        None => pattern.to_string(),
    }
}

/// Translates a token pattern into a chrono format string, or `None` when
/// the pattern contains an alphabetic run that is not a known token.
fn translate_pattern(pattern: &str) -> Option<String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, spec) in TOKENS {
            if rest.starts_with(token) {
                out.push_str(spec);
                rest = &rest[token.len()..];
                continue 'scan;
            }
        }
        if c.is_alphabetic() {
            return None;
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    Some(out)
}
