//! Content-type-aware body formatting.
//!
//! Pretty-prints JSON and XML payloads for presentation; anything else
//! passes through unchanged. Malformed payloads are never an error here —
//! the original text comes back and a warning goes to the injected
//! diagnostic sink.

use log::warn;
use serde_json::Value;

/// Injected warning channel for non-fatal formatting diagnostics.
pub trait DiagnosticSink {
    /// Reports a non-fatal formatting problem.
    fn warn(&self, message: &str);
}

/// Sink that forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}

/// Renders an optional byte body as text (lossily for non-UTF-8 bytes).
pub fn body_as_string(body: Option<&[u8]>) -> String {
    match body {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => String::new(),
    }
}

/// Pretty-prints `body` according to `content_type`.
///
/// An empty body or a missing content type passes through unchanged.
/// `application/json` bodies are re-serialized with their key order as
/// written and 4-space indentation; `text/xml` and `application/xml`
/// bodies are re-indented. Every other content type passes through.
pub fn format_body(body: &str, content_type: Option<&str>, sink: &dyn DiagnosticSink) -> String {
    let Some(content_type) = content_type else {
        return body.to_string();
    };
    if body.is_empty() {
        return body.to_string();
    }

    if content_type.starts_with("application/json") {
        json_format(body, sink)
    } else if content_type.starts_with("text/xml") || content_type.starts_with("application/xml") {
        xml_format(body, sink)
    } else {
        body.to_string()
    }
}

/// Re-serializes JSON with key order as written and 4-space indentation.
/// Malformed input comes back unchanged.
pub fn json_format(content: &str, sink: &dyn DiagnosticSink) -> String {
    let Some(json) = safe_parse_json(content, sink) else {
        return content.to_string();
    };
    to_pretty_string(&json).unwrap_or_else(|| content.to_string())
}

fn to_pretty_string(value: &Value) -> Option<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(value, &mut ser).ok()?;
    String::from_utf8(buf).ok()
}

/// Parses JSON, reporting failures through the sink instead of raising.
pub fn safe_parse_json(content: &str, sink: &dyn DiagnosticSink) -> Option<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Some(value),
        Err(error) => {
            sink.warn(&format!("Not a JSON body.\n{error}"));
            None
        }
    }
}

/// Re-indents XML markup with 4-space indentation. Malformed input comes
/// back unchanged.
pub fn xml_format(content: &str, sink: &dyn DiagnosticSink) -> String {
    match reindent_xml(content) {
        Ok(formatted) => formatted,
        Err(error) => {
            sink.warn(&format!("Not an XML body.\n{error}"));
            content.to_string()
        }
    }
}

fn reindent_xml(content: &str) -> Result<String, quick_xml::Error> {
    use quick_xml::events::Event;
    use quick_xml::{Reader, Writer};

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
