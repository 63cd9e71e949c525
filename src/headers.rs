//! Case-insensitive header storage with one canonical key per header.

use std::collections::BTreeMap;

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Canonicalizes a header name: lowercased, then the first character of
/// each word run uppercased (`content-type` becomes `Content-Type`).
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut boundary = true;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if boundary {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        boundary = !is_word(c);
    }
    out
}

/// Header map with case-insensitive keys.
///
/// A header name is stored under a single canonical key regardless of how
/// callers case it; writing the same semantic header twice keeps the last
/// value. Iteration order is the canonical keys' lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: BTreeMap<String, String>,
}

impl HeaderMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any value stored under a case variant
    /// of the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.inner.insert(canonical_header_name(name), value.into());
    }

    /// Looks up a header by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&canonical_header_name(name))
            .map(String::as_str)
    }

    /// True when the header is present under any casing.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&canonical_header_name(name))
    }

    /// Iterates over `(canonical name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of distinct headers.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when no headers are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name.as_ref(), value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_header_names() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("X-API-KEY"), "X-Api-Key");
        assert_eq!(canonical_header_name("this-is-LOWER."), "This-Is-Lower.");
        assert_eq!(canonical_header_name("accept"), "Accept");
    }

    #[test]
    fn case_variants_share_one_entry_last_write_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "text/plain");
        headers.insert("content-type", "application/json");
        headers.insert("CONTENT-TYPE", "text/xml");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-Type"), Some("text/xml"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let headers: HeaderMap = [("Accept", "application/json")].into_iter().collect();
        assert_eq!(headers.get("ACCEPT"), Some("application/json"));
        assert!(headers.contains("accept"));
        assert!(!headers.contains("authorization"));
    }
}
