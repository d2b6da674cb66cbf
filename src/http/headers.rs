//! Header storage and tokenization.
//!
//! # Responsibilities
//! - Keep header entries in the order they were received
//! - Allow the same name to appear more than once
//! - Look names up without regard to ASCII case
//! - Split comma-separated header values into tokens
//!
//! # Design Decisions
//! - Entries are stored as a flat list of pairs, not a map of lists, so the
//!   received interleaving survives a round trip
//! - Stored names keep the spelling they were added with
//! - Equality is exact and order-sensitive

use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-insensitive, ordered multi-map of header names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, counting repeated names separately.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a single entry.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The first value stored under `name`.
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace every entry under `name` with `values`.
    ///
    /// The new entries are appended at the end, spelled as `name`.
    pub fn set_all<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.remove(name);
        for value in values {
            self.entries.push((name.to_string(), value.into()));
        }
    }

    /// Drop every entry under `name`. Returns the number of entries removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        before - self.entries.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Distinct header names in first-occurrence order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (k, _) in &self.entries {
            if !keys.iter().any(|seen| seen.eq_ignore_ascii_case(k)) {
                keys.push(k.as_str());
            }
        }
        keys
    }

    /// Iterate over `(name, value)` entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any value under `name` contains `needle`.
    pub fn in_any(&self, name: &str, needle: &str, caseless: bool) -> bool {
        if caseless {
            let needle = needle.to_lowercase();
            self.get_all(name)
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        } else {
            self.get_all(name).iter().any(|v| v.contains(needle))
        }
    }
}

impl<K, V> From<Vec<(K, V)>> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.entries {
            write!(f, "{}: {}\r\n", k, v)?;
        }
        Ok(())
    }
}

/// Retrieve all tokens for a header name.
///
/// Several headers carry comma-separated tokens and may also be set more than
/// once. Tokens come out in header order, then left to right within a value,
/// each trimmed of surrounding whitespace. Empty pieces are kept.
pub fn get_header_tokens(headers: &Headers, key: &str) -> Vec<String> {
    headers
        .get_all(key)
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(|tok| tok.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Headers {
        Headers::from(vec![
            ("Host", "example.com"),
            ("Accept-Encoding", "gzip, deflate"),
            ("X-Trace", "1"),
            ("accept-encoding", "br"),
        ])
    }

    #[test]
    fn test_lookup_ignores_case() {
        let headers = sample();
        assert_eq!(headers.get_all("ACCEPT-ENCODING"), vec!["gzip, deflate", "br"]);
        assert_eq!(headers.get_first("host"), Some("example.com"));
        assert!(headers.contains("x-trace"));
        assert!(headers.get_all("missing").is_empty());
        assert_eq!(headers.get_first("missing"), None);
    }

    #[test]
    fn test_set_all_moves_entries_to_end() {
        let mut headers = sample();
        headers.set_all("Host", ["a.test", "b.test"]);

        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec!["Accept-Encoding", "X-Trace", "accept-encoding", "Host", "Host"]
        );
        assert_eq!(headers.get_all("host"), vec!["a.test", "b.test"]);
    }

    #[test]
    fn test_remove_counts_entries() {
        let mut headers = sample();
        assert_eq!(headers.remove("accept-encoding"), 2);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.remove("accept-encoding"), 0);
    }

    #[test]
    fn test_keys_are_distinct() {
        assert_eq!(sample().keys(), vec!["Host", "Accept-Encoding", "X-Trace"]);
    }

    #[test]
    fn test_in_any() {
        let headers = sample();
        assert!(headers.in_any("accept-encoding", "deflate", false));
        assert!(!headers.in_any("accept-encoding", "DEFLATE", false));
        assert!(headers.in_any("accept-encoding", "DEFLATE", true));
        assert!(!headers.in_any("host", "other", true));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = Headers::from(vec![("A", "1"), ("B", "2")]);
        let b = Headers::from(vec![("B", "2"), ("A", "1")]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_display() {
        let headers = Headers::from(vec![("Host", "example.com"), ("Accept", "*/*")]);
        assert_eq!(headers.to_string(), "Host: example.com\r\nAccept: */*\r\n");
    }

    #[test]
    fn test_header_tokens() {
        let headers = Headers::from(vec![
            ("Accept-Encoding", "gzip, deflate"),
            ("Accept-Encoding", "br"),
        ]);
        assert_eq!(
            get_header_tokens(&headers, "accept-encoding"),
            vec!["gzip", "deflate", "br"]
        );
    }

    #[test]
    fn test_header_tokens_missing_key() {
        assert!(get_header_tokens(&sample(), "connection").is_empty());
    }

    #[test]
    fn test_header_tokens_keep_empty_pieces() {
        let headers = Headers::from(vec![("Connection", " keep-alive ,, Upgrade ")]);
        assert_eq!(
            get_header_tokens(&headers, "connection"),
            vec!["keep-alive", "", "Upgrade"]
        );
    }
}
