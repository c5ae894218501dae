//! Query parameter mapping for AT Internet API requests.
//!
//! Parameters arrive either as a `&`-delimited string (the form you would
//! paste out of the AT Internet Data Query explorer) or as an already built
//! mapping. Both resolve to one canonical internal representation that keeps
//! insertion order, so the serialized query matches what the caller wrote.

use crate::error::{ParamsError, Result};

/// An ordered mapping of query parameter names to values.
///
/// Insertion order is preserved and last-write-wins on duplicate keys. The
/// mapping is deliberately mutable: callers reassign individual entries
/// between operations (for example switching `space`) and every operation
/// re-reads current state when it serializes the outgoing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParameters {
    entries: Vec<(String, String)>,
}

impl QueryParameters {
    /// Creates an empty parameter mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `&`-delimited parameter string into a mapping.
    ///
    /// A leading `?` or `&` is stripped. Each segment must contain a `=`;
    /// the value is everything after the first `=`, so values containing
    /// further `=` characters survive intact. Braces across the whole string
    /// must balance since AT Internet values use `{...}` grouping.
    pub fn parse(raw: &str) -> Result<Self, ParamsError> {
        let raw = raw
            .strip_prefix('?')
            .or_else(|| raw.strip_prefix('&'))
            .unwrap_or(raw);

        if raw.is_empty() {
            return Err(ParamsError::Empty);
        }
        check_braces(raw)?;

        let mut params = Self::new();
        for segment in raw.split('&') {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ParamsError::missing_separator(segment))?;
            params.set(key, value);
        }
        Ok(params)
    }

    /// Sets a parameter, replacing any existing value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes a parameter, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Returns true if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the mapping back into its canonical `&`-delimited form.
    ///
    /// `parse` and `to_query_string` are inverses: parsing the output of
    /// this function yields an equal mapping.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Returns the pairs as owned tuples for handing to the transport.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }
}

impl FromIterator<(String, String)> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryParameters {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

fn check_braces(raw: &str) -> Result<(), ParamsError> {
    let mut depth: i64 = 0;
    for ch in raw.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ParamsError::UnbalancedBraces(raw.to_string()));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParamsError::UnbalancedBraces(raw.to_string()));
    }
    Ok(())
}

/// Either form a caller may hand to the builder: a raw string to be parsed,
/// or an already built mapping taken as-is.
#[derive(Debug, Clone)]
pub enum ParamsInput {
    /// Raw `&`-delimited string
    Raw(String),
    /// Already parsed mapping
    Map(QueryParameters),
}

impl ParamsInput {
    /// Resolves the input into the canonical mapping form.
    pub fn resolve(self) -> Result<QueryParameters, ParamsError> {
        match self {
            Self::Raw(raw) => QueryParameters::parse(&raw),
            Self::Map(params) => Ok(params),
        }
    }
}

impl From<&str> for ParamsInput {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for ParamsInput {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<QueryParameters> for ParamsInput {
    fn from(params: QueryParameters) -> Self {
        Self::Map(params)
    }
}
