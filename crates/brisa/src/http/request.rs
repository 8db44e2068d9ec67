//! Per-call request options

use crate::error::{Error, Result};
use brisa_transport::Body;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;

/// Multi-valued query parameters.
///
/// Keys are kept sorted so the encoded query is stable; values under one key
/// keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `key`, keeping any earlier values.
    pub fn append(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.params
            .entry(key.into())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Replace every value under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.params.insert(key.into(), vec![value.to_string()]);
        self
    }

    /// Values under `key`, in insertion order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterate over `(key, value)` pairs, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for QueryParams {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Options for a single call.
///
/// Passing `None` to the client is the same as passing
/// `RequestOptions::default()`.
///
/// ```rust
/// use brisa::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query("p", "35240612345678000190650010000123451000123456")
///     .header("Referer", "https://portal.example.gov.br/")
///     .body("chave=123");
/// assert_eq!(options.query_params().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RequestOptions {
    query: QueryParams,
    body: Option<Body>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.append(key, value);
        self
    }

    /// The query parameters set so far.
    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Set the query parameters wholesale.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a header for this call only. It wins over the client's defaults.
    ///
    /// Names and values are checked when the call is made; invalid ones fail
    /// the call with [`Error::Configuration`].
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub(crate) fn into_parts(self) -> Result<(QueryParams, Option<Body>, HeaderMap)> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                Error::Configuration(format!("invalid header name: {:?}", name))
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|_| {
                Error::Configuration(format!("invalid value for header {}", header_name))
            })?;
            headers.append(header_name, header_value);
        }
        Ok((self.query, self.body, headers))
    }
}
