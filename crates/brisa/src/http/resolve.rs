//! Target resolution against the client's base URL.
//!
//! A target is either an absolute URL (scheme and host), used as-is, or a
//! path appended to the base URL's path. Appending differs from RFC 3986
//! reference resolution on purpose: `/users` against `https://host/api`
//! yields `https://host/api/users`, not `https://host/users`. A
//! protocol-relative target (`//other.host/x`) keeps its own host and takes
//! the base's scheme.

use super::request::QueryParams;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use url::{ParseError, Url};

const NO_BASE_URL: &str = "cannot resolve relative path without a base URL";

/// Resolve `target` into an absolute URL.
pub(crate) fn resolve_url(base: Option<&Url>, target: &str) -> Result<Url> {
    if target.chars().any(char::is_control) {
        return Err(invalid(target));
    }

    match Url::parse(target) {
        Ok(url) if url.has_host() => Ok(url),
        // Something like "mailto:x" or "users:list": a scheme without a host.
        Ok(_) => Err(invalid(target)),
        Err(ParseError::RelativeUrlWithoutBase) => join(base, target),
        Err(_) => Err(invalid(target)),
    }
}

fn join(base: Option<&Url>, target: &str) -> Result<Url> {
    validate_relative(target)?;

    let base = base.ok_or_else(|| Error::Configuration(NO_BASE_URL.to_string()))?;
    if target.is_empty() {
        return Ok(base.clone());
    }

    // "//host/path" names its own authority and only borrows the scheme.
    if target.starts_with("//") {
        return match base.join(target) {
            Ok(url) if url.has_host() => Ok(url),
            _ => Err(invalid(target)),
        };
    }

    let (rest, fragment) = match target.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (target, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let mut url = base.clone();
    if !path.is_empty() {
        let joined = format!(
            "{}/{}",
            base.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
    }
    url.set_query(query);
    url.set_fragment(fragment);
    Ok(url)
}

fn validate_relative(target: &str) -> Result<()> {
    if target.starts_with(':') {
        return Err(invalid(target));
    }

    // A colon in the first segment would read as a scheme.
    let first_segment = target.split(['/', '?', '#']).next().unwrap_or_default();
    if first_segment.contains(':') {
        return Err(invalid(target));
    }

    let bytes = target.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Err(invalid(target));
            }
        }
    }

    Ok(())
}

fn invalid(target: &str) -> Error {
    Error::Configuration(format!("invalid URL or path: {}", target))
}

/// Merge `params` into the URL's query, re-encoding it sorted by key.
///
/// Existing values come before added ones under the same key. With no
/// params the URL is left untouched.
pub(crate) fn merge_query(url: &mut Url, params: &QueryParams) {
    if params.is_empty() {
        return;
    }

    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        merged
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    for (key, value) in params.iter() {
        merged
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, values) in &merged {
        for value in values {
            pairs.append_pair(key, value);
        }
    }
}
