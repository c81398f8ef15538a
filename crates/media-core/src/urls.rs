//! URL primitives shared by the renderer classifiers
//!
//! Thin helpers over [`url::Url`] covering what the per-provider URL
//! grammars need: host substring checks, path segment extraction, query
//! parameters, and file-extension detection that survives query strings
//! containing dots.

use std::collections::BTreeMap;
use url::Url;

/// Parse an absolute URL, `None` for relative or unparseable input
pub fn parse(url: &str) -> Option<Url> {
    Url::parse(url).ok()
}

/// Whether the URL's host contains the given needle
///
/// Substring match, so short-link and regional domain variants
/// (`www.youtube.com`, `youtu.be`) resolve with one check each.
pub fn host_contains(url: &Url, needle: &str) -> bool {
    url.host_str().is_some_and(|host| host.contains(needle))
}

/// Whether the URL's path carries at least one non-empty segment
pub fn has_path_segment(url: &Url) -> bool {
    url.path_segments()
        .is_some_and(|mut segments| segments.any(|segment| !segment.is_empty()))
}

/// The component after the last `/` of the path, `None` when empty
///
/// Mirrors the identifier rule of the path-based providers: a trailing
/// slash yields `None`, which callers report as a malformed identifier.
pub fn final_path_segment(url: &Url) -> Option<&str> {
    match url.path().rsplit('/').next() {
        Some("") | None => None,
        Some(segment) => Some(segment),
    }
}

/// All query parameters of the URL as an ordered map
pub fn query_params(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Lower-cased file extension of the URL's last path segment
///
/// The query and fragment are stripped first and the split happens on the
/// last path separator, so dots inside query strings never corrupt
/// detection.
pub fn extension(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_query.rsplit('/').next().unwrap_or(without_query);
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
