//! Per-renderer style tables
//!
//! Every renderer carries a static table mapping a view context (`"view"`,
//! `"editor"`, `"post"`, …) to CSS dimension hints. Tables are built once at
//! renderer construction and are immutable afterwards, so concurrent reads
//! need no locking.

use std::collections::BTreeMap;

/// CSS property → value mapping
///
/// An ordered map so serialized `style` attributes come out deterministic.
pub type StyleMap = BTreeMap<String, String>;

/// The fallback view context every table must define
pub const DEFAULT_VIEW: &str = "view";

/// Immutable view-context → style mapping
///
/// The `view` entry is required by construction; lookups for unknown
/// contexts fall back to it.
///
/// # Examples
/// ```
/// use media_core::StyleTable;
///
/// let styles = StyleTable::new(&[("max-width", "100%")])
///     .with_context("editor", &[("width", "560px")]);
/// assert_eq!(styles.get("banner"), styles.get("view"));
/// ```
#[derive(Debug, Clone)]
pub struct StyleTable {
    view: StyleMap,
    contexts: BTreeMap<String, StyleMap>,
}

impl StyleTable {
    /// Create a table from the required `view` entry
    pub fn new(view: &[(&str, &str)]) -> Self {
        Self {
            view: to_style_map(view),
            contexts: BTreeMap::new(),
        }
    }

    /// Add a named view context
    pub fn with_context(mut self, name: impl Into<String>, style: &[(&str, &str)]) -> Self {
        self.contexts.insert(name.into(), to_style_map(style));
        self
    }

    /// Look up the style for a view context, falling back to `view`
    pub fn get(&self, view_context: &str) -> &StyleMap {
        if view_context == DEFAULT_VIEW {
            return &self.view;
        }
        self.contexts.get(view_context).unwrap_or(&self.view)
    }
}

fn to_style_map(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
