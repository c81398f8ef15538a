//! Media descriptors, provider types, and per-call render options
//!
//! A [`MediaDescriptor`] is the minimal record callers persist for a media
//! resource: the provider tag plus the provider-specific identifier. The
//! identifier's shape is opaque outside the owning renderer; the only
//! guarantee is that the renderer for `media_type` can always turn
//! `location` back into a valid embed URL.

use crate::style::{StyleMap, DEFAULT_VIEW};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown provider tag
#[derive(Debug, Error)]
#[error("unknown provider type: {0}")]
pub struct UnknownProviderType(pub String);

/// The provider a media resource belongs to
///
/// Exactly one renderer claims each tag; the registry enforces uniqueness
/// at registration time. Adding a provider means adding a variant here and
/// registering its renderer; call sites dispatch through the registry and
/// never branch on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Raw image file, locally or remotely hosted
    Image,
    /// Vimeo-hosted video
    Vimeo,
    /// YouTube-hosted video
    YouTube,
}

impl ProviderType {
    /// Get the provider tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Image => "image",
            ProviderType::Vimeo => "vimeo",
            ProviderType::YouTube => "youtube",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = UnknownProviderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ProviderType::Image),
            "vimeo" => Ok(ProviderType::Vimeo),
            "youtube" => Ok(ProviderType::YouTube),
            other => Err(UnknownProviderType(other.to_string())),
        }
    }
}

/// Minimal persisted record identifying a media resource
///
/// Descriptors are transient value objects constructed by callers once a URL
/// has been classified and its identifier extracted; the core never owns or
/// caches them. Only `location` is guaranteed meaningful at render time;
/// the original URL may no longer exist.
///
/// # Examples
/// ```
/// use media_core::{MediaDescriptor, ProviderType};
///
/// let media = MediaDescriptor::new(ProviderType::Vimeo, "76979871");
/// assert_eq!(media.media_type, ProviderType::Vimeo);
/// assert_eq!(media.location, "76979871");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Provider tag naming the renderer that owns `location`
    #[serde(rename = "type")]
    pub media_type: ProviderType,
    /// Provider-specific unique identifier (NOT a raw URL for most providers)
    pub location: String,
}

impl MediaDescriptor {
    /// Create a new descriptor
    pub fn new(media_type: ProviderType, location: impl Into<String>) -> Self {
        Self {
            media_type,
            location: location.into(),
        }
    }
}

/// Caller-supplied options for a single render call
///
/// `attrs` pass through verbatim to the generated markup. `style`, when
/// present, replaces the renderer's default style wholesale; when absent the
/// renderer's style-table entry for `view` (default `"view"`) applies.
/// Options are never retained across calls.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Extra attributes applied to the generated element
    pub attrs: BTreeMap<String, String>,
    /// Explicit style overriding the renderer's default
    pub style: Option<StyleMap>,
    /// View context used to pick the default style when `style` is absent
    pub view: Option<String>,
}

impl RenderOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pass-through attribute
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Replace the renderer's default style wholesale
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    /// Pick the view context the default style is drawn from
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Resolve the style to render with
    ///
    /// An explicit `style` wins; otherwise `default_for` is consulted with
    /// the requested view context.
    pub fn effective_style<F>(&self, default_for: F) -> StyleMap
    where
        F: FnOnce(&str) -> StyleMap,
    {
        match &self.style {
            Some(style) => style.clone(),
            None => default_for(self.view.as_deref().unwrap_or(DEFAULT_VIEW)),
        }
    }
}
