//! The renderer capability contract
//!
//! Every provider implements [`MediaRenderer`]; callers hold renderers as
//! trait objects and never branch on the provider tag. Asynchronous
//! operations are `async fn`s returning [`Result`]: exactly one success
//! value or one failure, never both.

use crate::descriptor::{MediaDescriptor, ProviderType, RenderOptions};
use crate::style::StyleMap;
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure kinds surfaced by renderer operations
///
/// None of these are retried inside the core; every failure reaches the
/// caller, which decides on placeholders or retries.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The URL is not supported by the targeted renderer, or no renderer
    /// matched at all
    #[error("URL not supported: {0}")]
    UnsupportedUrl(String),

    /// A structurally supported URL lacks the expected identifier
    /// component, e.g. an empty final path segment
    #[error("supported URL is missing its media identifier: {0}")]
    MalformedIdentifier(String),

    /// Connection, DNS, or non-success response from a provider API
    #[error("network failure: {0}")]
    Network(String),

    /// The bounded network timeout elapsed
    #[error("provider request timed out")]
    Timeout,

    /// Provider response body was not valid JSON or lacked expected fields
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Metadata mapping returned by [`MediaRenderer::meta`]
pub type MetaMap = BTreeMap<String, String>;

/// The capability contract implemented by every media renderer
///
/// All implementations are stateless across calls: each method is either
/// pure or takes everything it needs as parameters, so a renderer shared
/// behind an `Arc` is safe to invoke concurrently for different URLs.
#[async_trait]
pub trait MediaRenderer: Send + Sync {
    /// Stable renderer identifier for diagnostics and registry keys
    fn name(&self) -> &'static str;

    /// The one provider tag this renderer claims
    fn provider_type(&self) -> ProviderType;

    /// The provider tags this renderer supports
    fn supported_types(&self) -> Vec<ProviderType> {
        vec![self.provider_type()]
    }

    /// File extensions this renderer recognizes, empty for URL-grammar
    /// providers
    fn supported_extensions(&self) -> &[&'static str] {
        &[]
    }

    /// Style for the given view context, falling back to the `view` entry
    fn style(&self, view: &str) -> StyleMap;

    /// Whether this renderer supports the URL
    ///
    /// Side-effect-free and fast; the registry calls this for dispatch.
    fn is_supported(&self, url: &str) -> bool;

    /// The provider tag for a URL, `None` iff [`Self::is_supported`] is false
    fn media_type(&self, url: &str) -> Option<ProviderType> {
        if self.is_supported(url) {
            Some(self.provider_type())
        } else {
            None
        }
    }

    /// Icon glyph identifier for the provider tag, purely cosmetic
    fn icon(&self, media_type: ProviderType) -> &'static str;

    /// Extract the provider-unique identifier from a supported URL
    ///
    /// Fails with [`RenderError::UnsupportedUrl`] for foreign URLs and
    /// [`RenderError::MalformedIdentifier`] when a supported URL lacks the
    /// expected component. Callers are expected to pre-check
    /// [`Self::is_supported`]; this never panics regardless.
    async fn media_id(&self, url: &str) -> Result<String>;

    /// Embed source URI for a media identifier, pure and synchronous
    fn embed_url(&self, media_id: &str) -> String;

    /// Render a media descriptor into an HTML fragment
    ///
    /// Only `location` is guaranteed meaningful on the descriptor.
    async fn render(&self, media: &MediaDescriptor, options: &RenderOptions) -> Result<String>;

    /// Render straight from a raw URL
    async fn render_by_url(&self, url: &str, options: &RenderOptions) -> Result<String> {
        let media_id = self.media_id(url).await?;
        let media = MediaDescriptor::new(self.provider_type(), media_id);
        self.render(&media, options).await
    }

    /// Ancillary provider metadata for the URL, `None` when the provider
    /// has none
    ///
    /// `is_file` flags locally-uploaded files as opposed to remote
    /// resources; it is reserved for providers that care about the
    /// distinction and is currently unused by all built-in renderers.
    async fn meta(&self, url: &str, is_file: bool) -> Result<Option<MetaMap>>;

    /// Thumbnail URI for the media resource, possibly empty
    ///
    /// May perform network I/O depending on the provider.
    async fn thumbnail(&self, url: &str) -> Result<String>;

    /// Canonical externally-visible URL reconstructed from the descriptor
    fn native_url(&self, media: &MediaDescriptor) -> String;
}
