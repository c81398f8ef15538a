//! YouTube renderer
//!
//! Two independent URL grammars resolve to the same provider: the full site
//! (`youtube.com/watch?v={id}`) and the short-link domain
//! (`youtu.be/{id}`). The full-site form is checked first; a URL can only
//! satisfy both when malformed, and first-match-wins keeps extraction
//! deterministic.

use async_trait::async_trait;
use media_core::markup;
use media_core::renderer::{MediaRenderer, MetaMap, RenderError, Result};
use media_core::style::{StyleMap, StyleTable};
use media_core::urls;
use media_core::{MediaDescriptor, ProviderType, RenderOptions};
use url::Url;

/// Renderer for YouTube-hosted videos
pub struct YouTubeRenderer {
    styles: StyleTable,
}

impl YouTubeRenderer {
    /// Create the renderer
    pub fn new() -> Self {
        Self {
            styles: StyleTable::new(&[("max-width", "100%")])
                .with_context("editor", &[("width", "560px"), ("height", "315px")])
                .with_context("post", &[("width", "560px"), ("height", "315px")]),
        }
    }

    /// Whether the parsed URL is the full-site form with a `v` parameter
    pub fn is_full_site(url: &Url) -> bool {
        urls::host_contains(url, "youtube.com")
            && url
                .query_pairs()
                .any(|(key, value)| key == "v" && !value.is_empty())
    }

    /// Whether the parsed URL is the short-link form with a media path
    pub fn is_short_link(url: &Url) -> bool {
        urls::host_contains(url, "youtu.be") && urls::has_path_segment(url)
    }
}

impl Default for YouTubeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaRenderer for YouTubeRenderer {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::YouTube
    }

    fn style(&self, view: &str) -> StyleMap {
        self.styles.get(view).clone()
    }

    fn is_supported(&self, url: &str) -> bool {
        urls::parse(url)
            .map(|parsed| Self::is_full_site(&parsed) || Self::is_short_link(&parsed))
            .unwrap_or(false)
    }

    fn icon(&self, _media_type: ProviderType) -> &'static str {
        "youtube"
    }

    async fn media_id(&self, url: &str) -> Result<String> {
        let parsed =
            urls::parse(url).ok_or_else(|| RenderError::UnsupportedUrl(url.to_string()))?;

        // full-site form wins when both grammars could match
        if Self::is_full_site(&parsed) {
            return parsed
                .query_pairs()
                .find(|(key, value)| key == "v" && !value.is_empty())
                .map(|(_, value)| value.into_owned())
                .ok_or_else(|| RenderError::MalformedIdentifier(url.to_string()));
        }

        if Self::is_short_link(&parsed) {
            return match urls::final_path_segment(&parsed) {
                Some(segment) => Ok(segment.to_string()),
                None => Err(RenderError::MalformedIdentifier(url.to_string())),
            };
        }

        Err(RenderError::UnsupportedUrl(url.to_string()))
    }

    fn embed_url(&self, media_id: &str) -> String {
        format!("//www.youtube.com/embed/{}", media_id)
    }

    async fn render(&self, media: &MediaDescriptor, options: &RenderOptions) -> Result<String> {
        let embed_url = self.embed_url(&media.location);
        let style = options.effective_style(|view| self.style(view));
        Ok(markup::frame_embed(&embed_url, &options.attrs, &style))
    }

    async fn meta(&self, url: &str, _is_file: bool) -> Result<Option<MetaMap>> {
        let parsed =
            urls::parse(url).ok_or_else(|| RenderError::UnsupportedUrl(url.to_string()))?;
        // the full-site form carries its metadata in the query string; the
        // short-link form legitimately yields an empty mapping
        Ok(Some(urls::query_params(&parsed)))
    }

    async fn thumbnail(&self, url: &str) -> Result<String> {
        let media_id = self.media_id(url).await?;
        Ok(format!("http://img.youtube.com/vi/{}/0.jpg", media_id))
    }

    fn native_url(&self, media: &MediaDescriptor) -> String {
        format!("https://www.youtube.com/watch?v={}", media.location)
    }
}
