//! Raw image renderer
//!
//! Images carry no provider indirection: the URL itself is the media
//! identifier, the embed source, and the thumbnail. Support is decided by a
//! fixed extension allow-list mapped to MIME types.

use async_trait::async_trait;
use media_core::markup;
use media_core::renderer::{MediaRenderer, MetaMap, RenderError, Result};
use media_core::style::{StyleMap, StyleTable};
use media_core::urls;
use media_core::{MediaDescriptor, ProviderType, RenderOptions};
use std::collections::BTreeMap;

/// Extension → MIME type allow-list
const SUPPORTED: &[(&str, &str)] = &[
    ("jpg", "image/jpg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
];

const EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "svg", "webp", "gif"];

/// Renderer for locally or remotely hosted image files
pub struct ImageRenderer {
    styles: StyleTable,
}

impl ImageRenderer {
    /// Create the image renderer
    pub fn new() -> Self {
        Self {
            styles: StyleTable::new(&[("max-width", "100%"), ("max-height", "500px")])
                .with_context("editor", &[])
                .with_context("post", &[]),
        }
    }

    fn mime_for(extension: &str) -> Option<&'static str> {
        SUPPORTED
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
    }
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaRenderer for ImageRenderer {
    fn name(&self) -> &'static str {
        "image"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Image
    }

    fn supported_extensions(&self) -> &[&'static str] {
        EXTENSIONS
    }

    fn style(&self, view: &str) -> StyleMap {
        self.styles.get(view).clone()
    }

    fn is_supported(&self, url: &str) -> bool {
        urls::extension(url)
            .map(|ext| Self::mime_for(&ext).is_some())
            .unwrap_or(false)
    }

    fn icon(&self, _media_type: ProviderType) -> &'static str {
        "picture-o"
    }

    async fn media_id(&self, url: &str) -> Result<String> {
        if !self.is_supported(url) {
            return Err(RenderError::UnsupportedUrl(url.to_string()));
        }
        // the URL is its own identifier, there is no shorter canonical form
        Ok(url.to_string())
    }

    fn embed_url(&self, media_id: &str) -> String {
        media_id.to_string()
    }

    async fn render(&self, media: &MediaDescriptor, options: &RenderOptions) -> Result<String> {
        let embed_url = self.embed_url(&media.location);
        let style = options.effective_style(|view| self.style(view));
        Ok(markup::single_element_embed(
            "img",
            &embed_url,
            &options.attrs,
            &style,
        ))
    }

    async fn meta(&self, url: &str, _is_file: bool) -> Result<Option<MetaMap>> {
        let meta = urls::extension(url)
            .and_then(|ext| Self::mime_for(&ext))
            .map(|mime| BTreeMap::from([("mime".to_string(), mime.to_string())]));
        Ok(meta)
    }

    async fn thumbnail(&self, url: &str) -> Result<String> {
        // the image is its own thumbnail
        Ok(url.to_string())
    }

    fn native_url(&self, media: &MediaDescriptor) -> String {
        media.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_case_insensitive() {
        let renderer = ImageRenderer::new();
        assert!(renderer.is_supported("a/b/pic.JPG"));
        assert!(renderer.is_supported("https://cdn.example.com/pic.webp"));
        assert!(renderer.is_supported("/uploads/pic.svg"));
    }

    #[test]
    fn test_is_supported_rejects_unknown_extensions() {
        let renderer = ImageRenderer::new();
        assert!(!renderer.is_supported("a/b/pic.bmp"));
        assert!(!renderer.is_supported("a/b/document.pdf"));
        assert!(!renderer.is_supported("a/b/noextension"));
    }

    #[test]
    fn test_supported_extensions() {
        let renderer = ImageRenderer::new();
        assert_eq!(renderer.supported_extensions().len(), 6);
        assert!(renderer.supported_extensions().contains(&"gif"));
    }

    #[tokio::test]
    async fn test_media_id_is_identity() {
        let renderer = ImageRenderer::new();
        let media_id = renderer.media_id("/uploads/pic.png").await.unwrap();
        assert_eq!(media_id, "/uploads/pic.png");
        assert_eq!(renderer.embed_url(&media_id), "/uploads/pic.png");
    }

    #[tokio::test]
    async fn test_media_id_rejects_foreign_urls() {
        let renderer = ImageRenderer::new();
        let err = renderer.media_id("/uploads/clip.mp4").await.unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedUrl(_)));
    }

    #[tokio::test]
    async fn test_render_single_element() {
        let renderer = ImageRenderer::new();
        let media = MediaDescriptor::new(ProviderType::Image, "/uploads/pic.png");
        let markup = renderer
            .render(&media, &RenderOptions::new())
            .await
            .unwrap();
        assert_eq!(
            markup,
            "<img src=\"/uploads/pic.png\" style=\"max-height:500px;max-width:100%;\"/>"
        );
    }

    #[tokio::test]
    async fn test_render_editor_view_has_no_default_style() {
        let renderer = ImageRenderer::new();
        let media = MediaDescriptor::new(ProviderType::Image, "/uploads/pic.png");
        let markup = renderer
            .render(&media, &RenderOptions::new().with_view("editor"))
            .await
            .unwrap();
        assert_eq!(markup, "<img src=\"/uploads/pic.png\"/>");
    }

    #[tokio::test]
    async fn test_meta_returns_owned_mime_record() {
        let renderer = ImageRenderer::new();
        let mut meta = renderer
            .meta("/uploads/pic.png", false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(meta.get("mime"), Some(&"image/png".to_string()));

        // mutating the returned record must not leak into later calls
        meta.insert("mime".to_string(), "text/plain".to_string());
        let fresh = renderer
            .meta("/uploads/pic.png", false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.get("mime"), Some(&"image/png".to_string()));
    }

    #[tokio::test]
    async fn test_meta_none_for_unknown_extension() {
        let renderer = ImageRenderer::new();
        assert!(renderer.meta("/uploads/pic.bmp", false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_thumbnail_is_the_url() {
        let renderer = ImageRenderer::new();
        let thumb = renderer.thumbnail("/uploads/pic.gif").await.unwrap();
        assert_eq!(thumb, "/uploads/pic.gif");
    }

    #[test]
    fn test_native_url_is_location() {
        let renderer = ImageRenderer::new();
        let media = MediaDescriptor::new(ProviderType::Image, "/uploads/pic.jpeg");
        assert_eq!(renderer.native_url(&media), "/uploads/pic.jpeg");
    }

    #[test]
    fn test_style_fallback() {
        let renderer = ImageRenderer::new();
        assert_eq!(renderer.style("nonexistent-context"), renderer.style("view"));
    }

    #[test]
    fn test_icon() {
        let renderer = ImageRenderer::new();
        assert_eq!(renderer.icon(ProviderType::Image), "picture-o");
    }
}
