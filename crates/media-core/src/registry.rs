//! Renderer registry and dispatch
//!
//! The registry holds the renderers in registration order and owns the two
//! dispatch paths: sniffing a raw URL (first `is_supported` match wins,
//! deterministically) and direct lookup by the provider tag a descriptor
//! already carries. Descriptor-driven calls never re-sniff a URL; only
//! `location` is guaranteed to still exist.

use crate::descriptor::{MediaDescriptor, ProviderType, RenderOptions};
use crate::renderer::{MediaRenderer, RenderError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A second renderer claimed an already-claimed provider tag
    #[error("provider type '{0}' is already claimed by another renderer")]
    DuplicateType(ProviderType),
}

/// Ordered collection of renderers behind the shared capability contract
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: Vec<Arc<dyn MediaRenderer>>,
    by_type: HashMap<ProviderType, usize>,
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, failing fast on duplicate provider tags
    pub fn register(
        &mut self,
        renderer: Arc<dyn MediaRenderer>,
    ) -> std::result::Result<(), RegistryError> {
        let types = renderer.supported_types();
        for media_type in &types {
            if self.by_type.contains_key(media_type) {
                return Err(RegistryError::DuplicateType(*media_type));
            }
        }

        let index = self.renderers.len();
        for media_type in types {
            self.by_type.insert(media_type, index);
        }
        tracing::debug!("registered media renderer '{}'", renderer.name());
        self.renderers.push(renderer);
        Ok(())
    }

    /// First registered renderer whose `is_supported` accepts the URL
    pub fn resolve_by_url(&self, url: &str) -> Option<&dyn MediaRenderer> {
        self.renderers
            .iter()
            .find(|renderer| renderer.is_supported(url))
            .map(|renderer| renderer.as_ref())
    }

    /// Renderer claiming the given provider tag
    pub fn resolve_by_type(&self, media_type: ProviderType) -> Option<&dyn MediaRenderer> {
        self.by_type
            .get(&media_type)
            .map(|&index| self.renderers[index].as_ref())
    }

    /// Provider tag for a URL, `None` when no renderer matches
    pub fn media_type(&self, url: &str) -> Option<ProviderType> {
        self.resolve_by_url(url).map(|renderer| renderer.provider_type())
    }

    /// Classify a URL and extract its identifier into a descriptor
    ///
    /// This is the caller-side descriptor lifecycle in one call: dispatch,
    /// identifier extraction, construction.
    pub async fn descriptor_for_url(&self, url: &str) -> Result<MediaDescriptor> {
        let renderer = self
            .resolve_by_url(url)
            .ok_or_else(|| RenderError::UnsupportedUrl(url.to_string()))?;
        let media_id = renderer.media_id(url).await?;
        Ok(MediaDescriptor::new(renderer.provider_type(), media_id))
    }

    /// Dispatch a raw URL to its renderer and render it
    pub async fn render_by_url(&self, url: &str, options: &RenderOptions) -> Result<String> {
        let renderer = self
            .resolve_by_url(url)
            .ok_or_else(|| RenderError::UnsupportedUrl(url.to_string()))?;
        renderer.render_by_url(url, options).await
    }

    /// Dispatch a descriptor by its declared type and render it
    pub async fn render(&self, media: &MediaDescriptor, options: &RenderOptions) -> Result<String> {
        let renderer = self.resolve_by_type(media.media_type).ok_or_else(|| {
            RenderError::UnsupportedUrl(format!(
                "no renderer registered for type '{}'",
                media.media_type
            ))
        })?;
        renderer.render(media, options).await
    }

    /// Registered provider tags in registration order
    pub fn types(&self) -> Vec<ProviderType> {
        self.renderers
            .iter()
            .map(|renderer| renderer.provider_type())
            .collect()
    }

    /// Registered renderers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn MediaRenderer> {
        self.renderers.iter().map(|renderer| renderer.as_ref())
    }

    /// Number of registered renderers
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MetaMap;
    use crate::style::StyleMap;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Renderer {}

        #[async_trait]
        impl MediaRenderer for Renderer {
            fn name(&self) -> &'static str;
            fn provider_type(&self) -> ProviderType;
            fn style(&self, view: &str) -> StyleMap;
            fn is_supported(&self, url: &str) -> bool;
            fn icon(&self, media_type: ProviderType) -> &'static str;
            async fn media_id(&self, url: &str) -> Result<String>;
            fn embed_url(&self, media_id: &str) -> String;
            async fn render(&self, media: &MediaDescriptor, options: &RenderOptions) -> Result<String>;
            async fn meta(&self, url: &str, is_file: bool) -> Result<Option<MetaMap>>;
            async fn thumbnail(&self, url: &str) -> Result<String>;
            fn native_url(&self, media: &MediaDescriptor) -> String;
        }
    }

    /// Mock renderer claiming `media_type` and matching URLs containing
    /// `marker`
    fn renderer_for(
        media_type: ProviderType,
        name: &'static str,
        marker: &'static str,
    ) -> MockRenderer {
        let mut mock = MockRenderer::new();
        mock.expect_name().return_const(name);
        mock.expect_provider_type().return_const(media_type);
        mock.expect_is_supported()
            .returning(move |url| url.contains(marker));
        mock.expect_media_id().returning(|url| {
            match url.rsplit('/').next() {
                Some("") | None => Err(RenderError::MalformedIdentifier(url.to_string())),
                Some(segment) => Ok(segment.to_string()),
            }
        });
        mock.expect_render()
            .returning(move |media, _| Ok(format!("{}:{}", name, media.location)));
        mock
    }

    #[test]
    fn test_register_rejects_duplicate_type() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "vimeo", "vimeo.com")))
            .unwrap();

        let err = registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "vimeo2", "vimeo.com")))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateType(ProviderType::Vimeo)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_by_url_first_match_wins() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::Image, "first", "example.com")))
            .unwrap();
        registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "second", "example.com")))
            .unwrap();

        let resolved = registry.resolve_by_url("https://example.com/pic").unwrap();
        assert_eq!(resolved.name(), "first");
    }

    #[test]
    fn test_resolve_by_url_no_match() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "vimeo", "vimeo.com")))
            .unwrap();

        assert!(registry.resolve_by_url("https://example.com").is_none());
        assert!(registry.media_type("https://example.com").is_none());
    }

    #[test]
    fn test_resolve_by_type() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "vimeo", "vimeo.com")))
            .unwrap();
        registry
            .register(Arc::new(renderer_for(ProviderType::YouTube, "youtube", "youtube.com")))
            .unwrap();

        let resolved = registry.resolve_by_type(ProviderType::YouTube).unwrap();
        assert_eq!(resolved.name(), "youtube");
        assert!(registry.resolve_by_type(ProviderType::Image).is_none());
    }

    #[tokio::test]
    async fn test_descriptor_for_url() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "vimeo", "vimeo.com")))
            .unwrap();

        let media = registry
            .descriptor_for_url("https://vimeo.com/76979871")
            .await
            .unwrap();
        assert_eq!(media.media_type, ProviderType::Vimeo);
        assert_eq!(media.location, "76979871");
    }

    #[tokio::test]
    async fn test_descriptor_for_url_unsupported() {
        let registry = RendererRegistry::new();
        let err = registry
            .descriptor_for_url("https://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedUrl(_)));
    }

    #[tokio::test]
    async fn test_render_dispatches_by_declared_type() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::Vimeo, "vimeo", "vimeo.com")))
            .unwrap();

        let media = MediaDescriptor::new(ProviderType::Vimeo, "76979871");
        let markup = registry.render(&media, &RenderOptions::new()).await.unwrap();
        assert_eq!(markup, "vimeo:76979871");
    }

    #[tokio::test]
    async fn test_render_unregistered_type() {
        let registry = RendererRegistry::new();
        let media = MediaDescriptor::new(ProviderType::Image, "/pic.png");
        let err = registry
            .render(&media, &RenderOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedUrl(_)));
    }

    #[test]
    fn test_types_in_registration_order() {
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(renderer_for(ProviderType::YouTube, "youtube", "youtube.com")))
            .unwrap();
        registry
            .register(Arc::new(renderer_for(ProviderType::Image, "image", ".png")))
            .unwrap();

        assert_eq!(registry.types(), vec![ProviderType::YouTube, ProviderType::Image]);
        assert_eq!(registry.iter().count(), 2);
        assert!(!registry.is_empty());
    }
}
