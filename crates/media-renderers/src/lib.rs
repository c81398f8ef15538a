//! Built-in media renderer implementations
//!
//! One module per provider: raw image files, Vimeo, and YouTube. Each
//! renderer implements the `media-core` capability contract;
//! [`default_registry`] wires all of them in the canonical registration
//! order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod image;
pub mod vimeo;
pub mod youtube;

pub use image::ImageRenderer;
pub use vimeo::{VimeoApiClient, VimeoApiConfig, VimeoApiError, VimeoRenderer};
pub use youtube::YouTubeRenderer;

use media_core::RendererRegistry;
use std::sync::Arc;

/// Build a registry holding every built-in renderer
///
/// Registration order is image, Vimeo, YouTube; URL dispatch follows this
/// order deterministically.
pub fn default_registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    registry
        .register(Arc::new(ImageRenderer::new()))
        .expect("built-in provider types are unique");
    registry
        .register(Arc::new(VimeoRenderer::new()))
        .expect("built-in provider types are unique");
    registry
        .register(Arc::new(YouTubeRenderer::new()))
        .expect("built-in provider types are unique");
    registry
}
