//! Vimeo renderer and public-API client
//!
//! Vimeo URLs carry the video id as the final path segment. Embedding goes
//! through the provider-hosted player; thumbnails require a round trip to
//! the public simple API (`/api/v2/video/{id}.json`), which returns a JSON
//! array whose first element carries the thumbnail fields.

use async_trait::async_trait;
use media_core::markup;
use media_core::renderer::{MediaRenderer, MetaMap, RenderError, Result};
use media_core::style::{StyleMap, StyleTable};
use media_core::urls;
use media_core::{MediaDescriptor, ProviderType, RenderOptions};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// =============================================================================
// API Client
// =============================================================================

/// Errors returned by the Vimeo public API client
#[derive(Debug, Error)]
pub enum VimeoApiError {
    /// Connection or protocol failure before a response arrived
    #[error("request failed: {0}")]
    Transport(String),

    /// The bounded request timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// The provider answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The response body was not the expected JSON shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<VimeoApiError> for RenderError {
    fn from(err: VimeoApiError) -> Self {
        match err {
            VimeoApiError::Timeout => RenderError::Timeout,
            VimeoApiError::Transport(message) => RenderError::Network(message),
            VimeoApiError::Status { status, body } => {
                RenderError::Network(format!("vimeo API returned {}: {}", status, body))
            }
            VimeoApiError::Decode(message) => RenderError::Decode(message),
        }
    }
}

/// Configuration for [`VimeoApiClient`]
#[derive(Debug, Clone)]
pub struct VimeoApiConfig {
    /// Base URL of the Vimeo site, overridable for tests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for VimeoApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://vimeo.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("mediakit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl VimeoApiConfig {
    /// Create a config pointing at a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// One entry of the simple-API video response
///
/// The endpoint returns more fields than these; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    /// Numeric video id
    pub id: Option<u64>,
    /// Video title
    pub title: Option<String>,
    /// Small thumbnail URL
    pub thumbnail_small: Option<String>,
    /// Medium thumbnail URL
    pub thumbnail_medium: Option<String>,
    /// Large thumbnail URL
    pub thumbnail_large: Option<String>,
}

/// Client for the Vimeo simple API
#[derive(Debug, Clone)]
pub struct VimeoApiClient {
    client: reqwest::Client,
    config: VimeoApiConfig,
}

impl VimeoApiClient {
    /// Create a new client
    pub fn new(config: VimeoApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    /// Fetch the video records for a media id
    ///
    /// Non-success statuses fail before any decoding happens.
    pub async fn video_info(
        &self,
        media_id: &str,
    ) -> std::result::Result<Vec<VideoInfo>, VimeoApiError> {
        let request_url = format!("{}/api/v2/video/{}.json", self.config.base_url, media_id);
        tracing::debug!("fetching vimeo video info from {}", request_url);

        let response = self.client.get(&request_url).send().await.map_err(|err| {
            if err.is_timeout() {
                VimeoApiError::Timeout
            } else {
                VimeoApiError::Transport(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("vimeo API answered {} for video {}", status, media_id);
            return Err(VimeoApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| VimeoApiError::Transport(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| VimeoApiError::Decode(err.to_string()))
    }

    /// Get the client configuration
    pub fn config(&self) -> &VimeoApiConfig {
        &self.config
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Renderer for Vimeo-hosted videos
pub struct VimeoRenderer {
    api: VimeoApiClient,
    styles: StyleTable,
}

impl VimeoRenderer {
    /// Create the renderer against the production Vimeo API
    pub fn new() -> Self {
        Self::with_api_config(VimeoApiConfig::default())
    }

    /// Create the renderer with a custom API configuration
    pub fn with_api_config(config: VimeoApiConfig) -> Self {
        Self {
            api: VimeoApiClient::new(config),
            styles: StyleTable::new(&[("max-width", "100%"), ("max-height", "500px")])
                .with_context("editor", &[("width", "500px"), ("height", "281px")])
                .with_context("post", &[("width", "500px"), ("height", "281px")]),
        }
    }

    /// Whether the parsed URL points at the main Vimeo site with a media
    /// path
    pub fn is_full_site(url: &Url) -> bool {
        urls::host_contains(url, "vimeo.com") && urls::has_path_segment(url)
    }
}

impl Default for VimeoRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaRenderer for VimeoRenderer {
    fn name(&self) -> &'static str {
        "vimeo"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Vimeo
    }

    fn style(&self, view: &str) -> StyleMap {
        self.styles.get(view).clone()
    }

    fn is_supported(&self, url: &str) -> bool {
        urls::parse(url)
            .map(|parsed| Self::is_full_site(&parsed))
            .unwrap_or(false)
    }

    fn icon(&self, _media_type: ProviderType) -> &'static str {
        "vimeo-square"
    }

    async fn media_id(&self, url: &str) -> Result<String> {
        let parsed =
            urls::parse(url).ok_or_else(|| RenderError::UnsupportedUrl(url.to_string()))?;
        if !Self::is_full_site(&parsed) {
            return Err(RenderError::UnsupportedUrl(url.to_string()));
        }
        match urls::final_path_segment(&parsed) {
            Some(segment) => Ok(segment.to_string()),
            None => Err(RenderError::MalformedIdentifier(url.to_string())),
        }
    }

    fn embed_url(&self, media_id: &str) -> String {
        format!("//player.vimeo.com/video/{}", media_id)
    }

    async fn render(&self, media: &MediaDescriptor, options: &RenderOptions) -> Result<String> {
        let embed_url = self.embed_url(&media.location);
        let style = options.effective_style(|view| self.style(view));
        Ok(markup::frame_embed(&embed_url, &options.attrs, &style))
    }

    async fn meta(&self, url: &str, _is_file: bool) -> Result<Option<MetaMap>> {
        let parsed =
            urls::parse(url).ok_or_else(|| RenderError::UnsupportedUrl(url.to_string()))?;
        // the provider offers no richer metadata without a network call
        Ok(Some(urls::query_params(&parsed)))
    }

    async fn thumbnail(&self, url: &str) -> Result<String> {
        let media_id = self.media_id(url).await?;
        let entries = self.api.video_info(&media_id).await?;
        let first = entries.into_iter().next().ok_or_else(|| {
            RenderError::Decode("vimeo response contained no video entries".to_string())
        })?;
        first.thumbnail_medium.ok_or_else(|| {
            RenderError::Decode("vimeo response is missing thumbnail_medium".to_string())
        })
    }

    fn native_url(&self, media: &MediaDescriptor) -> String {
        format!("http://vimeo.com/{}", media.location)
    }
}

// =============================================================================
// Tests
// =============================================================================
