//! Core contract for the MediaKit rendering pipeline
//!
//! This crate defines the capability contract every media renderer
//! implements, the shared data model (descriptors, provider types, render
//! options, style tables), the generic embed markup builders, and the
//! registry that dispatches a URL to the first renderer claiming it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod markup;
pub mod registry;
pub mod renderer;
pub mod style;
pub mod urls;

pub use descriptor::{MediaDescriptor, ProviderType, RenderOptions};
pub use registry::{RegistryError, RendererRegistry};
pub use renderer::{MediaRenderer, MetaMap, RenderError, Result};
pub use style::{StyleMap, StyleTable};
