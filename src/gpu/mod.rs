//! wgpu backend for the [`crate::render::Renderer`] contract.
//!
//! Provides the device context, offscreen eye targets, textured
//! eye quads, and [`GpuRenderer`], which maps the render-target stack and
//! color write masks onto wgpu render passes.

/// Shared wgpu boilerplate for screen-quad pipelines.
pub mod pipeline_helpers;
/// Textured screen quads that blit an eye target.
pub mod quad;
/// Host device and queue, output format and size.
pub mod render_context;
/// [`crate::render::Renderer`] implementation on wgpu.
pub mod renderer;
/// Offscreen color + depth render targets.
pub mod texture;

pub use renderer::GpuRenderer;
