//! Renderer crate for the animated greeting window.
//!
//! The module glues the winit window, `wgpu` pipeline, and GLSL shader
//! wrapping together. The overall flow is:
//!
//! ```text
//!   birthdaycard CLI
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ winit event loop ──▶ GpuState::render()
//!          ▲                 │                    ▲
//!          │           ControlState ── AnimationTimeline
//! ```
//!
//! The event loop owns all mutable state (GPU resources, control flags, the
//! animation timeline), and the fragment shader file is wrapped at runtime
//! so plain GLSL can be compiled through wgpu's GLSL frontend and fed the
//! expected uniforms.

mod anim;
mod compile;
mod controls;
mod gpu;
mod source;
mod types;
mod window;

use anyhow::Result;

pub use anim::{scale_at, ANIM_DURATION, ANIM_START, SCALE_END, SCALE_START};
pub use source::{ShaderSource, ShaderSourceError, DEFAULT_SHADER_FILE, MAX_SHADER_SOURCE_BYTES};
pub use types::{
    RendererConfig, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH,
};

/// Thin entry point that owns the configuration and drives the window.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Initialisation failures (window, adapter, device) and shader-source
    /// or shader-compile failures are returned as errors; the caller is
    /// expected to treat them as fatal.
    pub fn run(&mut self) -> Result<()> {
        window::run(self.config.clone())
    }
}
