use std::path::PathBuf;

use crate::source::{ShaderSource, DEFAULT_SHADER_FILE};

/// Default window width in physical pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
/// Default window height in physical pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
/// Title shown in the window chrome when none is configured.
pub const DEFAULT_WINDOW_TITLE: &str = "Happy Birthday Sam!";

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors the CLI flags: which fragment shader to render,
/// how large the window opens, and whether presentation starts synchronized
/// to the display.
#[derive(Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels; also the geometry the reset
    /// key restores.
    pub window_size: (u32, u32),
    /// Title shown in the window chrome and the FPS overlay.
    pub window_title: String,
    /// Fragment shader to render.
    pub shader: ShaderSource,
    /// Whether presentation starts with vsync enabled.
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_size: (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            shader: ShaderSource::File(PathBuf::from(DEFAULT_SHADER_FILE)),
            vsync: true,
        }
    }
}
