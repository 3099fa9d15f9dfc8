//! GPU orchestration for the greeting window.
//!
//! - `context` owns wgpu instance/device/surface wiring and reconfigures
//!   the swapchain on resize and vsync changes.
//! - `pipeline` compiles the wrapped GLSL into the full-screen quad render
//!   pipeline with a single uniform bind group.
//! - `uniforms` mirrors the injected uniform block and is written through
//!   the queue each frame.
//! - `state` glues everything together behind the `GpuState` API used by
//!   `window`.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
