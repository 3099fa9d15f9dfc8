use std::time::Instant;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::anim::AnimationTimeline;
use crate::controls::{window_title, ControlEvent, ControlState, FpsCounter};
use crate::gpu::GpuState;
use crate::types::RendererConfig;

/// Window geometry captured at startup so the reset key can restore it.
struct WindowDefaults {
    position: Option<PhysicalPosition<i32>>,
    size: PhysicalSize<u32>,
}

/// Aggregates everything the event loop mutates.
struct WindowState {
    gpu: GpuState,
    controls: ControlState,
    timeline: AnimationTimeline,
    fps: FpsCounter,
    defaults: WindowDefaults,
    title: String,
}

pub(crate) fn run(config: RendererConfig) -> Result<()> {
    let fragment_source = config.shader.load()?;

    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window_size = PhysicalSize::new(config.window_size.0, config.window_size.1);
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;

    // Capture the starting geometry before the compositor moves anything.
    let defaults = WindowDefaults {
        position: window.outer_position().ok(),
        size: window_size,
    };

    let gpu = GpuState::new(&window, window.inner_size(), &fragment_source, config.vsync)?;

    let now = Instant::now();
    let mut state = WindowState {
        gpu,
        controls: ControlState::new(config.vsync),
        timeline: AnimationTimeline::new(now, StdRng::from_entropy()),
        fps: FpsCounter::new(now),
        defaults,
        title: config.window_title,
    };

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some(control) = control_event_for_key(&event) {
                        apply_control_event(&mut state, &window, control);
                        if state.controls.quit_requested {
                            elwt.exit();
                        }
                    }
                }
                WindowEvent::Resized(new_size) => state.gpu.resize(new_size),
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    if state.controls.show_fps {
                        if let Some(count) = state.fps.tick(now) {
                            window.set_title(&window_title(&state.title, Some(count)));
                        }
                    }
                    let sample = state.timeline.sample(now);
                    match state.gpu.render(sample) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.gpu.resize(state.gpu.size());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("surface out of memory; exiting");
                            elwt.exit();
                        }
                        Err(err) => debug!("surface error: {err:?}; retrying next frame"),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
                elwt.set_control_flow(ControlFlow::Poll);
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}

/// Performs the side effects reported by the control state machine.
fn apply_control_event(state: &mut WindowState, window: &Window, event: ControlEvent) {
    let outcome = state.controls.apply(event);
    let now = Instant::now();

    if outcome.toggle_maximize {
        window.set_maximized(!window.is_maximized());
    }
    if outcome.restore_geometry {
        if let Some(position) = state.defaults.position {
            window.set_outer_position(position);
        }
        let _ = window.request_inner_size(state.defaults.size);
    }
    if outcome.apply_vsync {
        state.gpu.set_vsync(state.controls.vsync);
    }
    if outcome.restart_animation {
        state.timeline.restart(now);
        debug!(seed = state.timeline.seed(), "animation restarted");
    }
    if outcome.restart_fps_window {
        state.fps.restart(now);
    }
    if outcome.refresh_title {
        let overlay = state.controls.show_fps.then(|| state.fps.frames());
        window.set_title(&window_title(&state.title, overlay));
    }
}

/// Maps a key press (or repeat) to its control event. Releases are ignored.
fn control_event_for_key(event: &KeyEvent) -> Option<ControlEvent> {
    if event.state != ElementState::Pressed {
        return None;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Space) => Some(ControlEvent::Replay),
        Key::Character(value) => match value.as_str() {
            "q" | "Q" => Some(ControlEvent::Quit),
            "r" | "R" => Some(ControlEvent::Reset),
            "f" | "F" => Some(ControlEvent::ToggleMaximize),
            "v" | "V" => Some(ControlEvent::ToggleVsync),
            "s" | "S" => Some(ControlEvent::ToggleFpsDisplay),
            _ => None,
        },
        _ => None,
    }
}
