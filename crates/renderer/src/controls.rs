//! Keyboard-driven control state.
//!
//! The window layer maps raw key presses to [`ControlEvent`]s and feeds them
//! through [`ControlState::apply`], which owns the toggle flags and reports
//! the side effects to perform. Keeping the state machine free of windowing
//! types lets every transition be exercised in unit tests.

use std::time::{Duration, Instant};

/// Discrete control events produced by the window layer's key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlEvent {
    /// Close the window; the loop exits after the current frame.
    Quit,
    /// Rerun the animation from the beginning, leaving display state alone.
    Replay,
    /// Restore window geometry, vsync, and title defaults, then replay.
    Reset,
    /// Maximize the window, or restore it if already maximized.
    ToggleMaximize,
    /// Flip the vsync flag and apply it to the presentation engine.
    ToggleVsync,
    /// Show or hide the FPS overlay in the window title.
    ToggleFpsDisplay,
}

/// Side effects the window layer must perform after applying an event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ControlOutcome {
    pub restart_animation: bool,
    pub restart_fps_window: bool,
    pub restore_geometry: bool,
    pub toggle_maximize: bool,
    pub apply_vsync: bool,
    pub refresh_title: bool,
}

/// Flags toggled by the keyboard, plus the quit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ControlState {
    pub vsync: bool,
    pub show_fps: bool,
    pub quit_requested: bool,
}

impl ControlState {
    pub fn new(vsync: bool) -> Self {
        Self {
            vsync,
            show_fps: false,
            quit_requested: false,
        }
    }

    /// Applies one control event and reports what the window layer must do.
    pub fn apply(&mut self, event: ControlEvent) -> ControlOutcome {
        let mut outcome = ControlOutcome::default();
        match event {
            ControlEvent::Quit => {
                self.quit_requested = true;
            }
            ControlEvent::Replay => {
                outcome.restart_animation = true;
                outcome.restart_fps_window = true;
            }
            ControlEvent::Reset => {
                self.vsync = true;
                self.show_fps = false;
                outcome.apply_vsync = true;
                outcome.restore_geometry = true;
                outcome.restart_animation = true;
                outcome.restart_fps_window = true;
                outcome.refresh_title = true;
            }
            ControlEvent::ToggleMaximize => {
                outcome.toggle_maximize = true;
            }
            ControlEvent::ToggleVsync => {
                self.vsync = !self.vsync;
                outcome.apply_vsync = true;
            }
            ControlEvent::ToggleFpsDisplay => {
                self.show_fps = !self.show_fps;
                if self.show_fps {
                    outcome.restart_fps_window = true;
                }
                outcome.refresh_title = true;
            }
        }
        outcome
    }
}

/// Counts presented frames and emits one sample per second.
///
/// The baseline advances by exactly one second per sample, so a slow frame
/// cannot accumulate drift into later samples.
pub(crate) struct FpsCounter {
    frames: u32,
    baseline: Instant,
}

impl FpsCounter {
    const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            baseline: now,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.frames = 0;
        self.baseline = now;
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Records one presented frame; returns the completed sample, if any.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.saturating_duration_since(self.baseline) >= Self::SAMPLE_WINDOW {
            let count = self.frames;
            self.frames = 0;
            self.baseline += Self::SAMPLE_WINDOW;
            Some(count)
        } else {
            None
        }
    }
}

/// Title shown in the window chrome, with the FPS overlay when enabled.
pub(crate) fn window_title(base: &str, fps: Option<u32>) -> String {
    match fps {
        Some(count) => format!("{base}  (FPS: {count})"),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_toggle_is_an_idempotent_pair() {
        let mut state = ControlState::new(true);
        let outcome = state.apply(ControlEvent::ToggleVsync);
        assert!(!state.vsync);
        assert!(outcome.apply_vsync);
        state.apply(ControlEvent::ToggleVsync);
        assert!(state.vsync);
    }

    #[test]
    fn fps_toggle_restarts_the_sampling_window_only_when_enabling() {
        let mut state = ControlState::new(true);
        let enabling = state.apply(ControlEvent::ToggleFpsDisplay);
        assert!(state.show_fps);
        assert!(enabling.restart_fps_window);
        assert!(enabling.refresh_title);

        let disabling = state.apply(ControlEvent::ToggleFpsDisplay);
        assert!(!state.show_fps);
        assert!(!disabling.restart_fps_window);
        assert!(disabling.refresh_title);
    }

    #[test]
    fn replay_leaves_display_state_untouched() {
        let mut state = ControlState::new(false);
        state.apply(ControlEvent::ToggleFpsDisplay);
        let outcome = state.apply(ControlEvent::Replay);
        assert!(outcome.restart_animation);
        assert!(outcome.restart_fps_window);
        assert!(!outcome.restore_geometry);
        assert!(!outcome.apply_vsync);
        assert!(!state.vsync);
        assert!(state.show_fps);
    }

    #[test]
    fn reset_forces_vsync_on_and_hides_the_fps_display() {
        let mut state = ControlState::new(true);
        state.apply(ControlEvent::ToggleVsync);
        state.apply(ControlEvent::ToggleFpsDisplay);

        let outcome = state.apply(ControlEvent::Reset);
        assert!(state.vsync);
        assert!(!state.show_fps);
        assert!(outcome.apply_vsync);
        assert!(outcome.restore_geometry);
        assert!(outcome.restart_animation);
        assert!(outcome.refresh_title);
    }

    #[test]
    fn quit_marks_the_state_without_side_effects() {
        let mut state = ControlState::new(true);
        let outcome = state.apply(ControlEvent::Quit);
        assert!(state.quit_requested);
        assert_eq!(outcome, ControlOutcome::default());
    }

    #[test]
    fn fps_counter_resets_to_zero_on_restart() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        counter.tick(start + Duration::from_millis(10));
        counter.tick(start + Duration::from_millis(20));
        assert_eq!(counter.frames(), 2);
        counter.restart(start + Duration::from_millis(30));
        assert_eq!(counter.frames(), 0);
    }

    #[test]
    fn fps_counter_advances_the_baseline_without_drift() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        // First sample completes 1.5s in; the baseline still moves to +1s,
        // so the second sample completes at +2s rather than +2.5s.
        for step in 1..15 {
            let sample = counter.tick(start + Duration::from_millis(step * 100));
            if step < 10 {
                assert_eq!(sample, None);
            } else if step == 10 {
                assert_eq!(sample, Some(10));
            } else if step < 15 {
                assert_eq!(sample, None);
            }
        }
        let second = counter.tick(start + Duration::from_millis(2000));
        assert_eq!(second, Some(5));
    }

    #[test]
    fn title_includes_fps_overlay_only_when_present() {
        assert_eq!(window_title("Happy Birthday Sam!", None), "Happy Birthday Sam!");
        assert_eq!(
            window_title("Happy Birthday Sam!", Some(60)),
            "Happy Birthday Sam!  (FPS: 60)"
        );
    }
}
