//! Animation timing for the zoom-in reveal.
//!
//! The scene opens zoomed far out, holds for a moment, then eases in to its
//! resting scale. Everything here is pure computation over an elapsed-time
//! value; the window layer supplies `Instant`s and uploads the results as
//! uniforms.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;

/// Seconds the opening scale is held before the zoom begins.
pub const ANIM_START: f32 = 1.0;
/// Seconds the zoom takes from start to rest.
pub const ANIM_DURATION: f32 = 9.0;
/// Scale the scene opens at.
pub const SCALE_START: f32 = 10.0;
/// Scale the scene comes to rest at.
pub const SCALE_END: f32 = 1.5;

/// Ease-out cubic, `1 - (1 - x)^3`: starts fast and decelerates toward 1.
pub(crate) fn ease_out_cubic(x: f32) -> f32 {
    let clamped = x.clamp(0.0, 1.0);
    1.0 - (1.0 - clamped).powi(3)
}

/// Eased scale for `elapsed` seconds since the last reset.
///
/// Pinned at [`SCALE_START`] until the zoom begins and at [`SCALE_END`] once
/// it has finished.
pub fn scale_at(elapsed: f32) -> f32 {
    let progress = ((elapsed - ANIM_START) / ANIM_DURATION).clamp(0.0, 1.0);
    SCALE_START + (SCALE_END - SCALE_START) * ease_out_cubic(progress)
}

/// Uniform values sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameSample {
    /// Seconds since the last reset.
    pub seconds: f32,
    /// Eased scale for this frame.
    pub scale: f32,
    /// Per-cycle random seed in `[0, 1)`.
    pub seed: f32,
}

/// Tracks the elapsed-time origin and the per-cycle random seed.
///
/// Restarting moves the origin to `now` and draws a fresh seed, which is
/// exactly what the replay and reset keys do.
pub(crate) struct AnimationTimeline {
    origin: Instant,
    seed: f32,
    rng: StdRng,
}

impl AnimationTimeline {
    pub fn new(now: Instant, mut rng: StdRng) -> Self {
        let seed = rng.gen();
        Self {
            origin: now,
            seed,
            rng,
        }
    }

    /// Begins a new animation cycle at `now` with a fresh seed.
    pub fn restart(&mut self, now: Instant) {
        self.origin = now;
        self.seed = self.rng.gen();
    }

    pub fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.origin).as_secs_f32()
    }

    pub fn seed(&self) -> f32 {
        self.seed
    }

    pub fn sample(&self, now: Instant) -> FrameSample {
        let seconds = self.elapsed(now);
        FrameSample {
            seconds,
            scale: scale_at(seconds),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;

    #[test]
    fn ease_out_cubic_hits_documented_points() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn scale_is_pinned_outside_the_zoom() {
        assert_eq!(scale_at(0.0), SCALE_START);
        assert_eq!(scale_at(ANIM_START), SCALE_START);
        assert_eq!(scale_at(-3.0), SCALE_START);
        assert_eq!(scale_at(ANIM_START + ANIM_DURATION), SCALE_END);
        assert_eq!(scale_at(25.0), SCALE_END);
    }

    #[test]
    fn scale_never_increases_during_the_zoom() {
        let mut last = scale_at(ANIM_START);
        for step in 0..=100 {
            let elapsed = ANIM_START + ANIM_DURATION * step as f32 / 100.0;
            let scale = scale_at(elapsed);
            assert!(scale <= last + f32::EPSILON, "scale rose at t={elapsed}");
            last = scale;
        }
    }

    #[test]
    fn midpoint_scale_matches_hand_computed_value() {
        // t = 5.5s is halfway through the zoom; eased progress is 0.875.
        assert!((scale_at(5.5) - 2.5625).abs() < 1e-3);
    }

    #[test]
    fn restart_rewinds_the_clock_and_redraws_the_seed() {
        let start = Instant::now();
        let mut timeline = AnimationTimeline::new(start, StdRng::seed_from_u64(7));
        let first_seed = timeline.seed();

        let later = start + Duration::from_secs(4);
        assert!(timeline.sample(later).scale < SCALE_START);

        timeline.restart(later);
        let sample = timeline.sample(later);
        assert_eq!(sample.seconds, 0.0);
        assert_eq!(sample.scale, SCALE_START);
        assert_ne!(sample.seed, first_seed);
    }

    #[test]
    fn consecutive_restarts_draw_distinct_seeds() {
        let start = Instant::now();
        let mut timeline = AnimationTimeline::new(start, StdRng::seed_from_u64(42));
        let mut seeds = vec![timeline.seed()];
        for _ in 0..8 {
            timeline.restart(start);
            let seed = timeline.seed();
            assert!((0.0..1.0).contains(&seed));
            assert!(!seeds.contains(&seed));
            seeds.push(seed);
        }
    }
}
