use bytemuck::{Pod, Zeroable};

use crate::anim::{FrameSample, SCALE_START};

/// Uniform block shared with the GLSL prelude in `compile.rs`.
///
/// The layout must match the std140 `SceneParams` block: a vec2 followed by
/// three floats, padded to a 16-byte multiple.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SceneUniforms {
    resolution: [f32; 2],
    time: f32,
    scale: f32,
    random: f32,
    _padding: [f32; 3],
}

unsafe impl Zeroable for SceneUniforms {}
unsafe impl Pod for SceneUniforms {}

impl SceneUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time: 0.0,
            scale: SCALE_START,
            random: 0.0,
            _padding: [0.0; 3],
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub fn set_frame(&mut self, sample: &FrameSample) {
        self.time = sample.seconds;
        self.scale = sample.scale;
        self.random = sample.seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_std140_block() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 32);
        assert_eq!(std::mem::align_of::<SceneUniforms>(), 16);
    }
}
