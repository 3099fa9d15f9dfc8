//! GLSL wrapping and shader-module compilation.
//!
//! User fragment shaders arrive as plain GLSL that references `fragCoord`,
//! `iResolution`, `iTime`, `uScale`, and `uRandom` as if they were ordinary
//! uniforms. Before compilation the source is wrapped: known declarations
//! are stripped and replaced with a std140 uniform block exposed through
//! macro aliases, so the same file compiles unchanged under wgpu's GLSL
//! frontend.

use std::borrow::Cow;

use anyhow::{anyhow, Result};
use wgpu::naga::ShaderStage;

/// Output variable declared by the wrapper; user `out` names are remapped
/// onto it with a macro.
const OUT_VARIABLE: &str = "card_out_color";

/// Compiles the fixed full-screen quad vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fullscreen quad vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    })
}

/// Wraps the user fragment source with the uniform prelude and compiles it.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let wrapped = wrap_fragment_source(source)?;

    // Parse through naga first so a broken shader fails with its own
    // diagnostics instead of a later device validation error.
    let mut frontend = wgpu::naga::front::glsl::Frontend::default();
    let options = wgpu::naga::front::glsl::Options::from(ShaderStage::Fragment);
    frontend
        .parse(&options, &wrapped)
        .map_err(|errors| anyhow!("fragment shader failed to compile: {errors}"))?;

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("greeting fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(wrapped),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Produces a self-contained GLSL fragment shader from the user source.
///
/// Steps performed:
///
/// 1. Strip `#version` directives, declarations of the known uniforms, any
///    `in vec2 fragCoord;` declaration, and the user's `out vec4 <name>;`
///    declaration (remembering the name).
/// 2. Prepend [`HEADER`], which declares `fragCoord`, the output, and the
///    uniform block with macro aliases, plus a macro mapping the user's out
///    name onto the wrapper's.
/// 3. Sources without a `main` but with a ShaderToy-style `mainImage` get
///    [`MAIN_IMAGE_FOOTER`] appended to delegate to it.
pub(crate) fn wrap_fragment_source(source: &str) -> Result<String> {
    let mut out_variable = None;
    let mut skipped_version = false;
    let mut sanitized_lines = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim_start();
        if !skipped_version && trimmed.starts_with("#version") {
            skipped_version = true;
            continue;
        }
        let is_known_uniform = trimmed.starts_with("uniform ")
            && (trimmed.contains("iResolution")
                || trimmed.contains("iTime")
                || trimmed.contains("uScale")
                || trimmed.contains("uRandom"));
        if is_known_uniform {
            continue;
        }
        if is_frag_coord_input(trimmed) {
            continue;
        }
        if out_variable.is_none() {
            if let Some(name) = fragment_output_name(trimmed) {
                out_variable = Some(name.to_string());
                continue;
            }
        }
        sanitized_lines.push(line);
    }

    let mut sanitized = String::new();
    for line in sanitized_lines {
        sanitized.push_str(line);
        sanitized.push('\n');
    }

    let has_main = sanitized.contains("void main");
    let has_main_image = sanitized.contains("mainImage");
    if !has_main && !has_main_image {
        anyhow::bail!("fragment shader defines neither main() nor mainImage()");
    }

    let mut wrapped = String::from(HEADER);
    if let Some(name) = &out_variable {
        wrapped.push_str(&format!("#define {name} {OUT_VARIABLE}\n"));
    }
    wrapped.push_str("#line 1\n");
    wrapped.push_str(&sanitized);
    if !has_main {
        wrapped.push_str(MAIN_IMAGE_FOOTER);
    }
    Ok(wrapped)
}

fn is_frag_coord_input(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("in ") else {
        return false;
    };
    rest.trim_start()
        .strip_prefix("vec2")
        .is_some_and(|tail| tail.contains("fragCoord"))
}

/// Recognises `out vec4 <name>;` and returns the name.
fn fragment_output_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("out ")?.trim_start();
    let rest = rest.strip_prefix("vec4 ")?.trim_start();
    let name = rest.strip_suffix(';')?.trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    valid.then_some(name)
}

/// GLSL prologue injected ahead of every fragment shader.
///
/// The uniform block layout must match `SceneUniforms` in `gpu/uniforms.rs`.
const HEADER: &str = r"#version 450
layout(location = 0) in vec2 fragCoord;
layout(location = 0) out vec4 card_out_color;

layout(std140, set = 0, binding = 0) uniform SceneParams {
    vec2 _iResolution;
    float _iTime;
    float _uScale;
    float _uRandom;
} ubo;

#define iResolution ubo._iResolution
#define iTime ubo._iTime
#define uScale ubo._uScale
#define uRandom ubo._uRandom
";

/// Epilogue for ShaderToy-style sources that only define `mainImage`.
const MAIN_IMAGE_FOOTER: &str = r"void main() {
    vec4 color = vec4(0.0);
    mainImage(color, fragCoord);
    card_out_color = color;
}
";

/// Full-screen quad vertex shader: four strip corners covering NDC, with
/// `fragCoord` handed to the fragment stage in pixel space.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec2 fragCoord;

layout(std140, set = 0, binding = 0) uniform SceneParams {
    vec2 _iResolution;
    float _iTime;
    float _uScale;
    float _uRandom;
} ubo;

const vec2 corners[4] = vec2[4](
    vec2(-1.0, -1.0),
    vec2(1.0, -1.0),
    vec2(-1.0, 1.0),
    vec2(1.0, 1.0)
);

void main() {
    vec2 pos = corners[uint(gl_VertexIndex)];
    fragCoord = (pos + 1.0) * 0.5 * ubo._iResolution;
    gl_Position = vec4(pos, 0.0, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN_SOURCE: &str = r#"
#version 330 core
in vec2 fragCoord;
out vec4 FragColor;
uniform vec2 iResolution;
uniform float iTime;
uniform float uScale;
uniform float uRandom;

void main() {
    vec2 uv = fragCoord / iResolution;
    FragColor = vec4(uv, uScale, uRandom);
}
"#;

    #[test]
    fn wrap_strips_known_declarations() {
        let wrapped = wrap_fragment_source(PLAIN_SOURCE).expect("wrap");
        assert!(!wrapped.contains("uniform vec2 iResolution"));
        assert!(!wrapped.contains("uniform float iTime"));
        assert!(!wrapped.contains("uniform float uScale"));
        assert!(!wrapped.contains("uniform float uRandom"));
        assert!(!wrapped.contains("#version 330"));
        assert!(!wrapped.contains("in vec2 fragCoord;"));
    }

    #[test]
    fn wrap_remaps_the_user_output_variable() {
        let wrapped = wrap_fragment_source(PLAIN_SOURCE).expect("wrap");
        assert!(!wrapped.contains("out vec4 FragColor;"));
        assert!(wrapped.contains("#define FragColor card_out_color"));
        assert!(wrapped.contains("FragColor = vec4(uv, uScale, uRandom);"));
    }

    #[test]
    fn wrap_appends_a_footer_for_main_image_sources() {
        let source = r#"
void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    fragColor = vec4(fragCoord, 0.0, 1.0);
}
"#;
        let wrapped = wrap_fragment_source(source).expect("wrap");
        assert!(wrapped.contains("mainImage(color, fragCoord);"));
        assert!(wrapped.contains("void main()"));
    }

    #[test]
    fn wrap_keeps_user_main_without_a_footer() {
        let wrapped = wrap_fragment_source(PLAIN_SOURCE).expect("wrap");
        assert_eq!(wrapped.matches("void main()").count(), 1);
    }

    #[test]
    fn wrap_rejects_sources_without_an_entry_point() {
        let result = wrap_fragment_source("float helper(float x) { return x; }\n");
        assert!(result.is_err());
    }

    #[test]
    fn wrap_points_diagnostics_at_user_lines() {
        let wrapped = wrap_fragment_source(PLAIN_SOURCE).expect("wrap");
        assert!(wrapped.contains("#line 1\n"));
    }
}
