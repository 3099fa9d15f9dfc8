//! Shader source providers.
//!
//! The file-backed provider is the production path; the embedded provider
//! exists so tests can substitute a known-good fragment shader without
//! touching the filesystem.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Default fragment shader filename, resolved in the working directory.
pub const DEFAULT_SHADER_FILE: &str = "birthday.shader";

/// Upper bound on fragment shader source size in bytes.
pub const MAX_SHADER_SOURCE_BYTES: u64 = 20_000;

/// Errors raised while loading fragment shader source.
#[derive(Debug, thiserror::Error)]
pub enum ShaderSourceError {
    #[error("failed to read shader file at {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("shader file at {path} is empty")]
    Empty { path: PathBuf },
    #[error("shader file at {path} is {len} bytes; the limit is {MAX_SHADER_SOURCE_BYTES}")]
    Oversized { path: PathBuf, len: u64 },
}

/// Where fragment shader source comes from.
#[derive(Clone, Debug)]
pub enum ShaderSource {
    /// GLSL read from a file at load time.
    File(PathBuf),
    /// GLSL embedded in the binary, used verbatim.
    Embedded(&'static str),
}

impl ShaderSource {
    /// Reads the fragment source, rejecting missing, empty, or oversized files.
    pub fn load(&self) -> Result<String, ShaderSourceError> {
        match self {
            ShaderSource::File(path) => {
                let text =
                    fs::read_to_string(path).map_err(|source| ShaderSourceError::Unreadable {
                        path: path.clone(),
                        source,
                    })?;
                let len = text.len() as u64;
                if len > MAX_SHADER_SOURCE_BYTES {
                    return Err(ShaderSourceError::Oversized {
                        path: path.clone(),
                        len,
                    });
                }
                if text.trim().is_empty() {
                    return Err(ShaderSourceError::Empty { path: path.clone() });
                }
                Ok(text)
            }
            ShaderSource::Embedded(text) => Ok((*text).to_string()),
        }
    }
}

impl std::fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderSource::File(path) => write!(f, "{}", path.display()),
            ShaderSource::Embedded(_) => f.write_str("<embedded>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = ShaderSource::File(dir.path().join("absent.shader"));
        assert!(matches!(
            source.load(),
            Err(ShaderSourceError::Unreadable { .. })
        ));
    }

    #[test]
    fn empty_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.shader");
        fs::write(&path, "  \n\t\n").expect("write");
        let source = ShaderSource::File(path);
        assert!(matches!(source.load(), Err(ShaderSourceError::Empty { .. })));
    }

    #[test]
    fn oversized_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("huge.shader");
        let mut file = fs::File::create(&path).expect("create");
        for _ in 0..=MAX_SHADER_SOURCE_BYTES / 10 {
            file.write_all(b"// filler \n").expect("write");
        }
        drop(file);
        let source = ShaderSource::File(path);
        assert!(matches!(
            source.load(),
            Err(ShaderSourceError::Oversized { .. })
        ));
    }

    #[test]
    fn readable_file_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scene.shader");
        fs::write(&path, "void main() {}\n").expect("write");
        let source = ShaderSource::File(path);
        assert_eq!(source.load().expect("load"), "void main() {}\n");
    }

    #[test]
    fn embedded_source_loads_verbatim() {
        let source = ShaderSource::Embedded("void main() {}");
        assert_eq!(source.load().expect("load"), "void main() {}");
    }
}
