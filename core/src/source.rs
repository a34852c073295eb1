//! Shader source selection and validation
//!
//! The built-in WGSL is always available. A file override is validated
//! against the binding contract before it reaches wgpu.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use trishade_shader::{ShaderInfo, TRIANGLE_WGSL, validate};

/// Where WGSL comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShaderSource {
    /// `triangle.wgsl` embedded in `trishade-shader`
    #[default]
    Builtin,
    /// A WGSL file on disk
    File(PathBuf),
}

impl ShaderSource {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => ShaderSource::File(path.to_path_buf()),
            None => ShaderSource::Builtin,
        }
    }

    /// Human-readable origin for logs and labels.
    pub fn label(&self) -> String {
        match self {
            ShaderSource::Builtin => "built-in triangle.wgsl".to_string(),
            ShaderSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the WGSL text.
    pub fn read(&self) -> Result<Cow<'static, str>> {
        match self {
            ShaderSource::Builtin => Ok(Cow::Borrowed(TRIANGLE_WGSL)),
            ShaderSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .with_context(|| format!("Failed to read shader {}", path.display())),
        }
    }
}

/// WGSL that passed contract validation.
#[derive(Debug, Clone)]
pub struct LoadedShader {
    pub origin: ShaderSource,
    pub wgsl: Cow<'static, str>,
    pub info: ShaderInfo,
}

impl LoadedShader {
    /// Read and validate `source`, failing on any error.
    pub fn load(source: &ShaderSource) -> Result<Self> {
        let wgsl = source.read()?;
        let info = validate(&wgsl)
            .with_context(|| format!("Shader {} failed validation", source.label()))?;
        Ok(Self {
            origin: source.clone(),
            wgsl,
            info,
        })
    }

    /// The built-in shader.
    pub fn builtin() -> Result<Self> {
        Self::load(&ShaderSource::Builtin)
    }

    /// Load `source`, falling back to the built-in shader if it can't be used.
    pub fn load_or_builtin(source: &ShaderSource) -> Result<Self> {
        match Self::load(source) {
            Ok(shader) => Ok(shader),
            Err(e) if *source != ShaderSource::Builtin => {
                tracing::warn!("{:#}. Falling back to the built-in shader.", e);
                Self::builtin()
            }
            Err(e) => Err(e),
        }
    }
}
