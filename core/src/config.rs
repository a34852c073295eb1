//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for render settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Largest render target edge accepted (wgpu's default 2D texture limit).
pub const MAX_DIMENSION: u32 = 8192;

/// Application configuration.
///
/// Serialized to/from TOML format for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Offscreen target settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Triangle and clear colors
    #[serde(default)]
    pub colors: ColorConfig,
    /// Shader source override
    #[serde(default)]
    pub shader: ShaderConfig,
}

/// Encoding of the offscreen render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Rgba8UnormSrgb`: linear shader output is encoded to sRGB on write
    #[default]
    Srgb,
    /// `Rgba8Unorm`: shader output is stored as-is
    Linear,
}

impl OutputFormat {
    pub fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            OutputFormat::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            OutputFormat::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// How the triangle combines with the cleared background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Standard alpha blending over the background
    #[default]
    Alpha,
    /// Fragment output overwrites the target
    Replace,
}

impl BlendMode {
    pub fn blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Replace => wgpu::BlendState::REPLACE,
        }
    }
}

/// Offscreen render target configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Target width in pixels (default: 512)
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Target height in pixels (default: 512)
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// MSAA sample count, 1 or 4 (default: 1)
    #[serde(default = "default_samples")]
    pub samples: u32,
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default)]
    pub blend: BlendMode,
}

/// Colors used for a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Uniform color written by the fragment stage (default: blue)
    #[serde(default = "default_triangle_color")]
    pub triangle: Color,
    /// Clear color behind the triangle (default: linear 0.1 gray)
    #[serde(default = "default_background_color")]
    pub background: Color,
}

/// Shader source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShaderConfig {
    /// WGSL file to use instead of the built-in shader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_dimension() -> u32 {
    512
}
fn default_samples() -> u32 {
    1
}
fn default_triangle_color() -> Color {
    Color::BLUE
}
fn default_background_color() -> Color {
    Color::from_linear(0.1, 0.1, 0.1, 1.0)
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            samples: default_samples(),
            output: OutputFormat::default(),
            blend: BlendMode::default(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            triangle: default_triangle_color(),
            background: default_background_color(),
        }
    }
}

impl RenderConfig {
    /// Check the values wgpu would otherwise reject at texture creation.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("Render size must be non-zero (got {}x{})", self.width, self.height);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            anyhow::bail!(
                "Render size {}x{} exceeds the {} pixel limit",
                self.width,
                self.height,
                MAX_DIMENSION
            );
        }
        if !matches!(self.samples, 1 | 4) {
            anyhow::bail!("MSAA sample count must be 1 or 4 (got {})", self.samples);
        }
        Ok(())
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/trishade`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.trishade", "", "trishade")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the platform-specific data directory (renders are written here).
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.trishade", "", "trishade")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path of `config.toml`, if a config directory exists on this platform.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    config_path().map(|path| load_from(&path)).unwrap_or_default()
}

/// Loads the configuration from `path`, falling back to defaults.
pub fn load_from(path: &Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Saves the configuration to the platform config directory.
///
/// Returns the path written, or `None` if no config directory is available.
pub fn save(config: &Config) -> Result<Option<PathBuf>> {
    match config_path() {
        Some(path) => save_to(config, &path).map(|()| Some(path)),
        None => Ok(None),
    }
}

/// Saves the configuration to `path`, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
