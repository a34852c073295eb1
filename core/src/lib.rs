//! Host-side support for the trishade triangle shader.
//!
//! Provides configuration, color handling, shader source selection and a
//! headless wgpu renderer that draws the shader offscreen and reads it back.

pub mod capture;
pub mod color;
pub mod config;
pub mod graphics;
pub mod source;

pub use color::{Color, ColorParseError};
pub use config::{BlendMode, ColorConfig, Config, OutputFormat, RenderConfig, ShaderConfig};
pub use graphics::TriangleRenderer;
pub use source::{LoadedShader, ShaderSource};
