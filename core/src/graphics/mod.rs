//! Headless wgpu harness for the triangle shader
//!
//! Draws the shader once per `render()` into an offscreen target.
//!
//! # Architecture
//!
//! - `init`: instance, adapter, device and offscreen target creation
//! - `pipeline`: bind group layout for the color binding and the render pipeline
//! - `frame`: uniform upload, the draw pass and pixel readback
//!
//! There are no vertex buffers. The vertex stage derives the corners from
//! the vertex index, so a draw is `draw(0..VERTEX_COUNT, 0..1)`.

mod frame;
mod init;
mod pipeline;

use crate::config::RenderConfig;
use crate::source::ShaderSource;

use init::RenderTarget;

/// Offscreen renderer for the triangle shader.
#[derive(Debug)]
pub struct TriangleRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,

    // Color binding (@group(0) @binding(0))
    bind_group_layout: wgpu::BindGroupLayout,
    color_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    pipeline: wgpu::RenderPipeline,
    shader_origin: ShaderSource,

    target: RenderTarget,
    settings: RenderConfig,
}

impl TriangleRenderer {
    /// Target dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.target.width, self.target.height)
    }

    /// Where the active pipeline's shader came from.
    pub fn shader_origin(&self) -> &ShaderSource {
        &self.shader_origin
    }
}
