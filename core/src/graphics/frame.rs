//! Frame rendering and readback
//!
//! - Uploading the color uniform
//! - The clear + draw pass
//! - Reading the resolved target back to the CPU

use std::path::Path;

use anyhow::Result;
use trishade_shader::{COLOR_GROUP, VERTEX_COUNT};

use super::TriangleRenderer;
use crate::capture;
use crate::color::Color;

impl TriangleRenderer {
    /// Upload the color read by the fragment stage.
    ///
    /// Takes effect from the next `render()`.
    pub fn set_color(&self, color: Color) {
        self.queue
            .write_buffer(&self.color_buffer, 0, color.uniform().as_bytes());
        tracing::debug!("Triangle color set to {}", color);
    }

    /// Clear the target to `background` and draw the triangle.
    pub fn render(&self, background: Color) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Triangle Encoder"),
            });

        let (view, resolve_target) = match &self.target.msaa_view {
            Some(msaa_view) => (msaa_view, Some(&self.target.color_view)),
            None => (&self.target.color_view, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Triangle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(background.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(COLOR_GROUP, &self.bind_group, &[]);
            render_pass.draw(0..VERTEX_COUNT, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Read the last render as tightly packed RGBA8 rows, top row first.
    pub fn read_pixels(&self) -> Result<Vec<u8>> {
        capture::read_texture_pixels(
            &self.device,
            &self.queue,
            &self.target.color_texture,
            self.target.width,
            self.target.height,
        )
    }

    /// Render with `color` over `background` and write the result to `path`.
    pub fn render_to_png(&self, color: Color, background: Color, path: &Path) -> Result<()> {
        self.set_color(color);
        self.render(background);
        let pixels = self.read_pixels()?;
        capture::save_png(path, &pixels, self.target.width, self.target.height)
    }
}
