//! Render pipeline for the triangle shader
//!
//! One bind group with one fragment-visible uniform, no vertex buffers.

use anyhow::Result;
use trishade_shader::{COLOR_BINDING, COLOR_UNIFORM_SIZE, FRAGMENT_ENTRY, VERTEX_ENTRY};

use super::TriangleRenderer;
use crate::config::BlendMode;
use crate::source::LoadedShader;

/// Layout of `@group(0)`: the color uniform, visible to the fragment stage.
pub(super) fn create_color_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Color Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: COLOR_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(COLOR_UNIFORM_SIZE),
            },
            count: None,
        }],
    })
}

pub(super) fn create_color_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    color_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Color Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: COLOR_BINDING,
            resource: color_buffer.as_entire_binding(),
        }],
    })
}

/// Create the render pipeline for a validated shader.
pub(super) fn create_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    shader: &LoadedShader,
    format: wgpu::TextureFormat,
    samples: u32,
    blend: BlendMode,
) -> wgpu::RenderPipeline {
    let label = shader.origin.label();

    let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("Triangle Shader ({})", label)),
        source: wgpu::ShaderSource::Wgsl(shader.wgsl.clone()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Triangle Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("Triangle Pipeline ({})", label)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader_module,
            entry_point: Some(VERTEX_ENTRY),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader_module,
            entry_point: Some(FRAGMENT_ENTRY),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend.blend_state()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // The triangle winds clockwise in NDC, so culling must stay off.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: samples,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

impl TriangleRenderer {
    /// Swap in a new shader.
    ///
    /// The shader has already passed contract validation; wgpu errors raised
    /// while building the pipeline are captured and returned. On error the
    /// previous pipeline stays active.
    pub fn reload(&mut self, shader: &LoadedShader) -> Result<()> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = create_pipeline(
            &self.device,
            &self.bind_group_layout,
            shader,
            self.target.format,
            self.settings.samples,
            self.settings.blend,
        );
        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            anyhow::bail!(
                "Pipeline creation failed for {}: {}",
                shader.origin.label(),
                err
            );
        }

        self.pipeline = pipeline;
        self.shader_origin = shader.origin.clone();
        tracing::info!("Shader reloaded: {}", shader.origin.label());
        Ok(())
    }
}
