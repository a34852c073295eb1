//! Graphics initialization
//!
//! Creates the wgpu instance, device and offscreen render target. No surface
//! is involved: the renderer never presents, it only draws and reads back.

use anyhow::{Context, Result};
use trishade_shader::COLOR_UNIFORM_SIZE;

use super::TriangleRenderer;
use super::pipeline;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::source::LoadedShader;

/// Offscreen render target.
///
/// `color_texture` is always single-sample and is what gets read back. With
/// MSAA the pass renders into `msaa_view` and resolves into `color_view`.
#[derive(Debug)]
pub(crate) struct RenderTarget {
    pub(super) color_texture: wgpu::Texture,
    pub(super) color_view: wgpu::TextureView,
    #[allow(dead_code)] // Needed to keep texture alive for msaa_view
    pub(super) msaa_texture: Option<wgpu::Texture>,
    pub(super) msaa_view: Option<wgpu::TextureView>,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) format: wgpu::TextureFormat,
}

impl RenderTarget {
    pub(super) fn new(device: &wgpu::Device, settings: &RenderConfig) -> Self {
        let format = settings.output.texture_format();
        let size = wgpu::Extent3d {
            width: settings.width,
            height: settings.height,
            depth_or_array_layers: 1,
        };

        let color_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Render Target Color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let msaa_texture = (settings.samples > 1).then(|| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Render Target MSAA"),
                size,
                mip_level_count: 1,
                sample_count: settings.samples,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
        });
        let msaa_view = msaa_texture
            .as_ref()
            .map(|t| t.create_view(&wgpu::TextureViewDescriptor::default()));

        Self {
            color_texture,
            color_view,
            msaa_texture,
            msaa_view,
            width: settings.width,
            height: settings.height,
            format,
        }
    }
}

impl TriangleRenderer {
    /// Create a renderer, blocking on adapter and device requests.
    pub fn new(settings: &RenderConfig, shader: &LoadedShader) -> Result<Self> {
        pollster::block_on(Self::new_async(settings, shader))
    }

    pub async fn new_async(settings: &RenderConfig, shader: &LoadedShader) -> Result<Self> {
        settings.validate()?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find suitable GPU adapter")?;

        tracing::info!("Using GPU adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Trishade Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::Performance,
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create GPU device")?;

        let bind_group_layout = pipeline::create_color_bind_group_layout(&device);

        let color_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Color Uniform"),
            size: COLOR_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group =
            pipeline::create_color_bind_group(&device, &bind_group_layout, &color_buffer);

        let target = RenderTarget::new(&device, settings);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = pipeline::create_pipeline(
            &device,
            &bind_group_layout,
            shader,
            target.format,
            settings.samples,
            settings.blend,
        );
        if let Some(err) = device.pop_error_scope().await {
            anyhow::bail!(
                "Pipeline creation failed for {}: {}",
                shader.origin.label(),
                err
            );
        }

        tracing::info!(
            "Renderer initialized: {}x{}, format: {:?}, samples: {}, shader: {}",
            target.width,
            target.height,
            target.format,
            settings.samples,
            shader.origin.label()
        );

        let renderer = Self {
            device,
            queue,
            bind_group_layout,
            color_buffer,
            bind_group,
            pipeline,
            shader_origin: shader.origin.clone(),
            target,
            settings: settings.clone(),
        };
        renderer.set_color(Color::BLUE);
        Ok(renderer)
    }

    /// Recreate the offscreen target at a new size.
    ///
    /// Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let settings = RenderConfig {
            width,
            height,
            ..self.settings.clone()
        };
        settings.validate()?;

        self.target = RenderTarget::new(&self.device, &settings);
        self.settings = settings;
        tracing::debug!("Render target resized to {}x{}", width, height);
        Ok(())
    }
}
