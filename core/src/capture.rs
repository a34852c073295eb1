//! Render target readback and PNG output.
//!
//! - Pixels are copied to a staging buffer and returned tightly packed
//! - Renders without an explicit path go to the data directory under `renders/`

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Bytes per pixel of the RGBA8 render targets.
const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch of a `width`-pixel RGBA8 row, padded to wgpu's copy alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Read pixels from an RGBA8 texture.
///
/// Copies the texture to a staging buffer, waits for the copy, and strips
/// the row padding.
pub fn read_texture_pixels(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let padded_row = padded_bytes_per_row(width);
    let buffer_size = (padded_row * height) as u64;

    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Staging Buffer"),
        size: buffer_size,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Copy Encoder"),
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("Failed to poll device")?;

    rx.recv()
        .context("Map callback was dropped")?
        .context("Failed to map staging buffer")?;

    let mapped = slice.get_mapped_range();
    let row_bytes = (width * BYTES_PER_PIXEL) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in mapped.chunks_exact(padded_row as usize) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }

    drop(mapped);
    staging_buffer.unmap();

    Ok(pixels)
}

/// Write tightly packed RGBA8 pixels as a PNG.
pub fn save_png(path: &Path, pixels: &[u8], width: u32, height: u32) -> Result<()> {
    let expected = (width * height * BYTES_PER_PIXEL) as usize;
    if pixels.len() != expected {
        anyhow::bail!(
            "Pixel buffer is {} bytes, expected {} for {}x{}",
            pixels.len(),
            expected,
            width,
            height
        );
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .context("Failed to write PNG header")?;
    png_writer
        .write_image_data(pixels)
        .context("Failed to write PNG data")?;

    tracing::info!("Render saved: {}", path.display());
    Ok(())
}

/// Get the renders directory under the data directory.
pub fn renders_dir() -> Result<PathBuf> {
    let dir = crate::config::data_dir()
        .context("Failed to get project directories")?
        .join("renders");
    Ok(dir)
}

/// Generate a timestamped PNG filename.
pub fn timestamped_filename(prefix: &str) -> String {
    let now = chrono::Local::now();
    format!("{}_{}.png", prefix, now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Default output path for a render without `--out`.
pub fn default_render_path() -> Result<PathBuf> {
    Ok(renders_dir()?.join(timestamped_filename("triangle")))
}
