//! Host-side layout of the color uniform

use glam::Vec4;

/// Bind group index of the color uniform.
pub const COLOR_GROUP: u32 = 0;

/// Binding index of the color uniform within [`COLOR_GROUP`].
pub const COLOR_BINDING: u32 = 0;

/// Size in bytes of the color uniform (`vec4<f32>`).
pub const COLOR_UNIFORM_SIZE: u64 = std::mem::size_of::<ColorUniform>() as u64;

/// Color uniform as uploaded to `@group(0) @binding(0)`.
///
/// Four consecutive `f32` channels in RGBA order. The fragment stage writes
/// these values to the render target without clamping or conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorUniform {
    pub rgba: [f32; 4],
}

impl ColorUniform {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Raw bytes for `Queue::write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<[f32; 4]> for ColorUniform {
    fn from(rgba: [f32; 4]) -> Self {
        Self { rgba }
    }
}

impl From<Vec4> for ColorUniform {
    fn from(v: Vec4) -> Self {
        Self { rgba: v.to_array() }
    }
}

impl From<ColorUniform> for Vec4 {
    fn from(u: ColorUniform) -> Self {
        Vec4::from_array(u.rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_sixteen_bytes() {
        assert_eq!(COLOR_UNIFORM_SIZE, 16);
        assert_eq!(std::mem::align_of::<ColorUniform>(), 4);
    }

    #[test]
    fn test_bytes_are_consecutive_channels() {
        let uniform = ColorUniform::new(1.0, 0.5, 0.25, 0.0);
        let floats: &[f32] = bytemuck::cast_slice(uniform.as_bytes());
        assert_eq!(floats, &[1.0, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_vec4_conversion_preserves_channels() {
        let v = Vec4::new(0.1, 0.2, 0.3, 0.4);
        let uniform = ColorUniform::from(v);
        assert_eq!(uniform.rgba, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(Vec4::from(uniform), v);
    }
}
