//! CPU reference of the two shader stages
//!
//! These mirror `triangle.wgsl` expression for expression so the shader's
//! outputs can be checked without a GPU.

use glam::Vec4;

use crate::{ColorUniform, VERTEX_COUNT};

/// Clip-space position produced by `vs_main` for `index`.
///
/// Indices 0, 1 and 2 give (-1, -1), (0, 1) and (1, -1). WGSL integer
/// arithmetic wraps, and so does this for indices outside 0..3.
pub fn vertex_position(index: u32) -> Vec4 {
    let x = (index as i32).wrapping_sub(1) as f32;
    let y = ((index & 1) as i32 * 2 - 1) as f32;
    Vec4::new(x, y, 0.0, 1.0)
}

/// Color produced by `fs_main`. `frag_coord` is accepted and ignored, as in the shader.
pub fn fragment_color(uniform: &ColorUniform, _frag_coord: Vec4) -> Vec4 {
    Vec4::from(*uniform)
}

/// The three corners in draw order.
pub fn triangle_positions() -> [Vec4; VERTEX_COUNT as usize] {
    [vertex_position(0), vertex_position(1), vertex_position(2)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_positions() {
        assert_eq!(vertex_position(0), Vec4::new(-1.0, -1.0, 0.0, 1.0));
        assert_eq!(vertex_position(1), Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(vertex_position(2), Vec4::new(1.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn test_triangle_winding() {
        let [a, b, c] = triangle_positions();
        // Signed area in NDC (y up). Negative is clockwise, so pipelines must not cull.
        let area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
        assert_eq!(area, -4.0);
    }

    #[test]
    fn test_out_of_range_index_wraps_like_wgsl() {
        assert_eq!(vertex_position(3), Vec4::new(2.0, 1.0, 0.0, 1.0));
        let p = vertex_position(u32::MAX);
        assert_eq!(p.x, (-2i32) as f32);
        assert_eq!(p.y, 1.0);
    }

    #[test]
    fn test_fragment_is_identity() {
        let colors = [
            ColorUniform::new(0.0, 0.0, 0.0, 0.0),
            ColorUniform::new(1.0, 0.5, 0.25, 1.0),
            ColorUniform::new(2.5, -1.0, f32::MIN_POSITIVE, 0.3),
        ];
        for uniform in colors {
            let out = fragment_color(&uniform, Vec4::new(12.5, 40.5, 0.0, 1.0));
            assert_eq!(out.to_array(), uniform.rgba);
        }
    }

    #[test]
    fn test_stages_are_idempotent() {
        for index in 0..VERTEX_COUNT {
            assert_eq!(vertex_position(index), vertex_position(index));
        }
        let uniform = ColorUniform::new(0.2, 0.4, 0.6, 0.8);
        let frag = Vec4::new(1.5, 2.5, 0.0, 1.0);
        assert_eq!(fragment_color(&uniform, frag), fragment_color(&uniform, frag));
    }
}
