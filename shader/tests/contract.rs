//! Contract checks against hand-written WGSL variants.
//!
//! Each source is valid WGSL that naga accepts; only the interface differs
//! from the built-in triangle shader.

use trishade_shader::*;

const VS_OK: &str = r#"
@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    return vec4<f32>(f32(i32(i) - 1), f32(i32(i & 1u) * 2 - 1), 0.0, 1.0);
}
"#;

const FS_OK: &str = r#"
@fragment
fn fs_main(@builtin(position) p: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;

const UNIFORM_OK: &str = "@group(0) @binding(0) var<uniform> color: vec4<f32>;\n";

fn module(parts: &[&str]) -> String {
    parts.concat()
}

#[test]
fn test_assembled_module_passes() {
    let source = module(&[UNIFORM_OK, VS_OK, FS_OK]);
    let info = validate(&source).unwrap();
    assert_eq!(info.uniform.name.as_deref(), Some("color"));
    assert_eq!(info.uniform.size as u64, COLOR_UNIFORM_SIZE);
}

#[test]
fn test_missing_vertex_entry() {
    let source = module(&[UNIFORM_OK, FS_OK]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::MissingEntryPoint {
            name: "vs_main",
            stage: "vertex"
        }
    );
}

#[test]
fn test_renamed_fragment_entry() {
    let fs = FS_OK.replace("fs_main", "main_fs");
    let source = module(&[UNIFORM_OK, VS_OK, &fs]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::MissingEntryPoint {
            name: "fs_main",
            stage: "fragment"
        }
    );
}

#[test]
fn test_uniform_in_wrong_slot() {
    let uniform = UNIFORM_OK.replace("@binding(0)", "@binding(1)");
    let source = module(&[&uniform, VS_OK, FS_OK]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::UnexpectedBinding {
            group: 0,
            binding: 1
        }
    );
}

#[test]
fn test_extra_binding_is_rejected() {
    let extra = "@group(1) @binding(0) var<uniform> extra: vec4<f32>;\n";
    let source = module(&[UNIFORM_OK, extra, VS_OK, FS_OK]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::UnexpectedBinding {
            group: 1,
            binding: 0
        }
    );
}

#[test]
fn test_missing_uniform() {
    let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;
    let source = module(&[VS_OK, fs]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::MissingUniform {
            group: 0,
            binding: 0
        }
    );
}

#[test]
fn test_uniform_of_wrong_type() {
    let uniform = "@group(0) @binding(0) var<uniform> color: vec3<f32>;\n";
    let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;
    let source = module(&[uniform, VS_OK, fs]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::BadUniformType {
            group: 0,
            binding: 0
        }
    );
}

#[test]
fn test_storage_buffer_is_not_a_uniform() {
    let uniform = "@group(0) @binding(0) var<storage, read> color: vec4<f32>;\n";
    let source = module(&[uniform, VS_OK, FS_OK]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::BadUniformType {
            group: 0,
            binding: 0
        }
    );
}

#[test]
fn test_vertex_with_extra_input() {
    let vs = r#"
@vertex
fn vs_main(
    @builtin(vertex_index) i: u32,
    @builtin(instance_index) n: u32,
) -> @builtin(position) vec4<f32> {
    return vec4<f32>(f32(i), f32(n), 0.0, 1.0);
}
"#;
    let source = module(&[UNIFORM_OK, vs, FS_OK]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::BadInput {
            entry: "vs_main",
            index: 1,
            expected: "@builtin(vertex_index)"
        }
    );
}

#[test]
fn test_vertex_buffer_input_is_rejected() {
    let vs = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
"#;
    let source = module(&[UNIFORM_OK, vs, FS_OK]);
    assert!(matches!(
        validate(&source),
        Err(ShaderError::BadInput {
            entry: "vs_main",
            index: 0,
            ..
        })
    ));
}

#[test]
fn test_color_varying_is_rejected() {
    let vs = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> VertexOutput {
    var out: VertexOutput;
    out.position = vec4<f32>(f32(i), 0.0, 0.0, 1.0);
    out.color = vec4<f32>(1.0);
    return out;
}
"#;
    let source = module(&[UNIFORM_OK, vs, FS_OK]);
    assert!(matches!(
        validate(&source),
        Err(ShaderError::BadOutput {
            entry: "vs_main",
            ..
        })
    ));
}

#[test]
fn test_vertex_output_struct_with_position_only() {
    let vs = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> VertexOutput {
    var out: VertexOutput;
    out.position = vec4<f32>(f32(i), 0.0, 0.0, 1.0);
    return out;
}
"#;
    let source = module(&[UNIFORM_OK, vs, FS_OK]);
    assert!(validate(&source).is_ok());
}

#[test]
fn test_fragment_writing_location_one() {
    let fs = FS_OK.replace("@location(0)", "@location(1)");
    let source = module(&[UNIFORM_OK, VS_OK, &fs]);
    assert!(matches!(
        validate(&source),
        Err(ShaderError::BadOutput {
            entry: "fs_main",
            ..
        })
    ));
}

#[test]
fn test_vertex_reading_uniform_is_rejected() {
    let vs = r#"
@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    return vec4<f32>(f32(i32(i) - 1), f32(i32(i & 1u) * 2 - 1), 0.0, 1.0) * color.a;
}
"#;
    let source = module(&[UNIFORM_OK, vs, FS_OK]);
    assert_eq!(
        validate(&source).unwrap_err(),
        ShaderError::UniformNotVisible {
            entry: "vs_main",
            group: 0,
            binding: 0
        }
    );
}

#[test]
fn test_vertex_helper_reading_uniform_is_rejected() {
    let vs = r#"
fn scale() -> f32 {
    return color.a;
}

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
    return vec4<f32>(f32(i32(i) - 1), 0.0, 0.0, scale());
}
"#;
    let source = module(&[UNIFORM_OK, vs, FS_OK]);
    assert!(matches!(
        validate(&source),
        Err(ShaderError::UniformNotVisible { .. })
    ));
}

#[test]
fn test_fragment_may_ignore_uniform() {
    let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#;
    let source = module(&[UNIFORM_OK, VS_OK, fs]);
    assert!(validate(&source).is_ok());
}

#[test]
fn test_push_constant_is_rejected() {
    let push = "var<push_constant> tint: vec4<f32>;\n";
    let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return color * tint;
}
"#;
    let source = module(&[UNIFORM_OK, push, VS_OK, fs]);
    assert!(matches!(
        validate(&source),
        Err(ShaderError::Validation(_))
    ));
}

#[test]
fn test_errors_render_readable_messages() {
    let err = ShaderError::MissingUniform {
        group: 0,
        binding: 0,
    };
    assert_eq!(err.to_string(), "no uniform bound at @group(0) @binding(0)");

    let err = validate("fn broken(").unwrap_err();
    assert!(err.to_string().starts_with("WGSL parse error"));
}

#[test]
fn test_reference_matches_documented_corners() {
    let corners: Vec<[f32; 4]> = triangle_positions().iter().map(|p| p.to_array()).collect();
    assert_eq!(
        corners,
        vec![
            [-1.0, -1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, -1.0, 0.0, 1.0],
        ]
    );
    assert_eq!(VERTEX_COUNT as usize, corners.len());
}
