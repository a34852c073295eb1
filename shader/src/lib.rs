//! Solid-color triangle shader
//!
//! A single WGSL module with two entry points:
//!
//! - `vs_main` derives the three triangle corners from `@builtin(vertex_index)`
//! - `fs_main` returns the color uniform at `@group(0) @binding(0)` unchanged
//!
//! Alongside the WGSL source this crate carries the host-side view of the
//! binding contract ([`ColorUniform`] and the binding constants), a CPU
//! reference of both stages ([`reference`]) and a naga-based validator that
//! checks any WGSL source against the contract ([`validate`]).
//!
//! # Example
//!
//! ```
//! use trishade_shader::{TRIANGLE_WGSL, validate};
//!
//! let info = validate(TRIANGLE_WGSL).unwrap();
//! assert_eq!(info.vertex_entry, "vs_main");
//! assert_eq!(info.uniform.size, 16);
//! ```

mod error;
pub mod reference;
mod uniform;
mod validate;

pub use error::ShaderError;
pub use reference::{fragment_color, triangle_positions, vertex_position};
pub use uniform::{COLOR_BINDING, COLOR_GROUP, COLOR_UNIFORM_SIZE, ColorUniform};
pub use validate::{ShaderInfo, UniformInfo, validate};

/// Built-in WGSL source of the triangle shader.
pub const TRIANGLE_WGSL: &str = include_str!("shaders/triangle.wgsl");

/// Name of the vertex entry point.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Name of the fragment entry point.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertices per draw. The vertex stage only has corners for indices 0..3.
pub const VERTEX_COUNT: u32 = 3;
