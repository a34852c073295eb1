//! WGSL contract validation (using naga)
//!
//! Parses and validates a WGSL module, then checks that it speaks the same
//! interface as the built-in triangle shader: a `vs_main` fed only by the
//! vertex index, an `fs_main` writing one color to location 0, and a single
//! `vec4<f32>` uniform at `@group(0) @binding(0)` read only by the fragment
//! stage.

use naga::valid::{Capabilities, ModuleInfo, ValidationFlags, Validator};
use naga::{
    AddressSpace, Binding, BuiltIn, EntryPoint, GlobalVariable, Handle, Module, Scalar,
    ShaderStage, Type, TypeInner, VectorSize,
};

use crate::{COLOR_BINDING, COLOR_GROUP, FRAGMENT_ENTRY, ShaderError, VERTEX_ENTRY};

/// Summary of a module that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderInfo {
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub uniform: UniformInfo,
}

/// The color uniform as declared in the WGSL source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformInfo {
    /// Variable name, if the source gave one
    pub name: Option<String>,
    pub group: u32,
    pub binding: u32,
    /// Size in bytes as laid out by naga
    pub size: u32,
}

/// Parse, validate and contract-check a WGSL module.
pub fn validate(source: &str) -> Result<ShaderInfo, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::Parse(e.emit_to_string(source)))?;

    // The renderer's device requests no optional features, so neither may the shader.
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::empty());
    let module_info = validator
        .validate(&module)
        .map_err(|e| ShaderError::Validation(e.emit_to_string(source)))?;

    let (vertex_index, vertex) =
        find_entry(&module, VERTEX_ENTRY, ShaderStage::Vertex, "vertex")?;
    check_vertex_entry(&module, vertex)?;

    let (_, fragment) = find_entry(&module, FRAGMENT_ENTRY, ShaderStage::Fragment, "fragment")?;
    check_fragment_entry(&module, fragment)?;

    let (handle, uniform) = check_uniform(&module)?;
    check_uniform_visibility(&module_info, vertex_index, handle, &uniform)?;

    Ok(ShaderInfo {
        vertex_entry: vertex.name.clone(),
        fragment_entry: fragment.name.clone(),
        uniform,
    })
}

fn find_entry<'a>(
    module: &'a Module,
    name: &'static str,
    stage: ShaderStage,
    stage_name: &'static str,
) -> Result<(usize, &'a EntryPoint), ShaderError> {
    module
        .entry_points
        .iter()
        .enumerate()
        .find(|(_, ep)| ep.name == name && ep.stage == stage)
        .ok_or(ShaderError::MissingEntryPoint {
            name,
            stage: stage_name,
        })
}

fn is_vec4_f32(module: &Module, ty: Handle<Type>) -> bool {
    match module.types[ty].inner {
        TypeInner::Vector {
            size: VectorSize::Quad,
            scalar,
        } => scalar == Scalar::F32,
        _ => false,
    }
}

/// Bindings carried by a value: its own binding, or its members' if it is an IO struct.
fn io_bindings(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
) -> Vec<(Binding, Handle<Type>)> {
    match binding {
        Some(binding) => vec![(binding.clone(), ty)],
        None => match &module.types[ty].inner {
            TypeInner::Struct { members, .. } => members
                .iter()
                .filter_map(|m| m.binding.clone().map(|b| (b, m.ty)))
                .collect(),
            _ => Vec::new(),
        },
    }
}

fn check_vertex_entry(module: &Module, entry: &EntryPoint) -> Result<(), ShaderError> {
    const EXPECTED_INPUT: &str = "@builtin(vertex_index)";
    const EXPECTED_OUTPUT: &str = "only @builtin(position) vec4<f32>";

    let inputs: Vec<_> = entry
        .function
        .arguments
        .iter()
        .flat_map(|arg| io_bindings(module, arg.ty, arg.binding.as_ref()))
        .collect();

    if inputs.is_empty() {
        return Err(ShaderError::BadInput {
            entry: VERTEX_ENTRY,
            index: 0,
            expected: EXPECTED_INPUT,
        });
    }
    for (index, (binding, _)) in inputs.iter().enumerate() {
        if index > 0 || !matches!(binding, Binding::BuiltIn(BuiltIn::VertexIndex)) {
            return Err(ShaderError::BadInput {
                entry: VERTEX_ENTRY,
                index,
                expected: EXPECTED_INPUT,
            });
        }
    }

    let bad_output = ShaderError::BadOutput {
        entry: VERTEX_ENTRY,
        expected: EXPECTED_OUTPUT,
    };
    let result = entry.function.result.as_ref().ok_or(bad_output.clone())?;
    match io_bindings(module, result.ty, result.binding.as_ref()).as_slice() {
        [(Binding::BuiltIn(BuiltIn::Position { .. }), ty)] if is_vec4_f32(module, *ty) => Ok(()),
        _ => Err(bad_output),
    }
}

fn check_fragment_entry(module: &Module, entry: &EntryPoint) -> Result<(), ShaderError> {
    // Only pipeline builtins may come in; there is no varying from the vertex stage.
    let inputs = entry
        .function
        .arguments
        .iter()
        .flat_map(|arg| io_bindings(module, arg.ty, arg.binding.as_ref()));
    for (index, (binding, _)) in inputs.enumerate() {
        if !matches!(binding, Binding::BuiltIn(_)) {
            return Err(ShaderError::BadInput {
                entry: FRAGMENT_ENTRY,
                index,
                expected: "a pipeline builtin",
            });
        }
    }

    let bad_output = ShaderError::BadOutput {
        entry: FRAGMENT_ENTRY,
        expected: "only @location(0) vec4<f32>",
    };
    let result = entry.function.result.as_ref().ok_or(bad_output.clone())?;
    match io_bindings(module, result.ty, result.binding.as_ref()).as_slice() {
        [(Binding::Location { location: 0, .. }, ty)] if is_vec4_f32(module, *ty) => Ok(()),
        _ => Err(bad_output),
    }
}

/// A `vec4<f32>`, or a struct whose only member is one.
fn is_color_layout(module: &Module, ty: Handle<Type>) -> bool {
    if is_vec4_f32(module, ty) {
        return true;
    }
    match &module.types[ty].inner {
        TypeInner::Struct { members, .. } => {
            matches!(members.as_slice(), [member] if is_vec4_f32(module, member.ty))
        }
        _ => false,
    }
}

fn check_uniform(module: &Module) -> Result<(Handle<GlobalVariable>, UniformInfo), ShaderError> {
    let mut uniform = None;

    for (handle, global) in module.global_variables.iter() {
        let Some(rb) = &global.binding else {
            continue;
        };
        if rb.group != COLOR_GROUP || rb.binding != COLOR_BINDING {
            return Err(ShaderError::UnexpectedBinding {
                group: rb.group,
                binding: rb.binding,
            });
        }
        if global.space != AddressSpace::Uniform || !is_color_layout(module, global.ty) {
            return Err(ShaderError::BadUniformType {
                group: rb.group,
                binding: rb.binding,
            });
        }
        uniform = Some((
            handle,
            UniformInfo {
                name: global.name.clone(),
                group: rb.group,
                binding: rb.binding,
                size: module.types[global.ty].inner.size(module.to_ctx()),
            },
        ));
    }

    uniform.ok_or(ShaderError::MissingUniform {
        group: COLOR_GROUP,
        binding: COLOR_BINDING,
    })
}

/// The binding is fragment-only; the vertex stage, or anything it calls, must not read it.
fn check_uniform_visibility(
    info: &ModuleInfo,
    vertex_index: usize,
    handle: Handle<GlobalVariable>,
    uniform: &UniformInfo,
) -> Result<(), ShaderError> {
    if info.get_entry_point(vertex_index)[handle].is_empty() {
        Ok(())
    } else {
        Err(ShaderError::UniformNotVisible {
            entry: VERTEX_ENTRY,
            group: uniform.group,
            binding: uniform.binding,
        })
    }
}
