use thiserror::Error;

/// Error type for shader validation failures.
///
/// `Parse` and `Validation` come from naga. The remaining variants describe
/// a module that is valid WGSL but breaks the binding contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("WGSL parse error:\n{0}")]
    Parse(String),

    #[error("WGSL validation error:\n{0}")]
    Validation(String),

    #[error("missing {stage} entry point `{name}`")]
    MissingEntryPoint { name: &'static str, stage: &'static str },

    #[error("`{entry}` input {index} must be {expected}")]
    BadInput {
        entry: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("`{entry}` must return {expected}")]
    BadOutput {
        entry: &'static str,
        expected: &'static str,
    },

    #[error("no uniform bound at @group({group}) @binding({binding})")]
    MissingUniform { group: u32, binding: u32 },

    #[error("uniform at @group({group}) @binding({binding}) must be vec4<f32>")]
    BadUniformType { group: u32, binding: u32 },

    #[error("`{entry}` reads @group({group}) @binding({binding}), which only the fragment stage can see")]
    UniformNotVisible {
        entry: &'static str,
        group: u32,
        binding: u32,
    },

    #[error("unexpected resource at @group({group}) @binding({binding})")]
    UnexpectedBinding { group: u32, binding: u32 },
}
