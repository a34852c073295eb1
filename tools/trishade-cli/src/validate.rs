//! Validate command - check WGSL against the binding contract

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use trishade_core::{Config, LoadedShader, ShaderSource};
use trishade_shader::ShaderInfo;

#[derive(Args)]
pub struct ValidateArgs {
    /// WGSL file to check (default: the configured shader, else the built-in one)
    pub path: Option<PathBuf>,
}

pub fn execute(args: ValidateArgs, config: &Config) -> Result<()> {
    let path = args.path.or_else(|| config.shader.path.clone());
    let source = ShaderSource::from_path(path.as_deref());

    let shader = LoadedShader::load(&source)?;
    print!("{}", summary(&source, &shader.info));
    Ok(())
}

fn summary(source: &ShaderSource, info: &ShaderInfo) -> String {
    let uniform = &info.uniform;
    format!(
        "OK  {}\n  vertex    {}  @builtin(vertex_index) -> @builtin(position)\n  fragment  {}  -> @location(0)\n  uniform   {} @group({}) @binding({}), {} bytes\n",
        source.label(),
        info.vertex_entry,
        info.fragment_entry,
        uniform.name.as_deref().unwrap_or("<unnamed>"),
        uniform.group,
        uniform.binding,
        uniform.size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_summary_for_builtin() {
        let shader = LoadedShader::builtin().unwrap();
        let text = summary(&ShaderSource::Builtin, &shader.info);
        assert!(text.starts_with("OK  built-in triangle.wgsl\n"));
        assert!(text.contains("vs_main"));
        assert!(text.contains("triangle_color @group(0) @binding(0), 16 bytes"));
    }

    #[test]
    fn test_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wgsl");
        fs::write(&path, "@fragment fn fs_main() {}").unwrap();

        let result = execute(ValidateArgs { path: Some(path) }, &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_configured_path_is_used() {
        let mut config = Config::default();
        config.shader.path = Some(PathBuf::from("/nonexistent/shader.wgsl"));

        let err = execute(ValidateArgs { path: None }, &config).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/shader.wgsl"));
    }
}
