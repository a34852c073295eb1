//! Render command - draw the triangle offscreen and save a PNG

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use trishade_core::{
    BlendMode, Color, Config, LoadedShader, OutputFormat, ShaderSource, TriangleRenderer, capture,
};

#[derive(Args)]
pub struct RenderArgs {
    /// Output PNG (default: timestamped file in the data directory)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// WGSL file to use instead of the configured shader
    #[arg(long, value_name = "FILE")]
    pub shader: Option<PathBuf>,

    /// Fail if the shader is invalid instead of falling back to the built-in one
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

/// Command-line overrides for config values used when rendering.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderOverrides {
    /// Target width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// MSAA sample count (1 or 4)
    #[arg(long)]
    pub samples: Option<u32>,

    /// Blend mode over the background
    #[arg(long, value_enum)]
    pub blend: Option<BlendArg>,

    /// Render target encoding
    #[arg(long, value_enum)]
    pub output: Option<OutputArg>,

    /// Triangle color as sRGB hex (e.g. "#ff8800")
    #[arg(long)]
    pub color: Option<Color>,

    /// Background color as sRGB hex
    #[arg(long)]
    pub background: Option<Color>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BlendArg {
    Alpha,
    Replace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Srgb,
    Linear,
}

impl From<BlendArg> for BlendMode {
    fn from(arg: BlendArg) -> Self {
        match arg {
            BlendArg::Alpha => BlendMode::Alpha,
            BlendArg::Replace => BlendMode::Replace,
        }
    }
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Srgb => OutputFormat::Srgb,
            OutputArg::Linear => OutputFormat::Linear,
        }
    }
}

impl RenderOverrides {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(height) = self.height {
            config.render.height = height;
        }
        if let Some(samples) = self.samples {
            config.render.samples = samples;
        }
        if let Some(blend) = self.blend {
            config.render.blend = blend.into();
        }
        if let Some(output) = self.output {
            config.render.output = output.into();
        }
        if let Some(color) = self.color {
            config.colors.triangle = color;
        }
        if let Some(background) = self.background {
            config.colors.background = background;
        }
    }
}

impl RenderArgs {
    /// Load the shader from `--shader` or the config, honoring `--strict`.
    fn load_shader(&self, config: &Config) -> Result<LoadedShader> {
        let path = self.shader.as_deref().or(config.shader.path.as_deref());
        let source = ShaderSource::from_path(path);
        if self.strict {
            LoadedShader::load(&source)
        } else {
            LoadedShader::load_or_builtin(&source)
        }
    }
}

pub fn execute(args: RenderArgs, mut config: Config) -> Result<()> {
    args.overrides.apply(&mut config);
    config.render.validate()?;

    let shader = args.load_shader(&config)?;
    let renderer = TriangleRenderer::new(&config.render, &shader)?;

    let out = match args.out {
        Some(path) => path,
        None => capture::default_render_path()?,
    };
    renderer.render_to_png(config.colors.triangle, config.colors.background, &out)?;

    println!("{}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = Config::default();
        let overrides = RenderOverrides {
            width: Some(100),
            blend: Some(BlendArg::Replace),
            color: Some(Color::WHITE),
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.render.width, 100);
        assert_eq!(config.render.height, 512);
        assert_eq!(config.render.blend, BlendMode::Replace);
        assert_eq!(config.render.output, OutputFormat::Srgb);
        assert_eq!(config.colors.triangle, Color::WHITE);
        assert_eq!(config.colors.background, Config::default().colors.background);
    }

    fn args(shader: Option<&str>, strict: bool) -> RenderArgs {
        RenderArgs {
            out: None,
            shader: shader.map(PathBuf::from),
            strict,
            overrides: RenderOverrides::default(),
        }
    }

    #[test]
    fn test_strict_rejects_bad_shader() {
        let mut config = Config::default();
        config.shader.path = Some(PathBuf::from("/nonexistent/shader.wgsl"));

        assert!(args(None, true).load_shader(&config).is_err());

        let shader = args(None, false).load_shader(&config).unwrap();
        assert_eq!(shader.origin, ShaderSource::Builtin);
    }

    #[test]
    fn test_shader_flag_wins_over_config() {
        let mut config = Config::default();
        config.shader.path = Some(PathBuf::from("/nonexistent/shader.wgsl"));

        let err = args(Some("/nonexistent/flag.wgsl"), true)
            .load_shader(&config)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("flag.wgsl"));
    }

    #[test]
    fn test_invalid_samples_fail_before_gpu_init() {
        let mut args = args(None, false);
        args.overrides.samples = Some(3);
        let err = execute(args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("sample count"));
    }
}
