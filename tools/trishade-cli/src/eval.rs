//! Eval command - run the CPU reference of both stages

use anyhow::Result;
use clap::Args;
use glam::Vec4;
use trishade_core::{Color, Config};
use trishade_shader::{VERTEX_COUNT, fragment_color, vertex_position};

#[derive(Args)]
pub struct EvalArgs {
    /// Uniform color as sRGB hex (default: configured triangle color)
    #[arg(long)]
    pub color: Option<Color>,

    /// Vertex indices to evaluate (default: 0 1 2)
    #[arg(long = "index", value_name = "N")]
    pub indices: Vec<u32>,
}

pub fn execute(args: EvalArgs, config: &Config) -> Result<()> {
    let color = args.color.unwrap_or(config.colors.triangle);
    let indices = if args.indices.is_empty() {
        (0..VERTEX_COUNT).collect()
    } else {
        args.indices
    };
    print!("{}", report(&indices, color));
    Ok(())
}

fn report(indices: &[u32], color: Color) -> String {
    let mut out = String::new();
    for &index in indices {
        let p = vertex_position(index);
        let note = if index < VERTEX_COUNT { "" } else { "  (outside 0..3)" };
        out.push_str(&format!(
            "vs_main({}) = ({}, {}, {}, {}){}\n",
            index, p.x, p.y, p.z, p.w, note
        ));
    }
    // The fragment stage ignores its position input.
    let c = fragment_color(&color.uniform(), Vec4::ZERO);
    out.push_str(&format!(
        "fs_main    = ({}, {}, {}, {})  [{}]\n",
        c.x, c.y, c.z, c.w, color
    ));
    out
}
