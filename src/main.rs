use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use voxmatrix_icons::{generate_icons, Color, GenerateOptions, GlowPlacement, IconStyle};

#[derive(Debug, Parser)]
#[clap(
    name = "voxmatrix-icons",
    about = "Render the VoxMatrix launcher icon for every Android density"
)]
struct Args {
    /// Android resource directory that receives the mipmap-* folders.
    #[clap(short, long, value_name = "DIR", default_value = "./res")]
    output: PathBuf,

    /// Custom PNG icon sizes to generate. When set, only these sizes are generated.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    png: Option<Vec<u32>>,

    /// JSON file overriding the icon colors
    #[clap(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Badge color at the center of the circle (CSS color format)
    #[clap(long, value_name = "COLOR")]
    center_color: Option<Color>,

    /// Badge color at the rim of the circle (CSS color format)
    #[clap(long, value_name = "COLOR")]
    edge_color: Option<Color>,

    /// Grid overlay color (CSS color format)
    #[clap(long, value_name = "COLOR")]
    grid_color: Option<Color>,

    /// Color of the V glyph (CSS color format)
    #[clap(long, value_name = "COLOR")]
    glyph_color: Option<Color>,

    /// Color of the glow around the V glyph (CSS color format)
    #[clap(long, value_name = "COLOR")]
    glow_color: Option<Color>,

    /// Draw the glow beneath the glyph instead of over it
    #[clap(long)]
    glow_under: bool,
}

impl Args {
    fn into_options(self) -> Result<GenerateOptions> {
        let mut style = match &self.style {
            Some(path) => IconStyle::load(path)?,
            None => IconStyle::default(),
        };

        let overrides = [
            (self.center_color, &mut style.gradient_center),
            (self.edge_color, &mut style.gradient_edge),
            (self.grid_color, &mut style.grid),
            (self.glyph_color, &mut style.glyph),
            (self.glow_color, &mut style.glow),
        ];
        for (value, slot) in overrides {
            if let Some(color) = value {
                *slot = color;
            }
        }

        if self.glow_under {
            style.glow_placement = GlowPlacement::Under;
        }

        Ok(GenerateOptions {
            output: self.output,
            png: self.png,
            style,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let options = Args::parse().into_options()?;
    tracing::debug!(?options, "resolved options");

    generate_icons(&options)?;
    Ok(())
}
