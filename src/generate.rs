use crate::render::render_icon;
use crate::style::IconStyle;
use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Android launcher densities and their icon edge length in pixels
pub const DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

pub const LAUNCHER_FILE_NAME: &str = "ic_launcher.png";

// Library-side options, filled in by the CLI
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Resource directory receiving the `mipmap-*` folders
    pub output: PathBuf,
    /// Custom PNG sizes. When set, only these sizes are generated.
    pub png: Option<Vec<u32>>,
    pub style: IconStyle,
}

/// Render and write every requested icon, returning the written paths in order
pub fn generate_icons(options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    // Ensure the output directory exists
    create_dir_all(&options.output).context("Can't create output directory")?;

    let written = if let Some(sizes) = &options.png {
        generate_custom_sizes(&options.output, sizes, &options.style)?
    } else {
        generate_android_icons(&options.output, &options.style)?
    };

    println!("\nIcon generation complete!");
    println!("Icons saved to: {}", options.output.display());
    Ok(written)
}

/// Write `mipmap-<density>/ic_launcher.png` for every entry of [`DENSITIES`]
///
/// Stops at the first failure; icons already written stay on disk.
pub fn generate_android_icons(out_dir: &Path, style: &IconStyle) -> Result<Vec<PathBuf>> {
    println!("Generating Android launcher icons...");
    let mut written = Vec::with_capacity(DENSITIES.len());

    for (density, size) in DENSITIES {
        let mipmap_dir = out_dir.join(format!("mipmap-{density}"));
        create_dir_all(&mipmap_dir)
            .with_context(|| format!("Can't create {}", mipmap_dir.display()))?;

        let icon = render_checked(size, style)?;
        let output_path = mipmap_dir.join(LAUNCHER_FILE_NAME);
        save_png(&icon, &output_path)?;

        println!("  ✓ Generated mipmap-{density}/{LAUNCHER_FILE_NAME} ({size}x{size})");
        written.push(output_path);
    }

    Ok(written)
}

/// Write one `<size>x<size>.png` per requested size
pub fn generate_custom_sizes(
    out_dir: &Path,
    sizes: &[u32],
    style: &IconStyle,
) -> Result<Vec<PathBuf>> {
    println!("Generating custom PNG sizes...");
    let mut written = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let icon = render_checked(size, style)?;
        let filename = format!("{size}x{size}.png");
        let output_path = out_dir.join(&filename);
        save_png(&icon, &output_path)?;

        println!("  ✓ Generated {filename}");
        written.push(output_path);
    }

    Ok(written)
}

fn render_checked(size: u32, style: &IconStyle) -> Result<RgbaImage> {
    if size == 0 {
        bail!("Icon size must be greater than zero");
    }

    render_icon(size, style).with_context(|| format!("Failed to render {size}x{size} icon"))
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file: {}", path.display()))?;
    let mut out_file = BufWriter::new(file);

    write_png(image.as_raw(), &mut out_file, image.width())
        .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
    out_file.flush()?;

    tracing::debug!(path = %path.display(), size = image.width(), "wrote icon");
    Ok(())
}

// Encode square RGBA data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
