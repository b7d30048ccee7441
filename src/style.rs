//! Palette and layering options for the launcher icon
//!
//! The defaults reproduce the stock VoxMatrix look. Every color can be
//! overridden from a JSON style file or from the command line, written in any
//! CSS color notation.

use anyhow::{Context, Result};
use image::Rgba;
use serde::Deserialize;
use std::{fmt, path::Path, str::FromStr};

/// An RGBA color parsed from CSS notation (`#6496ff`, `rgb(100 150 255)`, ...)
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct Color(pub Rgba<u8>);

impl Color {
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Rgba([red, green, blue, alpha]))
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        self.0
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let color = css_color::Srgb::from_str(s.trim())
            .map_err(|_| anyhow::anyhow!("Invalid CSS color: {:?}", s))?;

        Ok(Self(Rgba([
            unit_to_channel(color.red),
            unit_to_channel(color.green),
            unit_to_channel(color.blue),
            unit_to_channel(color.alpha),
        ])))
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0 .0;
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

fn unit_to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Whether the glow halo is painted on top of the glyph strokes or beneath them
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlowPlacement {
    /// Glow drawn after the solid strokes, tinting them. This is the stock look.
    #[default]
    Over,
    /// Glow drawn first, so the solid strokes sit on top of it
    Under,
}

/// Colors and layering of the rendered icon
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IconStyle {
    /// Badge color at the center of the circle
    pub gradient_center: Color,
    /// Badge color at the rim of the circle
    pub gradient_edge: Color,
    pub grid: Color,
    pub glyph: Color,
    pub glow: Color,
    pub glow_placement: GlowPlacement,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            gradient_center: Color::rgb(100, 150, 255),
            gradient_edge: Color::rgb(138, 43, 195),
            grid: Color::rgba(255, 255, 255, 30),
            glyph: Color::rgb(255, 255, 255),
            glow: Color::rgba(100, 200, 255, 100),
            glow_placement: GlowPlacement::Over,
        }
    }
}

impl IconStyle {
    /// Load a style from a JSON file. Missing fields keep their default value.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read style file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse style file: {}", path.display()))
    }
}
