//! The launcher icon itself
//!
//! A circular blue-to-purple badge with a faint grid, a white "V" glyph with a
//! light-blue glow, clipped to a rounded square. Every measurement is derived
//! from the edge length so the same drawing scales to each density.

use crate::raster::{apply_mask, rounded_rect_mask, stroke_segment, Compositing};
use crate::style::{GlowPlacement, IconStyle};
use anyhow::Result;
use image::{Rgba, RgbaImage};

/// Size-derived measurements for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconGeometry {
    pub size: u32,
    /// Border left around the badge on every side
    pub padding: u32,
    pub center: u32,
    pub radius: u32,
    pub grid_spacing: u32,
    pub glyph_width: u32,
    pub glow_width: u32,
    pub corner_radius: u32,
    pub glyph_left: (f32, f32),
    pub glyph_right: (f32, f32),
    pub glyph_bottom: (f32, f32),
}

impl IconGeometry {
    pub fn new(size: u32) -> Self {
        let padding = (size as f32 * 0.1).round() as u32;
        let center = size / 2;
        let radius = size.saturating_sub(padding * 2) / 2;
        let glyph_width = (size / 12).max(2);

        let top = (size as f32 * 0.25) as u32 as f32;
        let bottom = (size as f32 * 0.75) as u32 as f32;
        let left = (size as f32 * 0.35) as u32 as f32;
        let right = (size as f32 * 0.65) as u32 as f32;

        Self {
            size,
            padding,
            center,
            radius,
            grid_spacing: (size / 16).max(4),
            glyph_width,
            glow_width: glyph_width + 4,
            corner_radius: size / 8,
            glyph_left: (left, top),
            glyph_right: (right, top),
            glyph_bottom: (center as f32, bottom),
        }
    }
}

/// Render the icon at `size` x `size` pixels
#[tracing::instrument(skip(style))]
pub fn render_icon(size: u32, style: &IconStyle) -> Result<RgbaImage> {
    let geometry = IconGeometry::new(size);
    tracing::debug!(?geometry, "derived icon geometry");

    let mut img = RgbaImage::new(size, size);

    paint_badge(&mut img, &geometry, style);
    paint_grid(&mut img, &geometry, style.grid.to_rgba());

    match style.glow_placement {
        GlowPlacement::Over => {
            paint_glyph(&mut img, &geometry, style.glyph.to_rgba(), geometry.glyph_width);
            paint_glyph(&mut img, &geometry, style.glow.to_rgba(), geometry.glow_width);
        }
        GlowPlacement::Under => {
            paint_glyph(&mut img, &geometry, style.glow.to_rgba(), geometry.glow_width);
            paint_glyph(&mut img, &geometry, style.glyph.to_rgba(), geometry.glyph_width);
        }
    }

    let mask = rounded_rect_mask(size, size, geometry.corner_radius);
    apply_mask(&mut img, &mask)?;

    Ok(img)
}

/// Fill the circular badge with a radial gradient; pixels outside stay untouched
pub fn paint_badge(img: &mut RgbaImage, geometry: &IconGeometry, style: &IconStyle) {
    let from = style.gradient_center.to_rgba();
    let to = style.gradient_edge.to_rgba();
    let center = i64::from(geometry.center);
    let radius = geometry.radius as f32;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = i64::from(x) - center;
        let dy = i64::from(y) - center;
        let dist = ((dx * dx + dy * dy) as f32).sqrt();

        if dist <= radius {
            let ratio = if geometry.radius == 0 { 0.0 } else { dist / radius };
            *pixel = Rgba([
                lerp_channel(from[0], to[0], ratio),
                lerp_channel(from[1], to[1], ratio),
                lerp_channel(from[2], to[2], ratio),
                255,
            ]);
        }
    }
}

fn lerp_channel(from: u8, to: u8, ratio: f32) -> u8 {
    (f32::from(from) + (f32::from(to) - f32::from(from)) * ratio) as u8
}

fn paint_grid(img: &mut RgbaImage, geometry: &IconGeometry, color: Rgba<u8>) {
    let start = geometry.padding;
    let end = geometry.size.saturating_sub(geometry.padding);

    for i in (start..end).step_by(geometry.grid_spacing as usize) {
        let (i, start, end) = (i as f32, start as f32, end as f32);
        stroke_segment(img, (i, start), (i, end), 1, color, Compositing::SourceAtop);
        stroke_segment(img, (start, i), (end, i), 1, color, Compositing::SourceAtop);
    }
}

fn paint_glyph(img: &mut RgbaImage, geometry: &IconGeometry, color: Rgba<u8>, width: u32) {
    for top in [geometry.glyph_left, geometry.glyph_right] {
        stroke_segment(img, top, geometry.glyph_bottom, width, color, Compositing::SourceOver);
    }
}
