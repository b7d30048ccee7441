//! Procedural renderer for the VoxMatrix launcher icon
//!
//! [`render::render_icon`] draws the icon at any edge length;
//! [`generate::generate_icons`] writes it out for every Android mipmap density.

pub mod generate;
pub mod raster;
pub mod render;
pub mod style;

pub use generate::{generate_icons, GenerateOptions, DENSITIES};
pub use render::render_icon;
pub use style::{Color, GlowPlacement, IconStyle};
