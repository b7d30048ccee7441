//! Software drawing primitives used by the icon renderer
//!
//! Everything works directly on `image` buffers: colors are composited one
//! pixel at a time, strokes are rasterized by testing pixel positions against
//! the segment, and masks are plain single-channel images.

use anyhow::{ensure, Result};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use std::ops::Range;

/// How a drawn color combines with the pixel already in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositing {
    /// Overwrite the pixel, alpha included
    Replace,
    /// Porter-Duff "over": the color is laid on top and coverage accumulates
    SourceOver,
    /// Porter-Duff "atop": the color tints what is there, alpha stays untouched
    SourceAtop,
}

/// Combine `src` into `dst` according to `mode`
pub fn composite(dst: &mut Rgba<u8>, src: Rgba<u8>, mode: Compositing) {
    let src_alpha = f32::from(src[3]) / 255.0;

    match mode {
        Compositing::Replace => *dst = src,
        Compositing::SourceOver => {
            let dst_alpha = f32::from(dst[3]) / 255.0;
            let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
            if out_alpha <= 0.0 {
                *dst = Rgba([0, 0, 0, 0]);
                return;
            }

            for c in 0..3 {
                let value = (f32::from(src[c]) * src_alpha
                    + f32::from(dst[c]) * dst_alpha * (1.0 - src_alpha))
                    / out_alpha;
                dst[c] = to_channel(value);
            }
            dst[3] = to_channel(out_alpha * 255.0);
        }
        Compositing::SourceAtop => {
            // Nothing to tint on a transparent pixel
            if dst[3] == 0 {
                return;
            }

            for c in 0..3 {
                let value = f32::from(src[c]) * src_alpha + f32::from(dst[c]) * (1.0 - src_alpha);
                dst[c] = to_channel(value);
            }
        }
    }
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Draw a straight stroke of the given width between two points
///
/// Ends are cut square at the endpoints (butt caps): a pixel is painted when
/// it lies within `width / 2` of the segment's line and its projection falls
/// between the two endpoints. A zero-length segment paints a dot of diameter
/// `width`. Anything outside the image is clipped.
pub fn stroke_segment(
    image: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: u32,
    color: Rgba<u8>,
    mode: Compositing,
) {
    let half_width = width as f32 / 2.0;
    let (x0, y0) = from;
    let (x1, y1) = to;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let length_sq = dx * dx + dy * dy;

    let xs = pixel_span(x0.min(x1) - half_width, x0.max(x1) + half_width, image.width());
    let ys = pixel_span(y0.min(y1) - half_width, y0.max(y1) + half_width, image.height());

    for y in ys {
        for x in xs.clone() {
            let px = x as f32 - x0;
            let py = y as f32 - y0;

            let covered = if length_sq == 0.0 {
                px * px + py * py <= half_width * half_width
            } else {
                let t = (px * dx + py * dy) / length_sq;
                let distance = (px * dy - py * dx).abs() / length_sq.sqrt();
                (0.0..=1.0).contains(&t) && distance <= half_width
            };

            if covered {
                composite(image.get_pixel_mut(x, y), color, mode);
            }
        }
    }
}

/// Integer pixel range covering `[lo, hi]`, clipped to `0..limit`
fn pixel_span(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    let start = lo.floor().clamp(0.0, limit as f32) as u32;
    let end = (hi.ceil() + 1.0).clamp(0.0, limit as f32) as u32;
    start.min(end)..end
}

/// Build a mask that is opaque inside a rounded rectangle spanning the whole area
///
/// A pixel is inside when its distance to the nearest point of the inner
/// rectangle `[radius, width - radius] x [radius, height - radius]` is at most
/// `radius`. With a radius of zero the mask is fully opaque.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let r = radius as f32;
    let right = (width as f32 - r).max(r);
    let bottom = (height as f32 - r).max(r);

    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - (x as f32).clamp(r, right);
        let dy = y as f32 - (y as f32).clamp(r, bottom);

        if dx * dx + dy * dy <= r * r {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Clip the image's alpha channel to the mask
///
/// Each pixel keeps the smaller of its own alpha and the mask value, so
/// anything the mask excludes ends up fully transparent.
pub fn apply_mask(image: &mut RgbaImage, mask: &GrayImage) -> Result<()> {
    ensure!(
        image.dimensions() == mask.dimensions(),
        "Mask is {}x{} but the image is {}x{}",
        mask.width(),
        mask.height(),
        image.width(),
        image.height()
    );

    for (pixel, coverage) in image.pixels_mut().zip(mask.pixels()) {
        pixel[3] = pixel[3].min(coverage[0]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn replace_overwrites_alpha() {
        let mut pixel = Rgba([10, 20, 30, 255]);
        composite(&mut pixel, Rgba([1, 2, 3, 4]), Compositing::Replace);
        assert_eq!(pixel, Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn source_over_on_opaque_keeps_it_opaque() {
        let mut pixel = Rgba([0, 0, 0, 255]);
        composite(&mut pixel, Rgba([255, 255, 255, 100]), Compositing::SourceOver);
        assert_eq!(pixel[3], 255);
        // 255 * 100/255 = 100
        assert_eq!(pixel[0], 100);
    }

    #[test]
    fn source_over_on_transparent_takes_source() {
        let mut pixel = Rgba([0, 0, 0, 0]);
        composite(&mut pixel, Rgba([100, 200, 255, 100]), Compositing::SourceOver);
        assert_eq!(pixel, Rgba([100, 200, 255, 100]));
    }

    #[test]
    fn source_atop_never_touches_alpha() {
        let mut transparent = Rgba([0, 0, 0, 0]);
        composite(&mut transparent, Rgba([255, 255, 255, 30]), Compositing::SourceAtop);
        assert_eq!(transparent, Rgba([0, 0, 0, 0]));

        let mut opaque = Rgba([100, 150, 255, 255]);
        composite(&mut opaque, Rgba([255, 255, 255, 30]), Compositing::SourceAtop);
        assert_eq!(opaque[3], 255);
        assert!(opaque[0] > 100 && opaque[1] > 150);
        assert_eq!(opaque[2], 255);
    }

    #[test]
    fn one_pixel_vertical_stroke_is_one_column_inclusive() {
        let mut image = RgbaImage::new(10, 10);
        stroke_segment(&mut image, (4.0, 2.0), (4.0, 7.0), 1, WHITE, Compositing::Replace);

        for (x, y, pixel) in image.enumerate_pixels() {
            let expected = x == 4 && (2..=7).contains(&y);
            assert_eq!(pixel[3] == 255, expected, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn wide_stroke_has_square_ends() {
        let mut image = RgbaImage::new(20, 20);
        stroke_segment(&mut image, (5.0, 10.0), (15.0, 10.0), 4, WHITE, Compositing::Replace);

        assert_eq!(image.get_pixel(10, 8)[3], 255);
        assert_eq!(image.get_pixel(10, 12)[3], 255);
        assert_eq!(image.get_pixel(10, 13)[3], 0);
        // Nothing painted beyond the endpoints
        assert_eq!(image.get_pixel(4, 10)[3], 0);
        assert_eq!(image.get_pixel(16, 10)[3], 0);
    }

    #[test]
    fn stroke_is_clipped_to_image() {
        let mut image = RgbaImage::new(8, 8);
        stroke_segment(&mut image, (-20.0, -20.0), (30.0, 30.0), 3, WHITE, Compositing::Replace);
        assert_eq!(image.get_pixel(0, 0)[3], 255);
        assert_eq!(image.get_pixel(7, 7)[3], 255);
        assert_eq!(image.get_pixel(7, 0)[3], 0);
    }

    #[test]
    fn zero_length_stroke_is_a_dot() {
        let mut image = RgbaImage::new(9, 9);
        stroke_segment(&mut image, (4.0, 4.0), (4.0, 4.0), 4, WHITE, Compositing::Replace);
        assert_eq!(image.get_pixel(4, 4)[3], 255);
        assert_eq!(image.get_pixel(6, 4)[3], 255);
        assert_eq!(image.get_pixel(7, 4)[3], 0);
    }

    #[test]
    fn rounded_mask_cuts_corners_only() {
        let mask = rounded_rect_mask(48, 48, 6);

        assert_eq!(mask.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.get_pixel(47, 0)[0], 0);
        assert_eq!(mask.get_pixel(0, 47)[0], 0);
        assert_eq!(mask.get_pixel(47, 47)[0], 0);

        assert_eq!(mask.get_pixel(24, 0)[0], 255);
        assert_eq!(mask.get_pixel(0, 24)[0], 255);
        assert_eq!(mask.get_pixel(24, 24)[0], 255);
        assert_eq!(mask.get_pixel(6, 6)[0], 255);
    }

    #[test]
    fn zero_radius_mask_is_opaque() {
        let mask = rounded_rect_mask(5, 5, 0);
        assert!(mask.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn mask_takes_minimum_alpha() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 120]));
        let mut mask = GrayImage::from_pixel(4, 4, Luma([255]));
        mask.put_pixel(0, 0, Luma([0]));
        mask.put_pixel(1, 0, Luma([60]));

        apply_mask(&mut image, &mask).unwrap();

        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(1, 0)[3], 60);
        assert_eq!(image.get_pixel(2, 2)[3], 120);
        assert_eq!(image.get_pixel(2, 2)[0], 9);
    }

    #[test]
    fn mask_size_mismatch_is_an_error() {
        let mut image = RgbaImage::new(4, 4);
        let mask = GrayImage::new(5, 4);
        assert!(apply_mask(&mut image, &mask).is_err());
    }
}
