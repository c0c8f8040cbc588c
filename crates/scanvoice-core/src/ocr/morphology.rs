//! Rectangular-kernel morphology.
//!
//! `imageproc`'s norm-based erode/dilate only express square and diamond
//! structuring elements; isolating ruling lines needs wide flat kernels
//! (e.g. 25x1) and gap repair needs a tall narrow one (3x6), so the
//! min/max filters are implemented here with explicit kernel dimensions.
//! Pixels outside the image are ignored, which matches the neutral border
//! handling of the usual erode/dilate definitions.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::otsu_level;

/// Binarize a grayscale image with an automatic Otsu threshold, inverted
/// so that ink and lines become foreground (255).
pub fn binarize_inverted(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    let (width, height) = gray.dimensions();

    let mut out = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = if pixel[0] > level { 0 } else { 255 };
        out.put_pixel(x, y, Luma([value]));
    }
    out
}

/// Dilation (max filter) with a `kw` x `kh` rectangular kernel.
pub fn dilate_rect(img: &GrayImage, kw: u32, kh: u32) -> GrayImage {
    rect_filter(img, kw, kh, true)
}

/// Erosion (min filter) with a `kw` x `kh` rectangular kernel.
pub fn erode_rect(img: &GrayImage, kw: u32, kh: u32) -> GrayImage {
    rect_filter(img, kw, kh, false)
}

/// Morphological opening: `iterations` erosions followed by the same
/// number of dilations. Removes foreground structures smaller than the
/// kernel while restoring the extent of survivors.
pub fn open_rect(img: &GrayImage, kw: u32, kh: u32, iterations: u32) -> GrayImage {
    let mut result = img.clone();
    for _ in 0..iterations {
        result = erode_rect(&result, kw, kh);
    }
    for _ in 0..iterations {
        result = dilate_rect(&result, kw, kh);
    }
    result
}

/// Morphological closing on a color image, applied channel-wise: dilation
/// followed by erosion with the same rectangular kernel. Fills gaps
/// smaller than the kernel.
pub fn close_rect_rgb(img: &RgbImage, kw: u32, kh: u32) -> RgbImage {
    let dilated = rect_filter_rgb(img, kw, kh, true);
    rect_filter_rgb(&dilated, kw, kh, false)
}

fn rect_filter(img: &GrayImage, kw: u32, kh: u32, maximum: bool) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut out = GrayImage::new(width, height);
    let anchor_x = (kw / 2) as i64;
    let anchor_y = (kh / 2) as i64;

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut acc = if maximum { u8::MIN } else { u8::MAX };
            for dy in 0..kh as i64 {
                for dx in 0..kw as i64 {
                    let sx = x + dx - anchor_x;
                    let sy = y + dy - anchor_y;
                    if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
                        continue;
                    }
                    let v = img.get_pixel(sx as u32, sy as u32)[0];
                    acc = if maximum { acc.max(v) } else { acc.min(v) };
                }
            }
            out.put_pixel(x as u32, y as u32, Luma([acc]));
        }
    }

    out
}

fn rect_filter_rgb(img: &RgbImage, kw: u32, kh: u32, maximum: bool) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut out = RgbImage::new(width, height);
    let anchor_x = (kw / 2) as i64;
    let anchor_y = (kh / 2) as i64;

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let init = if maximum { u8::MIN } else { u8::MAX };
            let mut acc = [init; 3];
            for dy in 0..kh as i64 {
                for dx in 0..kw as i64 {
                    let sx = x + dx - anchor_x;
                    let sy = y + dy - anchor_y;
                    if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
                        continue;
                    }
                    let pixel = img.get_pixel(sx as u32, sy as u32);
                    for c in 0..3 {
                        acc[c] = if maximum {
                            acc[c].max(pixel[c])
                        } else {
                            acc[c].min(pixel[c])
                        };
                    }
                }
            }
            out.put_pixel(x as u32, y as u32, Rgb(acc));
        }
    }

    out
}
