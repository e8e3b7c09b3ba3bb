//! Pixel operations behind each manipulation action.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use kurbo::{Affine, Point, Rect};
use socrop_core::ManipulationAction;

pub fn apply(image: DynamicImage, action: &ManipulationAction) -> DynamicImage {
    match *action {
        ManipulationAction::Rotate { degrees } => rotate(image, degrees),
        ManipulationAction::FlipHorizontal => image.fliph(),
        ManipulationAction::FlipVertical => image.flipv(),
        ManipulationAction::Resize { width } => resize_to_width(image, width),
    }
}

/// Rotate clockwise. Quarter turns are lossless; other angles grow the canvas
/// to fit and leave the corners transparent.
pub fn rotate(image: DynamicImage, degrees: i32) -> DynamicImage {
    match degrees.rem_euclid(360) {
        0 => image,
        90 => image.rotate90(),
        180 => image.rotate180(),
        270 => image.rotate270(),
        other => rotate_free(&image, f64::from(other)),
    }
}

fn rotate_free(image: &DynamicImage, degrees: f64) -> DynamicImage {
    let src = image.to_rgba8();
    let (w, h) = (f64::from(src.width()), f64::from(src.height()));

    let rotation = Affine::rotate(degrees.to_radians());
    let bounds = rotation.transform_rect_bbox(Rect::new(0.0, 0.0, w, h));
    let forward = Affine::translate(-bounds.origin().to_vec2()) * rotation;
    let inverse = forward.inverse();

    let out_w = (bounds.width().round() as u32).max(1);
    let out_h = (bounds.height().round() as u32).max(1);

    // Nearest neighbour, sampled at pixel centers.
    let out = RgbaImage::from_fn(out_w, out_h, |x, y| {
        let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if p.x >= 0.0 && p.y >= 0.0 && p.x < w && p.y < h {
            *src.get_pixel(p.x as u32, p.y as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    DynamicImage::ImageRgba8(out)
}

/// Scale down to `width`, keeping the aspect ratio. Narrower images are left
/// alone.
pub fn resize_to_width(image: DynamicImage, width: u32) -> DynamicImage {
    if width == 0 || width >= image.width() {
        return image;
    }
    let scale = f64::from(width) / f64::from(image.width());
    let height = ((f64::from(image.height()) * scale).round() as u32).max(1);
    image.resize_exact(width, height, FilterType::Lanczos3)
}
