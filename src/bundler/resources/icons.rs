//! Application icon processing.
//!
//! macOS expects application icons drawn on a 1024×1024 canvas with a
//! transparent margin and rounded corners. [`process_macos_icon`] scales an
//! arbitrary source image into that shape; [`encode_icns`] writes the
//! result as a multi-resolution ICNS container.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use icns::{IconFamily, IconType, PixelFormat};
use image::{DynamicImage, ImageReader, RgbaImage, imageops};
use std::{io::Write, path::Path};
use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

/// Side length of the processed icon canvas.
pub const ICON_CANVAS_SIZE: u32 = 1024;

/// Transparent margin around the icon artwork.
pub const ICON_BORDER: u32 = 100;

/// Corner radius of the icon shape, in canvas pixels.
pub const ICON_CORNER_RADIUS: f32 = 185.4;

/// Cubic Bézier control distance approximating a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// RGBA icon slots written to ICNS containers, smallest first.
const ICNS_SIZES: [(u32, IconType); 7] = [
    (16, IconType::RGBA32_16x16),
    (32, IconType::RGBA32_32x32),
    (64, IconType::RGBA32_64x64),
    (128, IconType::RGBA32_128x128),
    (256, IconType::RGBA32_256x256),
    (512, IconType::RGBA32_512x512),
    (1024, IconType::RGBA32_512x512_2x),
];

/// Decodes an icon source image, detecting its format from the content.
pub fn load_icon(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .fs_context("failed to open source image", path)?
        .with_guessed_format()
        .fs_context("failed to read source image", path)?;

    reader
        .decode()
        .map_err(Error::from)
        .with_context(|| format!("failed to decode source image {}", path.display()))
}

/// Returns the image to embed: masked unless `raw` is set.
pub fn prepare_icon(image: DynamicImage, raw: bool) -> DynamicImage {
    if raw {
        image
    } else {
        DynamicImage::ImageRgba8(process_macos_icon(&image))
    }
}

/// Scales `source` into the macOS icon shape.
///
/// The image is resized to fill the area inside [`ICON_BORDER`], placed on a
/// transparent [`ICON_CANVAS_SIZE`] canvas and clipped to a rounded
/// rectangle. Identical input always produces identical output.
pub fn process_macos_icon(source: &DynamicImage) -> RgbaImage {
    let inner = ICON_CANVAS_SIZE - ICON_BORDER * 2;
    let sized = imageops::resize(
        &source.to_rgba8(),
        inner,
        inner,
        imageops::FilterType::Lanczos3,
    );

    let mut canvas = RgbaImage::new(ICON_CANVAS_SIZE, ICON_CANVAS_SIZE);
    imageops::replace(&mut canvas, &sized, i64::from(ICON_BORDER), i64::from(ICON_BORDER));

    let mask = rounded_rect_mask(
        ICON_CANVAS_SIZE,
        ICON_BORDER as f32,
        inner as f32,
        ICON_CORNER_RADIUS,
    );
    match mask {
        Some(mask) => {
            if !apply_mask(&mut canvas, &mask) {
                log::warn!(
                    "Icon mask is {}x{} but canvas is {}x{}, using unmasked icon",
                    mask.width(),
                    mask.height(),
                    canvas.width(),
                    canvas.height()
                );
            }
        }
        None => log::warn!("Could not rasterize icon mask, using unmasked icon"),
    }

    canvas
}

/// Rasterizes a filled, anti-aliased rounded square into an alpha mask.
fn rounded_rect_mask(canvas: u32, offset: f32, side: f32, radius: f32) -> Option<Mask> {
    let (x0, y0) = (offset, offset);
    let (x1, y1) = (offset + side, offset + side);
    let r = radius.min(side / 2.0);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r, y0);
    pb.line_to(x1 - r, y0);
    pb.cubic_to(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
    pb.line_to(x1, y1 - r);
    pb.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    pb.line_to(x0 + r, y1);
    pb.cubic_to(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
    pb.line_to(x0, y0 + r);
    pb.cubic_to(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
    pb.close();
    let path = pb.finish()?;

    let mut mask = Mask::new(canvas, canvas)?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

/// Scales each pixel's alpha by the mask coverage.
///
/// Returns false, leaving `canvas` untouched, when the sizes differ.
fn apply_mask(canvas: &mut RgbaImage, mask: &Mask) -> bool {
    if canvas.width() != mask.width() || canvas.height() != mask.height() {
        return false;
    }

    for (pixel, &coverage) in canvas.pixels_mut().zip(mask.data()) {
        let alpha = u16::from(pixel.0[3]) * u16::from(coverage) + 127;
        pixel.0[3] = (alpha / 255) as u8;
    }
    true
}

/// Encodes `image` as an ICNS container.
///
/// Every standard RGBA slot up to the image's largest side is filled (at
/// least the 16×16 one), scaling the image to each slot's size.
pub fn encode_icns<W: Write>(image: &DynamicImage, writer: W) -> Result<()> {
    let largest = image.width().max(image.height());
    let rgba = image.to_rgba8();
    let mut family = IconFamily::new();

    for (size, icon_type) in ICNS_SIZES {
        if size > largest && size != ICNS_SIZES[0].0 {
            continue;
        }

        let scaled = if rgba.width() == size && rgba.height() == size {
            rgba.clone()
        } else {
            imageops::resize(&rgba, size, size, imageops::FilterType::Lanczos3)
        };

        let icon = icns::Image::from_data(PixelFormat::RGBA, size, size, scaled.into_raw())
            .map_err(Error::from)
            .with_context(|| format!("failed to prepare {size}x{size} icon"))?;
        family
            .add_icon_with_type(&icon, icon_type)
            .map_err(Error::from)
            .with_context(|| format!("failed to add {size}x{size} icon"))?;
    }

    family
        .write(writer)
        .map_err(Error::from)
        .context("failed to encode icns")
}
