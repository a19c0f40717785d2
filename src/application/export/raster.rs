//! PNG rasterization onto an opaque white background.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use resvg::tiny_skia::{self, Pixmap};
use resvg::usvg::{Options, Tree};

use super::ExportError;
use crate::domain::drawing::Drawing;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Rasterize a drawing at its native size over opaque white and encode as PNG.
pub fn png_on_white(drawing: &Drawing) -> Result<Vec<u8>, ExportError> {
    let composed = match drawing {
        Drawing::Vector { svg, .. } => rasterize_svg(svg)?,
        Drawing::Raster { png, .. } => flatten_png(png)?,
    };

    let mut encoded = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(composed)
        .to_rgb8()
        .write_to(&mut encoded, ImageFormat::Png)
        .map_err(|err| ExportError::Raster(err.to_string()))?;
    Ok(encoded.into_inner())
}

/// Native pixel size of an SVG document, rounded up.
pub fn svg_dimensions(svg: &str) -> Result<(u32, u32), ExportError> {
    let tree = parse_svg(svg)?;
    let size = tree.size();
    Ok((
        size.width().ceil().max(1.0) as u32,
        size.height().ceil().max(1.0) as u32,
    ))
}

fn parse_svg(svg: &str) -> Result<Tree, ExportError> {
    let mut options = Options::default();
    options.fontdb_mut().load_system_fonts();
    Tree::from_str(svg, &options).map_err(|err| ExportError::Raster(err.to_string()))
}

fn rasterize_svg(svg: &str) -> Result<RgbaImage, ExportError> {
    let tree = parse_svg(svg)?;
    let size = tree.size();
    let width = size.width().ceil().max(1.0) as u32;
    let height = size.height().ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| ExportError::Raster(format!("cannot allocate {width}x{height} surface")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut image = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| ExportError::Raster("rasterized buffer has unexpected size".into()))?;
    // Pixmap data is premultiplied; over opaque white every pixel is already opaque.
    for pixel in image.pixels_mut() {
        pixel.0[3] = 255;
    }
    Ok(image)
}

fn flatten_png(png: &[u8]) -> Result<RgbaImage, ExportError> {
    let source = image::load_from_memory_with_format(png, ImageFormat::Png)
        .map_err(|err| ExportError::Raster(err.to_string()))?
        .to_rgba8();
    let mut background = RgbaImage::from_pixel(source.width(), source.height(), WHITE);
    imageops::overlay(&mut background, &source, 0, 0);
    Ok(background)
}
