use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, parse_svg},
    foundation::error::{EncarteError, EncarteResult},
    render::composite::{over_in_place, unpremultiply_rgba8_in_place},
    template::substitute::RenderedItem,
};

/// One row's rendered pixel image composited over the background.
#[derive(Clone, Debug)]
pub struct RasterArtifact {
    /// Zero-based index of the source row.
    pub row_index: usize,
    /// Output filename, `encarte_<code>_<name>.png`.
    pub filename: String,
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
}

/// Rasterize one item's markup over the background image into an encoded PNG.
///
/// The background is scaled to fill the output canvas, the item's SVG is
/// rasterized at the same dimensions and composited source-over, and the
/// canvas is encoded as a PNG. Each call is independent: a failure rejects
/// only this row and has no effect on other rows.
pub fn compose_item(
    item: &RenderedItem,
    background: &PreparedImage,
    width: u32,
    height: u32,
) -> EncarteResult<RasterArtifact> {
    if width == 0 || height == 0 {
        return Err(EncarteError::composition(
            "output canvas dimensions must be non-zero",
        ));
    }

    let mut canvas = scale_background(background, width, height)?;
    let overlay = rasterize_item(&item.svg, width, height)?;
    over_in_place(&mut canvas, overlay.data())?;
    unpremultiply_rgba8_in_place(&mut canvas);

    let png = encode_png(canvas, width, height)?;
    Ok(RasterArtifact {
        row_index: item.row_index,
        filename: format!("{}.png", item.stem),
        png,
    })
}

/// Scale the prepared background to exactly `width` x `height`, returning an
/// owned premultiplied RGBA8 buffer.
fn scale_background(background: &PreparedImage, width: u32, height: u32) -> EncarteResult<Vec<u8>> {
    if background.width == width && background.height == height {
        return Ok(background.rgba8_premul.as_ref().clone());
    }

    let src = image::RgbaImage::from_raw(
        background.width,
        background.height,
        background.rgba8_premul.as_ref().clone(),
    )
    .ok_or_else(|| EncarteError::composition("background buffer does not match its dimensions"))?;

    // Resampling happens in premultiplied space so transparent edges don't bleed.
    let scaled = image::imageops::resize(&src, width, height, image::imageops::FilterType::Triangle);
    Ok(scaled.into_raw())
}

/// Rasterize item markup into a premultiplied RGBA8 pixmap of the canvas size.
fn rasterize_item(
    svg: &str,
    width: u32,
    height: u32,
) -> EncarteResult<resvg::tiny_skia::Pixmap> {
    let tree = parse_svg(svg)
        .map_err(|e| EncarteError::composition(format!("parse rendered item markup: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| EncarteError::composition("allocate rasterization pixmap"))?;

    let size = tree.size();
    let transform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

fn encode_png(rgba: Vec<u8>, width: u32, height: u32) -> EncarteResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| EncarteError::composition("canvas buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode composited png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
