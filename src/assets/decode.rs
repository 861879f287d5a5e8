use std::sync::Arc;

use anyhow::Context;

use crate::{foundation::error::EncarteResult, render::composite::premultiply_rgba8_in_place};

/// Decoded background bitmap in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_background(bytes: &[u8]) -> EncarteResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode background image")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG markup into a `usvg` tree ready for rasterization.
pub fn parse_svg(svg: &str) -> EncarteResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse svg tree")?;
    Ok(tree)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
