use crate::{
    assets::RasterImage,
    foundation::error::{FolioError, FolioResult},
};

/// Largest SVG raster edge we are willing to allocate.
pub const MAX_SVG_DIM: u32 = 16_384;

pub fn decode_image(bytes: &[u8]) -> FolioResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FolioError::pixel_access(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::new(width, height, rgba.into_raw())
}

#[cfg(feature = "svg")]
pub fn rasterize_svg(bytes: &[u8]) -> FolioResult<RasterImage> {
    fn to_px(v: f32) -> FolioResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(FolioError::pixel_access("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| FolioError::pixel_access(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(FolioError::pixel_access(format!(
            "svg raster size too large: {width}x{height} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FolioError::pixel_access("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied pixels; samplers expect straight alpha.
    let mut rgba8 = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba8.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RasterImage::new(width, height, rgba8)
}

#[cfg(not(feature = "svg"))]
pub fn rasterize_svg(_bytes: &[u8]) -> FolioResult<RasterImage> {
    Err(FolioError::pixel_access(
        "svg support is disabled (enable the `svg` feature)",
    ))
}
