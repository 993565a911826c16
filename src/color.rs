//! Representative-color extraction and color string encodings.
//!
//! [`average_color`] block-samples a pixel buffer: every [`BLOCK_SIZE`]th pixel starting at the
//! first one contributes its R, G and B channels (alpha is ignored), and each channel sum is
//! divided by the sample count with truncation.
//!
//! Failing to read pixels never surfaces as an error here. The caller gets [`Rgb::BLACK`] and the
//! failure is logged as a warning, so a broken image and a genuinely black one can only be told
//! apart through the log.

use crate::{
    assets::PixelSource,
    foundation::{
        core::{HexColor, Rgb, parse_hex_channels},
        error::{FolioError, FolioResult},
    },
};

/// Pixels skipped between samples (inclusive of the sampled one).
pub const BLOCK_SIZE: usize = 5;

/// Average color of `source`, or [`Rgb::BLACK`] if its pixels cannot be read.
#[tracing::instrument(skip(source))]
pub fn average_color(source: &dyn PixelSource) -> Rgb {
    match try_average_color(source) {
        Ok(rgb) => rgb,
        Err(err) => {
            tracing::warn!(error = %err, "unable to access image data, using black");
            Rgb::BLACK
        }
    }
}

/// Like [`average_color`] but hands the access failure back instead of logging it.
pub fn try_average_color(source: &dyn PixelSource) -> FolioResult<Rgb> {
    let buf = source.read_pixels()?;
    if buf.width == 0 || buf.height == 0 {
        return Err(FolioError::pixel_access(format!(
            "no drawing surface for a {}x{} image",
            buf.width, buf.height
        )));
    }
    Ok(sample_rgba(&buf.data))
}

/// Block-sample a straight RGBA8 buffer.
///
/// Trailing bytes that do not form a whole pixel are ignored. An empty buffer yields black.
pub fn sample_rgba(rgba8: &[u8]) -> Rgb {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for px in rgba8.chunks_exact(4).step_by(BLOCK_SIZE) {
        sums[0] += u64::from(px[0]);
        sums[1] += u64::from(px[1]);
        sums[2] += u64::from(px[2]);
        count += 1;
    }
    if count == 0 {
        return Rgb::BLACK;
    }
    // Each mean is bounded by the max channel value, so the narrowing cannot truncate.
    Rgb::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}

pub fn rgb_to_hex(rgb: Rgb) -> HexColor {
    rgb.to_hex()
}

/// Parse `#rrggbb` (the `#` is optional) into channels.
pub fn hex_to_rgb(hex: &str) -> FolioResult<Rgb> {
    parse_hex_channels(hex)
}

/// Render a hex color as a CSS `rgba(r, g, b, a)` string.
///
/// `alpha` is printed as given and not range-checked.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> FolioResult<String> {
    let Rgb { r, g, b } = parse_hex_channels(hex)?;
    Ok(format!("rgba({r}, {g}, {b}, {alpha})"))
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;
