use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::foundation::error::{FolioError, FolioResult};

pub mod decode;

/// Readable view of straight RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct PixelBuffer<'a> {
    pub width: u32,
    pub height: u32,
    pub data: Cow<'a, [u8]>,
}

/// Anything that can hand out its decoded pixels.
///
/// Failing to produce a buffer (decode error, blocked read, no drawing surface) is reported as
/// [`FolioError::PixelAccess`].
pub trait PixelSource {
    fn read_pixels(&self) -> FolioResult<PixelBuffer<'_>>;
}

/// Owned, decoded raster image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> FolioResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| FolioError::validation("image dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(FolioError::validation(format!(
                "rgba buffer length {} does not match {width}x{height}x4 = {expected}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_rgba8(&self) -> &[u8] {
        &self.rgba8
    }
}

impl PixelSource for RasterImage {
    fn read_pixels(&self) -> FolioResult<PixelBuffer<'_>> {
        Ok(PixelBuffer {
            width: self.width,
            height: self.height,
            data: Cow::Borrowed(&self.rgba8),
        })
    }
}

/// Image on disk, decoded lazily on every read.
///
/// Files ending in `.svg` are rasterized at their intrinsic size; everything else goes through
/// the `image` decoders.
#[derive(Clone, Debug)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_svg(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
    }

    pub fn decode(&self) -> FolioResult<RasterImage> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            FolioError::pixel_access(format!("read image '{}': {e}", self.path.display()))
        })?;
        let decoded = if self.is_svg() {
            decode::rasterize_svg(&bytes)
        } else {
            decode::decode_image(&bytes)
        };
        decoded.map_err(|e| match e {
            FolioError::PixelAccess(msg) => {
                FolioError::pixel_access(format!("'{}': {msg}", self.path.display()))
            }
            other => other,
        })
    }
}

impl PixelSource for ImageFile {
    fn read_pixels(&self) -> FolioResult<PixelBuffer<'_>> {
        let img = self.decode()?;
        Ok(PixelBuffer {
            width: img.width,
            height: img.height,
            data: Cow::Owned(img.rgba8),
        })
    }
}
