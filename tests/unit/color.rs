use std::borrow::Cow;

use super::*;
use crate::assets::{PixelBuffer, RasterImage};

struct BlockedSource;

impl PixelSource for BlockedSource {
    fn read_pixels(&self) -> FolioResult<PixelBuffer<'_>> {
        Err(FolioError::pixel_access("cross-origin read blocked"))
    }
}

struct EmptySurface;

impl PixelSource for EmptySurface {
    fn read_pixels(&self) -> FolioResult<PixelBuffer<'_>> {
        Ok(PixelBuffer {
            width: 0,
            height: 0,
            data: Cow::Borrowed(&[]),
        })
    }
}

fn solid(width: u32, height: u32, px: [u8; 4]) -> RasterImage {
    let data = px.repeat((width * height) as usize);
    RasterImage::new(width, height, data).unwrap()
}

#[test]
fn solid_image_averages_to_its_color() {
    let img = solid(7, 3, [31, 182, 255, 255]);
    assert_eq!(average_color(&img), Rgb::new(31, 182, 255));
}

#[test]
fn alpha_is_ignored() {
    let img = solid(4, 4, [10, 20, 30, 0]);
    assert_eq!(average_color(&img), Rgb::new(10, 20, 30));
}

#[test]
fn samples_every_fifth_pixel_only() {
    // 10 pixels: samples land on pixel 0 and pixel 5.
    let mut data = Vec::new();
    for i in 0..10u8 {
        let v = match i {
            0 => 100,
            5 => 201,
            _ => 255,
        };
        data.extend_from_slice(&[v, 0, v / 2, 255]);
    }
    let img = RasterImage::new(10, 1, data).unwrap();
    // (100 + 201) / 2 = 150 (truncated), (50 + 100) / 2 = 75
    assert_eq!(average_color(&img), Rgb::new(150, 0, 75));
}

#[test]
fn single_pixel_image() {
    let img = solid(1, 1, [9, 8, 7, 255]);
    assert_eq!(average_color(&img), Rgb::new(9, 8, 7));
}

#[test]
fn averaging_is_deterministic() {
    let data: Vec<u8> = (0..(13 * 11 * 4)).map(|i| (i * 37 % 256) as u8).collect();
    let img = RasterImage::new(13, 11, data).unwrap();
    let first = average_color(&img);
    for _ in 0..5 {
        assert_eq!(average_color(&img), first);
    }
}

#[test]
fn blocked_read_falls_back_to_black() {
    assert_eq!(average_color(&BlockedSource), Rgb::BLACK);
    assert!(matches!(
        try_average_color(&BlockedSource),
        Err(FolioError::PixelAccess(_))
    ));
}

#[test]
fn zero_sized_surface_falls_back_to_black() {
    assert_eq!(average_color(&EmptySurface), Rgb::BLACK);
    assert!(try_average_color(&EmptySurface).is_err());
}

#[test]
fn sample_rgba_ignores_partial_trailing_pixel() {
    assert_eq!(sample_rgba(&[]), Rgb::BLACK);
    assert_eq!(sample_rgba(&[40, 50, 60, 255, 1, 2]), Rgb::new(40, 50, 60));
}

#[test]
fn rgb_to_hex_known_values() {
    assert_eq!(rgb_to_hex(Rgb::new(0, 0, 0)).as_str(), "#000000");
    assert_eq!(rgb_to_hex(Rgb::new(255, 255, 255)).as_str(), "#ffffff");
    assert_eq!(rgb_to_hex(Rgb::new(31, 182, 255)).as_str(), "#1fb6ff");
}

#[test]
fn hex_round_trip_over_channel_grid() {
    for r in (0..=255u16).step_by(15) {
        for g in (0..=255u16).step_by(17) {
            for b in [0u8, 1, 127, 128, 254, 255] {
                let rgb = Rgb::new(r as u8, g as u8, b);
                assert_eq!(hex_to_rgb(rgb_to_hex(rgb).as_str()).unwrap(), rgb);
            }
        }
    }
}

#[test]
fn hex_to_rgba_formats_channels_and_alpha() {
    assert_eq!(
        hex_to_rgba("#1fb6ff", 0.5).unwrap(),
        "rgba(31, 182, 255, 0.5)"
    );
    assert_eq!(hex_to_rgba("000000", 1.0).unwrap(), "rgba(0, 0, 0, 1)");
    assert_eq!(hex_to_rgba("#FFFFFF", 0.25).unwrap(), "rgba(255, 255, 255, 0.25)");
}

#[test]
fn hex_to_rgba_rejects_malformed_input() {
    for bad in ["#fff", "1fb6f", "#1fb6ffaa", "zzzzzz", "#12 456"] {
        assert!(
            matches!(hex_to_rgba(bad, 1.0), Err(FolioError::MalformedHex(_))),
            "{bad}"
        );
    }
}
