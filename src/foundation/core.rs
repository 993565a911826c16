use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{FolioError, FolioResult};

/// Straight (non-premultiplied) 8-bit RGB sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Sentinel returned when no pixels could be sampled.
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> HexColor {
        HexColor(format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// `#rrggbb` color, always lowercase and zero-padded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse exactly six hex digits with an optional leading `#`.
    ///
    /// Uppercase digits are accepted and normalized to lowercase.
    pub fn parse(s: &str) -> FolioResult<Self> {
        parse_hex_channels(s).map(|rgb| rgb.to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rgb(&self) -> Rgb {
        // Construction guarantees `#` followed by six valid hex digits.
        let byte = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        Rgb::new(byte(1), byte(3), byte(5))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Rgb> for HexColor {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn parse_hex_channels(s: &str) -> FolioResult<Rgb> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FolioError::malformed_hex(format!(
            "expected #RRGGBB or RRGGBB, got \"{s}\""
        )));
    }

    fn hex_byte(pair: &str) -> FolioResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| FolioError::malformed_hex(format!("invalid hex byte \"{pair}\"")))
    }

    Ok(Rgb::new(
        hex_byte(&digits[0..2])?,
        hex_byte(&digits[2..4])?,
        hex_byte(&digits[4..6])?,
    ))
}
