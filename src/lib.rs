//! Folio carries the bespoke logic of a portfolio site.
//!
//! - [`color`]: block-sampled average color of an image, `#rrggbb` and `rgba(...)` encodings
//! - [`theme`]: persisted light/dark preference with subscribe/notify
//! - [`environment`]: interactive vs. headless host capabilities
//! - [`motion`], [`text`], [`validate`], [`date`]: small presentation helpers
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod color;
pub mod config;
pub mod date;
pub mod environment;
pub mod motion;
pub mod text;
pub mod theme;
pub mod validate;

pub use crate::foundation::core::{HexColor, Rgb};
pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::assets::{ImageFile, PixelBuffer, PixelSource, RasterImage};
pub use crate::color::{average_color, hex_to_rgb, hex_to_rgba, rgb_to_hex};
pub use crate::config::Config;
pub use crate::environment::{
    AttributeSurface, Capabilities, Dataset, Environment, JsonFileStore, KeyValueStore,
    MemoryStore, SystemPreference, SystemSignals,
};
pub use crate::motion::MotionPreference;
pub use crate::theme::{PersistOutcome, Theme, ThemeHandle, ThemePreference};
