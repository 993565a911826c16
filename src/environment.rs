//! Host capabilities, probed once at startup.
//!
//! An [`Environment`] is either interactive, carrying a persistence store, the system preference
//! signals and a presentation attribute surface, or headless, carrying nothing. Everything that
//! touches persistence or system signals goes through the interactive variant.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{config::Config, foundation::error::FolioResult};

pub mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

/// Host-level appearance signals.
pub trait SystemPreference: Send {
    fn prefers_dark(&self) -> bool;

    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}

/// Write-only target that mirrors state for styling consumers (think `data-*` attributes).
pub trait AttributeSurface: Send {
    fn set_attribute(&mut self, name: &str, value: &str) -> FolioResult<()>;
}

/// System signals captured as plain values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemSignals {
    pub prefers_dark: bool,
    pub prefers_reduced_motion: bool,
}

impl SystemSignals {
    pub fn dark() -> Self {
        Self {
            prefers_dark: true,
            ..Self::default()
        }
    }

    pub fn light() -> Self {
        Self::default()
    }

    /// Read signals from environment variables.
    ///
    /// `FOLIO_COLOR_SCHEME` (`dark`/`light`) wins; otherwise the background index of `COLORFGBG`
    /// decides (0-6 and 8 are dark). `FOLIO_REDUCED_MOTION` accepts `1`, `true` or `reduce`.
    pub fn from_env_lookup<FEnv>(env_lookup: &FEnv) -> Self
    where
        FEnv: Fn(&str) -> Option<String>,
    {
        let prefers_dark = match env_lookup("FOLIO_COLOR_SCHEME")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("dark") => true,
            Some("light") => false,
            _ => env_lookup("COLORFGBG")
                .as_deref()
                .and_then(colorfgbg_is_dark)
                .unwrap_or(false),
        };
        let prefers_reduced_motion = env_lookup("FOLIO_REDUCED_MOTION")
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "reduce"
                )
            })
            .unwrap_or(false);

        Self {
            prefers_dark,
            prefers_reduced_motion,
        }
    }
}

impl SystemPreference for SystemSignals {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion
    }
}

fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

/// In-memory attribute map, the `dataset` of a document root. Clones share storage.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    attrs: Arc<Mutex<BTreeMap<String, String>>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.attrs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl AttributeSurface for Dataset {
    fn set_attribute(&mut self, name: &str, value: &str) -> FolioResult<()> {
        self.attrs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

/// What an interactive host provides.
pub struct Capabilities {
    pub store: Box<dyn KeyValueStore>,
    pub system: Box<dyn SystemPreference>,
    pub surface: Box<dyn AttributeSurface>,
}

pub enum Environment {
    Interactive(Capabilities),
    Headless,
}

impl Environment {
    pub fn interactive(
        store: impl KeyValueStore + 'static,
        system: impl SystemPreference + 'static,
        surface: impl AttributeSurface + 'static,
    ) -> Self {
        Self::Interactive(Capabilities {
            store: Box::new(store),
            system: Box::new(system),
            surface: Box::new(surface),
        })
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    /// Probe the host once.
    ///
    /// Headless when the config asks for it or when no store location can be resolved.
    /// Otherwise interactive with a [`JsonFileStore`], env-derived [`SystemSignals`] and the
    /// given attribute surface.
    pub fn detect<FEnv>(config: &Config, env_lookup: &FEnv, surface: Dataset) -> Self
    where
        FEnv: Fn(&str) -> Option<String>,
    {
        if config.headless {
            tracing::debug!("headless environment requested");
            return Self::Headless;
        }
        let Some(path) = config.resolved_store_path() else {
            tracing::warn!("no store location available, running headless");
            return Self::Headless;
        };
        tracing::debug!(store = %path.display(), "interactive environment");
        Self::interactive(
            JsonFileStore::new(path),
            SystemSignals::from_env_lookup(env_lookup),
            surface,
        )
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interactive(_) => f.write_str("Interactive"),
            Self::Headless => f.write_str("Headless"),
        }
    }
}
