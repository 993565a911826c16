use std::path::{Path, PathBuf};

use crate::foundation::error::{FolioError, FolioResult};

pub const DEFAULT_THEME_KEY: &str = "theme";

/// Runtime settings.
///
/// Precedence, lowest first: built-in defaults, the JSON config file, `FOLIO_*` environment
/// variables, then whatever the caller sets afterwards (CLI flags).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Key-value store file. `None` falls back to the per-user config directory.
    pub store_path: Option<PathBuf>,
    /// Store key holding the theme value.
    pub theme_key: String,
    /// Skip persistence and system signals entirely.
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            theme_key: DEFAULT_THEME_KEY.to_owned(),
            headless: false,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> FolioResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| FolioError::config(format!("parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> FolioResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FolioError::config(format!("read config '{}': {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Defaults or `path`, then environment overrides.
    pub fn load<FEnv>(path: Option<&Path>, env_lookup: &FEnv) -> FolioResult<Self>
    where
        FEnv: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(env_lookup)?;
        Ok(config)
    }

    pub fn apply_env_overrides<FEnv>(&mut self, env_lookup: &FEnv) -> FolioResult<()>
    where
        FEnv: Fn(&str) -> Option<String>,
    {
        if let Some(store) = env_lookup("FOLIO_STORE").filter(|s| !s.trim().is_empty()) {
            self.store_path = Some(PathBuf::from(store));
        }
        if let Some(raw) = env_lookup("FOLIO_HEADLESS") {
            self.headless = parse_bool(&raw).ok_or_else(|| {
                FolioError::config(format!(
                    "invalid FOLIO_HEADLESS value `{raw}`: expected 1/0/true/false"
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> FolioResult<()> {
        if self.theme_key.trim().is_empty() {
            return Err(FolioError::config("theme_key cannot be empty"));
        }
        Ok(())
    }

    /// Store location after falling back to `<config_dir>/folio/store.json`.
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(default_store_path)
    }
}

pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("store.json"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
