//! Light/dark theme preference.
//!
//! A [`ThemePreference`] is owned by the application root (or shared through a [`ThemeHandle`])
//! and is the only writer of the theme. Every mutation writes the new value to the key-value store
//! and mirrors it onto the `data-theme` attribute before returning. Store failures are logged and
//! reported as [`PersistOutcome::Failed`]; the in-memory value is never rolled back.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    config::DEFAULT_THEME_KEY,
    environment::Environment,
    foundation::error::FolioError,
};

/// Attribute mirrored onto the presentation surface.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Exact, case-sensitive match of a stored value.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_stored(&s.trim().to_ascii_lowercase()).ok_or_else(|| {
            FolioError::validation(format!("unknown theme `{s}`: expected light or dark"))
        })
    }
}

/// What happened to the persistence side effect of a mutation.
#[derive(Debug)]
pub enum PersistOutcome {
    /// Store and attribute both written.
    Persisted,
    /// Headless environment; nothing to write to.
    Skipped,
    /// A write failed. The in-memory value was still updated.
    Failed(FolioError),
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<Mutex<Box<dyn FnMut(Theme) + Send>>>;

/// Value a mutation settled on, if it differs from the previous one.
type Changed = Option<Theme>;

fn notify(listeners: &[Listener], theme: Theme) {
    for listener in listeners {
        let mut listener = listener.lock().unwrap_or_else(PoisonError::into_inner);
        (*listener)(theme);
    }
}

pub struct ThemePreference {
    current: Theme,
    key: String,
    env: Environment,
    activated: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
}

impl ThemePreference {
    /// A preference seeded with [`Theme::Light`]. Call [`activate`](Self::activate) to resolve
    /// the real starting value.
    pub fn new(env: Environment) -> Self {
        Self::with_key(env, DEFAULT_THEME_KEY)
    }

    pub fn with_key(env: Environment, key: impl Into<String>) -> Self {
        Self {
            current: Theme::default(),
            key: key.into(),
            env,
            activated: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Resolve the starting theme and persist it. Later calls are no-ops.
    ///
    /// Resolution order: a valid stored value, then the system dark signal, then light. A headless
    /// environment keeps the seeded light value and writes nothing.
    pub fn activate(&mut self) -> PersistOutcome {
        let (outcome, changed) = self.activate_quietly();
        self.notify_changed(changed);
        outcome
    }

    pub fn set(&mut self, theme: Theme) -> PersistOutcome {
        let (outcome, changed) = self.assign(theme);
        self.notify_changed(changed);
        outcome
    }

    pub fn toggle(&mut self) -> PersistOutcome {
        let (outcome, changed) = self.assign(self.current.toggled());
        self.notify_changed(changed);
        outcome
    }

    /// Register a listener called with the new value whenever the theme changes.
    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        let listener: Box<dyn FnMut(Theme) + Send> = Box::new(listener);
        self.listeners.push((id, Arc::new(Mutex::new(listener))));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[tracing::instrument(skip(self), fields(key = %self.key))]
    fn activate_quietly(&mut self) -> (PersistOutcome, Changed) {
        if self.activated {
            return (PersistOutcome::Skipped, None);
        }
        self.activated = true;

        let Some(resolved) = self.resolve_initial() else {
            tracing::debug!("headless, keeping seeded theme");
            return (PersistOutcome::Skipped, None);
        };
        tracing::debug!(theme = %resolved, "resolved initial theme");
        self.assign(resolved)
    }

    fn resolve_initial(&self) -> Option<Theme> {
        let Environment::Interactive(caps) = &self.env else {
            return None;
        };

        match caps.store.get(&self.key) {
            Ok(Some(stored)) => match Theme::from_stored(&stored) {
                Some(theme) => return Some(theme),
                None => tracing::warn!(value = %stored, "ignoring unrecognized stored theme"),
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "failed to read stored theme"),
        }

        if caps.system.prefers_dark() {
            Some(Theme::Dark)
        } else {
            Some(Theme::Light)
        }
    }

    /// Update and persist without running listeners.
    fn assign(&mut self, theme: Theme) -> (PersistOutcome, Changed) {
        let changed = (self.current != theme).then_some(theme);
        self.current = theme;
        (self.persist(), changed)
    }

    fn listener_snapshot(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    fn notify_changed(&self, changed: Changed) {
        if let Some(theme) = changed {
            notify(&self.listener_snapshot(), theme);
        }
    }

    fn persist(&mut self) -> PersistOutcome {
        let Environment::Interactive(caps) = &mut self.env else {
            return PersistOutcome::Skipped;
        };
        let value = self.current.as_str();

        let stored = caps.store.set(&self.key, value);
        // The attribute follows the in-memory value even when the store write failed.
        let mirrored = caps.surface.set_attribute(THEME_ATTRIBUTE, value);

        let result = match (stored, mirrored) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
            (Err(store_err), Err(surface_err)) => Err(FolioError::persistence(format!(
                "store: {store_err}; attribute: {surface_err}"
            ))),
        };
        match result {
            Ok(()) => {
                tracing::debug!(theme = value, "theme persisted");
                PersistOutcome::Persisted
            }
            Err(err) => {
                tracing::warn!(theme = value, error = %err, "theme changed but persistence failed");
                PersistOutcome::Failed(err)
            }
        }
    }
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("current", &self.current)
            .field("key", &self.key)
            .field("env", &self.env)
            .field("activated", &self.activated)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Cloneable shared handle to one [`ThemePreference`].
///
/// Concurrent writers are serialized by the lock; the last write wins in memory and in the store.
/// Listeners run after the lock is released, so they may read the handle. A listener must not
/// change the theme through the handle that notified it.
#[derive(Clone, Debug)]
pub struct ThemeHandle {
    inner: Arc<Mutex<ThemePreference>>,
}

impl ThemeHandle {
    pub fn new(pref: ThemePreference) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pref)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ThemePreference> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self) -> Theme {
        self.lock().get()
    }

    pub fn activate(&self) -> PersistOutcome {
        self.mutate(ThemePreference::activate_quietly)
    }

    pub fn set(&self, theme: Theme) -> PersistOutcome {
        self.mutate(|pref| pref.assign(theme))
    }

    pub fn toggle(&self) -> PersistOutcome {
        self.mutate(|pref| pref.assign(pref.current.toggled()))
    }

    fn mutate(
        &self,
        op: impl FnOnce(&mut ThemePreference) -> (PersistOutcome, Changed),
    ) -> PersistOutcome {
        let (outcome, pending) = {
            let mut pref = self.lock();
            let (outcome, changed) = op(&mut *pref);
            (outcome, changed.map(|theme| (theme, pref.listener_snapshot())))
        };
        if let Some((theme, listeners)) = pending {
            notify(&listeners, theme);
        }
        outcome
    }

    pub fn subscribe(&self, listener: impl FnMut(Theme) + Send + 'static) -> SubscriptionId {
        self.lock().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().unsubscribe(id)
    }
}

#[cfg(test)]
#[path = "../tests/unit/theme.rs"]
mod tests;
