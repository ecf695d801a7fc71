//=========================================================================
// Dark Mode
//=========================================================================
//
// Typed dark mode preference persisted as a single string flag.
//
// Architecture:
//   FlagStore (trait)
//     ├─ MemoryFlagStore   (tests, --no-persist)
//     └─ ConfyFlagStore    (per-user config file)
//
//   ThemeToggle
//     ├─ init()   → read flag → apply Dark / Light, leave Unset alone
//     └─ toggle() → flip body.dark → update button → write flag
//
// Store failures never reach the page: they are logged and ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::dom::{Document, ElementId};

//=== Constants ===========================================================

pub const DARK_CLASS: &str = "dark";
pub const TOGGLE_ID: &str = "darkToggle";

const DARK_LABEL: &str = "☀️";
const LIGHT_LABEL: &str = "🌙";

//=== StoreError ==========================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Persisted flags unavailable: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("Persisted flags unavailable: {0}")]
    Unavailable(String),
}

//=== FlagStore ===========================================================

/// String-valued persisted flags.
pub trait FlagStore: Send {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

//--- MemoryFlagStore -----------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct MemoryFlagStore {
    flags: HashMap<String, String>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, key: &str, value: &str) -> Self {
        self.flags.insert(key.to_string(), value.to_string());
        self
    }
}

impl FlagStore for MemoryFlagStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.flags.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.flags.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//--- ConfyFlagStore ------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedFlags {
    flags: BTreeMap<String, String>,
}

/// Flags stored in the user's configuration directory.
#[derive(Debug, Clone)]
pub struct ConfyFlagStore {
    app: String,
}

impl ConfyFlagStore {
    pub const DEFAULT_APP: &'static str = "storefront-engine";
    const CONFIG_NAME: &'static str = "flags";

    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }
}

impl Default for ConfyFlagStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_APP)
    }
}

impl FlagStore for ConfyFlagStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let persisted: PersistedFlags = confy::load(&self.app, Self::CONFIG_NAME)?;
        Ok(persisted.flags.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut persisted: PersistedFlags = confy::load(&self.app, Self::CONFIG_NAME)?;
        persisted.flags.insert(key.to_string(), value.to_string());
        confy::store(&self.app, Self::CONFIG_NAME, persisted)?;
        Ok(())
    }
}

//=== ThemePreference =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Unset,
    Light,
    Dark,
}

impl ThemePreference {
    /// Parses a persisted flag. Anything but "true"/"false" is unset.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => Self::Dark,
            Some("false") => Self::Light,
            _ => Self::Unset,
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_flag(self) -> Option<&'static str> {
        match self {
            Self::Dark => Some("true"),
            Self::Light => Some("false"),
            Self::Unset => None,
        }
    }
}

//=== ThemeToggle =========================================================

pub struct ThemeToggle {
    key: String,
    preference: ThemePreference,
    store: Box<dyn FlagStore>,
}

impl ThemeToggle {
    pub fn new(key: impl Into<String>, store: Box<dyn FlagStore>) -> Self {
        Self {
            key: key.into(),
            preference: ThemePreference::Unset,
            store,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Applies the persisted preference. Returns false if the page has no
    /// toggle button.
    pub fn init(&mut self, doc: &mut Document) -> bool {
        let Some(toggle) = doc.by_id(TOGGLE_ID) else {
            return false;
        };

        let flag = match self.store.load(&self.key) {
            Ok(flag) => flag,
            Err(e) => {
                warn!("Reading {} failed: {}", self.key, e);
                None
            }
        };

        self.preference = ThemePreference::from_flag(flag.as_deref());
        match self.preference {
            ThemePreference::Dark => apply(doc, toggle, true),
            ThemePreference::Light => apply(doc, toggle, false),
            ThemePreference::Unset => {}
        }
        debug!("Theme preference at init: {:?}", self.preference);
        true
    }

    /// Flips dark mode and persists the result.
    pub fn toggle(&mut self, doc: &mut Document) -> Option<ThemePreference> {
        let toggle = doc.by_id(TOGGLE_ID)?;
        let root = doc.root();
        let dark = doc.element_mut(root).map(|body| body.toggle_class(DARK_CLASS))?;

        apply(doc, toggle, dark);
        self.preference = ThemePreference::from_dark(dark);

        if let Some(flag) = self.preference.as_flag() {
            if let Err(e) = self.store.store(&self.key, flag) {
                warn!("Persisting {} failed: {}", self.key, e);
            }
        }
        debug!("Theme toggled: {:?}", self.preference);
        Some(self.preference)
    }
}

impl std::fmt::Debug for ThemeToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeToggle")
            .field("key", &self.key)
            .field("preference", &self.preference)
            .finish_non_exhaustive()
    }
}

/// Writes body class, pressed state and label for `dark`.
fn apply(doc: &mut Document, toggle: ElementId, dark: bool) {
    let root = doc.root();
    if let Some(body) = doc.element_mut(root) {
        if dark {
            body.add_class(DARK_CLASS);
        } else {
            body.remove_class(DARK_CLASS);
        }
    }
    if let Some(button) = doc.element_mut(toggle) {
        button.set_attr("aria-pressed", dark.to_string());
        button.set_text(if dark { DARK_LABEL } else { LIGHT_LABEL });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
