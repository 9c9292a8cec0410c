use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::replacer::ReplaceFlags;
use crate::traits::SettingsStore;

/// How leftover newline markers are turned back into line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRestore {
    /// Every generated marker outside a match becomes a newline again.
    #[default]
    Tracked,
    /// Only the first leftover marker is restored. Later line breaks stay as
    /// visible markers when the selection spans several lines.
    FirstOnly,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub normalize_newlines: bool,
    pub marker_restore: MarkerRestore,
    pub restore_selection: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            normalize_newlines: true,
            marker_restore: MarkerRestore::Tracked,
            restore_selection: true,
        }
    }
}

impl Settings {
    pub fn replace_flags(&self) -> ReplaceFlags {
        let mut flags = ReplaceFlags::empty();
        if self.normalize_newlines {
            flags |= ReplaceFlags::NEWLINE_MARKER;
            if self.marker_restore == MarkerRestore::FirstOnly {
                flags |= ReplaceFlags::RESTORE_FIRST_MARKER_ONLY;
            }
        }
        flags
    }
}

pub struct SettingsManager<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> SettingsManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved settings layered over the defaults. Never fails: unreadable or
    /// malformed data falls back to [`Settings::default`].
    pub fn load(&self) -> Settings {
        let value = match self.store.load_data() {
            Ok(Some(value)) => value,
            Ok(None) => return Settings::default(),
            Err(err) => {
                log::warn!("could not read settings, using defaults: {err}");
                return Settings::default();
            }
        };
        serde_json::from_value(value).unwrap_or_else(|err| {
            log::warn!("ignoring malformed settings: {err}");
            Settings::default()
        })
    }

    pub fn save(&mut self, settings: &Settings) -> Result<()> {
        self.store.save_data(&serde_json::to_value(settings)?)
    }
}

/// Settings persisted as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load_data(&self) -> Result<Option<serde_json::Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save_data(&mut self, value: &serde_json::Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(value)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}
