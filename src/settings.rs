// settings.rs - Persisted Overlay Settings
//
// The flat settings record shared by the control panel and the overlay,
// plus the JSON store that loads it (back-filling defaults) and saves it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{
    defaults, DEFAULT_IMAGE_PATH, MAX_SCALE, MIN_SCALE, SCALE_FACTORS, SETTINGS_PATH,
};

/// Application settings
///
/// Every key is always present: keys missing from the file are filled from
/// [`Settings::default`]. Keys this version does not know about are kept in
/// `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Image shown by the overlay
    pub image_path: PathBuf,
    pub overlay_enabled: bool,
    /// Uniform multiplier for both image dimensions
    pub scale_factor: f64,
    /// Whether the overlay can be dragged
    pub movable: bool,
    /// Overlay top-left corner in screen coordinates
    pub position_x: i32,
    pub position_y: i32,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            overlay_enabled: defaults::OVERLAY_ENABLED,
            scale_factor: defaults::SCALE_FACTOR,
            movable: defaults::MOVABLE,
            position_x: defaults::POSITION_X,
            position_y: defaults::POSITION_Y,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Overlay position as `(x, y)`
    pub fn position(&self) -> (i32, i32) {
        (self.position_x, self.position_y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position_x = x;
        self.position_y = y;
    }

    /// Index of the current scale in [`SCALE_FACTORS`], if it is one of them
    pub fn scale_index(&self) -> Option<usize> {
        SCALE_FACTORS.iter().position(|s| *s == self.scale_factor)
    }

    /// Replace values the overlay cannot work with.
    ///
    /// Only the scale is checked. A non-finite or non-positive scale falls
    /// back to the default; anything else is clamped into the offered range.
    /// Scales between the offered steps are kept.
    pub fn sanitized(mut self) -> Self {
        let scale = self.scale_factor;
        if !scale.is_finite() || scale <= 0.0 {
            warn!(
                "Ignoring invalid scale_factor {} and using {}",
                scale,
                defaults::SCALE_FACTOR
            );
            self.scale_factor = defaults::SCALE_FACTOR;
        } else if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            self.scale_factor = scale.clamp(MIN_SCALE, MAX_SCALE);
            warn!(
                "scale_factor {} out of range, using {}",
                scale, self.scale_factor
            );
        }
        self
    }
}

/// Loads and saves [`Settings`] as pretty-printed JSON.
///
/// Neither operation fails the caller: read problems fall back to defaults
/// and write problems are logged.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SETTINGS_PATH)
    }
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the store reads from and writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                info!("Settings loaded from {:?}", self.path);
                settings
            }
            Ok(None) => {
                info!("No settings at {:?}, using defaults", self.path);
                Settings::default()
            }
            Err(e) => {
                error!("Error loading settings: {:#}", e);
                Settings::default()
            }
        }
    }

    /// Load settings, reporting errors. `Ok(None)` means there is no file yet.
    pub fn try_load(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {:?}", self.path))?;
        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {:?}", self.path))?;
        Ok(Some(settings.sanitized()))
    }

    /// Best-effort save; failures are logged and swallowed
    pub fn save(&self, settings: &Settings) {
        match self.try_save(settings) {
            Ok(()) => info!("Settings saved to {:?}", self.path),
            Err(e) => error!("Error saving settings: {:#}", e),
        }
    }

    /// Write settings with 4-space indentation, creating the parent directory
    pub fn try_save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let mut json = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
        settings
            .serialize(&mut serializer)
            .context("Failed to serialize settings")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write settings file {:?}", self.path))
    }
}
