// app/controller.rs - Application Controller
//
// Owns the settings record and the single overlay surface. The control panel
// and the window shell reach both through here.

use std::path::PathBuf;

use log::info;

use crate::overlay::{OverlaySurface, PositionChanged, SurfaceCommand};
use crate::settings::{Settings, SettingsStore};

/// Owner of the settings and of at most one [`OverlaySurface`]
#[derive(Debug)]
pub struct AppController {
    settings: Settings,
    store: SettingsStore,
    /// Image used when the configured one is missing
    default_image: PathBuf,
    overlay: Option<OverlaySurface>,
}

impl AppController {
    /// Load settings from `store`; no overlay exists yet
    pub fn new(store: SettingsStore, default_image: impl Into<PathBuf>) -> Self {
        let settings = store.load();
        Self {
            settings,
            store,
            default_image: default_image.into(),
            overlay: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn overlay(&self) -> Option<&OverlaySurface> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut OverlaySurface> {
        self.overlay.as_mut()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Create the overlay if it was enabled when the settings were loaded
    pub fn startup(&mut self) -> Vec<SurfaceCommand> {
        if self.settings.overlay_enabled {
            self.create_overlay()
        } else {
            Vec::new()
        }
    }

    pub fn create_overlay(&mut self) -> Vec<SurfaceCommand> {
        if self.overlay.is_some() {
            return Vec::new();
        }
        let (surface, commands) = OverlaySurface::create(&self.settings, &self.default_image);
        self.overlay = Some(surface);
        commands
    }

    pub fn destroy_overlay(&mut self) -> Vec<SurfaceCommand> {
        match self.overlay.take() {
            Some(surface) => surface.destroy(),
            None => Vec::new(),
        }
    }

    /// The overlay window was closed behind our back
    pub fn overlay_closed(&mut self) {
        if self.overlay.take().is_some() {
            info!("Overlay window closed externally");
            self.settings.overlay_enabled = false;
        }
    }

    /// Record the overlay's new position and persist it right away
    pub fn position_changed(&mut self, change: PositionChanged) {
        self.settings.set_position(change.x, change.y);
        self.save();
    }

    pub fn pointer_moved(&mut self) {
        let change = self
            .overlay
            .as_mut()
            .and_then(OverlaySurface::pointer_moved);
        if let Some(change) = change {
            self.position_changed(change);
        }
    }

    /// A press means the pointer is back in the overlay, so a drag still
    /// waiting for its release is finished first.
    pub fn pointer_pressed(&mut self) -> Vec<SurfaceCommand> {
        self.pointer_moved();
        self.overlay
            .as_mut()
            .map(OverlaySurface::pointer_pressed)
            .unwrap_or_default()
    }

    pub fn pointer_released(&mut self) {
        let change = self
            .overlay
            .as_mut()
            .and_then(OverlaySurface::pointer_released);
        if let Some(change) = change {
            self.position_changed(change);
        }
    }

    pub fn window_moved(&mut self, x: i32, y: i32) {
        if let Some(surface) = self.overlay.as_mut() {
            surface.window_moved(x, y);
        }
    }

    pub fn save(&self) {
        self.store.save(&self.settings);
    }

    /// Release the overlay and persist settings one last time
    pub fn shutdown(&mut self) -> Vec<SurfaceCommand> {
        info!("Shutting down");
        let commands = self.destroy_overlay();
        self.save();
        commands
    }
}
