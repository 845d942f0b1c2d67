//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use image_overlay::{AppController, ImagePicker, Settings, SettingsStore};
use tempfile::TempDir;

/// Write a solid semi-transparent PNG and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 160]))
        .save(&path)
        .unwrap();
    path
}

/// Scratch directory with a settings file location and a default image
pub struct Sandbox {
    pub dir: TempDir,
    pub default_image: PathBuf,
}

impl Sandbox {
    /// Sandbox whose default image exists (40x20)
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let default_image = write_png(dir.path(), "default_overlay.png", 40, 20);
        Self { dir, default_image }
    }

    /// Sandbox whose default image path points nowhere
    pub fn without_default_image() -> Self {
        let dir = TempDir::new().unwrap();
        let default_image = dir.path().join("assets").join("default_overlay.png");
        Self { dir, default_image }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join("config").join("settings.json")
    }

    pub fn store(&self) -> SettingsStore {
        SettingsStore::new(self.settings_path())
    }

    /// Controller over this sandbox. A default `image_path` is pointed at the
    /// sandbox image so the repository's own `assets/` never leaks in.
    pub fn controller(&self) -> AppController {
        let mut controller = AppController::new(self.store(), &self.default_image);
        if controller.settings().image_path == Settings::default().image_path {
            controller.settings_mut().image_path = self.default_image.clone();
        }
        controller
    }

    pub fn write_settings(&self, json: &str) {
        let path = self.settings_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, json).unwrap();
    }
}

/// Picker that hands out a fixed answer and counts how often it was asked
pub struct FakePicker {
    pub answer: Option<PathBuf>,
    pub calls: RefCell<usize>,
}

impl FakePicker {
    pub fn returning(answer: Option<PathBuf>) -> Self {
        Self {
            answer,
            calls: RefCell::new(0),
        }
    }
}

impl ImagePicker for FakePicker {
    fn pick_image(&self) -> Option<PathBuf> {
        *self.calls.borrow_mut() += 1;
        self.answer.clone()
    }
}
