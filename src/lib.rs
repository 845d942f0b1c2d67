//! Image Overlay - always-on-top transparent image overlay
//!
//! The overlay shows a scaled image in a frameless, click-through window and
//! can be dragged around when movable. A small settings window changes it
//! live, and everything is persisted to `config/settings.json`.

pub mod app;
pub mod constants;
pub mod overlay;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use app::AppController;
pub use overlay::{OverlayFlags, OverlaySurface, PositionChanged, SurfaceCommand};
pub use settings::{Settings, SettingsStore};
pub use ui::{ControlPanel, ImagePicker, PanelMessage};
