// constants.rs - Application-wide Constants
//
// Centralized paths, the offered scale set, window dimensions and colors.

/// Settings file, relative to the working directory
pub const SETTINGS_PATH: &str = "config/settings.json";

/// Fallback overlay image, relative to the working directory
pub const DEFAULT_IMAGE_PATH: &str = "assets/default_overlay.png";

/// Scale factors offered by the control panel
pub const SCALE_FACTORS: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Smallest scale accepted from the settings file
pub const MIN_SCALE: f64 = SCALE_FACTORS[0];

/// Largest scale accepted from the settings file
pub const MAX_SCALE: f64 = SCALE_FACTORS[SCALE_FACTORS.len() - 1];

/// Largest scaled bitmap, in pixels, the overlay will allocate
pub const MAX_BITMAP_PIXELS: u64 = 8192 * 8192;

/// Extensions accepted by the image picker
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Default settings values
pub mod defaults {
    pub const OVERLAY_ENABLED: bool = false;
    pub const SCALE_FACTOR: f64 = 1.0;
    pub const MOVABLE: bool = false;
    pub const POSITION_X: i32 = 100;
    pub const POSITION_Y: i32 = 100;
}

/// Control panel window dimensions
pub mod panel {
    /// Fixed panel width
    pub const WIDTH: f32 = 500.0;
    /// Fixed panel height
    pub const HEIGHT: f32 = 200.0;
    pub const TITLE: &str = "Image Overlay Settings";
}

/// Overlay window dimensions
pub mod overlay {
    /// Window size used while no bitmap could be loaded
    pub const BLANK_SIZE: u32 = 64;
    pub const TITLE: &str = "Image Overlay";
}

// Color palette (modern dark theme)
pub mod colors {
    use iced::Color;

    pub const BG_PRIMARY: Color = Color::from_rgb(0.09, 0.09, 0.12);
    pub const BG_SECONDARY: Color = Color::from_rgb(0.12, 0.12, 0.16);
    pub const BG_HOVER: Color = Color::from_rgb(0.18, 0.18, 0.24);

    pub const ACCENT: Color = Color::from_rgb(0.35, 0.55, 0.95);
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.45, 0.65, 1.0);

    pub const TEXT_PRIMARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.95);
    pub const TEXT_SECONDARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.6);

    pub const BORDER: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);
    pub const PILL_BG: Color = Color::from_rgb(0.28, 0.28, 0.38);
    pub const PILL_SELECTED: Color = Color::from_rgb(0.35, 0.55, 0.95);
}
