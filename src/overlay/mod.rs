// overlay/mod.rs - Overlay Surface
//
// State of the always-on-top, transparent image window: the scaled bitmap,
// the window origin, the drag gesture and the window flags. The surface never
// talks to the toolkit directly; every operation returns the window commands
// the shell has to run.

mod bitmap;
mod drag;

use std::path::{Path, PathBuf};

use iced::widget::{container, image, Space};
use iced::{Element, Length};
use log::{debug, error, info};

use crate::constants::overlay::BLANK_SIZE;
use crate::settings::Settings;

pub use bitmap::{load_scaled, resolve_path, scaled_dimensions, Bitmap};
pub use drag::DragGesture;

/// Window-level attributes of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFlags {
    pub frameless: bool,
    pub always_on_top: bool,
    pub transparent: bool,
    /// Pointer events go to whatever is below the overlay
    pub click_through: bool,
    /// Auxiliary window without a taskbar entry
    pub tool_window: bool,
}

impl OverlayFlags {
    /// Flags for a movable or fixed overlay. Only a fixed overlay is
    /// click-through and kept off the taskbar; a movable one has to receive
    /// the drag.
    pub fn for_movable(movable: bool) -> Self {
        Self {
            frameless: true,
            always_on_top: true,
            transparent: true,
            click_through: !movable,
            tool_window: !movable,
        }
    }
}

/// Everything needed to open the overlay window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub position: (i32, i32),
    pub size: (u32, u32),
    pub flags: OverlayFlags,
}

/// Window operations requested by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCommand {
    Open(SurfaceSpec),
    Resize { width: u32, height: u32 },
    /// Hand the pointer to the window manager to move the window
    BeginDrag,
    /// Apply the flags and show the window again
    ApplyFlags(OverlayFlags),
    Close,
}

/// Final window position after a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChanged {
    pub x: i32,
    pub y: i32,
}

/// The overlay window's state.
///
/// Created by [`OverlaySurface::create`] and consumed by
/// [`OverlaySurface::destroy`]; at most one exists per application.
#[derive(Debug)]
pub struct OverlaySurface {
    /// Path last asked for
    requested_image: PathBuf,
    /// Path the current bitmap was decoded from
    source_image: Option<PathBuf>,
    fallback_image: PathBuf,
    scale_factor: f64,
    movable: bool,
    position: (i32, i32),
    bitmap: Option<Bitmap>,
    flags: OverlayFlags,
    drag: DragGesture,
}

impl OverlaySurface {
    /// Build the surface from `settings` and request its window.
    ///
    /// A missing image falls back to `fallback_image`; if that is missing
    /// too the window opens blank.
    pub fn create(settings: &Settings, fallback_image: &Path) -> (Self, Vec<SurfaceCommand>) {
        let mut surface = Self {
            requested_image: settings.image_path.clone(),
            source_image: None,
            fallback_image: fallback_image.to_path_buf(),
            scale_factor: settings.scale_factor,
            movable: settings.movable,
            position: settings.position(),
            bitmap: None,
            flags: OverlayFlags::for_movable(settings.movable),
            drag: DragGesture::default(),
        };
        surface.reload_image();

        info!(
            "Overlay created at {:?}, size {:?}, movable: {}",
            surface.position,
            surface.size(),
            surface.movable
        );

        let open = SurfaceCommand::Open(SurfaceSpec {
            position: surface.position,
            size: surface.size(),
            flags: surface.flags,
        });
        (surface, vec![open])
    }

    /// Close the window. The surface is gone afterwards.
    pub fn destroy(self) -> Vec<SurfaceCommand> {
        info!("Overlay destroyed");
        vec![SurfaceCommand::Close]
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn movable(&self) -> bool {
        self.movable
    }

    pub fn flags(&self) -> OverlayFlags {
        self.flags
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// File the displayed bitmap came from
    pub fn source_image(&self) -> Option<&Path> {
        self.source_image.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Window size: the bitmap's, or a small blank square without one
    pub fn size(&self) -> (u32, u32) {
        self.bitmap
            .as_ref()
            .map(Bitmap::size)
            .unwrap_or((BLANK_SIZE, BLANK_SIZE))
    }

    pub fn update_scale(&mut self, scale_factor: f64) -> Vec<SurfaceCommand> {
        if scale_factor == self.scale_factor {
            return Vec::new();
        }
        self.scale_factor = scale_factor;
        self.reload_image();
        vec![self.resize_command()]
    }

    pub fn update_movable(&mut self, movable: bool) -> Vec<SurfaceCommand> {
        if movable == self.movable {
            return Vec::new();
        }
        self.movable = movable;
        self.flags = OverlayFlags::for_movable(movable);
        if !movable {
            self.drag.cancel();
        }
        debug!("Overlay movable: {}", movable);
        vec![SurfaceCommand::ApplyFlags(self.flags)]
    }

    pub fn update_image(&mut self, image_path: &Path) -> Vec<SurfaceCommand> {
        self.requested_image = image_path.to_path_buf();
        self.reload_image();
        vec![self.resize_command()]
    }

    /// The window manager moved the window to `(x, y)`. During a drag this
    /// is how the new origin arrives.
    pub fn window_moved(&mut self, x: i32, y: i32) {
        self.position = (x, y);
        self.drag.window_moved();
    }

    /// Pointer moved inside the window. Ends a drag whose button release
    /// was swallowed by the window manager and reports the final position.
    pub fn pointer_moved(&mut self) -> Option<PositionChanged> {
        if !self.drag.pointer_moved() {
            return None;
        }
        Some(self.drag_finished())
    }

    /// Primary button pressed over the overlay. A movable overlay starts a
    /// drag and asks the window manager to move it.
    pub fn pointer_pressed(&mut self) -> Vec<SurfaceCommand> {
        if !self.movable {
            return Vec::new();
        }
        self.drag.press();
        vec![SurfaceCommand::BeginDrag]
    }

    /// Primary button released. Reports the final position if a drag ended.
    pub fn pointer_released(&mut self) -> Option<PositionChanged> {
        if !self.drag.release() {
            return None;
        }
        Some(self.drag_finished())
    }

    /// Draw the bitmap at (0, 0) over a transparent background.
    ///
    /// `display_scale` is the window's device pixels per logical unit; one
    /// bitmap pixel covers one device pixel.
    pub fn view<'a, Message: 'a>(&'a self, display_scale: f32) -> Element<'a, Message> {
        let content: Element<'a, Message> = match &self.bitmap {
            Some(bitmap) => image(bitmap.handle().clone())
                .width(Length::Fixed(bitmap.width() as f32 / display_scale))
                .height(Length::Fixed(bitmap.height() as f32 / display_scale))
                .filter_method(image::FilterMethod::Linear)
                .into(),
            None => Space::new(Length::Fill, Length::Fill).into(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn drag_finished(&self) -> PositionChanged {
        let (x, y) = self.position;
        info!("Overlay dragged to ({}, {})", x, y);
        PositionChanged { x, y }
    }

    fn resize_command(&self) -> SurfaceCommand {
        let (width, height) = self.size();
        SurfaceCommand::Resize { width, height }
    }

    /// Decode the requested image at the current scale. On failure the
    /// previous bitmap stays on screen.
    fn reload_image(&mut self) {
        let Some(path) = resolve_path(&self.requested_image, &self.fallback_image) else {
            return;
        };

        match load_scaled(&path, self.scale_factor) {
            Ok(bitmap) => {
                debug!("Loaded {:?} as {}x{}", path, bitmap.width(), bitmap.height());
                self.bitmap = Some(bitmap);
                self.source_image = Some(path);
            }
            Err(e) => error!("Error loading image: {:#}", e),
        }
    }
}
