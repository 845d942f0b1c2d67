// ui/control_panel.rs - Settings Window
//
// Enable toggle, image path with Browse, scale pills and movable toggle.
// Every change goes straight into the controller's settings and, when the
// overlay exists, into the overlay.

use std::path::PathBuf;

use iced::widget::{button, checkbox, column, container, row, text, text_input};
use iced::{Alignment, Center, Element, Length, Padding};
use log::info;

use super::theme;
use crate::app::AppController;
use crate::constants::{colors, IMAGE_EXTENSIONS, SCALE_FACTORS};
use crate::overlay::SurfaceCommand;
use crate::settings::Settings;

/// Messages produced by the control panel widgets
#[derive(Debug, Clone)]
pub enum PanelMessage {
    SetOverlayEnabled(bool),
    ImagePathEdited(String),
    /// Enter pressed in the path field
    ApplyImagePath,
    BrowseImage,
    SetScale(f64),
    SetMovable(bool),
}

/// Native file picker used by Browse
pub trait ImagePicker {
    /// Ask the user for an image; `None` when cancelled
    fn pick_image(&self) -> Option<PathBuf>;
}

/// [`ImagePicker`] backed by the platform dialog
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeImagePicker;

impl ImagePicker for NativeImagePicker {
    fn pick_image(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select Overlay Image")
            .add_filter("Image Files", &IMAGE_EXTENSIONS)
            .pick_file()
    }
}

/// Control panel state. Only the text field buffer lives here; everything
/// else is read from the settings on every view.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    image_path_input: String,
}

impl ControlPanel {
    /// Initialise the fields from `settings` without touching anything else
    pub fn new(settings: &Settings) -> Self {
        Self {
            image_path_input: settings.image_path.display().to_string(),
        }
    }

    pub fn image_path_input(&self) -> &str {
        &self.image_path_input
    }

    pub fn update(
        &mut self,
        message: PanelMessage,
        controller: &mut AppController,
        picker: &dyn ImagePicker,
    ) -> Vec<SurfaceCommand> {
        match message {
            PanelMessage::SetOverlayEnabled(enabled) => {
                controller.settings_mut().overlay_enabled = enabled;
                if enabled {
                    controller.create_overlay()
                } else {
                    controller.destroy_overlay()
                }
            }

            PanelMessage::ImagePathEdited(input) => {
                self.image_path_input = input;
                Vec::new()
            }

            PanelMessage::ApplyImagePath => {
                let input = self.image_path_input.trim();
                if input.is_empty() {
                    return Vec::new();
                }
                let path = PathBuf::from(input);
                self.apply_image_path(path, controller)
            }

            PanelMessage::BrowseImage => match picker.pick_image() {
                Some(path) => self.apply_image_path(path, controller),
                None => Vec::new(),
            },

            PanelMessage::SetScale(scale) => {
                controller.settings_mut().scale_factor = scale;
                match controller.overlay_mut() {
                    Some(overlay) => overlay.update_scale(scale),
                    None => Vec::new(),
                }
            }

            PanelMessage::SetMovable(movable) => {
                controller.settings_mut().movable = movable;
                match controller.overlay_mut() {
                    Some(overlay) => overlay.update_movable(movable),
                    None => Vec::new(),
                }
            }
        }
    }

    /// The panel window is closing
    pub fn close(&self, controller: &AppController) {
        controller.save();
    }

    fn apply_image_path(
        &mut self,
        path: PathBuf,
        controller: &mut AppController,
    ) -> Vec<SurfaceCommand> {
        info!("Overlay image set to {:?}", path);
        self.image_path_input = path.display().to_string();
        controller.settings_mut().image_path = path.clone();
        match controller.overlay_mut() {
            Some(overlay) => overlay.update_image(&path),
            None => Vec::new(),
        }
    }

    pub fn view<'a>(&'a self, settings: &'a Settings) -> Element<'a, PanelMessage> {
        let enable = checkbox("Enable Overlay", settings.overlay_enabled)
            .on_toggle(PanelMessage::SetOverlayEnabled)
            .spacing(8);

        let image_row = row![
            text("Overlay Image:").size(13),
            text_input("Path to an image", &self.image_path_input)
                .on_input(PanelMessage::ImagePathEdited)
                .on_submit(PanelMessage::ApplyImagePath)
                .size(13),
            button(text("Browse").size(13))
                .padding(Padding::from([4, 12]))
                .style(theme::browse_button)
                .on_press(PanelMessage::BrowseImage),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let selected = settings.scale_index();
        let pills = row(SCALE_FACTORS.iter().enumerate().map(|(index, &scale)| {
            button(text(format!("{scale:?}x")).size(11).align_x(Center).width(Length::Fill))
                .width(Length::FillPortion(1))
                .padding(Padding::from([4, 2]))
                .style(theme::scale_pill(selected == Some(index)))
                .on_press(PanelMessage::SetScale(scale))
                .into()
        }))
        .spacing(4);

        let scaling = container(
            column![text("Image Scaling").size(12).color(colors::ACCENT), pills].spacing(6),
        )
        .padding(8)
        .width(Length::Fill)
        .style(theme::section);

        let movable = checkbox("Movable Overlay (drag to position)", settings.movable)
            .on_toggle(PanelMessage::SetMovable)
            .spacing(8);

        container(column![enable, image_row, scaling, movable].spacing(10))
            .padding(14)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::panel)
            .into()
    }
}
