// ui/mod.rs - Control Panel User Interface
//
// The settings window and its styles, built with iced widgets.

mod control_panel;
mod theme;

pub use control_panel::{ControlPanel, ImagePicker, NativeImagePicker, PanelMessage};
