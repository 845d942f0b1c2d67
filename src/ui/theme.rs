// ui/theme.rs - Control Panel Styles
//
// Container and button styles for the settings window, built on the shared
// color palette.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

use crate::constants::colors;

/// Opaque window background. The daemon clears every window to transparent
/// so the overlay can composite; the panel paints over that.
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_PRIMARY)),
        text_color: Some(colors::TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn section(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_SECONDARY)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Pill used for the scale choices
pub fn scale_pill(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_, status| {
        let background = match (selected, status) {
            (true, _) => colors::PILL_SELECTED,
            (false, button::Status::Hovered | button::Status::Pressed) => colors::BG_HOVER,
            (false, _) => colors::PILL_BG,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: if selected {
                Color::WHITE
            } else {
                colors::TEXT_SECONDARY
            },
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub fn browse_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => colors::ACCENT_HOVER,
        _ => colors::ACCENT,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
