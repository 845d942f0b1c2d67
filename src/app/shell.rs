// app/shell.rs - Iced Window Shell
//
// Hosts the control panel and the overlay in one iced daemon. Window and
// pointer events are routed into the controller; surface commands coming
// back are turned into iced window tasks.

use std::collections::BTreeMap;

use iced::widget::{container, text};
use iced::{daemon, event, mouse, window, Color, Element, Event, Length, Point, Size, Subscription, Task, Theme};
use log::{debug, info};

use super::AppController;
use crate::constants::{overlay, panel, DEFAULT_IMAGE_PATH};
use crate::overlay::{OverlayFlags, SurfaceCommand, SurfaceSpec};
use crate::settings::SettingsStore;
use crate::ui::{ControlPanel, NativeImagePicker, PanelMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WindowType {
    Panel,
    Overlay,
}

#[derive(Debug, Clone)]
pub enum Message {
    PanelOpened(window::Id),
    OverlayOpened(window::Id),
    /// Device pixels per logical unit of the overlay window
    OverlayScaleFactor(window::Id, f32),
    WindowClosed(window::Id),
    WindowMoved(window::Id, Point),

    // Pointer, reported for every window
    CursorMoved(window::Id),
    PointerPressed(window::Id),
    PointerReleased(window::Id),

    Panel(PanelMessage),
}

struct OverlayApp {
    windows: BTreeMap<window::Id, WindowType>,
    panel_id: Option<window::Id>,
    overlay_id: Option<window::Id>,
    overlay_scale: f32,

    controller: AppController,
    panel: ControlPanel,
    picker: NativeImagePicker,
}

impl OverlayApp {
    fn new() -> (Self, Task<Message>) {
        let controller = AppController::new(SettingsStore::default(), DEFAULT_IMAGE_PATH);
        let panel = ControlPanel::new(controller.settings());

        let mut app = Self {
            windows: BTreeMap::new(),
            panel_id: None,
            overlay_id: None,
            overlay_scale: 1.0,
            controller,
            panel,
            picker: NativeImagePicker,
        };

        let panel_settings = window::Settings {
            size: Size::new(panel::WIDTH, panel::HEIGHT),
            position: window::Position::Centered,
            decorations: true,
            resizable: false,
            level: window::Level::Normal,
            ..Default::default()
        };
        let (_, open_panel) = window::open(panel_settings);

        let startup = app.controller.startup();
        let open_overlay = app.run_commands(startup);

        (
            app,
            Task::batch([open_panel.map(Message::PanelOpened), open_overlay]),
        )
    }

    fn title(&self, window_id: window::Id) -> String {
        match self.windows.get(&window_id) {
            Some(WindowType::Panel) | None => panel::TITLE.to_string(),
            Some(WindowType::Overlay) => overlay::TITLE.to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PanelOpened(id) => {
                info!("Control panel opened: {:?}", id);
                self.panel_id = Some(id);
                self.windows.insert(id, WindowType::Panel);
            }

            Message::OverlayOpened(id) => {
                debug!("Overlay window opened: {:?}", id);
                if self.overlay_id == Some(id) {
                    if let Some(surface) = self.controller.overlay() {
                        return Task::batch([
                            apply_flags(id, surface.flags()),
                            window::get_scale_factor(id)
                                .map(move |factor| Message::OverlayScaleFactor(id, factor)),
                        ]);
                    }
                }
            }

            Message::OverlayScaleFactor(id, factor) if self.overlay_id == Some(id) => {
                if factor > 0.0 && factor != self.overlay_scale {
                    debug!("Overlay display scale: {}", factor);
                    self.overlay_scale = factor;
                    if let Some(surface) = self.controller.overlay() {
                        return window::resize(id, self.logical_size(surface.size()));
                    }
                }
            }

            Message::WindowClosed(id) => {
                self.windows.remove(&id);

                if self.panel_id == Some(id) {
                    self.panel_id = None;
                    self.panel.close(&self.controller);
                    let shutdown = self.controller.shutdown();
                    return self.run_commands(shutdown).chain(iced::exit());
                }
                if self.overlay_id == Some(id) {
                    self.overlay_id = None;
                    self.controller.overlay_closed();
                }
            }

            Message::WindowMoved(id, position) if self.overlay_id == Some(id) => {
                self.controller
                    .window_moved(position.x.round() as i32, position.y.round() as i32);
            }

            Message::CursorMoved(id) if self.overlay_id == Some(id) => {
                self.controller.pointer_moved();
            }

            Message::PointerPressed(id) if self.overlay_id == Some(id) => {
                let commands = self.controller.pointer_pressed();
                return self.run_commands(commands);
            }

            Message::PointerReleased(id) if self.overlay_id == Some(id) => {
                self.controller.pointer_released();
            }

            Message::Panel(message) => {
                let commands = self
                    .panel
                    .update(message, &mut self.controller, &self.picker);
                return self.run_commands(commands);
            }

            _ => {}
        }

        Task::none()
    }

    /// Turn surface commands into window tasks for the overlay window
    fn run_commands(&mut self, commands: Vec<SurfaceCommand>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = commands
            .into_iter()
            .map(|command| self.run_command(command))
            .collect();
        Task::batch(tasks)
    }

    fn run_command(&mut self, command: SurfaceCommand) -> Task<Message> {
        if let SurfaceCommand::Open(spec) = command {
            let (id, open) = window::open(overlay_window_settings(&spec, self.overlay_scale));
            self.overlay_id = Some(id);
            self.windows.insert(id, WindowType::Overlay);
            return open.map(Message::OverlayOpened);
        }

        let Some(id) = self.overlay_id else {
            return Task::none();
        };

        match command {
            SurfaceCommand::Resize { width, height } => {
                window::resize(id, self.logical_size((width, height)))
            }
            SurfaceCommand::BeginDrag => window::drag(id),
            SurfaceCommand::ApplyFlags(flags) => apply_flags(id, flags),
            SurfaceCommand::Close => {
                self.overlay_id = None;
                self.windows.remove(&id);
                window::close(id)
            }
            SurfaceCommand::Open(_) => Task::none(),
        }
    }

    /// Bitmap pixels to window units
    fn logical_size(&self, size: (u32, u32)) -> Size {
        logical_size(size, self.overlay_scale)
    }

    fn view(&self, window_id: window::Id) -> Element<'_, Message> {
        match self.windows.get(&window_id) {
            Some(WindowType::Panel) => self
                .panel
                .view(self.controller.settings())
                .map(Message::Panel),
            Some(WindowType::Overlay) => match self.controller.overlay() {
                Some(surface) => surface.view(self.overlay_scale),
                None => empty(),
            },
            None => empty(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_events().map(Message::WindowClosed),
            event::listen_with(window_event),
        ])
    }

    fn theme(&self, _window_id: window::Id) -> Theme {
        Theme::Dark
    }

    /// Every window is cleared to transparent; the panel paints its own
    /// background.
    fn style(&self, theme: &Theme) -> daemon::Appearance {
        daemon::Appearance {
            background_color: Color::TRANSPARENT,
            text_color: theme.palette().text,
        }
    }
}

fn window_event(event: Event, _status: event::Status, id: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { .. }) => Some(Message::CursorMoved(id)),
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::PointerPressed(id))
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::PointerReleased(id))
        }
        Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved(id, position)),
        _ => None,
    }
}

fn logical_size((width, height): (u32, u32), display_scale: f32) -> Size {
    Size::new(width as f32 / display_scale, height as f32 / display_scale)
}

/// Open settings for the overlay. The display scale is a guess until the
/// window reports its own.
fn overlay_window_settings(spec: &SurfaceSpec, display_scale: f32) -> window::Settings {
    let (x, y) = spec.position;
    window::Settings {
        size: logical_size(spec.size, display_scale),
        position: window::Position::Specific(Point::new(x as f32, y as f32)),
        decorations: !spec.flags.frameless,
        transparent: spec.flags.transparent,
        resizable: false,
        level: window_level(spec.flags),
        #[cfg(target_os = "windows")]
        platform_specific: window::settings::PlatformSpecific {
            skip_taskbar: spec.flags.tool_window,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn window_level(flags: OverlayFlags) -> window::Level {
    if flags.always_on_top {
        window::Level::AlwaysOnTop
    } else {
        window::Level::Normal
    }
}

/// Apply `flags` to a live window and show it again so they take effect.
/// The taskbar entry is fixed when the window opens.
fn apply_flags(id: window::Id, flags: OverlayFlags) -> Task<Message> {
    let passthrough = if flags.click_through {
        window::enable_mouse_passthrough(id)
    } else {
        window::disable_mouse_passthrough(id)
    };
    Task::batch([
        passthrough,
        window::change_level(id, window_level(flags)),
        window::change_mode(id, window::Mode::Windowed),
    ])
}

fn empty<'a>() -> Element<'a, Message> {
    container(text(""))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Load settings, show the control panel (and the overlay if it was
/// enabled) and run the event loop until the panel is closed.
pub fn run() -> iced::Result {
    daemon(OverlayApp::title, OverlayApp::update, OverlayApp::view)
        .subscription(OverlayApp::subscription)
        .theme(OverlayApp::theme)
        .style(OverlayApp::style)
        .run_with(OverlayApp::new)
}
