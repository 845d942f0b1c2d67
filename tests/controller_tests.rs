//! Controller lifecycle and control panel wiring.

mod common;

use common::{write_png, FakePicker, Sandbox};
use image_overlay::{ControlPanel, OverlayFlags, PanelMessage, SurfaceCommand};

#[test]
fn startup_without_overlay_enabled_creates_nothing() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();

    assert!(controller.startup().is_empty());
    assert!(!controller.has_overlay());
}

#[test]
fn startup_with_overlay_enabled_opens_it() {
    let sandbox = Sandbox::new();
    sandbox.write_settings(r#"{"overlay_enabled": true, "position_x": 7, "position_y": 9}"#);
    let mut controller = sandbox.controller();

    let commands = controller.startup();
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], SurfaceCommand::Open(spec) if spec.position == (7, 9)));
    assert!(controller.has_overlay());
}

#[test]
fn create_and_destroy_are_idempotent() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();

    assert_eq!(controller.create_overlay().len(), 1);
    assert!(controller.create_overlay().is_empty());

    assert_eq!(controller.destroy_overlay(), vec![SurfaceCommand::Close]);
    assert!(controller.destroy_overlay().is_empty());
    assert!(!controller.has_overlay());
}

#[test]
fn missing_image_and_default_still_create_overlay() {
    let sandbox = Sandbox::without_default_image();
    sandbox.write_settings(r#"{"image_path": "does/not/exist.png"}"#);
    let mut controller = sandbox.controller();

    controller.create_overlay();
    let overlay = controller.overlay().expect("overlay exists");
    assert!(overlay.bitmap().is_none());
}

#[test]
fn drag_release_persists_position_immediately() {
    let sandbox = Sandbox::new();
    sandbox.write_settings(r#"{"movable": true, "position_x": 0, "position_y": 0}"#);
    let mut controller = sandbox.controller();
    controller.create_overlay();

    assert_eq!(controller.pointer_pressed(), vec![SurfaceCommand::BeginDrag]);
    controller.pointer_moved();
    controller.window_moved(25, 10);
    controller.window_moved(50, 20);
    assert_eq!(sandbox.store().load().position(), (0, 0));
    controller.pointer_released();

    assert_eq!(controller.settings().position(), (50, 20));
    let saved = sandbox.store().load();
    assert_eq!(saved.position(), (50, 20));
}

#[test]
fn drag_with_swallowed_release_is_persisted_on_next_pointer_event() {
    let sandbox = Sandbox::new();
    sandbox.write_settings(r#"{"movable": true, "position_x": 0, "position_y": 0}"#);
    let mut controller = sandbox.controller();
    controller.create_overlay();

    controller.pointer_pressed();
    controller.window_moved(60, 45);

    // The next press finishes the first drag before starting another
    assert_eq!(controller.pointer_pressed(), vec![SurfaceCommand::BeginDrag]);
    assert_eq!(sandbox.store().load().position(), (60, 45));
    assert!(controller.overlay().unwrap().is_dragging());
}

#[test]
fn overlay_closed_externally_clears_enabled_flag() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    controller.settings_mut().overlay_enabled = true;
    controller.create_overlay();

    controller.overlay_closed();
    assert!(!controller.has_overlay());
    assert!(!controller.settings().overlay_enabled);
}

#[test]
fn shutdown_closes_overlay_and_saves() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    controller.settings_mut().overlay_enabled = true;
    controller.settings_mut().scale_factor = 1.25;
    controller.create_overlay();

    assert_eq!(controller.shutdown(), vec![SurfaceCommand::Close]);
    assert!(!controller.has_overlay());

    let saved = sandbox.store().load();
    assert!(saved.overlay_enabled);
    assert_eq!(saved.scale_factor, 1.25);
}

#[test]
fn panel_initialisation_triggers_nothing() {
    let sandbox = Sandbox::new();
    sandbox.write_settings(r#"{"overlay_enabled": true, "image_path": "x/y.png"}"#);
    let controller = sandbox.controller();

    let panel = ControlPanel::new(controller.settings());

    assert_eq!(panel.image_path_input(), "x/y.png");
    assert!(!controller.has_overlay());
    assert!(controller.settings().overlay_enabled);
}

#[test]
fn enable_toggle_creates_and_destroys_overlay() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(None);

    let open = panel.update(PanelMessage::SetOverlayEnabled(true), &mut controller, &picker);
    assert!(matches!(open.as_slice(), [SurfaceCommand::Open(_)]));
    assert!(controller.settings().overlay_enabled);

    let close = panel.update(PanelMessage::SetOverlayEnabled(false), &mut controller, &picker);
    assert_eq!(close, vec![SurfaceCommand::Close]);
    assert!(!controller.settings().overlay_enabled);
    assert!(!controller.has_overlay());
}

#[test]
fn reenabling_builds_fresh_surface_from_current_settings() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(None);

    panel.update(PanelMessage::SetOverlayEnabled(true), &mut controller, &picker);
    panel.update(PanelMessage::SetOverlayEnabled(false), &mut controller, &picker);

    // Changed while no overlay exists
    panel.update(PanelMessage::SetScale(2.0), &mut controller, &picker);
    panel.update(PanelMessage::SetMovable(true), &mut controller, &picker);
    controller.settings_mut().set_position(300, 400);

    let open = panel.update(PanelMessage::SetOverlayEnabled(true), &mut controller, &picker);
    match open.as_slice() {
        [SurfaceCommand::Open(spec)] => {
            assert_eq!(spec.position, (300, 400));
            assert_eq!(spec.size, (80, 40));
            assert_eq!(spec.flags, OverlayFlags::for_movable(true));
        }
        other => panic!("unexpected commands {other:?}"),
    }
    let overlay = controller.overlay().unwrap();
    assert_eq!(overlay.scale_factor(), 2.0);
    assert!(overlay.movable());
    assert!(!overlay.is_dragging());
}

#[test]
fn scale_selection_updates_settings_and_live_overlay() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(None);

    // No overlay: only the settings change
    assert!(panel.update(PanelMessage::SetScale(0.5), &mut controller, &picker).is_empty());
    assert_eq!(controller.settings().scale_factor, 0.5);

    panel.update(PanelMessage::SetOverlayEnabled(true), &mut controller, &picker);
    let commands = panel.update(PanelMessage::SetScale(1.5), &mut controller, &picker);
    assert_eq!(commands, vec![SurfaceCommand::Resize { width: 60, height: 30 }]);
    assert_eq!(controller.settings().scale_factor, 1.5);
}

#[test]
fn movable_toggle_updates_live_overlay_flags() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(None);
    panel.update(PanelMessage::SetOverlayEnabled(true), &mut controller, &picker);

    let commands = panel.update(PanelMessage::SetMovable(true), &mut controller, &picker);
    assert_eq!(
        commands,
        vec![SurfaceCommand::ApplyFlags(OverlayFlags::for_movable(true))]
    );
    assert!(controller.settings().movable);
}

#[test]
fn browse_accept_updates_field_settings_and_overlay() {
    let sandbox = Sandbox::new();
    let chosen = write_png(sandbox.dir.path(), "chosen.png", 12, 6);
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(Some(chosen.clone()));
    panel.update(PanelMessage::SetOverlayEnabled(true), &mut controller, &picker);

    let commands = panel.update(PanelMessage::BrowseImage, &mut controller, &picker);

    assert_eq!(*picker.calls.borrow(), 1);
    assert_eq!(commands, vec![SurfaceCommand::Resize { width: 12, height: 6 }]);
    assert_eq!(controller.settings().image_path, chosen);
    assert_eq!(panel.image_path_input(), chosen.display().to_string());
    assert_eq!(controller.overlay().unwrap().source_image(), Some(chosen.as_path()));
}

#[test]
fn browse_cancel_changes_nothing() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let before = controller.settings().clone();
    let picker = FakePicker::returning(None);

    assert!(panel.update(PanelMessage::BrowseImage, &mut controller, &picker).is_empty());
    assert_eq!(controller.settings(), &before);
}

#[test]
fn typed_path_applies_only_on_submit() {
    let sandbox = Sandbox::new();
    let typed = write_png(sandbox.dir.path(), "typed.png", 5, 5);
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(None);
    let original = controller.settings().image_path.clone();

    panel.update(
        PanelMessage::ImagePathEdited(typed.display().to_string()),
        &mut controller,
        &picker,
    );
    assert_eq!(controller.settings().image_path, original);

    panel.update(PanelMessage::ApplyImagePath, &mut controller, &picker);
    assert_eq!(controller.settings().image_path, typed);
}

#[test]
fn blank_typed_path_is_ignored() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let mut panel = ControlPanel::new(controller.settings());
    let picker = FakePicker::returning(None);
    let original = controller.settings().image_path.clone();

    panel.update(PanelMessage::ImagePathEdited("   ".into()), &mut controller, &picker);
    assert!(panel.update(PanelMessage::ApplyImagePath, &mut controller, &picker).is_empty());
    assert_eq!(controller.settings().image_path, original);
}

#[test]
fn closing_panel_persists_settings() {
    let sandbox = Sandbox::new();
    let mut controller = sandbox.controller();
    let panel = ControlPanel::new(controller.settings());
    controller.settings_mut().movable = true;

    assert!(!sandbox.settings_path().exists());
    panel.close(&controller);
    assert!(sandbox.store().load().movable);
}
