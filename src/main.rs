// main.rs - Image Overlay Application Entry Point
//
// Sets up logging and hands over to the iced daemon hosting the control
// panel and the overlay window.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use log::info;

fn main() -> iced::Result {
    // Initialize logger with wgpu warnings filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("iced_wgpu", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .filter_module("cosmic_text", log::LevelFilter::Error)
        .init();
    info!("Image Overlay starting...");

    image_overlay::app::run()
}
