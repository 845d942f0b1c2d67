// overlay/bitmap.rs - Overlay Image Loading
//
// Resolves the configured image (falling back to the default asset),
// decodes it and resamples it to the requested scale.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use iced::widget::image::Handle;
use image::imageops::FilterType;
use image::ImageReader;
use log::{debug, info, warn};

use crate::constants::MAX_BITMAP_PIXELS;

/// Decoded, scaled RGBA image ready for display
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    handle: Handle,
}

impl Bitmap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Cached image handle; cloning it does not copy the pixels
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// Target size for a scaled image: each side rounded, never below 1 px
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let side = |len: u32| ((len as f64 * scale).round() as u32).max(1);
    (side(width), side(height))
}

/// Pick the file to display: `requested` if it exists, else `fallback` if
/// that exists, else nothing.
pub fn resolve_path(requested: &Path, fallback: &Path) -> Option<PathBuf> {
    if requested.exists() {
        return Some(requested.to_path_buf());
    }
    warn!("Image not found: {:?}", requested);

    if fallback.exists() {
        info!("Using default overlay image {:?}", fallback);
        Some(fallback.to_path_buf())
    } else {
        warn!("Default overlay image not found either: {:?}", fallback);
        None
    }
}

/// Decode `path` and resample it by `scale` (skipped for 1.0).
///
/// Resampling ignores the aspect ratio and uses a smooth Catmull-Rom filter.
/// Fails without allocating when the result would exceed
/// [`MAX_BITMAP_PIXELS`].
pub fn load_scaled(path: &Path, scale: f64) -> Result<Bitmap> {
    let img = ImageReader::open(path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .with_guessed_format()
        .with_context(|| format!("Failed to detect image format of {:?}", path))?
        .decode()
        .with_context(|| format!("Failed to decode image {:?}", path))?;

    let img = if scale != 1.0 {
        let (width, height) = scaled_dimensions(img.width(), img.height(), scale);
        let pixels = u64::from(width) * u64::from(height);
        if pixels > MAX_BITMAP_PIXELS {
            bail!(
                "Scaling {:?} by {} gives {}x{}, more than {} pixels",
                path,
                scale,
                width,
                height,
                MAX_BITMAP_PIXELS
            );
        }
        debug!(
            "Scaling {}x{} by {} to {}x{}",
            img.width(),
            img.height(),
            scale,
            width,
            height
        );
        img.resize_exact(width, height, FilterType::CatmullRom)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Bitmap {
        width,
        height,
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
    })
}
