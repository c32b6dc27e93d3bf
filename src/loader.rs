//! Image loading through the `image` crate.
//!
//! Decoded images are flattened to opaque RGB. Any format the `image` crate
//! was built with is accepted.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use thiserror::Error;

use crate::surface::Surface;
use crate::types::Rgb;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {} has no pixels", path.display())]
    Empty { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Read just the image header.
pub fn dimensions(path: impl AsRef<Path>) -> Result<(u32, u32)> {
    let path = path.as_ref();
    image::image_dimensions(path).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: impl AsRef<Path>) -> Result<Surface> {
    load_scaled(path, 1.0)
}

/// Load an image, shrinking it by `scale` when `scale < 1`.
pub fn load_scaled(path: impl AsRef<Path>, scale: f32) -> Result<Surface> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rgb = decoded.to_rgb8();
    if scale < 1.0 {
        let w = scaled_len(rgb.width(), scale);
        let h = scaled_len(rgb.height(), scale);
        rgb = image::imageops::resize(&rgb, w, h, FilterType::Triangle);
    }

    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let (w, h) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| Rgb::new(p[0], p[1], p[2])).collect();
    Surface::from_pixels(w, h, pixels).ok_or_else(|| LoadError::Empty {
        path: path.to_path_buf(),
    })
}

fn scaled_len(len: u32, scale: f32) -> u32 {
    ((len as f32 * scale).floor() as u32).max(1)
}
