// Headless path: draw one frame and write it to disk instead of a window.

use std::path::Path;

use image::RgbImage;
use tracing::info;

use crate::error::Error;
use crate::types::{unpack_rgb, FrameBuffer};

/// Copy a 0x00RRGGBB canvas into an RGB image.
pub fn to_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        unpack_rgb(fb.pixels[y as usize * fb.width + x as usize])
    })
}

/// Save the canvas; the file extension picks the format.
pub fn save(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_image(fb)
        .save(path)
        .map_err(|source| Error::Export { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), width = fb.width, height = fb.height, "exported frame");
    Ok(())
}
