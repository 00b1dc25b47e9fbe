// Fatal errors, one variant per setup/window stage.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The source raster could not be opened or decoded.
    #[error("Image decode error ({path}): {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The raster decoded fine but has no pixels, so there is no grid to draw.
    #[error("Image {0} has zero width or height")]
    EmptyImage(PathBuf),

    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Writing a headless frame to disk failed.
    #[error("Export error ({path}): {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
