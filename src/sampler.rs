// Loads the source raster once and copies its pixels into a SampleGrid.
// Visual expectation: one tile on screen per pixel in the source image.

use std::path::Path;

use image::{Rgb, RgbImage};
use tracing::info;

use crate::error::Error;
use crate::types::SampleGrid;

/// Open and decode the raster at `path` as 8-bit RGB.
/// Any failure here is fatal: without an image there is nothing to draw.
pub fn load_source(path: &Path) -> Result<RgbImage, Error> {
    let img = image::open(path)
        .map_err(|source| Error::ImageDecode { path: path.to_path_buf(), source })?
        .into_rgb8();

    if img.width() == 0 || img.height() == 0 {
        return Err(Error::EmptyImage(path.to_path_buf()));
    }

    info!(path = %path.display(), width = img.width(), height = img.height(), "loaded source image");
    Ok(img)
}

/// Copy every pixel of `img` into a grid addressed by (column, row).
/// The decoder hands us one long row-major strip, so pixel `i` sits at
/// column `i % width`, row `i / width`.
pub fn sample(img: &RgbImage) -> SampleGrid {
    let w = img.width() as usize;
    let h = img.height() as usize;

    let mut samples = vec![Rgb([0u8; 3]); w * h];
    for (i, px) in img.as_raw().chunks_exact(3).enumerate() {
        let (x, y) = (i % w, i / w);
        samples[x * h + y] = Rgb([px[0], px[1], px[2]]);
    }

    SampleGrid::from_columns(w, h, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_matches_source_coordinates() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, (x * 10 + y) as u8]));
        let grid = sample(&img);

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid.get(x, y), *img.get_pixel(x as u32, y as u32));
            }
        }
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = load_source(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }
}
