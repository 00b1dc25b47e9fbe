// Core types shared by sampling, encoding and rendering.

use image::Rgb;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the canvas is on screen (pixels)
    pub height: usize,     // how tall the canvas is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Read one pixel back as RGB; None outside the buffer.
    #[cfg(test)]
    pub fn rgb_at(&self, x: usize, y: usize) -> Option<Rgb<u8>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(unpack_rgb(self.pixels[y * self.width + x]))
    }
}

#[inline]
pub fn pack_rgb(c: Rgb<u8>) -> u32 {
    ((c[0] as u32) << 16) | ((c[1] as u32) << 8) | c[2] as u32
}

#[inline]
pub fn unpack_rgb(px: u32) -> Rgb<u8> {
    Rgb([((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8])
}

/// Colour samples copied out of the source raster, one per source pixel.
/// Stored column after column in a single buffer: index = x * height + y.
pub struct SampleGrid {
    width: usize,
    height: usize,
    samples: Vec<Rgb<u8>>,
}

impl SampleGrid {
    /// Build from a column-major buffer; `samples.len()` must be `width * height`.
    pub(crate) fn from_columns(width: usize, height: usize, samples: Vec<Rgb<u8>>) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        Self { width, height, samples }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at image column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb<u8> {
        self.samples[x * self.height + y]
    }

    /// The sample one column to the right, clamped to the last column.
    #[inline]
    pub fn right_neighbor(&self, x: usize, y: usize) -> Rgb<u8> {
        self.get((x + 1).min(self.width - 1), y)
    }
}

/// One canvas rectangle covering one grid cell. Recomputed every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Pointer-driven scale factors, nominally in [0.05, 1] but never clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Factors {
    pub fx: f32,
    pub fy: f32,
}

/// Which shape encoding is active. Keys '1'..'5' select it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Dots,      // 1: black circles, area follows darkness
    Strokes,   // 2: rotated black lines
    Relief,    // 3: diagonal relief lines in the neighbour's colour
    ColorDots, // 4: circles in the tile's own colour
    Squares,   // 5: rotated translucent squares
}

impl RenderMode {
    pub const ALL: [RenderMode; 5] = [
        RenderMode::Dots,
        RenderMode::Strokes,
        RenderMode::Relief,
        RenderMode::ColorDots,
        RenderMode::Squares,
    ];

    /// Mode for a digit key; anything other than '1'..'5' is not a mode.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1'..='5' => Self::from_number(key as u8 - b'0'),
            _ => None,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_numbers_round_trip() {
        for m in RenderMode::ALL {
            assert_eq!(RenderMode::from_number(m.number()), Some(m));
        }
        assert_eq!(RenderMode::from_number(0), None);
        assert_eq!(RenderMode::from_number(6), None);
        assert_eq!(RenderMode::default().number(), 1);
    }

    #[test]
    fn only_digits_one_to_five_are_modes() {
        assert_eq!(RenderMode::from_key('3'), Some(RenderMode::Relief));
        assert_eq!(RenderMode::from_key('0'), None);
        assert_eq!(RenderMode::from_key('6'), None);
        assert_eq!(RenderMode::from_key('a'), None);
    }

    #[test]
    fn right_neighbor_clamps_at_last_column() {
        let red = Rgb([255, 0, 0]);
        let blue = Rgb([0, 0, 255]);
        // 2x1 grid, column-major: (0,0)=red, (1,0)=blue
        let grid = SampleGrid::from_columns(2, 1, vec![red, blue]);
        assert_eq!(grid.right_neighbor(0, 0), blue);
        assert_eq!(grid.right_neighbor(1, 0), blue);
    }

    #[test]
    fn pack_unpack_rgb() {
        let c = Rgb([0x12, 0x34, 0x56]);
        assert_eq!(pack_rgb(c), 0x00_12_34_56);
        assert_eq!(unpack_rgb(0x00_12_34_56), c);
    }
}
