// The five shape encodings. Each one turns a tile + its grey value + the
// pointer factors into a single drawing directive.
// Visual: switching modes changes *what* is drawn per tile; the grid of
// tiles itself never changes.

use std::f32::consts::PI;

use image::Rgb;

use crate::geometry::{map_range, to_canvas};
use crate::types::{Factors, RenderMode, Tile};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 2/sqrt(pi): turns a filled-area fraction into a circle diameter.
const AREA_TO_DIAMETER: f32 = 1.1284;

/// Colour plus opacity. `alpha` is 0..1 nominally; the rasterizer clamps it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Rgb<u8>,
    pub alpha: f32,
}

impl Paint {
    pub const fn opaque(color: Rgb<u8>) -> Self {
        Self { color, alpha: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub weight: f32,
}

/// Geometry in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Centred on `center`. A negative diameter draws like its absolute value.
    Circle { center: (f32, f32), diameter: f32 },
    /// Straight segment with round caps.
    Line { from: (f32, f32), to: (f32, f32) },
    /// Square whose top-left corner is `origin`, turned by `rotation` radians about it.
    Square { origin: (f32, f32), side: f32, rotation: f32 },
}

/// One thing to draw: a shape with optional fill and outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
}

/// Everything an encoder may look at for one tile.
#[derive(Clone, Copy, Debug)]
pub struct TileInput {
    pub tile: Tile,
    pub color: Rgb<u8>,
    pub grey: u8,
    /// Right-hand neighbour's colour and grey; only filled in for encoders
    /// that ask for it via [`ShapeEncoder::uses_neighbor`].
    pub neighbor: Option<(Rgb<u8>, u8)>,
    pub factors: Factors,
}

pub trait ShapeEncoder: Sync {
    fn encode(&self, input: &TileInput) -> DrawCommand;

    /// Whether the renderer must look up the right-hand neighbour.
    fn uses_neighbor(&self) -> bool {
        false
    }
}

/// Grey -> black dot whose area tracks darkness.
pub struct DotEncoder;
/// Grey -> rotation, length and weight of a black line.
pub struct StrokeEncoder;
/// Grey of this tile and its right neighbour -> offset endpoints of a relief line.
pub struct ReliefEncoder;
/// Grey -> dot size, filled with the tile's own colour.
pub struct ColorDotEncoder;
/// Grey -> rotation and outline weight of a translucent square.
pub struct SquareEncoder;

static ENCODERS: [&dyn ShapeEncoder; 5] =
    [&DotEncoder, &StrokeEncoder, &ReliefEncoder, &ColorDotEncoder, &SquareEncoder];

impl RenderMode {
    pub fn encoder(self) -> &'static dyn ShapeEncoder {
        ENCODERS[self as usize]
    }
}

#[inline]
fn grey_f(input: &TileInput) -> f32 {
    input.grey as f32
}

impl ShapeEncoder for DotEncoder {
    fn encode(&self, input: &TileInput) -> DrawCommand {
        let t = input.tile;
        let dark = 1.0 - grey_f(input) / 255.0;
        let diameter =
            AREA_TO_DIAMETER * (t.width * t.width * dark).sqrt() * input.factors.fx * 3.0;
        DrawCommand {
            shape: Shape::Circle { center: (t.x, t.y), diameter },
            fill: Some(Paint::opaque(BLACK)),
            stroke: None,
        }
    }
}

impl ShapeEncoder for StrokeEncoder {
    fn encode(&self, input: &TileInput) -> DrawCommand {
        let t = input.tile;
        let g = grey_f(input);
        let weight = map_range(g, 0.0, 255.0, 10.0, 0.0) * input.factors.fx + 0.1;
        let len = map_range(g, 0.0, 255.0, 35.0, 0.0) * input.factors.fy;
        let angle = g / 255.0 * PI;
        let origin = (t.x, t.y);
        DrawCommand {
            shape: Shape::Line { from: origin, to: to_canvas(origin, angle, (len, len)) },
            fill: None,
            stroke: Some(Stroke { paint: Paint::opaque(BLACK), weight }),
        }
    }
}

impl ShapeEncoder for ReliefEncoder {
    fn encode(&self, input: &TileInput) -> DrawCommand {
        let t = input.tile;
        let g = grey_f(input);
        let (n_color, n_grey) = input.neighbor.unwrap_or((input.color, input.grey));

        let weight = map_range(g, 0.0, 255.0, 5.0, 0.2) * input.factors.fy + 0.1;
        let h = 50.0 * input.factors.fx;
        let d1 = map_range(g, 0.0, 255.0, h, 0.0);
        let d2 = map_range(n_grey as f32, 0.0, 255.0, h, 0.0);
        DrawCommand {
            shape: Shape::Line { from: (t.x - d1, t.y + d1), to: (t.x + t.width - d2, t.y + d2) },
            fill: None,
            stroke: Some(Stroke { paint: Paint::opaque(n_color), weight }),
        }
    }

    fn uses_neighbor(&self) -> bool {
        true
    }
}

impl ShapeEncoder for ColorDotEncoder {
    fn encode(&self, input: &TileInput) -> DrawCommand {
        let t = input.tile;
        let diameter = map_range(grey_f(input), 0.0, 255.0, 25.0, 0.0) * input.factors.fx;
        DrawCommand {
            shape: Shape::Circle { center: (t.x, t.y), diameter },
            fill: Some(Paint::opaque(input.color)),
            stroke: None,
        }
    }
}

impl ShapeEncoder for SquareEncoder {
    fn encode(&self, input: &TileInput) -> DrawCommand {
        let t = input.tile;
        let g = grey_f(input);
        DrawCommand {
            shape: Shape::Square {
                origin: (t.x, t.y),
                side: 15.0,
                rotation: g / 255.0 * PI * input.factors.fy,
            },
            // fill(255, 255 * fx): white at fx opacity
            fill: Some(Paint { color: WHITE, alpha: input.factors.fx }),
            stroke: Some(Stroke {
                paint: Paint::opaque(input.color),
                weight: map_range(g, 0.0, 255.0, 5.0, 0.1),
            }),
        }
    }
}
