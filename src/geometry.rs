// Grid space -> canvas space, plus the linear remap every encoder leans on.

use crate::types::Tile;

/// Re-map `value` from [in_min, in_max] to [out_min, out_max].
/// Not clamped: values outside the input range extrapolate along the same line.
/// Written as a lerp so both endpoints come back bit-exact.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value - in_min) / (in_max - in_min);
    out_min * (1.0 - t) + out_max * t
}

/// Rotate a local point about the local origin, then move it to `origin`.
/// Positive angles turn clockwise on screen (y grows downward).
#[inline]
pub fn to_canvas(origin: (f32, f32), angle: f32, local: (f32, f32)) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (origin.0 + local.0 * c - local.1 * s, origin.1 + local.0 * s + local.1 * c)
}

/// Inverse of [`to_canvas`]: canvas point -> local point.
#[inline]
pub fn to_local(origin: (f32, f32), angle: f32, p: (f32, f32)) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    let (dx, dy) = (p.0 - origin.0, p.1 - origin.1);
    (dx * c + dy * s, -dx * s + dy * c)
}

/// Canvas rectangle for grid cell (gx, gy).
/// All tiles share one size, so together they cover the canvas exactly.
#[inline]
pub fn tile_geometry(
    canvas_w: f32,
    canvas_h: f32,
    grid_w: usize,
    grid_h: usize,
    gx: usize,
    gy: usize,
) -> Tile {
    let width = canvas_w / grid_w as f32;
    let height = canvas_h / grid_h as f32;
    Tile { x: width * gx as f32, y: height * gy as f32, width, height }
}
