// Software rasterizer for the drawing directives.
// Every primitive is anti-aliased from a distance test at the pixel centre:
// coverage = clamp(0.5 - signed_distance, 0, 1), so edges get a 1px ramp.

use image::Rgb;

use crate::encoders::{DrawCommand, Paint, Shape, Stroke};
use crate::geometry::{to_canvas, to_local};
use crate::types::{pack_rgb, FrameBuffer};

/// Fill the whole canvas with one colour.
pub fn clear(fb: &mut FrameBuffer, color: Rgb<u8>) {
    fb.pixels.fill(pack_rgb(color));
}

/// Draw one directive: fill first, then the outline on top.
pub fn paint(fb: &mut FrameBuffer, cmd: &DrawCommand) {
    match cmd.shape {
        Shape::Circle { center, diameter } => {
            let r = diameter.abs() * 0.5;
            if let Some(fill) = cmd.fill {
                fill_circle(fb, center, r, fill);
            }
            if let Some(stroke) = cmd.stroke {
                stroke_circle(fb, center, r, stroke);
            }
        }
        Shape::Line { from, to } => {
            // Lines have no interior; fill is meaningless here.
            if let Some(stroke) = cmd.stroke {
                stroke_line(fb, from, to, stroke);
            }
        }
        Shape::Square { origin, side, rotation } => {
            if let Some(fill) = cmd.fill {
                fill_square(fb, origin, side, rotation, fill);
            }
            if let Some(stroke) = cmd.stroke {
                stroke_square(fb, origin, side, rotation, stroke);
            }
        }
    }
}

/// Source-over blend `paint` at (x,y) with extra `coverage` in [0,1].
/// Out-of-bounds pixels are skipped.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, paint: Paint, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }

    let a = paint.alpha.clamp(0.0, 1.0) * coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let idx = y * fb.width + x;
    if a >= 1.0 {
        fb.pixels[idx] = pack_rgb(paint.color);
        return;
    }

    let old = fb.pixels[idx];
    let mix = |shift: u32, src: u8| -> u32 {
        let dst = ((old >> shift) & 0xFF) as f32;
        let v = dst + (src as f32 - dst) * a;
        (v.round().clamp(0.0, 255.0) as u32) << shift
    };
    fb.pixels[idx] = mix(16, paint.color[0]) | mix(8, paint.color[1]) | mix(0, paint.color[2]);
}

/// Visit every pixel whose centre lies in the box grown by 1px for the AA ramp,
/// handing the centre point to `coverage`.
fn scan_box<F>(fb: &mut FrameBuffer, min: (f32, f32), max: (f32, f32), paint: Paint, coverage: F)
where
    F: Fn((f32, f32)) -> f32,
{
    // Keep the scan inside the canvas; tiles can throw shapes far off-screen.
    let x0 = (min.0 - 1.0).floor().max(0.0) as i32;
    let y0 = (min.1 - 1.0).floor().max(0.0) as i32;
    let x1 = (max.0 + 1.0).ceil().min(fb.width as f32) as i32;
    let y1 = (max.1 + 1.0).ceil().min(fb.height as f32) as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            let c = coverage((x as f32 + 0.5, y as f32 + 0.5));
            if c > 0.0 {
                blend_pixel(fb, x, y, paint, c);
            }
        }
    }
}

#[inline]
fn edge_coverage(signed_distance: f32) -> f32 {
    (0.5 - signed_distance).clamp(0.0, 1.0)
}

pub fn fill_circle(fb: &mut FrameBuffer, center: (f32, f32), radius: f32, paint: Paint) {
    if !(radius > 0.0) {
        return;
    }
    let (cx, cy) = center;
    scan_box(fb, (cx - radius, cy - radius), (cx + radius, cy + radius), paint, |p| {
        let d = ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt();
        edge_coverage(d - radius)
    });
}

fn stroke_circle(fb: &mut FrameBuffer, center: (f32, f32), radius: f32, stroke: Stroke) {
    let half = stroke.weight * 0.5;
    if !(half > 0.0) {
        return;
    }
    let (cx, cy) = center;
    let outer = radius + half;
    scan_box(fb, (cx - outer, cy - outer), (cx + outer, cy + outer), stroke.paint, |p| {
        let d = ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt();
        edge_coverage((d - radius).abs() - half)
    });
}

/// Thick segment with round caps (a capsule).
pub fn stroke_line(fb: &mut FrameBuffer, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
    let half = stroke.weight * 0.5;
    if !(half > 0.0) {
        return;
    }
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len2 = dx * dx + dy * dy;

    let min = (from.0.min(to.0) - half, from.1.min(to.1) - half);
    let max = (from.0.max(to.0) + half, from.1.max(to.1) + half);
    scan_box(fb, min, max, stroke.paint, |p| {
        // Closest point on the segment, as a fraction along it.
        let t = if len2 > 0.0 {
            (((p.0 - from.0) * dx + (p.1 - from.1) * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (qx, qy) = (from.0 + dx * t, from.1 + dy * t);
        let d = ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt();
        edge_coverage(d - half)
    });
}

/// Signed Chebyshev distance to the outline of a [0,side]^2 square in local space.
/// Negative inside; the level sets are squares, so strokes get sharp corners.
#[inline]
fn square_distance(local: (f32, f32), side: f32) -> f32 {
    let h = side * 0.5;
    let qx = (local.0 - h).abs() - h;
    let qy = (local.1 - h).abs() - h;
    qx.max(qy)
}

/// Canvas-space bounding box of a rotated square, grown by `pad`.
fn square_bounds(origin: (f32, f32), side: f32, rotation: f32, pad: f32) -> ((f32, f32), (f32, f32)) {
    let corners = [(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)]
        .map(|c| to_canvas(origin, rotation, c));
    let mut min = (f32::INFINITY, f32::INFINITY);
    let mut max = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for (x, y) in corners {
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    ((min.0 - pad, min.1 - pad), (max.0 + pad, max.1 + pad))
}

fn fill_square(fb: &mut FrameBuffer, origin: (f32, f32), side: f32, rotation: f32, paint: Paint) {
    if !(side > 0.0) {
        return;
    }
    let (min, max) = square_bounds(origin, side, rotation, 0.0);
    scan_box(fb, min, max, paint, |p| {
        edge_coverage(square_distance(to_local(origin, rotation, p), side))
    });
}

fn stroke_square(fb: &mut FrameBuffer, origin: (f32, f32), side: f32, rotation: f32, stroke: Stroke) {
    let half = stroke.weight * 0.5;
    if !(half > 0.0) || !(side > 0.0) {
        return;
    }
    let (min, max) = square_bounds(origin, side, rotation, half);
    scan_box(fb, min, max, stroke.paint, |p| {
        let d = square_distance(to_local(origin, rotation, p), side);
        edge_coverage(d.abs() - half)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::unpack_rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn canvas(w: usize, h: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        clear(&mut fb, WHITE);
        fb
    }

    fn px(fb: &FrameBuffer, x: usize, y: usize) -> Rgb<u8> {
        unpack_rgb(fb.pixels[y * fb.width + x])
    }

    #[test]
    fn clear_sets_every_pixel() {
        let mut fb = FrameBuffer::new(4, 3);
        clear(&mut fb, Rgb([1, 2, 3]));
        assert!(fb.pixels.iter().all(|&p| p == 0x00_01_02_03));
    }

    #[test]
    fn circle_covers_centre_not_corners() {
        let mut fb = canvas(20, 20);
        let cmd = DrawCommand {
            shape: Shape::Circle { center: (10.0, 10.0), diameter: 10.0 },
            fill: Some(Paint::opaque(BLACK)),
            stroke: None,
        };
        paint(&mut fb, &cmd);
        assert_eq!(px(&fb, 10, 10), BLACK);
        assert_eq!(px(&fb, 0, 0), WHITE);
        assert_eq!(px(&fb, 19, 19), WHITE);
        assert_eq!(px(&fb, 10, 2), WHITE);
    }

    #[test]
    fn negative_diameter_draws_like_positive() {
        let mut a = canvas(20, 20);
        let mut b = canvas(20, 20);
        let mk = |d| DrawCommand {
            shape: Shape::Circle { center: (10.0, 10.0), diameter: d },
            fill: Some(Paint::opaque(BLACK)),
            stroke: None,
        };
        paint(&mut a, &mk(8.0));
        paint(&mut b, &mk(-8.0));
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn zero_size_shapes_draw_nothing() {
        let mut fb = canvas(10, 10);
        fill_circle(&mut fb, (5.0, 5.0), 0.0, Paint::opaque(BLACK));
        let thin = Stroke { paint: Paint::opaque(BLACK), weight: 0.0 };
        stroke_line(&mut fb, (0.0, 0.0), (9.0, 9.0), thin);
        let negative = Stroke { paint: Paint::opaque(BLACK), weight: -3.0 };
        stroke_line(&mut fb, (0.0, 0.0), (9.0, 9.0), negative);
        assert!(fb.pixels.iter().all(|&p| p == 0x00_FF_FF_FF));
    }

    #[test]
    fn thick_line_paints_along_its_path() {
        let mut fb = canvas(20, 20);
        let s = Stroke { paint: Paint::opaque(Rgb([255, 0, 0])), weight: 3.0 };
        stroke_line(&mut fb, (2.0, 10.0), (18.0, 10.0), s);
        assert_eq!(px(&fb, 10, 9), Rgb([255, 0, 0]));
        assert_eq!(px(&fb, 10, 3), WHITE);
    }

    #[test]
    fn half_alpha_blends_halfway() {
        let mut fb = canvas(4, 4);
        fill_circle(&mut fb, (2.0, 2.0), 10.0, Paint { color: BLACK, alpha: 0.5 });
        let c = px(&fb, 1, 1);
        assert!((c[0] as i32 - 128).abs() <= 1, "{c:?}");
    }

    #[test]
    fn alpha_above_one_is_opaque_and_below_zero_invisible() {
        let mut fb = canvas(4, 4);
        fill_circle(&mut fb, (2.0, 2.0), 10.0, Paint { color: BLACK, alpha: -0.3 });
        assert_eq!(px(&fb, 1, 1), WHITE);
        fill_circle(&mut fb, (2.0, 2.0), 10.0, Paint { color: BLACK, alpha: 1.7 });
        assert_eq!(px(&fb, 1, 1), BLACK);
    }

    #[test]
    fn square_outline_leaves_interior_to_fill() {
        let mut fb = canvas(30, 30);
        let cmd = DrawCommand {
            shape: Shape::Square { origin: (5.0, 5.0), side: 15.0, rotation: 0.0 },
            fill: Some(Paint::opaque(Rgb([0, 0, 255]))),
            stroke: Some(Stroke { paint: Paint::opaque(BLACK), weight: 2.0 }),
        };
        paint(&mut fb, &cmd);
        assert_eq!(px(&fb, 12, 12), Rgb([0, 0, 255])); // interior
        assert_eq!(px(&fb, 5, 12), BLACK); // left edge
        assert_eq!(px(&fb, 25, 25), WHITE); // outside
    }

    #[test]
    fn rotated_square_turns_about_its_corner() {
        // A half turn swings the square up and to the left of its origin.
        let mut fb = canvas(40, 40);
        fill_square(&mut fb, (20.0, 20.0), 10.0, std::f32::consts::PI, Paint::opaque(BLACK));
        assert_eq!(px(&fb, 15, 15), BLACK);
        assert_eq!(px(&fb, 25, 25), WHITE);
    }

    #[test]
    fn shapes_far_off_canvas_are_ignored() {
        let mut fb = canvas(10, 10);
        fill_circle(&mut fb, (-500.0, 900.0), 20.0, Paint::opaque(BLACK));
        assert!(fb.pixels.iter().all(|&p| p == 0x00_FF_FF_FF));
    }
}
