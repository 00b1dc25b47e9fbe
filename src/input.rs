// Pointer + keyboard -> what the next frame should look like.
// Visual: moving the mouse right grows shapes, moving it down stretches
// lines / spins squares; keys 1..5 switch the encoding.

use tracing::debug;

use crate::geometry::map_range;
use crate::types::{Factors, RenderMode};

const FACTOR_MIN: f32 = 0.05;
const FACTOR_MAX: f32 = 1.0;

/// Pointer position -> scale factors. Unclamped: a pointer outside the
/// canvas yields factors outside [0.05, 1].
pub fn factors(pointer: (f32, f32), canvas_w: f32, canvas_h: f32) -> Factors {
    Factors {
        fx: map_range(pointer.0, 0.0, canvas_w, FACTOR_MIN, FACTOR_MAX),
        fy: map_range(pointer.1, 0.0, canvas_h, FACTOR_MIN, FACTOR_MAX),
    }
}

/// Everything the renderer needs from input, frozen for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub pointer: (f32, f32),
    pub mode: RenderMode,
}

/// Owns the live input state between frames.
#[derive(Debug, Default)]
pub struct InteractionController {
    pointer: (f32, f32),
    mode: RenderMode,
}

impl InteractionController {
    pub fn new(mode: RenderMode) -> Self {
        Self { pointer: (0.0, 0.0), mode }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// '1'..'5' select a mode; every other key leaves it alone.
    pub fn on_key_release(&mut self, key: char) -> RenderMode {
        if let Some(mode) = RenderMode::from_key(key) {
            if mode != self.mode {
                debug!(from = self.mode.number(), to = mode.number(), "render mode changed");
            }
            self.mode = mode;
        }
        self.mode
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Freeze pointer + mode for the frame about to be drawn.
    pub fn snapshot(&self) -> FrameInput {
        FrameInput { pointer: self.pointer, mode: self.mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_span_canvas() {
        let f = factors((0.0, 400.0), 400.0, 400.0);
        assert_eq!(f.fx, 0.05);
        assert_eq!(f.fy, 1.0);

        let mid = factors((200.0, 200.0), 400.0, 400.0);
        assert!((mid.fx - 0.525).abs() < 1e-6);
        assert!((mid.fy - 0.525).abs() < 1e-6);
    }

    #[test]
    fn factors_are_not_clamped() {
        let f = factors((-40.0, 480.0), 400.0, 400.0);
        assert!(f.fx < 0.05);
        assert!(f.fy > 1.0);
    }

    #[test]
    fn unknown_keys_keep_mode() {
        let mut ctl = InteractionController::new(RenderMode::Strokes);
        for k in ['x', '0', '6', ' ', 'q'] {
            assert_eq!(ctl.on_key_release(k), RenderMode::Strokes);
        }
    }

    #[test]
    fn key_three_always_selects_relief() {
        for start in RenderMode::ALL {
            let mut ctl = InteractionController::new(start);
            assert_eq!(ctl.on_key_release('3'), RenderMode::Relief);
            assert_eq!(ctl.mode().number(), 3);
        }
    }

    #[test]
    fn snapshot_reflects_latest_events() {
        let mut ctl = InteractionController::default();
        assert_eq!(ctl.snapshot(), FrameInput { pointer: (0.0, 0.0), mode: RenderMode::Dots });
        ctl.on_pointer_move(12.0, -3.0);
        ctl.on_key_release('5');
        assert_eq!(ctl.snapshot(), FrameInput { pointer: (12.0, -3.0), mode: RenderMode::Squares });
    }
}
