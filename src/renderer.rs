// One frame: clear, then one directive per grid cell from the active encoder.
// Visual: the whole canvas is redrawn every tick; nothing carries over.

use image::Rgb;

use crate::encoders::{DrawCommand, TileInput};
use crate::geometry::tile_geometry;
use crate::input::{factors, FrameInput};
use crate::luma::luminance;
use crate::raster;
use crate::types::{FrameBuffer, SampleGrid};

pub struct FrameRenderer {
    background: Rgb<u8>,
}

impl FrameRenderer {
    pub fn new(background: Rgb<u8>) -> Self {
        Self { background }
    }

    /// Walk the grid column by column and hand each directive to `emit`.
    /// Pure apart from whatever `emit` does.
    pub fn for_each_command<F>(
        &self,
        grid: &SampleGrid,
        canvas: (f32, f32),
        input: &FrameInput,
        mut emit: F,
    ) where
        F: FnMut(DrawCommand),
    {
        let (canvas_w, canvas_h) = canvas;
        let f = factors(input.pointer, canvas_w, canvas_h);
        let encoder = input.mode.encoder();
        let wants_neighbor = encoder.uses_neighbor();

        for gx in 0..grid.width() {
            for gy in 0..grid.height() {
                let tile = tile_geometry(canvas_w, canvas_h, grid.width(), grid.height(), gx, gy);
                let color = grid.get(gx, gy);
                let neighbor = wants_neighbor.then(|| {
                    let n = grid.right_neighbor(gx, gy);
                    (n, luminance(n))
                });
                let cmd = encoder.encode(&TileInput {
                    tile,
                    color,
                    grey: luminance(color),
                    neighbor,
                    factors: f,
                });
                emit(cmd);
            }
        }
    }

    /// All directives for one frame, in draw order.
    pub fn plan(&self, grid: &SampleGrid, canvas: (f32, f32), input: &FrameInput) -> Vec<DrawCommand> {
        let mut out = Vec::with_capacity(grid.width() * grid.height());
        self.for_each_command(grid, canvas, input, |cmd| out.push(cmd));
        out
    }

    /// Clear `fb` and draw the frame described by `input` into it.
    pub fn render_frame(&self, grid: &SampleGrid, input: &FrameInput, fb: &mut FrameBuffer) {
        raster::clear(fb, self.background);
        let canvas = (fb.width as f32, fb.height as f32);
        self.for_each_command(grid, canvas, input, |cmd| raster::paint(fb, &cmd));
    }
}
