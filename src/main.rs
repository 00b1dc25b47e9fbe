// What you SEE:
// • The source image redrawn as one shape per pixel, on a white canvas.
// • Mouse X scales the shapes; mouse Y stretches lines / spins squares.
// • Keys 1..5 switch between dots, lines, relief, colour dots and squares.
// • ESC quits. With --export the frame goes to a file and no window opens.

mod config;
mod draw;
mod encoders;
mod error;
mod export;
mod geometry;
mod input;
mod luma;
mod raster;
mod renderer;
mod sampler;
mod types;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;
use draw::{draw_text_5x7, Drawer};
use error::Error;
use input::InteractionController;
use renderer::FrameRenderer;
use types::FrameBuffer;

/// RUST_LOG wins when it is set; otherwise -v picks the level.
fn log_filter(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    if let Some(spec) = rust_log.filter(|s| !s.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(spec) {
            return filter;
        }
    }
    // map -v to log level
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    EnvFilter::builder().with_default_directive(level.into()).parse_lossy("minifb=warn")
}

fn init_tracing(verbosity: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbosity, rust_log.as_deref());
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let cfg = Config::parse();
    init_tracing(cfg.verbose);

    // Every error that reaches here is a fatal startup/window failure.
    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cfg: &Config) -> Result<(), Error> {
    /* --- Setup: load the image once and copy it into the sample grid ---
       Visual: nothing on screen yet; a bad path stops here with a message. */
    let source = sampler::load_source(&cfg.image)?;
    let grid = sampler::sample(&source);
    drop(source);

    let (w, h) = (cfg.width as usize, cfg.height as usize);
    let mut screen = FrameBuffer::new(w, h);
    let renderer = FrameRenderer::new(cfg.background);
    let mut controls = InteractionController::new(cfg.render_mode());
    info!(
        grid_w = grid.width(),
        grid_h = grid.height(),
        canvas_w = w,
        canvas_h = h,
        mode = controls.mode().number(),
        "ready"
    );

    /* --- Headless: one frame straight to disk --- */
    if let Some(path) = &cfg.export {
        controls.on_pointer_move(cfg.pointer.0, cfg.pointer.1);
        renderer.render_frame(&grid, &controls.snapshot(), &mut screen);
        return export::save(&screen, path);
    }

    let mut drawer = Drawer::new("Image as Data", w, h, cfg.fps as usize)?;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs: everything that arrived since the last frame is applied
           before this frame is drawn. */
        for key in drawer.released_chars() {
            controls.on_key_release(key);
        }
        let (px, py) = drawer.pointer();
        controls.on_pointer_move(px, py);

        /* 2) Draw the whole frame from one frozen snapshot. */
        let frame = controls.snapshot();
        renderer.render_frame(&grid, &frame, &mut screen);

        if cfg.hud {
            let hud = format!("MODE {} | {}", frame.mode.number(), hud_fps_text);
            draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF, 0x00_00_00_00);
        }

        /* 3) Present (also pumps the window's input events). */
        drawer.present(&screen)?;

        /* 4) FPS counter, once per second */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!(fps, "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter(0, Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(0, Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn verbosity_applies_without_rust_log() {
        assert_eq!(log_filter(0, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(1, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(3, Some("  ")).max_level_hint(), Some(LevelFilter::TRACE));
    }
}
