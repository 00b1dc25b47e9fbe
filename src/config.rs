use std::path::PathBuf;

use clap::{ArgAction, Parser};
use image::Rgb;

use crate::types::RenderMode;

#[derive(Parser, Debug)]
#[command(name = "luma-tiles", about = "Redraw an image as a grid of luminance-driven shapes")]
pub struct Config {
    /// Source image (one tile per pixel, so keep it small)
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Starting render mode (1-5); keys 1-5 switch it at runtime
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub mode: u8,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Background colour as RRGGBB hex
    #[arg(long, default_value = "ffffff", value_parser = parse_hex_rgb)]
    pub background: Rgb<u8>,

    /// Overlay the current mode and FPS
    #[arg(long)]
    pub hud: bool,

    /// Render a single frame to FILE instead of opening a window
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Pointer position for --export, as X,Y in canvas pixels
    #[arg(long, value_name = "X,Y", default_value = "0,0", value_parser = parse_point, allow_hyphen_values = true)]
    pub pointer: (f32, f32),

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn render_mode(&self) -> RenderMode {
        // clap already limits `mode` to 1..=5
        RenderMode::from_number(self.mode).unwrap_or_default()
    }
}

fn parse_hex_rgb(s: &str) -> Result<Rgb<u8>, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got {s:?}"));
    }
    let v = u32::from_str_radix(hex, 16).map_err(|e| format!("bad hex colour {s:?}: {e}"))?;
    Ok(Rgb([(v >> 16) as u8, (v >> 8) as u8, v as u8]))
}

fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad X in {s:?}: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad Y in {s:?}: {e}"))?;
    Ok((x, y))
}
