//! Debug image output for captured span data
//!
//! Everything here exists for eyeballing capture contents: the span
//! frames show exactly which pixels the hardware lit for one sweep
//! position, and the screencap helpers decode the raw RGB555
//! framebuffer dumps the DS side can save alongside a capture.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use image::ImageError;

use crate::capture::Capture;
use crate::{HEIGHT, WIDTH};

/// Render the spans of one sweep position into a greyscale frame
///
/// Lit pixels are 255 on a black background; the buffer is
/// WIDTH x HEIGHT bytes in row-major order.
pub fn span_frame(cap: &Capture, sweep_x: u16, sweep_y: u8) -> Vec<u8> {
    let w = WIDTH as usize;
    let mut pixels = vec![0u8; w * HEIGHT as usize];
    let scanlines = cap.grid.scanlines(usize::from(sweep_x), usize::from(sweep_y));
    for (y, span) in scanlines.iter().enumerate() {
        if span.exists {
            for x in span.start..=span.end {
                pixels[y * w + usize::from(x)] = 255;
            }
        }
    }
    pixels
}

/// Write one greyscale frame per sweep position of a capture
///
/// Files are named `<corner>-<x>x<y>.png`, e.g. `TL-69x49.png`. The
/// directory is created if needed. Mind the file count: a full-screen
/// sweep is 257 x 193 frames.
pub fn write_span_images<P: AsRef<Path>>(cap: &Capture, dir: P) -> Result<(), ImageError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for sweep_y in cap.min_y..=cap.max_y {
        for sweep_x in cap.min_x..=cap.max_x {
            let pixels = span_frame(cap, sweep_x, sweep_y);
            let name = format!("{}-{}x{}.png", cap.corner.prefix(), sweep_x, sweep_y);
            image::save_buffer(
                dir.join(name),
                &pixels,
                WIDTH as u32,
                HEIGHT as u32,
                image::ColorType::L8,
            )?;
        }
    }
    Ok(())
}

/// Widen a 5-bit color channel to 8 bits
///
/// Replicates the high bits into the low ones, the same expansion the
/// DS video output applies.
pub fn expand5(c: u8) -> u8 {
    (c << 3) | (c >> 2)
}

/// Split a raw RGB555 value into 8-bit channels
pub fn rgb555_to_rgb888(clr: u16) -> [u8; 3] {
    let r = (clr & 0x1F) as u8;
    let g = ((clr >> 5) & 0x1F) as u8;
    let b = ((clr >> 10) & 0x1F) as u8;
    [expand5(r), expand5(g), expand5(b)]
}

/// Convert a raw RGB555 screen capture into an image file
///
/// The input is the 256x192 little-endian RGB555 dump the generator
/// saves from VRAM; the output format follows the file extension.
pub fn convert_screencap<P: AsRef<Path>, Q: AsRef<Path>>(bin: P, out: Q) -> Result<(), ImageError> {
    let data = fs::read(bin)?;
    let mut pixels = Vec::with_capacity(data.len() / 2 * 3);
    for clr in data.chunks_exact(2) {
        let clr = u16::from_le_bytes([clr[0], clr[1]]);
        pixels.extend_from_slice(&rgb555_to_rgb888(clr));
    }
    image::save_buffer(out, &pixels, WIDTH as u32, HEIGHT as u32, image::ColorType::Rgb8)
}

/// Distinct colors of a raw RGB555 capture, in first-seen order
pub fn unique_colors(data: &[u8]) -> Vec<u16> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    for clr in data.chunks_exact(2) {
        let clr = u16::from_le_bytes([clr[0], clr[1]]);
        if seen.insert(clr) {
            colors.push(clr);
        }
    }
    colors
}
