//! Hardware capture files
//!
//! A capture file holds the spans the DS rasterizer lit while a
//! triangle vertex was swept across the screen from one fixed corner.
//! The layout is packed little-endian:
//!
//! - `type: u8` corner identifier (bit 0 = right, bit 1 = bottom)
//! - `min_x: u16`, `max_x: u16`, `min_y: u8`, `max_y: u8` sweep bounds
//! - per sweep position, row-major: the previous position's coordinates
//!   echoed back as two bytes (a validation walk starting at 0,0),
//!   then one `exists: u8, start: u8, end: u8` record per scanline in
//!   that position's scan range
//! - one final scanline block for the last position, with no echo
//!
//! The scan range covers `[sweep_y, 191]` for bottom corners and
//! `[0, sweep_y]` for top corners, clamped to the screen.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::span::{Span, SpanGrid};
use crate::{HEIGHT, WIDTH};

/// Screen corner a capture sweep is anchored to
///
/// The discriminant is the file's `type` byte: bit 0 set means the
/// right edge, bit 1 set means the bottom edge.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    /// All four corners, in `type` byte order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Decode a `type` byte
    pub fn from_type(t: u8) -> Option<Corner> {
        match t {
            0 => Some(Corner::TopLeft),
            1 => Some(Corner::TopRight),
            2 => Some(Corner::BottomLeft),
            3 => Some(Corner::BottomRight),
            _ => None,
        }
    }

    /// The `type` byte of this corner
    pub fn type_byte(self) -> u8 {
        self as u8
    }

    pub fn is_right(self) -> bool {
        self as u8 & 1 != 0
    }

    pub fn is_bottom(self) -> bool {
        self as u8 & 2 != 0
    }

    /// Conventional capture file name for this corner
    pub fn file_name(self) -> &'static str {
        match self {
            Corner::TopLeft => "TL.bin",
            Corner::TopRight => "TR.bin",
            Corner::BottomLeft => "BL.bin",
            Corner::BottomRight => "BR.bin",
        }
    }

    /// File name prefix ("TL", "TR", "BL", "BR")
    pub fn prefix(self) -> &'static str {
        &self.file_name()[..2]
    }

    /// The anchor point the sweep emanates from
    pub fn anchor(self) -> (i32, i32) {
        let x = if self.is_right() { WIDTH } else { 0 };
        let y = if self.is_bottom() { HEIGHT } else { 0 };
        (x, y)
    }

    /// Inclusive scanline range recorded for a sweep position
    ///
    /// Bottom corners record from the sweep Y down to the last line,
    /// top corners from the first line down to the sweep Y. Both ends
    /// are clamped to the screen.
    pub fn scan_range(self, sweep_y: i32) -> (usize, usize) {
        let last = HEIGHT - 1;
        let y = sweep_y.min(last);
        if self.is_bottom() {
            (y as usize, last as usize)
        } else {
            (0, y as usize)
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Corner::TopLeft => "top left",
            Corner::TopRight => "top right",
            Corner::BottomLeft => "bottom left",
            Corner::BottomRight => "bottom right",
        };
        f.write_str(name)
    }
}

/// Ways loading a capture can fail
///
/// None of these are fatal to a batch run; the offending file is
/// skipped and the remaining corners are still tested.
#[derive(Debug,Error)]
pub enum CaptureError {
    #[error("{0} does not exist or is not a file")]
    Missing(PathBuf),
    #[error("capture data ends mid-record")]
    Truncated,
    #[error("invalid corner type ({0})")]
    InvalidType(u8),
    #[error("invalid sweep bounds {min_x}x{min_y} to {max_x}x{max_y}")]
    InvalidBounds { min_x: u16, max_x: u16, min_y: u8, max_y: u8 },
    #[error("invalid file: record {x}x{y} echoes {got_x}x{got_y}, expected {want_x}x{want_y}")]
    CoordMismatch { x: u16, y: u8, got_x: u8, got_y: u8, want_x: u8, want_y: u8 },
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for CaptureError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CaptureError::Truncated
        } else {
            CaptureError::Io(e)
        }
    }
}

fn read_u8<R: Read>(r: &mut R) -> Result<u8, CaptureError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u16<R: Read>(r: &mut R) -> Result<u16, CaptureError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// One parsed capture file
#[derive(Debug,Clone)]
pub struct Capture {
    pub corner: Corner,
    pub min_x: u16,
    pub max_x: u16,
    pub min_y: u8,
    pub max_y: u8,
    pub grid: SpanGrid,
}

impl Capture {
    /// Create an empty capture for a sweep box, every span absent
    pub fn empty(corner: Corner, min_x: u16, max_x: u16, min_y: u8, max_y: u8) -> Self {
        Capture { corner, min_x, max_x, min_y, max_y, grid: SpanGrid::new() }
    }

    /// Load and parse a capture file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Capture, CaptureError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CaptureError::Missing(path.to_path_buf()));
        }
        let data = fs::read(path)?;
        Capture::parse(&mut &data[..])
    }

    /// Parse a capture from a reader
    ///
    /// The whole stream is consumed record by record; the coordinate
    /// echo preceding each scanline block must match the walk position
    /// or the file is rejected.
    pub fn parse<R: Read>(r: &mut R) -> Result<Capture, CaptureError> {
        let t = read_u8(r)?;
        let corner = Corner::from_type(t).ok_or(CaptureError::InvalidType(t))?;

        let min_x = read_u16(r)?;
        let max_x = read_u16(r)?;
        let min_y = read_u8(r)?;
        let max_y = read_u8(r)?;

        // The sweep endpoint box covers the screen including the
        // endpoint-inclusive right and bottom edges
        if min_x > max_x || max_x > WIDTH as u16
            || min_y > max_y || i32::from(max_y) > HEIGHT
        {
            return Err(CaptureError::InvalidBounds { min_x, max_x, min_y, max_y });
        }

        let mut cap = Capture::empty(corner, min_x, max_x, min_y, max_y);

        let mut prev_x: u16 = 0;
        let mut prev_y: u16 = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let got_x = read_u8(r)?;
                let got_y = read_u8(r)?;
                if got_x != prev_x as u8 || got_y != prev_y as u8 {
                    return Err(CaptureError::CoordMismatch {
                        x, y, got_x, got_y,
                        want_x: prev_x as u8,
                        want_y: prev_y as u8,
                    });
                }
                cap.read_scanline_block(r, prev_x, prev_y)?;
                prev_x = x;
                prev_y = u16::from(y);
            }
        }
        // Final block for the last sweep position, no echo before it
        cap.read_scanline_block(r, prev_x, prev_y)?;

        Ok(cap)
    }

    fn read_scanline_block<R: Read>(&mut self, r: &mut R, sweep_x: u16, sweep_y: u16) -> Result<(), CaptureError> {
        let (lo, hi) = self.corner.scan_range(i32::from(sweep_y));
        for scan_y in lo..=hi {
            let exists = read_u8(r)? != 0;
            let start = read_u8(r)?;
            let end = read_u8(r)?;
            self.grid[(usize::from(sweep_x), usize::from(sweep_y), scan_y)] =
                Span { exists, start, end };
        }
        Ok(())
    }

    /// Write the capture in the binary file layout
    ///
    /// Emits exactly what [`parse`](Capture::parse) accepts, echo walk
    /// and trailing block included.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[self.corner.type_byte()])?;
        w.write_all(&self.min_x.to_le_bytes())?;
        w.write_all(&self.max_x.to_le_bytes())?;
        w.write_all(&[self.min_y, self.max_y])?;

        let mut prev_x: u16 = 0;
        let mut prev_y: u16 = 0;
        for y in self.min_y..=self.max_y {
            for x in self.min_x..=self.max_x {
                w.write_all(&[prev_x as u8, prev_y as u8])?;
                self.write_scanline_block(w, prev_x, prev_y)?;
                prev_x = x;
                prev_y = u16::from(y);
            }
        }
        self.write_scanline_block(w, prev_x, prev_y)
    }

    fn write_scanline_block<W: Write>(&self, w: &mut W, sweep_x: u16, sweep_y: u16) -> io::Result<()> {
        let (lo, hi) = self.corner.scan_range(i32::from(sweep_y));
        for scan_y in lo..=hi {
            let span = self.grid[(usize::from(sweep_x), usize::from(sweep_y), scan_y)];
            w.write_all(&[span.exists as u8, span.start, span.end])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Corner;

    #[test]
    fn corner_mapping() {
        let values = [
            (0u8, "TL.bin", (0, 0),     false, false),
            (1,   "TR.bin", (256, 0),   true,  false),
            (2,   "BL.bin", (0, 192),   false, true),
            (3,   "BR.bin", (256, 192), true,  true),
        ];
        for &(t, file, anchor, right, bottom) in &values {
            let c = Corner::from_type(t).unwrap();
            assert_eq!(c.type_byte(), t);
            assert_eq!(c.file_name(), file);
            assert_eq!(c.anchor(), anchor);
            assert_eq!(c.is_right(), right);
            assert_eq!(c.is_bottom(), bottom);
        }
        assert!(Corner::from_type(4).is_none());
        assert!(Corner::from_type(255).is_none());
    }

    #[test]
    fn scan_ranges_clamped() {
        assert_eq!(Corner::TopLeft.scan_range(0), (0, 0));
        assert_eq!(Corner::TopLeft.scan_range(100), (0, 100));
        assert_eq!(Corner::TopLeft.scan_range(192), (0, 191));
        assert_eq!(Corner::BottomRight.scan_range(0), (0, 191));
        assert_eq!(Corner::BottomRight.scan_range(100), (100, 191));
        assert_eq!(Corner::BottomRight.scan_range(192), (191, 191));
    }
}
