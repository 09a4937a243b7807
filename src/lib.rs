//! Nintendo DS 3D slope interpolation - Rust implementation
//!
//! This crate reproduces, bit for bit, the line spans produced by the
//! Nintendo DS 3D rasterizer for a single triangle edge. The hardware
//! interpolates with 32-bit integers carrying 18 fractional bits and
//! computes the X increment per scanline as a reciprocal multiply
//! (`1 / dy * dx`), which loses precision on the division. Together with
//! a mask applied to the low fractional bits of X-major span ends, this
//! produces the characteristic one-pixel gaps seen on hardware for
//! slopes such as 69x49. An ordinary DDA line will not reproduce them;
//! [`Slope`] will.
//!
//! # Interpolating an edge
//!
//!        use nds_interp::Slope;
//!        let slope = Slope::new(0, 0, 69, 49);
//!        assert!(slope.is_x_major());
//!        for y in 0..49 {
//!            let (x0, x1) = (slope.x_start(y), slope.x_end(y));
//!            // x0..=x1 are the lit pixels of scanline y
//!        }
//!
//! # Verifying against hardware captures
//!
//! The DS side of this project sweeps a triangle vertex across the
//! screen from a fixed corner and records the lit span of every
//! scanline into a capture file. [`Capture`] parses those files and
//! [`test_capture`] replays every recorded edge through [`Slope`],
//! reporting any span that disagrees:
//!
//!        use nds_interp::{Capture, test_capture};
//!        match Capture::load("data/TL.bin") {
//!            Ok(cap) => println!("{}", test_capture(&cap)),
//!            Err(e) => eprintln!("{}", e),
//!        }

pub mod slope;
pub mod span;
pub mod capture;
pub mod tester;
pub mod dump;

pub use crate::slope::*;
pub use crate::span::*;
pub use crate::capture::*;
pub use crate::tester::*;

/// Fractional bits carried by the interpolator
pub const FRAC_BITS: u32 = 18;
/// The value 1.0 in fixed point
pub const ONE: i32 = 1 << FRAC_BITS;
/// Half-pixel bias applied to X-major and diagonal slopes
pub const BIAS: i32 = ONE >> 1;
/// Mask clearing the low half of the fractional bits of a span end
pub const MASK: i32 = (!0u32 << (FRAC_BITS / 2)) as i32;

/// Screen width in pixels
pub const WIDTH: i32 = 256;
/// Screen height in pixels
pub const HEIGHT: i32 = 192;
