//! Replays captured edges through the interpolator
//!
//! Every sweep position recorded in a capture corresponds to one edge
//! from the capture's anchor corner to that position. [`test_capture`]
//! rebuilds each edge with [`Slope`] and compares the generated span of
//! every scanline against the captured one. Disagreements are collected
//! rather than aborting; a complete mismatch report is the whole point
//! of the exercise.

use std::fmt;
use std::mem;

use crate::capture::{Capture, Corner};
use crate::slope::Slope;
use crate::span::Span;
use crate::{HEIGHT, ONE, WIDTH};

/// How a generated span disagreed with the captured one
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum MismatchKind {
    /// The capture holds no span on this scanline
    Missing,
    /// The capture holds a span with different columns
    Differs {
        /// Generated start column
        start: i32,
        /// Generated end column
        end: i32,
        cap_start: u8,
        cap_end: u8,
        /// Raw fixed-point start, after the negative-slope swap
        frac_start: i32,
        /// Raw fixed-point end, after the negative-slope swap
        frac_end: i32,
        dx: i32,
    },
}

/// One scanline of one edge where generated and captured spans differ
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Mismatch {
    pub sweep_x: i32,
    pub sweep_y: i32,
    pub y: i32,
    pub kind: MismatchKind,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:3}x{:3} Y={:3}: ", self.sweep_x, self.sweep_y, self.y)?;
        match self.kind {
            MismatchKind::Missing => write!(f, "span doesn't exist"),
            MismatchKind::Differs {
                start, end, cap_start, cap_end, frac_start, frac_end, dx,
            } => write!(
                f,
                "{:3}..{:3}  !=  {:3}..{:3}  ({:+}..{:+})  \
                 raw X = {:10}  lastX = {:10}  masked X = {:10}  lastX = {:10}  inc = {:10}",
                start, end, cap_start, cap_end,
                start - i32::from(cap_start), end - i32::from(cap_end),
                frac_end, frac_start,
                frac_end % ONE, frac_start % ONE,
                dx,
            ),
        }
    }
}

/// Result of replaying every edge of one capture
#[derive(Debug,Clone)]
pub struct TestReport {
    pub corner: Corner,
    /// Number of edges replayed
    pub edges: usize,
    pub mismatches: Vec<Mismatch>,
}

impl TestReport {
    pub fn ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Testing {} slopes... ", self.corner)?;
        if self.ok() {
            write!(f, "OK!")
        } else {
            write!(f, "found mismatch")?;
            for m in &self.mismatches {
                write!(f, "\n{}", m)?;
            }
            Ok(())
        }
    }
}

/// Set up the slope for an anchor-to-sweep edge
///
/// Rasterization always runs top to bottom, and an edge whose
/// endpoints share a Y coordinate behaves as if they were one pixel
/// apart. Returns the slope and the normalized scanline range.
fn edge_slope(anchor_x: i32, anchor_y: i32, sweep_x: i32, sweep_y: i32) -> (Slope, i32, i32) {
    let (mut x0, mut y0) = (anchor_x, anchor_y);
    let (mut x1, mut y1) = (sweep_x, sweep_y);
    if y0 > y1 {
        mem::swap(&mut x0, &mut x1);
        mem::swap(&mut y0, &mut y1);
    }
    if y0 == y1 {
        y1 += 1;
    }
    (Slope::new(x0, y0, x1, y1), y0, y1)
}

/// On-screen spans of one normalized edge, top to bottom
///
/// Yields `(y, start, end, frac_start, frac_end)` per scanline. A
/// negative slope's span is put back in left-to-right order, scanlines
/// starting off screen to the right are skipped and reaching the row
/// below the screen stops the walk.
struct EdgeSpans {
    slope: Slope,
    y: i32,
    y_end: i32,
    done: bool,
}

impl EdgeSpans {
    fn new(slope: Slope, y0: i32, y1: i32) -> Self {
        EdgeSpans { slope, y: y0, y_end: y1, done: false }
    }
}

impl Iterator for EdgeSpans {
    type Item = (i32, i32, i32, i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done && self.y < self.y_end {
            let y = self.y;
            self.y += 1;

            let mut frac_start = self.slope.frac_x_start(y);
            let mut frac_end = self.slope.frac_x_end(y);
            let mut start = self.slope.x_start(y);
            let mut end = self.slope.x_end(y);
            if self.slope.is_negative() {
                mem::swap(&mut frac_start, &mut frac_end);
                mem::swap(&mut start, &mut end);
            }

            // Clipped off screen to the right
            if start >= WIDTH {
                continue;
            }
            // Past the bottom row
            if y == HEIGHT {
                self.done = true;
                return None;
            }
            return Some((y, start, end, frac_start, frac_end));
        }
        None
    }
}

/// Replay every edge recorded in a capture and diff the spans
pub fn test_capture(cap: &Capture) -> TestReport {
    let (anchor_x, anchor_y) = cap.corner.anchor();
    let mut report = TestReport {
        corner: cap.corner,
        edges: 0,
        mismatches: Vec::new(),
    };
    for sweep_y in i32::from(cap.min_y)..=i32::from(cap.max_y) {
        for sweep_x in i32::from(cap.min_x)..=i32::from(cap.max_x) {
            test_edge(cap, sweep_x, sweep_y, anchor_x, anchor_y, &mut report.mismatches);
            report.edges += 1;
        }
    }
    report
}

fn test_edge(
    cap: &Capture,
    sweep_x: i32,
    sweep_y: i32,
    anchor_x: i32,
    anchor_y: i32,
    out: &mut Vec<Mismatch>,
) {
    let (slope, y0, y1) = edge_slope(anchor_x, anchor_y, sweep_x, sweep_y);
    for (y, start, end, frac_start, frac_end) in EdgeSpans::new(slope, y0, y1) {
        let span = cap.grid[(sweep_x as usize, sweep_y as usize, y as usize)];
        if !span.exists {
            out.push(Mismatch { sweep_x, sweep_y, y, kind: MismatchKind::Missing });
        } else if i32::from(span.start) != start || i32::from(span.end) != end {
            out.push(Mismatch {
                sweep_x,
                sweep_y,
                y,
                kind: MismatchKind::Differs {
                    start,
                    end,
                    cap_start: span.start,
                    cap_end: span.end,
                    frac_start,
                    frac_end,
                    dx: slope.dx(),
                },
            });
        }
    }
}

/// Build the capture the interpolator itself predicts for a sweep box
///
/// The on-device generator sweeps a triangle vertex over the screen and
/// records what the rasterizer lit; this records what [`Slope`] says
/// instead. The result exercises the file format and the test loop
/// offline, and replaying it reports zero mismatches by construction.
pub fn synthesize(corner: Corner, min_x: u16, max_x: u16, min_y: u8, max_y: u8) -> Capture {
    let mut cap = Capture::empty(corner, min_x, max_x, min_y, max_y);
    let (anchor_x, anchor_y) = corner.anchor();
    for sweep_y in i32::from(min_y)..=i32::from(max_y) {
        for sweep_x in i32::from(min_x)..=i32::from(max_x) {
            let (slope, y0, y1) = edge_slope(anchor_x, anchor_y, sweep_x, sweep_y);
            for (y, start, end, _, _) in EdgeSpans::new(slope, y0, y1) {
                debug_assert!(0 <= start && start <= end && end <= 255);
                cap.grid[(sweep_x as usize, sweep_y as usize, y as usize)] =
                    Span::new(start as u8, end as u8);
            }
        }
    }
    cap
}
