extern crate nds_interp;

use nds_interp::{Slope, BIAS, MASK, ONE};

#[test]
fn fixed_point_constants() {
    assert_eq!(ONE, 262144);
    assert_eq!(BIAS, 131072);
    assert_eq!(MASK as u32, 0xFFFF_FE00);
}

#[test]
fn diagonal() {
    let slope = Slope::new(0, 0, 64, 64);
    assert!(!slope.is_x_major());
    assert!(!slope.is_negative());
    assert_eq!(slope.dx(), ONE);
    for y in 0..64 {
        assert_eq!(slope.x_start(y), y);
        assert_eq!(slope.x_end(y), y);
    }
}

#[test]
fn x_major_gap() {
    // 69x49 is one of the slopes that show a one-pixel gap on hardware
    let slope = Slope::new(0, 0, 69, 49);
    assert!(slope.is_x_major());
    assert!(!slope.is_negative());
    assert_eq!(slope.dx(), 69 * (ONE / 49));

    let mut gaps = vec![];
    for y in 0..48 {
        assert!(slope.x_start(y) <= slope.x_end(y));
        if slope.x_start(y + 1) > slope.x_end(y) + 1 {
            gaps.push(y);
        }
    }
    assert_eq!(gaps, vec![37]);
}

#[test]
fn y_major_is_single_pixel_per_scanline() {
    let slope = Slope::new(0, 0, 10, 100);
    assert!(!slope.is_x_major());
    let mut last = 0;
    for y in 0..100 {
        let x = slope.x_start(y);
        assert_eq!(x, slope.x_end(y));
        assert!(x >= last);
        last = x;
    }
    assert_eq!(slope.x_start(0), 0);
    assert_eq!(slope.x_end(99), 9);

    let steep = [
        (0, 0, 3, 190),
        (0, 0, 1, 192),
        (40, 20, 90, 170),
        (256, 0, 250, 192),
        (7, 150, 7, 10),
    ];
    for &(x0, y0, x1, y1) in &steep {
        let slope = Slope::new(x0, y0, x1, y1);
        assert!(!slope.is_x_major());
        let (top, bottom) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
        for y in top..bottom {
            assert_eq!(slope.x_start(y), slope.x_end(y));
        }
    }
}

#[test]
fn negative_mirror_of_gap_slope() {
    let pos = Slope::new(0, 0, 69, 49);
    let neg = Slope::new(256, 0, 256 - 69, 49);
    assert!(neg.is_negative());
    assert_eq!(neg.dx(), pos.dx());
    assert_eq!(neg.is_x_major(), pos.is_x_major());

    // A negative span runs right to left; x_end is its leftmost column
    for y in 0..49 {
        assert_eq!(neg.x_end(y), 255 - pos.x_end(y));
        assert_eq!(neg.x_start(y), 255 - pos.x_start(y));
    }

    // The gap lands between the same two scanlines, on the other side
    assert!(pos.x_start(38) > pos.x_end(37) + 1);
    assert!(neg.x_end(37) > neg.x_start(38) + 1);
}

#[test]
fn negative_slopes_mirror_positive() {
    let cases = [(256, 207), (100, 30), (64, 1), (192, 100), (256, 64)];
    for &(n, k) in &cases {
        let pos = Slope::new(0, 0, n, n - k);
        let neg = Slope::new(n, 0, 0, n - k);
        assert_eq!(pos.dx(), neg.dx());
        assert_eq!(pos.is_x_major(), neg.is_x_major());
        for y in 0..(n - k) {
            assert_eq!(neg.x_end(y), n - 1 - pos.x_end(y), "{}x{} y={}", n, n - k, y);
            assert_eq!(neg.x_start(y), n - 1 - pos.x_start(y), "{}x{} y={}", n, n - k, y);
        }
    }
}

#[test]
fn orientation_symmetry() {
    let cases = [
        (0, 0, 69, 49),
        (200, 10, 40, 180),
        (0, 192, 256, 0),
        (13, 7, 13, 100),
        (30, 0, 10, 170),
        (5, 5, 250, 6),
    ];
    for &(x0, y0, x1, y1) in &cases {
        let a = Slope::new(x0, y0, x1, y1);
        let b = Slope::new(x1, y1, x0, y0);
        assert_eq!(a.dx(), b.dx());
        assert_eq!(a.is_x_major(), b.is_x_major());
        assert_eq!(a.is_negative(), b.is_negative());
        let (top, bottom) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
        for y in top..=bottom {
            assert_eq!(a.frac_x_start(y), b.frac_x_start(y));
            assert_eq!(a.frac_x_end(y), b.frac_x_end(y));
        }
    }
}

#[test]
fn x_major_spans_progress_monotonically() {
    let cases = [(69, 49), (256, 192), (200, 3), (100, 99), (256, 2)];
    for &(x1, y1) in &cases {
        let slope = Slope::new(0, 0, x1, y1);
        assert!(slope.is_x_major());
        let step = (x1 + y1 - 1) / y1;
        for y in 0..y1 - 1 {
            assert!(slope.x_start(y + 1) >= slope.x_end(y) - 1, "{}x{} y={}", x1, y1, y);
            assert!(slope.x_start(y + 1) <= slope.x_start(y) + step + 1, "{}x{} y={}", x1, y1, y);
        }
    }
}

#[test]
fn horizontal_edge_is_one_scanline() {
    // The capture tester raises y1 by one before setting up a
    // horizontal edge; the span then covers the whole run at y0
    let slope = Slope::new(10, 50, 200, 51);
    assert!(slope.is_x_major());
    assert_eq!(slope.x_start(50), 10);
    assert_eq!(slope.x_end(50), 199);
}

#[test]
fn setup_is_total_over_screen_endpoints() {
    for x0 in (0..=256).step_by(64) {
        for y0 in (0..=192).step_by(48) {
            for x1 in (0..=256).step_by(16) {
                for y1 in (0..=192).step_by(12) {
                    if x0 == x1 && y0 == y1 {
                        continue;
                    }
                    let slope = Slope::new(x0, y0, x1, y1);
                    assert!(slope.dx() >= 0);
                    let (top, bottom) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
                    for y in top..=bottom {
                        slope.frac_x_start(y);
                        slope.frac_x_end(y);
                        if !slope.is_negative() {
                            assert!(slope.x_start(y) <= slope.x_end(y));
                        } else {
                            assert!(slope.x_start(y) >= slope.x_end(y));
                        }
                    }
                }
            }
        }
    }
}
