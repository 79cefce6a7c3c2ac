//! Geometric selectors: rectangle and ellipse/circle regions from a drag.
//!
//! Coordinates are canvas pixel positions. Results are not clipped to any
//! canvas; use [`crate::selection::ops::clip`] when the drag may leave it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::mask::SelectionMask;

/// Width of the outline band in [`OutlineStyle::Band`], in radius units.
const OUTLINE_THICKNESS: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RectangleOptions {
    /// Force a square using the larger drag extent
    pub constrain_square: bool,
    /// Treat the drag start as the center
    pub from_center: bool,
}

/// How an unfilled ellipse is traced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutlineStyle {
    /// Pixels whose normalized squared distance lies in [1 - 1/rx, 1].
    ///
    /// Thickness varies at high eccentricity; kept as-is because existing
    /// selections depend on this shape.
    #[default]
    Band,
    /// Single-pixel outline from the midpoint ellipse algorithm.
    Midpoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EllipseOptions {
    /// Force a circle using the larger radius
    pub constrain_circle: bool,
    /// Treat the drag start as the center
    pub from_center: bool,
    pub filled: bool,
    /// Outline tracing when `filled` is false
    pub outline: OutlineStyle,
}

impl Default for EllipseOptions {
    fn default() -> Self {
        Self {
            constrain_circle: false,
            from_center: false,
            filled: true,
            outline: OutlineStyle::Band,
        }
    }
}

/// Drag direction of one axis, with zero counting as positive.
#[inline]
fn direction(delta: f64) -> f64 {
    if delta < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Push the end point out so both extents equal the larger one, keeping the
/// drag direction on each axis.
fn square_up(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> (f64, f64) {
    let dx = end_x - start_x;
    let dy = end_y - start_y;
    let size = dx.abs().max(dy.abs());
    (start_x + size * direction(dx), start_y + size * direction(dy))
}

/// Select every integer coordinate in the rectangle spanned by a drag.
///
/// A zero-size drag selects one pixel.
pub fn rectangle_select(
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    options: &RectangleOptions,
) -> SelectionMask {
    let (end_x, end_y) = if options.constrain_square {
        square_up(start_x, start_y, end_x, end_y)
    } else {
        (end_x, end_y)
    };

    let (x1, y1, x2, y2) = if options.from_center {
        let half_w = (end_x - start_x).abs();
        let half_h = (end_y - start_y).abs();
        (start_x - half_w, start_y - half_h, start_x + half_w, start_y + half_h)
    } else {
        (start_x, start_y, end_x, end_y)
    };

    let min_x = x1.min(x2).floor() as i32;
    let max_x = x1.max(x2).ceil() as i32;
    let min_y = y1.min(y2).floor() as i32;
    let max_y = y1.max(y2).ceil() as i32;

    let mut mask = SelectionMask::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            mask.insert(x, y);
        }
    }
    mask
}

/// Select an ellipse (or circle) spanned by a drag.
///
/// Without `from_center` the drag spans the bounding box; with it the start is
/// the center and the drag extent is the radius on each axis.
pub fn ellipse_select(
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    options: &EllipseOptions,
) -> SelectionMask {
    let (cx, cy, mut rx, mut ry) = if options.from_center {
        (start_x, start_y, (end_x - start_x).abs(), (end_y - start_y).abs())
    } else {
        let (end_x, end_y) = if options.constrain_circle {
            square_up(start_x, start_y, end_x, end_y)
        } else {
            (end_x, end_y)
        };
        (
            (start_x + end_x) / 2.0,
            (start_y + end_y) / 2.0,
            (end_x - start_x).abs() / 2.0,
            (end_y - start_y).abs() / 2.0,
        )
    };

    if options.constrain_circle {
        let r = rx.max(ry);
        rx = r;
        ry = r;
    }

    if !options.filled && options.outline == OutlineStyle::Midpoint {
        return midpoint_ellipse_outline(
            cx.round() as i32,
            cy.round() as i32,
            rx.round() as i32,
            ry.round() as i32,
        );
    }

    scan_ellipse(cx, cy, rx, ry, options.filled)
}

/// Convenience for circle tools: [`ellipse_select`] with `constrain_circle` set.
pub fn circle_select(
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    from_center: bool,
    filled: bool,
) -> SelectionMask {
    let options = EllipseOptions {
        constrain_circle: true,
        from_center,
        filled,
        ..EllipseOptions::default()
    };
    ellipse_select(start_x, start_y, end_x, end_y, &options)
}

/// Scan the bounding box testing the normalized ellipse equation.
fn scan_ellipse(cx: f64, cy: f64, rx: f64, ry: f64, filled: bool) -> SelectionMask {
    // Zero radii would divide by zero
    let rx_div = if rx == 0.0 { 1.0 } else { rx };
    let ry_div = if ry == 0.0 { 1.0 } else { ry };
    let inner = 1.0 - OUTLINE_THICKNESS / rx_div;

    let min_x = (cx - rx).floor() as i32;
    let max_x = (cx + rx).ceil() as i32;
    let min_y = (cy - ry).floor() as i32;
    let max_y = (cy + ry).ceil() as i32;

    let mut mask = SelectionMask::new();
    for y in min_y..=max_y {
        let ny = (y as f64 - cy) / ry_div;
        for x in min_x..=max_x {
            let nx = (x as f64 - cx) / rx_div;
            let d = nx * nx + ny * ny;
            let inside = if filled { d <= 1.0 } else { d >= inner && d <= 1.0 };
            if inside {
                mask.insert(x, y);
            }
        }
    }
    mask
}

/// Single-pixel ellipse outline using the midpoint algorithm.
///
/// Degenerate radii collapse to a line (or the center pixel).
pub fn midpoint_ellipse_outline(cx: i32, cy: i32, rx: i32, ry: i32) -> SelectionMask {
    let mut mask = SelectionMask::new();
    let rx = rx.max(0) as i64;
    let ry = ry.max(0) as i64;
    let (cx, cy) = (cx as i64, cy as i64);

    if rx == 0 || ry == 0 {
        for y in -ry..=ry {
            for x in -rx..=rx {
                mask.insert((cx + x) as i32, (cy + y) as i32);
            }
        }
        return mask;
    }

    let mut plot = |x: i64, y: i64| {
        mask.insert((cx + x) as i32, (cy + y) as i32);
        mask.insert((cx - x) as i32, (cy + y) as i32);
        mask.insert((cx + x) as i32, (cy - y) as i32);
        mask.insert((cx - x) as i32, (cy - y) as i32);
    };

    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let mut x = 0i64;
    let mut y = ry;
    let mut dx = 0i64;
    let mut dy = 2 * rx_sq * y;

    // Region 1: slope magnitude below 1
    let mut p1 = ry_sq - rx_sq * ry + rx_sq / 4;
    while dx < dy {
        plot(x, y);
        x += 1;
        dx += 2 * ry_sq;
        if p1 < 0 {
            p1 += dx + ry_sq;
        } else {
            y -= 1;
            dy -= 2 * rx_sq;
            p1 += dx - dy + ry_sq;
        }
    }

    // Region 2: slope magnitude above 1
    let mut p2 = ry_sq * (2 * x + 1) * (2 * x + 1) / 4 + rx_sq * (y - 1) * (y - 1) - rx_sq * ry_sq;
    while y >= 0 {
        plot(x, y);
        y -= 1;
        dy -= 2 * rx_sq;
        if p2 > 0 {
            p2 += rx_sq - dy;
        } else {
            x += 1;
            dx += 2 * ry_sq;
            p2 += dx - dy + rx_sq;
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::mask::Bounds;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rectangle_basic() {
        let mask = rectangle_select(2.0, 2.0, 5.0, 5.0, &RectangleOptions::default());
        assert_eq!(mask.len(), 16);
        for y in 2..=5 {
            for x in 2..=5 {
                assert!(mask.contains(x, y));
            }
        }
    }

    #[test]
    fn test_rectangle_reverse_drag() {
        let forward = rectangle_select(1.0, 1.0, 4.0, 3.0, &RectangleOptions::default());
        let backward = rectangle_select(4.0, 3.0, 1.0, 1.0, &RectangleOptions::default());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_rectangle_zero_size() {
        let mask = rectangle_select(7.0, 3.0, 7.0, 3.0, &RectangleOptions::default());
        assert_eq!(mask.to_vec(), vec![(7, 3)]);
    }

    #[test]
    fn test_rectangle_square_keeps_direction() {
        let opts = RectangleOptions {
            constrain_square: true,
            from_center: false,
        };
        // Drag up-left, wider than tall
        let mask = rectangle_select(10.0, 10.0, 6.0, 8.0, &opts);
        assert_eq!(
            mask.bounds(),
            Some(Bounds {
                min_x: 6,
                max_x: 10,
                min_y: 6,
                max_y: 10
            })
        );
    }

    #[test]
    fn test_rectangle_from_center() {
        let opts = RectangleOptions {
            constrain_square: false,
            from_center: true,
        };
        let mask = rectangle_select(5.0, 5.0, 7.0, 6.0, &opts);
        assert_eq!(
            mask.bounds(),
            Some(Bounds {
                min_x: 3,
                max_x: 7,
                min_y: 4,
                max_y: 6
            })
        );
        assert_eq!(mask.len(), 15);
    }

    #[test]
    fn test_rectangle_square_from_center() {
        let opts = RectangleOptions {
            constrain_square: true,
            from_center: true,
        };
        // Larger extent (2) becomes the half-size on both axes
        let mask = rectangle_select(5.0, 5.0, 7.0, 6.0, &opts);
        assert_eq!(
            mask.bounds(),
            Some(Bounds {
                min_x: 3,
                max_x: 7,
                min_y: 3,
                max_y: 7
            })
        );
        assert_eq!(mask.len(), 25);

        let reversed = rectangle_select(5.0, 5.0, 4.0, 8.0, &opts);
        assert_eq!(
            reversed.bounds(),
            Some(Bounds {
                min_x: 2,
                max_x: 8,
                min_y: 2,
                max_y: 8
            })
        );
        assert_eq!(reversed.len(), 49);
    }

    #[test]
    fn test_rectangle_fractional_expands_outward() {
        let mask = rectangle_select(1.2, 1.7, 2.5, 2.1, &RectangleOptions::default());
        assert_eq!(
            mask.bounds(),
            Some(Bounds {
                min_x: 1,
                max_x: 3,
                min_y: 1,
                max_y: 3
            })
        );
    }

    #[test]
    fn test_circle_from_center() {
        let opts = EllipseOptions {
            constrain_circle: true,
            from_center: true,
            filled: true,
            ..EllipseOptions::default()
        };
        let mask = ellipse_select(5.0, 5.0, 8.0, 5.0, &opts);

        assert!(mask.contains(5, 5));
        assert!(mask.contains(8, 5));
        assert!(!mask.contains(9, 5));
        // Radius 3 vertically as well
        assert!(mask.contains(5, 2));
        assert!(mask.contains(5, 8));
        assert!(!mask.contains(5, 9));
        assert_eq!(
            mask.bounds(),
            Some(Bounds {
                min_x: 2,
                max_x: 8,
                min_y: 2,
                max_y: 8
            })
        );
    }

    #[test]
    fn test_circle_from_corner_squares_the_box() {
        let opts = EllipseOptions {
            constrain_circle: true,
            from_center: false,
            ..EllipseOptions::default()
        };
        // (0,0)->(8,2) squares up to (8,8): center (4,4), radius 4
        let mask = ellipse_select(0.0, 0.0, 8.0, 2.0, &opts);
        assert_eq!(
            mask.bounds(),
            Some(Bounds {
                min_x: 0,
                max_x: 8,
                min_y: 0,
                max_y: 8
            })
        );
        assert!(mask.contains(4, 4));
        assert!(mask.contains(4, 0));
        assert!(mask.contains(0, 4));
        assert!(mask.contains(8, 4));
        assert!(mask.contains(4, 8));
        assert!(!mask.contains(0, 0));
        assert!(!mask.contains(8, 8));

        // Dragging up-left squares toward the origin instead
        let reversed = ellipse_select(8.0, 8.0, 0.0, 6.0, &opts);
        assert_eq!(reversed, mask);
    }

    #[test]
    fn test_circle_helper_matches_options() {
        let a = circle_select(5.0, 5.0, 8.0, 5.0, true, true);
        let b = ellipse_select(
            5.0,
            5.0,
            8.0,
            5.0,
            &EllipseOptions {
                constrain_circle: true,
                from_center: true,
                filled: true,
                outline: OutlineStyle::Band,
            },
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_ellipse_bounding_box_drag() {
        let mask = ellipse_select(0.0, 0.0, 8.0, 4.0, &EllipseOptions::default());
        // Center (4, 2), radii (4, 2)
        assert!(mask.contains(4, 2));
        assert!(mask.contains(0, 2));
        assert!(mask.contains(8, 2));
        assert!(mask.contains(4, 0));
        assert!(!mask.contains(0, 0));
        assert!(!mask.contains(8, 4));
    }

    #[test]
    fn test_ellipse_zero_size_is_one_pixel() {
        let opts = EllipseOptions {
            from_center: true,
            ..EllipseOptions::default()
        };
        let mask = ellipse_select(3.0, 4.0, 3.0, 4.0, &opts);
        assert_eq!(mask.to_vec(), vec![(3, 4)]);
    }

    #[test]
    fn test_ellipse_flat_drag_is_a_line() {
        let opts = EllipseOptions {
            from_center: true,
            ..EllipseOptions::default()
        };
        let mask = ellipse_select(5.0, 5.0, 7.0, 5.0, &opts);
        assert_eq!(mask.to_vec(), vec![(3, 5), (4, 5), (5, 5), (6, 5), (7, 5)]);
    }

    #[test]
    fn test_band_outline_is_subset_of_fill() {
        let base = EllipseOptions {
            constrain_circle: true,
            from_center: true,
            filled: true,
            outline: OutlineStyle::Band,
        };
        let filled = ellipse_select(10.0, 10.0, 16.0, 10.0, &base);
        let outline_opts = EllipseOptions {
            filled: false,
            ..base
        };
        let outline = ellipse_select(10.0, 10.0, 16.0, 10.0, &outline_opts);

        assert!(outline.is_subset(&filled));
        assert!(!outline.contains(10, 10));
        assert!(outline.contains(16, 10));
        assert!(outline.contains(10, 4));
        assert!(outline.len() < filled.len());
    }

    #[test]
    fn test_midpoint_outline() {
        let mask = midpoint_ellipse_outline(0, 0, 3, 3);

        assert!(mask.contains(3, 0));
        assert!(mask.contains(-3, 0));
        assert!(mask.contains(0, 3));
        assert!(mask.contains(0, -3));
        assert!(!mask.contains(0, 0));
        // Symmetric in both axes
        for (x, y) in mask.iter() {
            assert!(mask.contains(-x, y));
            assert!(mask.contains(x, -y));
        }
    }

    #[test]
    fn test_midpoint_outline_via_options() {
        let opts = EllipseOptions {
            constrain_circle: false,
            from_center: true,
            filled: false,
            outline: OutlineStyle::Midpoint,
        };
        let mask = ellipse_select(4.0, 4.0, 8.0, 6.0, &opts);
        assert_eq!(mask, midpoint_ellipse_outline(4, 4, 4, 2));
    }

    #[test]
    fn test_midpoint_degenerate() {
        assert_eq!(midpoint_ellipse_outline(2, 2, 0, 0).to_vec(), vec![(2, 2)]);
        assert_eq!(midpoint_ellipse_outline(2, 2, 1, 0).len(), 3);
    }
}
