//! Selection set algebra and morphology.
//!
//! Every operation is pure: inputs are borrowed and a new mask is returned.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::brush::{brush_offsets, BrushShape};
use super::buffer::PixelBuffer;
use super::color::{average_color, color_matches};
use super::magic_wand::NEIGHBORS_4;
use super::mask::SelectionMask;

/// How a freshly computed selection combines with the existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectionMode {
    #[default]
    Replace,
    Add,
    Subtract,
    Intersect,
}

impl SelectionMode {
    /// Editor convention: Shift adds, Alt subtracts, both intersect.
    pub fn from_modifiers(shift: bool, alt: bool) -> Self {
        match (shift, alt) {
            (true, true) => SelectionMode::Intersect,
            (true, false) => SelectionMode::Add,
            (false, true) => SelectionMode::Subtract,
            (false, false) => SelectionMode::Replace,
        }
    }

    pub fn apply(self, existing: &SelectionMask, new: &SelectionMask) -> SelectionMask {
        match self {
            SelectionMode::Replace => new.clone(),
            SelectionMode::Add => union(existing, new),
            SelectionMode::Subtract => subtract(existing, new),
            SelectionMode::Intersect => intersect(existing, new),
        }
    }
}

#[inline]
fn on_canvas(x: i32, y: i32, width: usize, height: usize) -> bool {
    x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height
}

pub fn union(a: &SelectionMask, b: &SelectionMask) -> SelectionMask {
    a.union(b)
}

/// Members of `a` that are not in `b`.
pub fn subtract(a: &SelectionMask, b: &SelectionMask) -> SelectionMask {
    a.difference(b)
}

pub fn intersect(a: &SelectionMask, b: &SelectionMask) -> SelectionMask {
    a.intersection(b)
}

/// Grow by one pixel: add every on-canvas 4-neighbor of every member.
pub fn expand(mask: &SelectionMask, width: usize, height: usize) -> SelectionMask {
    let mut result = mask.clone();
    for (x, y) in mask.iter() {
        for (dx, dy) in NEIGHBORS_4 {
            let (nx, ny) = (x + dx, y + dy);
            if on_canvas(nx, ny, width, height) {
                result.insert(nx, ny);
            }
        }
    }
    result
}

/// Shrink by one pixel: keep members whose 4-neighbors are all selected.
///
/// Neighbors outside the canvas count as selected, so a selection touching
/// the canvas edge does not erode along it.
pub fn contract(mask: &SelectionMask, width: usize, height: usize) -> SelectionMask {
    mask.iter()
        .filter(|&(x, y)| {
            NEIGHBORS_4.iter().all(|&(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                !on_canvas(nx, ny, width, height) || mask.contains(nx, ny)
            })
        })
        .collect()
}

/// Grow by stamping a brush at every member, keeping on-canvas pixels.
pub fn expand_with_brush(
    mask: &SelectionMask,
    width: usize,
    height: usize,
    size: u32,
    shape: BrushShape,
) -> SelectionMask {
    let offsets = brush_offsets(size, shape);
    let mut result = mask.clone();
    for (x, y) in mask.iter() {
        for &(dx, dy) in offsets.iter() {
            let (nx, ny) = (x + dx, y + dy);
            if on_canvas(nx, ny, width, height) {
                result.insert(nx, ny);
            }
        }
    }
    result
}

/// Color-aware grow: absorb the ring of neighboring pixels whose color is
/// within `tolerance` of the selection's average color.
///
/// Only one ring is considered per call. Members outside the canvas do not
/// contribute to the average. An empty (or fully off-canvas) mask is returned
/// unchanged.
pub fn smart_expand(
    mask: &SelectionMask,
    buffer: &PixelBuffer<'_>,
    tolerance: f64,
) -> SelectionMask {
    let Some(average) = average_color(mask.iter().filter_map(|(x, y)| buffer.get(x, y))) else {
        return mask.clone();
    };

    let mut result = mask.clone();
    for (x, y) in mask.iter() {
        for (dx, dy) in NEIGHBORS_4 {
            let (nx, ny) = (x + dx, y + dy);
            if mask.contains(nx, ny) {
                continue;
            }
            if let Some(color) = buffer.get(nx, ny) {
                if color_matches(color, average, tolerance) {
                    result.insert(nx, ny);
                }
            }
        }
    }
    result
}

/// Every on-canvas pixel not in `mask`.
pub fn invert(mask: &SelectionMask, width: usize, height: usize) -> SelectionMask {
    let mut result = SelectionMask::new();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if !mask.contains(x, y) {
                result.insert(x, y);
            }
        }
    }
    result
}

/// The whole canvas.
pub fn select_all(width: usize, height: usize) -> SelectionMask {
    invert(&SelectionMask::new(), width, height)
}

/// Drop members outside the canvas.
pub fn clip(mask: &SelectionMask, width: usize, height: usize) -> SelectionMask {
    mask.iter()
        .filter(|&(x, y)| on_canvas(x, y, width, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::color::Color;
    use pretty_assertions::assert_eq;

    fn mask_of(points: &[(i32, i32)]) -> SelectionMask {
        points.iter().copied().collect()
    }

    #[test]
    fn test_idempotent_algebra() {
        let a = mask_of(&[(0, 0), (1, 2), (5, 5)]);
        assert_eq!(union(&a, &a), a);
        assert_eq!(intersect(&a, &a), a);
        assert!(subtract(&a, &a).is_empty());
    }

    #[test]
    fn test_algebra_leaves_inputs_untouched() {
        let a = mask_of(&[(0, 0), (1, 0)]);
        let b = mask_of(&[(1, 0), (2, 0)]);
        let (a_before, b_before) = (a.clone(), b.clone());

        assert_eq!(union(&a, &b).to_vec(), vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(subtract(&a, &b).to_vec(), vec![(0, 0)]);
        assert_eq!(intersect(&a, &b).to_vec(), vec![(1, 0)]);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_expand_single_pixel() {
        let grown = expand(&mask_of(&[(2, 2)]), 5, 5);
        assert_eq!(grown.to_vec(), vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);
    }

    #[test]
    fn test_expand_clips_to_canvas() {
        let grown = expand(&mask_of(&[(0, 0)]), 5, 5);
        assert_eq!(grown.to_vec(), vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_contract_single_pixel_vanishes() {
        assert!(contract(&mask_of(&[(2, 2)]), 5, 5).is_empty());
    }

    #[test]
    fn test_contract_full_canvas_unchanged() {
        let full = select_all(4, 3);
        assert_eq!(contract(&full, 4, 3), full);
    }

    #[test]
    fn test_contract_undoes_expand_inside() {
        let a = mask_of(&[(3, 3), (4, 3), (6, 5)]);
        let round_trip = contract(&expand(&a, 10, 10), 10, 10);
        assert!(a.is_subset(&round_trip));
    }

    #[test]
    fn test_contract_block() {
        let block: SelectionMask = (1..=3).flat_map(|y| (1..=3).map(move |x| (x, y))).collect();
        assert_eq!(contract(&block, 10, 10).to_vec(), vec![(2, 2)]);
    }

    #[test]
    fn test_expand_with_square_brush() {
        let grown = expand_with_brush(&mask_of(&[(5, 5)]), 10, 10, 3, BrushShape::Square);
        assert_eq!(grown.len(), 9);
        assert_eq!(
            grown.bounds().map(|b| (b.min_x, b.max_x, b.min_y, b.max_y)),
            Some((4, 6, 4, 6))
        );
    }

    #[test]
    fn test_expand_with_brush_clips() {
        let grown = expand_with_brush(&mask_of(&[(0, 0)]), 10, 10, 3, BrushShape::Square);
        assert_eq!(grown.to_vec(), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_smart_expand_absorbs_similar_ring() {
        // 5x1 row: two near-identical reds, then a close red, then blue
        let row = [
            [200u8, 0, 0, 255],
            [200, 0, 0, 255],
            [205, 0, 0, 255],
            [0, 0, 255, 255],
            [200, 0, 0, 255],
        ];
        let image: Vec<u8> = row.iter().flatten().copied().collect();
        let buffer = PixelBuffer::new(&image, 5, 1).unwrap();
        let mask = mask_of(&[(0, 0), (1, 0)]);

        let grown = smart_expand(&mask, &buffer, 5.0);
        assert_eq!(grown.to_vec(), vec![(0, 0), (1, 0), (2, 0)]);

        // Only one ring per call, so (4, 0) is still out of reach
        let again = smart_expand(&grown, &buffer, 5.0);
        assert!(!again.contains(4, 0));
        assert!(!again.contains(3, 0));
    }

    #[test]
    fn test_smart_expand_uses_average() {
        // Members average to (100, 0, 0); neighbor at 150 is ~9.8% away
        let row = [[50u8, 0, 0, 255], [150, 0, 0, 255], [150, 0, 0, 255]];
        let image: Vec<u8> = row.iter().flatten().copied().collect();
        let buffer = PixelBuffer::new(&image, 3, 1).unwrap();
        let mask = mask_of(&[(0, 0), (1, 0)]);

        assert!(smart_expand(&mask, &buffer, 10.0).contains(2, 0));
        assert!(!smart_expand(&mask, &buffer, 9.0).contains(2, 0));
        assert_eq!(
            average_color([Color::new(50, 0, 0, 255), Color::new(150, 0, 0, 255)]),
            Some(Color::new(100, 0, 0, 255))
        );
    }

    #[test]
    fn test_smart_expand_empty() {
        let image = vec![0u8; 4 * 4];
        let buffer = PixelBuffer::new(&image, 2, 2).unwrap();
        assert!(smart_expand(&SelectionMask::new(), &buffer, 50.0).is_empty());
    }

    #[test]
    fn test_invert_and_select_all() {
        let a = mask_of(&[(0, 0), (1, 1)]);
        let inv = invert(&a, 2, 2);
        assert_eq!(inv.to_vec(), vec![(1, 0), (0, 1)]);
        assert_eq!(union(&a, &inv), select_all(2, 2));
        assert_eq!(select_all(3, 2).len(), 6);
    }

    #[test]
    fn test_clip() {
        let a = mask_of(&[(-1, 0), (0, 0), (2, 2), (1, 1)]);
        assert_eq!(clip(&a, 2, 2).to_vec(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_selection_modes() {
        let existing = mask_of(&[(0, 0), (1, 0)]);
        let new = mask_of(&[(1, 0), (2, 0)]);

        assert_eq!(SelectionMode::from_modifiers(false, false).apply(&existing, &new), new);
        assert_eq!(SelectionMode::from_modifiers(true, false).apply(&existing, &new).len(), 3);
        assert_eq!(
            SelectionMode::from_modifiers(false, true).apply(&existing, &new).to_vec(),
            vec![(0, 0)]
        );
        assert_eq!(
            SelectionMode::from_modifiers(true, true).apply(&existing, &new).to_vec(),
            vec![(1, 0)]
        );
    }
}
