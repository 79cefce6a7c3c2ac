//! Selection masks and their bounding boxes.
//!
//! Two representations implement [`PixelSet`] (insert, membership, row-major
//! iteration, and union/subtract/intersect across representations):
//! - [`SelectionMask`]: sparse, unbounded set of (x, y) coordinates. This is
//!   what selectors return; coordinates may fall outside the canvas when a
//!   geometric drag leaves it.
//! - [`DenseMask`]: canvas-sized bitmap backed by `ndarray`, used where the
//!   dimensions are known and membership tests dominate (flood fill visited set).

use std::collections::BTreeSet;

use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common set interface over pixel coordinates.
pub trait PixelSet {
    /// Add (x, y). Returns `true` if it was not already present.
    fn insert(&mut self, x: i32, y: i32) -> bool;

    fn contains(&self, x: i32, y: i32) -> bool;

    fn len(&self) -> usize;

    /// Members in row-major order (y, then x).
    fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy into a sparse mask.
    fn to_selection(&self) -> SelectionMask {
        self.pixels().collect()
    }

    /// Members of either set.
    fn union_with<S: PixelSet>(&self, other: &S) -> SelectionMask {
        let mut out = self.to_selection();
        out.extend(other.pixels());
        out
    }

    /// Members of `self` not in `other`.
    fn subtract<S: PixelSet>(&self, other: &S) -> SelectionMask {
        self.pixels()
            .filter(|&(x, y)| !other.contains(x, y))
            .collect()
    }

    /// Members of both sets.
    fn intersect<S: PixelSet>(&self, other: &S) -> SelectionMask {
        self.pixels()
            .filter(|&(x, y)| other.contains(x, y))
            .collect()
    }
}

/// Inclusive bounding box of a non-empty selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x) as u32 + 1
    }

    #[inline]
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y) as u32 + 1
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

// Keys flip the sign bit so that unsigned ordering of the packed value is
// row-major ordering of the signed coordinates.
const SIGN_FLIP: u32 = 0x8000_0000;

#[inline]
fn pack(x: i32, y: i32) -> u64 {
    let ux = (x as u32 ^ SIGN_FLIP) as u64;
    let uy = (y as u32 ^ SIGN_FLIP) as u64;
    (uy << 32) | ux
}

#[inline]
fn unpack(key: u64) -> (i32, i32) {
    let x = ((key as u32) ^ SIGN_FLIP) as i32;
    let y = (((key >> 32) as u32) ^ SIGN_FLIP) as i32;
    (x, y)
}

/// A set of unique pixel coordinates.
///
/// Iteration is always row-major (by y, then x), so two equal masks iterate
/// identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectionMask {
    keys: BTreeSet<u64>,
}

impl SelectionMask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (x, y). Returns `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, x: i32, y: i32) -> bool {
        self.keys.insert(pack(x, y))
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.keys.contains(&pack(x, y))
    }

    /// Number of selected pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Remove (x, y). Returns `true` if it was present.
    pub fn remove(&mut self, x: i32, y: i32) -> bool {
        self.keys.remove(&pack(x, y))
    }

    /// Iterate members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.keys.iter().map(|&k| unpack(k))
    }

    /// Members as a row-major vector.
    pub fn to_vec(&self) -> Vec<(i32, i32)> {
        self.iter().collect()
    }

    /// Smallest inclusive rectangle containing every member.
    pub fn bounds(&self) -> Option<Bounds> {
        calculate_bounds(self)
    }

    pub fn union(&self, other: &SelectionMask) -> SelectionMask {
        SelectionMask {
            keys: self.keys.union(&other.keys).copied().collect(),
        }
    }

    pub fn difference(&self, other: &SelectionMask) -> SelectionMask {
        SelectionMask {
            keys: self.keys.difference(&other.keys).copied().collect(),
        }
    }

    pub fn intersection(&self, other: &SelectionMask) -> SelectionMask {
        SelectionMask {
            keys: self.keys.intersection(&other.keys).copied().collect(),
        }
    }

    pub fn is_subset(&self, other: &SelectionMask) -> bool {
        self.keys.is_subset(&other.keys)
    }

    /// Render as an alpha mask of shape (height, width): 255 = selected, 0 = not.
    ///
    /// Members outside the canvas are dropped.
    pub fn to_alpha(&self, width: usize, height: usize) -> Array2<u8> {
        let mut alpha = Array2::<u8>::zeros((height, width));
        for (x, y) in self.iter() {
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                alpha[[y as usize, x as usize]] = 255;
            }
        }
        alpha
    }

    /// Build a mask from an alpha mask (any non-zero value counts as selected).
    pub fn from_alpha(alpha: &Array2<u8>) -> SelectionMask {
        alpha
            .indexed_iter()
            .filter(|(_, &v)| v > 0)
            .map(|((y, x), _)| (x as i32, y as i32))
            .collect()
    }
}

impl PixelSet for SelectionMask {
    #[inline]
    fn insert(&mut self, x: i32, y: i32) -> bool {
        self.keys.insert(pack(x, y))
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        self.keys.contains(&pack(x, y))
    }

    #[inline]
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.iter()
    }

    fn to_selection(&self) -> SelectionMask {
        self.clone()
    }
}

impl FromIterator<(i32, i32)> for SelectionMask {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        SelectionMask {
            keys: iter.into_iter().map(|(x, y)| pack(x, y)).collect(),
        }
    }
}

impl Extend<(i32, i32)> for SelectionMask {
    fn extend<I: IntoIterator<Item = (i32, i32)>>(&mut self, iter: I) {
        self.keys.extend(iter.into_iter().map(|(x, y)| pack(x, y)));
    }
}

/// Canvas-sized membership bitmap.
///
/// Coordinates outside the canvas are never members; inserting one is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseMask {
    bits: Array2<bool>,
    count: usize,
}

impl DenseMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: Array2::from_elem((height, width), false),
            count: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.bits.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.bits.nrows()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<[usize; 2]> {
        if x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height() {
            Some([y as usize, x as usize])
        } else {
            None
        }
    }
}

impl PixelSet for DenseMask {
    fn insert(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) if !self.bits[idx] => {
                self.bits[idx] = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|idx| self.bits[idx])
    }

    fn len(&self) -> usize {
        self.count
    }

    fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.bits
            .indexed_iter()
            .filter(|(_, &set)| set)
            .map(|((y, x), _)| (x as i32, y as i32))
    }
}

/// Bounding box of any pixel set given as coordinates; `None` when empty.
pub fn calculate_bounds(mask: &SelectionMask) -> Option<Bounds> {
    let mut iter = mask.iter();
    let (x0, y0) = iter.next()?;
    let mut bounds = Bounds {
        min_x: x0,
        max_x: x0,
        min_y: y0,
        max_y: y0,
    };
    for (x, y) in iter {
        bounds.min_x = bounds.min_x.min(x);
        bounds.max_x = bounds.max_x.max(x);
        bounds.min_y = bounds.min_y.min(y);
        bounds.max_y = bounds.max_y.max(y);
    }
    Some(bounds)
}
