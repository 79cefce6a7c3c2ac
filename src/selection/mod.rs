//! Selection algorithms for pixel editing.
//!
//! This module provides the selection engine:
//! - **Magic wand**: Flood fill (contiguous) and global color/tolerance selection
//! - **Shapes**: Rectangle and ellipse/circle regions from a drag
//! - **Ops**: Union, subtract, intersect, expand, contract, smart expand
//! - **Brush**: Cached square/circle brush offsets
//! - **Drag**: Gesture state machine driving the shape selectors
//!
//! Every selector reads an immutable [`PixelBuffer`] and returns a fresh
//! [`SelectionMask`]; nothing is mutated in place.

pub mod brush;
pub mod buffer;
pub mod color;
pub mod drag;
pub mod magic_wand;
pub mod mask;
pub mod ops;
pub mod shapes;

pub use brush::{brush_offsets, brush_stamp, BrushShape};
pub use buffer::PixelBuffer;
pub use color::{color_distance, Color};
pub use drag::{DragController, DragState, SelectionToolVariant};
pub use magic_wand::{magic_wand_select, MagicWandOptions, MagicWandResult};
pub use mask::{calculate_bounds, Bounds, DenseMask, PixelSet, SelectionMask};
pub use ops::SelectionMode;
pub use shapes::{
    circle_select, ellipse_select, rectangle_select, EllipseOptions, OutlineStyle, RectangleOptions,
};
