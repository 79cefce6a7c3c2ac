//! WebAssembly exports for the selection engine.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Mask Format
//!
//! Selections cross the boundary as flat alpha masks of length
//! width * height (255 = selected, 0 = not), the same layout the overlay
//! renderer consumes. Off-canvas pixels are dropped.

use wasm_bindgen::prelude::*;

use crate::selection::brush::{brush_offsets, BrushShape};
use crate::selection::buffer::PixelBuffer;
use crate::selection::drag::{DragController, SelectionToolVariant};
use crate::selection::magic_wand::{magic_wand_select, MagicWandOptions};
use crate::selection::mask::SelectionMask;
use crate::selection::shapes::{ellipse_select, rectangle_select, EllipseOptions, RectangleOptions};

fn to_alpha_vec(mask: &SelectionMask, width: usize, height: usize) -> Vec<u8> {
    mask.to_alpha(width, height).into_raw_vec_and_offset().0
}

fn parse_tool(name: &str) -> Result<SelectionToolVariant, JsError> {
    match name {
        "magic-wand" => Ok(SelectionToolVariant::MagicWand),
        "rectangle" => Ok(SelectionToolVariant::Rectangle),
        "circle" => Ok(SelectionToolVariant::Circle),
        other => Err(JsError::new(&format!("unknown selection tool '{other}'"))),
    }
}

// ============================================================================
// Magic Wand
// ============================================================================

/// Magic wand selection.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `x`, `y` - Seed coordinate
/// * `tolerance` - Color tolerance (0-100)
/// * `contiguous` - Restrict to pixels connected to the seed
///
/// # Returns
/// Flat alpha mask (length = width * height)
#[wasm_bindgen]
pub fn magic_wand_select_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    tolerance: f64,
    contiguous: bool,
) -> Result<Vec<u8>, JsError> {
    let buffer = PixelBuffer::new(data, width, height)?;
    let options = MagicWandOptions::new(tolerance, contiguous);
    let result = magic_wand_select(&buffer, x, y, &options);
    Ok(to_alpha_vec(&result.mask, width, height))
}

// ============================================================================
// Geometric Selectors
// ============================================================================

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn rectangle_select_wasm(
    width: usize,
    height: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    constrain_square: bool,
    from_center: bool,
) -> Vec<u8> {
    let options = RectangleOptions {
        constrain_square,
        from_center,
    };
    to_alpha_vec(&rectangle_select(x0, y0, x1, y1, &options), width, height)
}

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn ellipse_select_wasm(
    width: usize,
    height: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    constrain_circle: bool,
    from_center: bool,
    filled: bool,
) -> Vec<u8> {
    let options = EllipseOptions {
        constrain_circle,
        from_center,
        filled,
        ..EllipseOptions::default()
    };
    to_alpha_vec(&ellipse_select(x0, y0, x1, y1, &options), width, height)
}

// ============================================================================
// Brushes
// ============================================================================

/// Brush offsets flattened as [dx0, dy0, dx1, dy1, ...].
#[wasm_bindgen]
pub fn brush_offsets_wasm(size: u32, circle: bool) -> Vec<i32> {
    let shape = if circle { BrushShape::Circle } else { BrushShape::Square };
    brush_offsets(size, shape)
        .iter()
        .flat_map(|&(dx, dy)| [dx, dy])
        .collect()
}

// ============================================================================
// Drag Gestures
// ============================================================================

/// Drag controller bound to a canvas size.
#[wasm_bindgen]
pub struct SelectionDrag {
    inner: DragController,
    width: usize,
    height: usize,
}

#[wasm_bindgen]
impl SelectionDrag {
    /// `tool` is "rectangle", "circle" or "magic-wand".
    #[wasm_bindgen(constructor)]
    pub fn new(tool: &str, width: usize, height: usize) -> Result<SelectionDrag, JsError> {
        Ok(SelectionDrag {
            inner: DragController::new(parse_tool(tool)?),
            width,
            height,
        })
    }

    pub fn start(&mut self, x: i32, y: i32, shift: bool, alt: bool) -> bool {
        self.inner.start(x, y, shift, alt)
    }

    pub fn update(&mut self, x: i32, y: i32) -> bool {
        self.inner.update(x, y)
    }

    /// Alpha mask of the finished gesture, or undefined if none was active.
    pub fn end(&mut self) -> Option<Vec<u8>> {
        self.inner
            .end()
            .map(|mask| to_alpha_vec(&mask, self.width, self.height))
    }

    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }
}
