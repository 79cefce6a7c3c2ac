//! Pixel Selection Engine
//!
//! Selection algorithms for a raster pixel editor, implemented in Rust
//! with optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Selectors read RGBA8 buffers (4 bytes per pixel, row-major), either as a
//! flat slice with explicit width/height or as an ndarray of shape
//! (height, width, 4).
//!
//! ## Selections
//! A selection is a set of pixel coordinates ([`SelectionMask`]). It can be
//! rendered to an alpha mask (255 = selected, 0 = not) for overlays and
//! bindings. All selectors are total: invalid seeds or degenerate drags give
//! well-defined empty or one-pixel results. The only errors come from wrapping
//! pixel data: a length that does not match the dimensions, dimensions too
//! large to address, or a non-RGBA image.

pub mod error;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, SelectionError};
pub use selection::{
    Bounds, BrushShape, Color, DragController, MagicWandOptions, MagicWandResult, PixelBuffer,
    SelectionMask, SelectionToolVariant,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::SelectionError;
    use crate::selection::brush::{brush_offsets as brush_offsets_impl, BrushShape};
    use crate::selection::buffer::PixelBuffer;
    use crate::selection::magic_wand::{magic_wand_select as magic_wand_impl, MagicWandOptions};
    use crate::selection::shapes::{self, EllipseOptions, RectangleOptions};

    type PyBounds = Option<(i32, i32, i32, i32)>;

    fn value_error(err: SelectionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn parse_shape(shape: &str) -> PyResult<BrushShape> {
        match shape {
            "square" => Ok(BrushShape::Square),
            "circle" => Ok(BrushShape::Circle),
            other => Err(PyValueError::new_err(format!("unknown brush shape '{other}'"))),
        }
    }

    // ========================================================================
    // Magic Wand
    // ========================================================================

    /// Select pixels similar to the seed color.
    ///
    /// # Arguments
    /// * `image` - RGBA u8 image (height, width, 4)
    /// * `x`, `y` - Seed coordinate
    /// * `tolerance` - 0-100
    /// * `contiguous` - Restrict to pixels connected to the seed
    ///
    /// # Returns
    /// (alpha mask (height, width), bounds (min_x, max_x, min_y, max_y) or None, pixel count)
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance=32.0, contiguous=true))]
    pub fn magic_wand<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        x: i32,
        y: i32,
        tolerance: f64,
        contiguous: bool,
    ) -> PyResult<(Bound<'py, PyArray2<u8>>, PyBounds, usize)> {
        let view = image.as_array();
        let buffer = PixelBuffer::from_array(&view).map_err(value_error)?;
        let options = MagicWandOptions::new(tolerance, contiguous);
        let result = magic_wand_impl(&buffer, x, y, &options);

        let alpha = result.mask.to_alpha(buffer.width(), buffer.height());
        let bounds = result.bounds.map(|b| (b.min_x, b.max_x, b.min_y, b.max_y));
        Ok((alpha.into_pyarray(py), bounds, result.pixel_count))
    }

    // ========================================================================
    // Geometric Selectors
    // ========================================================================

    /// Rectangle selection rendered onto a (height, width) alpha mask.
    #[pyfunction]
    #[pyo3(signature = (width, height, x0, y0, x1, y1, constrain_square=false, from_center=false))]
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_select<'py>(
        py: Python<'py>,
        width: usize,
        height: usize,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        constrain_square: bool,
        from_center: bool,
    ) -> Bound<'py, PyArray2<u8>> {
        let options = RectangleOptions {
            constrain_square,
            from_center,
        };
        let mask = shapes::rectangle_select(x0, y0, x1, y1, &options);
        mask.to_alpha(width, height).into_pyarray(py)
    }

    /// Ellipse selection rendered onto a (height, width) alpha mask.
    #[pyfunction]
    #[pyo3(signature = (
        width, height, x0, y0, x1, y1, constrain_circle=false, from_center=false, filled=true
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse_select<'py>(
        py: Python<'py>,
        width: usize,
        height: usize,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        constrain_circle: bool,
        from_center: bool,
        filled: bool,
    ) -> Bound<'py, PyArray2<u8>> {
        let options = EllipseOptions {
            constrain_circle,
            from_center,
            filled,
            ..EllipseOptions::default()
        };
        let mask = shapes::ellipse_select(x0, y0, x1, y1, &options);
        mask.to_alpha(width, height).into_pyarray(py)
    }

    // ========================================================================
    // Brushes
    // ========================================================================

    /// Relative (dx, dy) offsets of a brush. `shape` is "square" or "circle".
    #[pyfunction]
    #[pyo3(signature = (size, shape="square"))]
    pub fn brush_offsets(size: u32, shape: &str) -> PyResult<Vec<(i32, i32)>> {
        let shape = parse_shape(shape)?;
        Ok(brush_offsets_impl(size, shape).to_vec())
    }

    /// Pixel selection extension module
    #[pymodule]
    pub fn pixel_select(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(magic_wand, m)?)?;
        m.add_function(wrap_pyfunction!(rectangle_select, m)?)?;
        m.add_function(wrap_pyfunction!(ellipse_select, m)?)?;
        m.add_function(wrap_pyfunction!(brush_offsets, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixel_select;
