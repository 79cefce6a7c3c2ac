//! Read-only RGBA pixel buffer shared by all selectors.

use ndarray::ArrayView3;

use super::color::Color;
use crate::error::{Result, SelectionError};

/// A borrowed, row-major RGBA8 image (4 bytes per pixel).
///
/// Construction validates `data.len() == width * height * 4` (rejecting
/// dimensions whose byte count overflows `usize`); once built, every
/// accessor is infallible for in-bounds coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a flat RGBA byte slice.
    ///
    /// # Arguments
    /// * `data` - RGBA bytes, length = width * height * 4
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SelectionError::Dimensions { width, height })?;
        if data.len() != expected {
            return Err(SelectionError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Wrap an ndarray image of shape (height, width, 4).
    ///
    /// The view must be in standard (row-major, contiguous) layout.
    pub fn from_array(image: &ArrayView3<'a, u8>) -> Result<Self> {
        let (height, width, channels) = image.dim();
        if channels != 4 {
            return Err(SelectionError::ChannelCount { channels });
        }
        let data = image.to_slice().ok_or(SelectionError::NonContiguous)?;
        Self::new(data, width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Whether (x, y) lies on the canvas.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Color at (x, y), or `None` when outside the canvas.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if self.contains(x, y) {
            Some(self.pixel(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Color at an in-bounds (x, y).
    ///
    /// # Panics
    /// If `x >= width` or `y >= height`. Use [`PixelBuffer::get`] for
    /// unchecked coordinates.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.width + x) * 4;
        Color::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// One row of RGBA bytes (`width * 4` long).
    ///
    /// # Panics
    /// If `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let stride = self.width * 4;
        &self.data[y * stride..(y + 1) * stride]
    }
}
