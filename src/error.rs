//! Error type for the selection engine.
//!
//! Selectors themselves are total; the only failures are caller contract
//! violations when a pixel buffer is constructed.

use thiserror::Error;

/// Errors raised while wrapping caller-supplied pixel data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("pixel buffer for {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("image dimensions {width}x{height} overflow the addressable size")]
    Dimensions { width: usize, height: usize },

    #[error("expected an RGBA image with 4 channels, got {channels}")]
    ChannelCount { channels: usize },

    #[error("image view is not in contiguous row-major layout")]
    NonContiguous,
}

pub type Result<T> = std::result::Result<T, SelectionError>;
