//! Externally owned frame-buffer target.

use beam_math::Vec3;
use thiserror::Error;

/// Errors raised when wrapping a host pixel buffer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Buffer length does not match the declared dimensions
    #[error("pixel buffer is {actual} bytes, expected {expected} ({width}x{height} RGB)")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Quantize one channel to a byte: floor(value * 255), saturating below
/// 0.0 and above 1.0.
#[inline]
pub fn quantize_channel(value: f32) -> u8 {
    (value * 255.0) as u8
}

/// Row-major RGB byte target borrowed from the host.
///
/// Renderers write quantized pixels into the borrowed storage and never
/// reallocate it. The byte for channel `c` of pixel (row, col) lives at
/// `(row * width + col) * 3 + c`.
#[derive(Debug)]
pub struct Frame<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    /// Wrap a host-allocated buffer, validating its size.
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Quantize `color` and store it at (`row`, `col`).
    pub fn put_pixel(&mut self, row: u32, col: u32, color: Vec3) {
        let i = (row as usize * self.width as usize + col as usize) * 3;
        self.data[i] = quantize_channel(color.x);
        self.data[i + 1] = quantize_channel(color.y);
        self.data[i + 2] = quantize_channel(color.z);
    }

    /// Read back the byte triple at (`row`, `col`).
    pub fn pixel(&self, row: u32, col: u32) -> [u8; 3] {
        let i = (row as usize * self.width as usize + col as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}
