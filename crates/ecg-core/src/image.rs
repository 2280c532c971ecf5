/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The three image kinds the digitization pipeline passes around.
//!
//! `ColorImage`, `GrayscaleImage` and `BinaryImage` are closed, independent
//! structs rather than an inheritance hierarchy: each owns its own pixel
//! buffer and each only exposes the operations that make sense for its
//! channel count. They share a `PixelBuffer` accessor trait for the three
//! things every kind has in common (width, height, raw bytes), which is all
//! the generic byte-copy routines in `ops` (crop, rotate) need to know.

use crate::errors::DigitizeError;

/// Shared accessors for the three image kinds.
///
/// Kind-specific operations (e.g. converting a `GrayscaleImage` to a
/// `BinaryImage`) are plain functions selected on the concrete type, not
/// trait methods — there is no sensible `to_binary` on a `ColorImage`.
pub trait PixelBuffer {
    /// Number of channels per pixel (3 for color, 1 for grayscale/binary).
    const CHANNELS: usize;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn data(&self) -> &[u8];
}

fn expected_len(width: usize, height: usize, channels: usize) -> usize {
    width * height * channels
}

/// A three-channel, 8-bit-per-channel color image in blue-green-red (BGR)
/// channel order, the OpenCV convention the original ECG digitizer used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl ColorImage {
    pub const CHANNELS: usize = 3;

    /// Build a color image from raw interleaved BGR bytes.
    ///
    /// # Errors
    /// Returns [`DigitizeError::GenericString`] if `data.len() != width *
    /// height * 3`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<ColorImage, DigitizeError> {
        let expected = expected_len(width, height, Self::CHANNELS);
        if data.len() != expected {
            return Err(DigitizeError::GenericString(format!(
                "ColorImage: expected {expected} bytes for a {width}x{height} BGR image, got {}",
                data.len()
            )));
        }
        Ok(ColorImage { width, height, data })
    }

    /// A `width x height` image filled uniformly with `bgr`.
    #[must_use]
    pub fn fill(bgr: [u8; 3], width: usize, height: usize) -> ColorImage {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..(width * height) {
            data.extend_from_slice(&bgr);
        }
        ColorImage { width, height, data }
    }

    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the BGR triple at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

impl PixelBuffer for ColorImage {
    const CHANNELS: usize = 3;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A single-channel, 8-bit grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayscaleImage {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl GrayscaleImage {
    pub const CHANNELS: usize = 1;

    /// # Errors
    /// Returns an error if `data.len() != width * height`.
    pub fn new(
        width: usize, height: usize, data: Vec<u8>
    ) -> Result<GrayscaleImage, DigitizeError> {
        let expected = expected_len(width, height, Self::CHANNELS);
        if data.len() != expected {
            return Err(DigitizeError::GenericString(format!(
                "GrayscaleImage: expected {expected} bytes for a {width}x{height} image, got {}",
                data.len()
            )));
        }
        Ok(GrayscaleImage { width, height, data })
    }

    #[must_use]
    pub fn fill(value: u8, width: usize, height: usize) -> GrayscaleImage {
        GrayscaleImage { width, height, data: vec![value; width * height] }
    }

    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

impl PixelBuffer for GrayscaleImage {
    const CHANNELS: usize = 1;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A single-channel image whose bytes are always `0` or `1`.
///
/// Stored as `u8` rather than a packed bitset, trading memory for the
/// simplicity of reusing the same byte-wise crop/rotate/histogram routines
/// as the other two image kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl BinaryImage {
    pub const CHANNELS: usize = 1;

    /// # Errors
    /// Returns an error if `data.len() != width * height`, or if any byte
    /// is not `0` or `1`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<BinaryImage, DigitizeError> {
        let expected = expected_len(width, height, Self::CHANNELS);
        if data.len() != expected {
            return Err(DigitizeError::GenericString(format!(
                "BinaryImage: expected {expected} bytes for a {width}x{height} image, got {}",
                data.len()
            )));
        }
        if data.iter().any(|&b| b > 1) {
            return Err(DigitizeError::GenericStr(
                "BinaryImage: all bytes must be 0 or 1"
            ));
        }
        Ok(BinaryImage { width, height, data })
    }

    /// Build directly from a `bool` mask, skipping the byte-range check.
    #[must_use]
    pub fn from_bools(width: usize, height: usize, mask: &[bool]) -> BinaryImage {
        debug_assert_eq!(mask.len(), width * height);
        BinaryImage { width, height, data: mask.iter().map(|&b| u8::from(b)).collect() }
    }

    #[must_use]
    pub fn fill(value: bool, width: usize, height: usize) -> BinaryImage {
        BinaryImage { width, height, data: vec![u8::from(value); width * height] }
    }

    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    /// The number of set pixels in column `x`, top to bottom.
    #[must_use]
    pub fn column(&self, x: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.height).map(move |y| self.data[y * self.width + x])
    }
}

impl PixelBuffer for BinaryImage {
    const CHANNELS: usize = 1;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer_length() {
        assert!(ColorImage::new(2, 2, vec![0; 11]).is_err());
        assert!(GrayscaleImage::new(2, 2, vec![0; 3]).is_err());
        assert!(BinaryImage::new(2, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn rejects_non_binary_bytes() {
        assert!(BinaryImage::new(1, 1, vec![2]).is_err());
    }

    #[test]
    fn fill_produces_uniform_image() {
        let img = ColorImage::fill([1, 2, 3], 4, 5);
        assert_eq!(img.pixel(2, 3), [1, 2, 3]);
        assert_eq!(img.dimensions(), (4, 5));
    }

    #[test]
    fn from_bools_round_trips() {
        let mask = vec![true, false, false, true];
        let img = BinaryImage::from_bools(2, 2, &mask);
        assert!(img.pixel(0, 0));
        assert!(!img.pixel(1, 0));
        assert!(!img.pixel(0, 1));
        assert!(img.pixel(1, 1));
    }
}
