/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Binary morphology: structuring elements, erode/dilate, and the opening
//! operator built from them.
//!
//! Pixels outside the image are treated as background (`0`) for both
//! erosion and dilation — a deliberate simplification of OpenCV's
//! `BORDER_CONSTANT`/anchor handling for even-sized kernels, which has
//! asymmetric edge cases not worth reproducing bit-for-bit here.

use ecg_core::image::{BinaryImage, PixelBuffer};

/// A set of pixel offsets, relative to an implicit anchor at `(0, 0)`.
#[derive(Clone, Debug)]
pub struct StructuringElement {
    offsets: Vec<(i64, i64)>
}

impl StructuringElement {
    /// A `width x height` rectangle, anchored at its (possibly
    /// asymmetric, for even sizes) center.
    #[must_use]
    pub fn rect(width: usize, height: usize) -> StructuringElement {
        let anchor_x = (width / 2) as i64;
        let anchor_y = (height / 2) as i64;
        let mut offsets = Vec::with_capacity(width * height);
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                offsets.push((x - anchor_x, y - anchor_y));
            }
        }
        StructuringElement { offsets }
    }

    /// A plus-shaped element with arms of length `radius` in each
    /// direction (a `(2*radius+1) x (2*radius+1)` cross).
    #[must_use]
    pub fn cross(radius: i64) -> StructuringElement {
        let mut offsets = vec![(0, 0)];
        for d in 1..=radius {
            offsets.push((d, 0));
            offsets.push((-d, 0));
            offsets.push((0, d));
            offsets.push((0, -d));
        }
        StructuringElement { offsets }
    }

    /// The degenerate 2x2 "cross" used by the kernel-based grid detector:
    /// three of the four cells of a 2x2 block, anchored at the
    /// bottom-right cell, leaving out the opposite corner.
    #[must_use]
    pub fn cross_2x2() -> StructuringElement {
        StructuringElement { offsets: vec![(0, 0), (-1, 0), (0, -1)] }
    }
}

fn apply<F>(image: &BinaryImage, se: &StructuringElement, combine: F) -> BinaryImage
where
    F: Fn(bool, bool) -> bool
{
    let (width, height) = image.dimensions();
    let mut out = vec![0u8; width * height];
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut acc: Option<bool> = None;
            for &(dx, dy) in &se.offsets {
                let (sx, sy) = (x + dx, y + dy);
                let value = if sx < 0 || sy < 0 || sx as usize >= width || sy as usize >= height {
                    false
                } else {
                    image.pixel(sx as usize, sy as usize)
                };
                acc = Some(match acc {
                    None => value,
                    Some(prev) => combine(prev, value)
                });
            }
            out[y as usize * width + x as usize] = u8::from(acc.unwrap_or(false));
        }
    }
    BinaryImage::new(width, height, out).expect("apply() preserves buffer length")
}

/// Erosion: a pixel survives only if every offset under the structuring
/// element is foreground.
#[must_use]
pub fn erode(image: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    apply(image, se, |a, b| a && b)
}

/// Dilation: a pixel is set if any offset under the structuring element is
/// foreground.
#[must_use]
pub fn dilate(image: &BinaryImage, se: &StructuringElement) -> BinaryImage {
    apply(image, se, |a, b| a || b)
}

/// Erode then dilate with a 3x3 rectangular element, clearing thin noise
/// while leaving solid regions roughly intact.
#[must_use]
pub fn open(image: &BinaryImage) -> BinaryImage {
    let se = StructuringElement::rect(3, 3);
    dilate(&erode(image, &se), &se)
}

/// Set-difference: foreground pixels of `a` that are not foreground in `b`.
#[must_use]
pub fn and_not(a: &BinaryImage, b: &BinaryImage) -> BinaryImage {
    let (width, height) = a.dimensions();
    debug_assert_eq!((width, height), b.dimensions());
    let data: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| u8::from(a.pixel(x, y) && !b.pixel(x, y)))
        .collect();
    BinaryImage::new(width, height, data).expect("same-dimensioned inputs preserve buffer length")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, fg: &[(usize, usize)]) -> BinaryImage {
        let mut data = vec![0u8; size * size];
        for &(x, y) in fg {
            data[y * size + x] = 1;
        }
        BinaryImage::new(size, size, data).unwrap()
    }

    #[test]
    fn erode_removes_single_pixel_noise() {
        let img = square(5, &[(2, 2)]);
        let eroded = erode(&img, &StructuringElement::rect(3, 3));
        assert!(!eroded.pixel(2, 2));
    }

    #[test]
    fn dilate_grows_a_single_pixel() {
        let img = square(5, &[(2, 2)]);
        let dilated = dilate(&img, &StructuringElement::cross(1));
        assert!(dilated.pixel(1, 2));
        assert!(dilated.pixel(3, 2));
        assert!(dilated.pixel(2, 1));
        assert!(dilated.pixel(2, 3));
        // cross does not touch diagonals
        assert!(!dilated.pixel(1, 1));
    }

    #[test]
    fn open_removes_isolated_pixel_but_keeps_solid_block() {
        let mut fg: Vec<(usize, usize)> = vec![(0, 0)];
        for y in 3..8 {
            for x in 3..8 {
                fg.push((x, y));
            }
        }
        let img = square(10, &fg);
        let opened = open(&img);
        assert!(!opened.pixel(0, 0));
        assert!(opened.pixel(5, 5));
    }

    #[test]
    fn and_not_removes_overlap() {
        let a = square(3, &[(0, 0), (1, 1)]);
        let b = square(3, &[(1, 1)]);
        let result = and_not(&a, &b);
        assert!(result.pixel(0, 0));
        assert!(!result.pixel(1, 1));
    }
}
