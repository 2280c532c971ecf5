/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Generic byte-wise image operations: crop, rotate, histogram, grayscale
//! conversion, thresholding, and white-point normalization.
//!
//! The copy/resample routines operate on raw byte slices, not on a
//! particular image kind, following the `zune-imageprocs` pattern of a
//! single generic `crop<T>`/`rotate` implementation with thin per-kind
//! wrappers — there is exactly one way to copy a rectangle of bytes,
//! regardless of whether those bytes are BGR triples or single-channel
//! samples.

use crate::errors::DigitizeError;
use crate::geometry::Rectangle;
use crate::image::{BinaryImage, ColorImage, GrayscaleImage, PixelBuffer};

#[cfg(feature = "log")]
use log::trace;

/// Copy out the rectangle `rect` from an interleaved, `channels`-per-pixel
/// buffer of size `width x height`.
///
/// Mirrors `zune_imageprocs::crop::crop`: row by row, a single contiguous
/// slice copy rather than a per-pixel loop.
fn crop_bytes(
    data: &[u8], width: usize, channels: usize, rect: Rectangle
) -> Vec<u8> {
    let row_bytes = rect.width * channels;
    let mut out = Vec::with_capacity(row_bytes * rect.height);
    for row in 0..rect.height {
        let src_y = rect.y + row;
        let start = (src_y * width + rect.x) * channels;
        out.extend_from_slice(&data[start..start + row_bytes]);
    }
    out
}

pub fn crop_color(image: &ColorImage, rect: Rectangle) -> Result<ColorImage, DigitizeError> {
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return Err(DigitizeError::RectangleOutOfBounds {
            rect,
            image_width: width,
            image_height: height
        });
    }
    let cropped = crop_bytes(image.data(), width, ColorImage::CHANNELS, rect);
    ColorImage::new(rect.width, rect.height, cropped)
}

pub fn crop_grayscale(
    image: &GrayscaleImage, rect: Rectangle
) -> Result<GrayscaleImage, DigitizeError> {
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return Err(DigitizeError::RectangleOutOfBounds {
            rect,
            image_width: width,
            image_height: height
        });
    }
    let cropped = crop_bytes(image.data(), width, GrayscaleImage::CHANNELS, rect);
    GrayscaleImage::new(rect.width, rect.height, cropped)
}

pub fn crop_binary(image: &BinaryImage, rect: Rectangle) -> Result<BinaryImage, DigitizeError> {
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return Err(DigitizeError::RectangleOutOfBounds {
            rect,
            image_width: width,
            image_height: height
        });
    }
    let cropped = crop_bytes(image.data(), width, BinaryImage::CHANNELS, rect);
    BinaryImage::new(rect.width, rect.height, cropped)
}

/// `(b, g, r) -> gray` using the ITU-R BT.601 luma weights, channel order
/// matched to `ColorImage`'s BGR convention.
fn bgr_to_gray(b: u8, g: u8, r: u8) -> u8 {
    let gray = 0.114 * f64::from(b) + 0.587 * f64::from(g) + 0.299 * f64::from(r);
    gray.round().clamp(0.0, 255.0) as u8
}

pub fn to_grayscale(image: &ColorImage) -> GrayscaleImage {
    let (width, height) = image.dimensions();
    let data = image
        .data()
        .chunks_exact(3)
        .map(|px| bgr_to_gray(px[0], px[1], px[2]))
        .collect();
    GrayscaleImage::new(width, height, data)
        .expect("chunks_exact(3) over a valid ColorImage always yields width*height bytes")
}

/// A 256-bucket count of pixel intensities.
#[must_use]
pub fn histogram(image: &GrayscaleImage) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &byte in image.data() {
        hist[byte as usize] += 1;
    }
    hist
}

/// Otsu's threshold by exhaustive search over all 256 candidate splits,
/// maximizing between-class variance.
///
/// This is the textbook formulation; the adaptive signal detector in
/// `ecg-vision` reaches the same optimum via hill-climbing instead of
/// exhaustive search, trading a guarantee of global optimality (which
/// holds here) for speed on large crops. The two must agree whenever the
/// histogram is unimodal or bimodal — see the cross-crate property test
/// in `ecg-vision::otsu`.
#[must_use]
pub fn otsu_threshold(hist: &[u32; 256]) -> u8 {
    let total: u64 = hist.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return 0;
    }
    let total = total as f64;
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * f64::from(c))
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = -1.0f64;
    let mut weight_bg = 0.0f64;
    let mut sum_bg = 0.0f64;

    for t in 0..256 {
        weight_bg += f64::from(hist[t]);
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += t as f64 * f64::from(hist[t]);
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let between_variance = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);
        if between_variance > best_variance {
            best_variance = between_variance;
            best_threshold = t as u8;
        }
    }
    best_threshold
}

/// Threshold a grayscale image into a binary mask.
///
/// If `threshold` is absent, Otsu's threshold is computed from the image's
/// own histogram. With `inverse = true`, pixels at or below the threshold
/// become `1` (the common case for paper ECGs: the trace is dark ink on a
/// light background, so "foreground" is everything at or under the split).
/// With `inverse = false`, pixels above the threshold become `1`.
pub fn to_binary(image: &GrayscaleImage, threshold: Option<u8>, inverse: bool) -> BinaryImage {
    let t = threshold.unwrap_or_else(|| otsu_threshold(&histogram(image)));
    #[cfg(feature = "log")]
    trace!("to_binary: threshold={t} inverse={inverse}");
    let (width, height) = image.dimensions();
    let data: Vec<u8> = image
        .data()
        .iter()
        .map(|&p| {
            let foreground = p <= t;
            u8::from(foreground == inverse)
        })
        .collect();
    BinaryImage::new(width, height, data)
        .expect("mapping preserves buffer length and only ever emits 0/1")
}

/// Normalize uneven paper lighting by rescaling every pixel against the
/// image's dominant (background) intensity.
///
/// Finds the modal bucket of a 255-bucket histogram (bucket 254 absorbs
/// both raw values 254 and 255) and rescales every pixel by
/// `255 / white_point * strength`, saturating to `[0, 255]`.
#[must_use]
pub fn white_point_adjust(image: &GrayscaleImage, strength: f64) -> GrayscaleImage {
    let hist = histogram(image);
    let mut buckets = [0u32; 255];
    buckets[..254].copy_from_slice(&hist[..254]);
    buckets[254] = hist[254] + hist[255];

    let white_point = buckets
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)
        .map_or(254, |(bucket, _)| bucket)
        .max(1);

    let factor = 255.0 / white_point as f64 * strength;
    let (width, height) = image.dimensions();
    let data = image
        .data()
        .iter()
        .map(|&p| (f64::from(p) * factor).round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayscaleImage::new(width, height, data)
        .expect("mapping preserves buffer length")
}

/// Cubic convolution kernel (Catmull-Rom, a = -0.5), the standard
/// replacement for OpenCV's `INTER_CUBIC` when no OpenCV binding is on hand.
fn cubic_weight(x: f64) -> f64 {
    let a = -0.5;
    let x = x.abs();
    if x <= 1.0 {
        (a + 2.0) * x.powi(3) - (a + 3.0) * x.powi(2) + 1.0
    } else if x < 2.0 {
        a * x.powi(3) - 5.0 * a * x.powi(2) + 8.0 * a * x - 4.0 * a
    } else {
        0.0
    }
}

fn sample_channel(
    data: &[u8], width: usize, height: usize, channels: usize, channel: usize, x: f64, y: f64,
    border: u8
) -> u8 {
    let get = |ix: i64, iy: i64| -> f64 {
        if ix < 0 || iy < 0 || ix as usize >= width || iy as usize >= height {
            f64::from(border)
        } else {
            f64::from(data[(iy as usize * width + ix as usize) * channels + channel])
        }
    };

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let mut acc = 0.0;
    for m in -1..=2i64 {
        let wy = cubic_weight(fy - m as f64);
        if wy == 0.0 {
            continue;
        }
        let mut row_acc = 0.0;
        for n in -1..=2i64 {
            let wx = cubic_weight(fx - n as f64);
            row_acc += wx * get(x0 as i64 + n, y0 as i64 + m);
        }
        acc += wy * row_acc;
    }
    acc.round().clamp(0.0, 255.0) as u8
}

/// Rotate an interleaved byte buffer `angle_deg` degrees counter-clockwise
/// about its center, bicubically resampling and filling uncovered corners
/// with `border`.
///
/// An exact multiple of 360 degrees is a no-op returning the input
/// unchanged, both as a fast path and so rotation by zero is bit-identical
/// rather than merely close under resampling error.
fn rotate_bytes(
    data: &[u8], width: usize, height: usize, channels: usize, angle_deg: f64, border: &[u8]
) -> Vec<u8> {
    if angle_deg % 360.0 == 0.0 {
        return data.to_vec();
    }
    let angle_rad = angle_deg.to_radians();
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();
    let center_x = (width as f64 - 1.0) / 2.0;
    let center_y = (height as f64 - 1.0) / 2.0;

    let mut out = vec![0u8; width * height * channels];
    for oy in 0..height {
        for ox in 0..width {
            let dx = ox as f64 - center_x;
            let dy = oy as f64 - center_y;
            let src_x = center_x + dx * cos_a + dy * sin_a;
            let src_y = center_y - dx * sin_a + dy * cos_a;
            let out_idx = (oy * width + ox) * channels;
            for c in 0..channels {
                out[out_idx + c] =
                    sample_channel(data, width, height, channels, c, src_x, src_y, border[c]);
            }
        }
    }
    out
}

pub fn rotate_color(image: &ColorImage, angle_deg: f64, border: [u8; 3]) -> ColorImage {
    let (width, height) = image.dimensions();
    let data = rotate_bytes(image.data(), width, height, ColorImage::CHANNELS, angle_deg, &border);
    ColorImage::new(width, height, data).expect("rotate_bytes preserves buffer length")
}

pub fn rotate_grayscale(image: &GrayscaleImage, angle_deg: f64, border: u8) -> GrayscaleImage {
    let (width, height) = image.dimensions();
    let data =
        rotate_bytes(image.data(), width, height, GrayscaleImage::CHANNELS, angle_deg, &[border]);
    GrayscaleImage::new(width, height, data).expect("rotate_bytes preserves buffer length")
}
