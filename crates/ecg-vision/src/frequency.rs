/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grid period estimation from a binary mask via autocorrelation of its
//! row/column pixel densities.

use std::fmt::{Debug, Display, Formatter};

use ecg_core::image::{BinaryImage, PixelBuffer};

use crate::autocorrelation::estimate_first_peak_location;

/// Failure estimating the grid's period in either axis.
pub struct FrequencyError;

impl Debug for FrequencyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unable to estimate grid frequency: no qualifying autocorrelation peak found in either axis")
    }
}

impl Display for FrequencyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for FrequencyError {}

/// Sum of set pixels in each column, top to bottom.
fn column_density(mask: &BinaryImage) -> Vec<f64> {
    let (width, height) = mask.dimensions();
    (0..width)
        .map(|x| (0..height).filter(|&y| mask.pixel(x, y)).count() as f64)
        .collect()
}

/// Sum of set pixels in each row, left to right.
fn row_density(mask: &BinaryImage) -> Vec<f64> {
    let (width, height) = mask.dimensions();
    (0..height)
        .map(|y| (0..width).filter(|&x| mask.pixel(x, y)).count() as f64)
        .collect()
}

/// Estimate the grid's period in pixels from a binary mask.
///
/// Projects the mask along rows and columns, autocorrelates each
/// projection, and locates the first qualifying peak (sub-pixel refined) in
/// each. The column-axis estimate is preferred when both axes yield a
/// peak — this asymmetry is inherited unchanged from the original
/// implementation (see spec's open question on this point).
pub fn estimate_grid_frequency(mask: &BinaryImage) -> Result<f64, FrequencyError> {
    let column_autocorr = crate::autocorrelation::autocorrelate(&column_density(mask));
    let row_autocorr = crate::autocorrelation::autocorrelate(&row_density(mask));

    let column_freq = estimate_first_peak_location(&column_autocorr, true);
    let row_freq = estimate_first_peak_location(&row_autocorr, true);

    match (column_freq, row_freq) {
        (Some(c), _) => Ok(c),
        (None, Some(r)) => Ok(r),
        (None, None) => Err(FrequencyError)
    }
}

/// Whether a periodic grid is still detectable in a mask's column density,
/// without sub-pixel refinement — the stopping rule the adaptive signal
/// detector uses while lowering its Otsu hedge factor.
#[must_use]
pub fn grid_is_detectable(mask: &BinaryImage) -> bool {
    let autocorr = crate::autocorrelation::autocorrelate(&column_density(mask));
    estimate_first_peak_location(&autocorr, false).is_some()
}
