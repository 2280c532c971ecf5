/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Skew-angle recovery from near-axial Hough lines in the grid.

use ecg_core::image::ColorImage;

use crate::grid::{detect_grid, GridDetectionMethod};
use crate::hough::hough_lines;

/// Estimate the source image's rotation from its grid lines.
///
/// Builds a threshold-minus-signal grid mask, runs the Hough transform with
/// a vote threshold proportional to image width, reduces every detected
/// line's angle modulo 90 degrees (collapsing horizontal and vertical grid
/// lines into the same bucket), keeps only near-axial candidates (`|offset|
/// < 30`), and averages them. Returns `None` if fewer than two candidates
/// survive — a single line is too noisy a basis for an angle estimate.
#[must_use]
pub fn estimate_rotation_angle(image: &ColorImage) -> Option<f64> {
    let (width, _) = image.dimensions();
    let grid_mask = detect_grid(image, GridDetectionMethod::ThresholdMinusSignal);
    let threshold = (width as f64 * 0.25) as u32;
    let lines = hough_lines(&grid_mask, threshold);

    let candidates: Vec<f64> = lines
        .iter()
        .map(|line| line.theta_degrees() % 90.0)
        .filter(|offset| offset.abs() < 30.0)
        .collect();

    if candidates.len() < 2 {
        return None;
    }
    Some(candidates.iter().sum::<f64>() / candidates.len() as f64)
}
