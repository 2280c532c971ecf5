/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Standard (rho, theta) Hough line transform and direction filtering.

use ecg_core::image::{BinaryImage, PixelBuffer};

/// A detected line in Hough normal form: `x*cos(theta) + y*sin(theta) = rho`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoughLine {
    pub rho:   f64,
    pub theta: f64
}

impl HoughLine {
    /// `theta` converted from radians to degrees.
    #[must_use]
    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }
}

/// Standard Hough transform: rho step of 1 pixel, theta step of 1 degree,
/// a line is reported if its accumulator bin reaches `threshold` votes.
///
/// Returns an empty vector if no line clears the threshold.
#[must_use]
pub fn hough_lines(image: &BinaryImage, threshold: u32) -> Vec<HoughLine> {
    let (width, height) = image.dimensions();
    let diag = ((width * width + height * height) as f64).sqrt();
    let rho_max = diag.ceil() as i64;
    let num_rhos = (2 * rho_max + 1) as usize;
    let num_thetas = 180usize;

    let mut accumulator = vec![0u32; num_rhos * num_thetas];
    let thetas: Vec<(f64, f64)> = (0..num_thetas)
        .map(|t| {
            let theta = (t as f64).to_radians();
            (theta.cos(), theta.sin())
        })
        .collect();

    for y in 0..height {
        for x in 0..width {
            if !image.pixel(x, y) {
                continue;
            }
            for (t, &(cos_t, sin_t)) in thetas.iter().enumerate() {
                let rho = x as f64 * cos_t + y as f64 * sin_t;
                let rho_bin = (rho.round() as i64 + rho_max) as usize;
                accumulator[rho_bin * num_thetas + t] += 1;
            }
        }
    }

    let mut lines = Vec::new();
    for rho_bin in 0..num_rhos {
        for (t, _) in thetas.iter().enumerate() {
            let votes = accumulator[rho_bin * num_thetas + t];
            if votes >= threshold {
                let rho = (rho_bin as i64 - rho_max) as f64;
                let theta = (t as f64).to_radians();
                lines.push(HoughLine { rho, theta });
            }
        }
    }
    lines
}

/// Keep only lines whose theta, converted to degrees, is within `tol` of
/// `degrees`.
#[must_use]
pub fn lines_in_direction(lines: &[HoughLine], degrees: f64, tol: f64) -> Vec<HoughLine> {
    lines
        .iter()
        .copied()
        .filter(|line| (line.theta_degrees() - degrees).abs() < tol)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_a_vertical_line() {
        let width = 50;
        let height = 50;
        let mut data = vec![0u8; width * height];
        for y in 0..height {
            data[y * width + 25] = 1;
        }
        let mask = BinaryImage::new(width, height, data).unwrap();
        let lines = hough_lines(&mask, 40);
        assert!(!lines.is_empty());
        // A vertical line has theta = 0 in this convention (x*cos0 = rho = x).
        assert!(lines.iter().any(|l| l.theta_degrees() < 1.0));
    }

    #[test]
    fn empty_mask_finds_no_lines() {
        let mask = BinaryImage::fill(false, 20, 20);
        assert!(hough_lines(&mask, 5).is_empty());
    }

    #[test]
    fn lines_in_direction_filters_by_tolerance() {
        let lines = vec![
            HoughLine { rho: 0.0, theta: 0.0_f64.to_radians() },
            HoughLine { rho: 0.0, theta: 45.0_f64.to_radians() },
            HoughLine { rho: 0.0, theta: 1.5_f64.to_radians() },
        ];
        let near_zero = lines_in_direction(&lines, 0.0, 2.0);
        assert_eq!(near_zero.len(), 2);
    }
}
