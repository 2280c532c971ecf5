/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Rendering a reconstructed trace back over its source crop, for visual
//! sanity-checking of the extraction.

use ecg_core::image::{ColorImage, PixelBuffer};
use ecg_core::signal::Signal;

/// Fixed overlay color, BGR: a saturated purple that stands out against
/// both paper grid lines and the original black trace.
const PREVIEW_COLOR: [u8; 3] = [85, 19, 248];
const LINE_THICKNESS: i64 = 3;

fn set_pixel(data: &mut [u8], width: usize, height: usize, x: i64, y: i64, color: [u8; 3]) {
    if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
        return;
    }
    let idx = (y as usize * width + x as usize) * 3;
    data[idx..idx + 3].copy_from_slice(&color);
}

fn draw_thick_point(
    data: &mut [u8], width: usize, height: usize, x: i64, y: i64, color: [u8; 3], half_thickness: i64
) {
    for dy in -half_thickness..=half_thickness {
        for dx in -half_thickness..=half_thickness {
            set_pixel(data, width, height, x + dx, y + dy, color);
        }
    }
}

/// Bresenham's line algorithm, stamping a `thickness`-wide square at every
/// step along the way.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    data: &mut [u8], width: usize, height: usize, x0: i64, y0: i64, x1: i64, y1: i64,
    color: [u8; 3], thickness: i64
) {
    let half = thickness / 2;
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        draw_thick_point(data, width, height, x, y, color, half);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw `signal` (pixel-domain, pre-alignment, pre-scaling, one sample per
/// column of `crop`) as connected line segments over a copy of `crop`.
/// Segments with a NaN endpoint are skipped rather than interpolated across,
/// so gaps in the extracted trace stay visible in the preview.
#[must_use]
pub fn render(crop: &ColorImage, signal: &Signal) -> ColorImage {
    let (width, height) = crop.dimensions();
    let mut data = crop.data().to_vec();
    let samples = signal.as_slice();

    for x in 0..width.saturating_sub(1) {
        let y0 = samples[x];
        let y1 = samples[x + 1];
        if y0.is_nan() || y1.is_nan() {
            continue;
        }
        draw_line(
            &mut data,
            width,
            height,
            x as i64,
            y0.round() as i64,
            (x + 1) as i64,
            y1.round() as i64,
            PREVIEW_COLOR,
            LINE_THICKNESS
        );
    }

    ColorImage::new(width, height, data).expect("draw_line never changes the buffer's length")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_has_same_dimensions_as_crop() {
        let crop = ColorImage::fill([255, 255, 255], 50, 30);
        let signal = Signal::filled_with_nan(50);
        let preview = render(&crop, &signal);
        assert_eq!(preview.dimensions(), crop.dimensions());
    }

    #[test]
    fn flat_signal_paints_overlay_color_across_its_row() {
        let crop = ColorImage::fill([255, 255, 255], 20, 20);
        let signal = Signal::from_vec(vec![10.0; 20]);
        let preview = render(&crop, &signal);
        assert_eq!(preview.pixel(10, 10), PREVIEW_COLOR);
    }

    #[test]
    fn nan_gap_leaves_background_untouched_at_that_column() {
        let crop = ColorImage::fill([255, 255, 255], 20, 20);
        let mut samples = vec![10.0; 20];
        samples[5] = f64::NAN;
        let signal = Signal::from_vec(samples);
        let preview = render(&crop, &signal);
        // column 5 neither receives nor propagates a segment from either
        // neighbor, so it stays background-colored away from the overlay row.
        assert_eq!(preview.pixel(5, 2), [255, 255, 255]);
    }

    #[test]
    fn all_nan_signal_leaves_crop_unchanged() {
        let crop = ColorImage::fill([200, 150, 100], 10, 10);
        let signal = Signal::filled_with_nan(10);
        let preview = render(&crop, &signal);
        assert_eq!(preview.data(), crop.data());
    }
}
