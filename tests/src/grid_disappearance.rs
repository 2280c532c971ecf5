/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scenario 6: the adaptive Otsu hedge must drop far enough that the grid's
//! periodic signature is no longer detectable in the resulting mask, while
//! the (much darker) trace remains.

use ecg_core::image::{ColorImage, PixelBuffer};
use ecg_vision::frequency::grid_is_detectable;
use ecg_vision::signal_detector::{detect_signal, SignalDetectionMethod};

const GRID_INTENSITY: u8 = 200;
const TRACE_INTENSITY: u8 = 60;
const BACKGROUND: u8 = 255;

fn chart(width: usize, height: usize, grid_period: usize, trace_y: usize) -> ColorImage {
    let mut data = vec![BACKGROUND; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) * 3;
            if x % grid_period == 0 || y % grid_period == 0 {
                data[idx] = GRID_INTENSITY;
                data[idx + 1] = GRID_INTENSITY;
                data[idx + 2] = GRID_INTENSITY;
            }
            if y == trace_y {
                data[idx] = TRACE_INTENSITY;
                data[idx + 1] = TRACE_INTENSITY;
                data[idx + 2] = TRACE_INTENSITY;
            }
        }
    }
    ColorImage::new(width, height, data).unwrap()
}

#[test]
fn adaptive_detector_converges_past_the_grids_periodic_signature() {
    let image = chart(300, 150, 20, 75);
    let mask = detect_signal(&image, SignalDetectionMethod::default());

    assert!(!grid_is_detectable(&mask), "grid's periodic signature should have dropped out");
    assert!(mask.pixel(10, 75), "the darker trace should still be present at its row");
}
