/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Converting a pixel-domain signal into microvolts, and deriving the
//! sampling period that goes with a given grid period.

use ecg_core::signal::Signal;

/// Subtract the signal's mode from every non-NaN sample, in place, so its
/// baseline sits at zero. A no-op if the signal is entirely NaN.
pub fn zero_center(signal: &mut Signal) {
    if let Some(mode) = signal.mode() {
        signal.shift(mode);
    }
}

/// Microvolts per pixel, given the grid's period in pixels and the paper's
/// voltage scale in mm/mV. One grid square is always 1 mm.
#[must_use]
pub fn microvolts_per_pixel(grid_period_px: f64, volt_scale_mm_per_mv: f64) -> f64 {
    (1.0 / grid_period_px) * 1.0 * (1.0 / volt_scale_mm_per_mv) * 1000.0
}

/// Rescale a zero-centered pixel-domain signal into microvolts, flipping
/// sign because pixel rows grow downward while voltages grow upward.
pub fn vertically_rescale(signal: &mut Signal, grid_period_px: f64, volt_scale_mm_per_mv: f64) {
    let factor = microvolts_per_pixel(grid_period_px, volt_scale_mm_per_mv) * -1.0;
    signal.scale(factor);
}

/// Sampling period in seconds per pixel, given the grid's period in pixels
/// and the paper's time scale in mm/s.
#[must_use]
pub fn sampling_period(grid_period_px: f64, time_scale_mm_per_s: f64) -> f64 {
    (1.0 / grid_period_px) * 1.0 * (1.0 / time_scale_mm_per_s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_center_shifts_baseline_to_zero() {
        let mut signal = Signal::from_vec(vec![100.0, 100.0, 100.0, 105.0, 95.0]);
        zero_center(&mut signal);
        assert!((signal.as_slice()[0] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn vertical_rescale_matches_square_wave_scenario() {
        // grid period 20px, volt scale 10 mm/mV: a 20px deflection should
        // become 100 uV, sign-flipped since pixel rows grow downward.
        let mut signal = Signal::from_vec(vec![-20.0, 20.0]);
        vertically_rescale(&mut signal, 20.0, 10.0);
        assert!((signal.as_slice()[0] - 100.0).abs() < 1e-9);
        assert!((signal.as_slice()[1] - (-100.0)).abs() < 1e-9);
    }

    #[test]
    fn sampling_period_matches_flatline_scenario() {
        // grid period 20px, time scale 25 mm/s -> 0.002 s/px.
        let period = sampling_period(20.0, 25.0);
        assert!((period - 0.002).abs() < 1e-9);
    }

    #[test]
    fn zero_center_on_all_nan_signal_is_a_no_op() {
        let mut signal = Signal::filled_with_nan(5);
        zero_center(&mut signal);
        assert!(signal.as_slice().iter().all(|s| s.is_nan()));
    }
}
