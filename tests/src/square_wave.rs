/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scenario 2: a synthetic square wave digitizes to a two-level signal
//! whose peak-to-peak amplitude matches the paper scale.

use ecg_core::geometry::Rectangle;
use ecg_core::lead::{Lead, LeadId};
use ecg_core::params::InputParameters;
use ecg_digitize::digitize;

use crate::square_wave_chart;

#[test]
fn square_wave_chart_digitizes_to_a_200_microvolt_peak_to_peak_signal() {
    let image = square_wave_chart(400, 200, 20, 80, 120, 40);
    let params = InputParameters::new(0.0, 25.0, 10.0).with_lead(
        LeadId::II,
        Lead::new(Rectangle::new(0, 0, 400, 200), 0.0)
    );

    let output = digitize(&image, &params).expect("square wave chart digitizes cleanly");
    let signal = &output.signals[&LeadId::II];

    let samples: Vec<f64> = signal.as_slice().iter().copied().filter(|s| !s.is_nan()).collect();
    assert!(!samples.is_empty());

    let max = samples.iter().cloned().fold(f64::MIN, f64::max);
    let min = samples.iter().cloned().fold(f64::MAX, f64::min);
    // a 20px-period grid at a 10 mm/mV volt scale is 5 uV/px; the trace
    // swings 40px peak-to-peak, so the recovered signal should too (200 uV).
    assert!((max - min - 200.0).abs() < 15.0, "peak-to-peak was {}", max - min);

    let near_max = samples.iter().filter(|&&s| (s - max).abs() < 10.0).count();
    let near_min = samples.iter().filter(|&&s| (s - min).abs() < 10.0).count();
    assert!(near_max > 20, "expected a sustained high plateau, got {near_max} samples near max");
    assert!(near_min > 20, "expected a sustained low plateau, got {near_min} samples near min");
}
