/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scenario 1: a synthetic flatline chart digitizes to a zero-centered,
//! full-width signal with the expected grid period.

use ecg_core::geometry::Rectangle;
use ecg_core::lead::{Lead, LeadId};
use ecg_core::params::InputParameters;
use ecg_digitize::digitize;

use crate::flatline_chart;

#[test]
fn flatline_chart_digitizes_to_a_near_zero_full_width_signal() {
    let image = flatline_chart(400, 200, 20, 100);
    let params = InputParameters::new(0.0, 25.0, 10.0).with_lead(
        LeadId::II,
        Lead::new(Rectangle::new(0, 0, 400, 200), 0.0)
    );

    let output = digitize(&image, &params).expect("flatline chart digitizes cleanly");
    let signal = &output.signals[&LeadId::II];
    assert_eq!(signal.len(), 400);

    let non_nan: Vec<f64> = signal.as_slice().iter().copied().filter(|s| !s.is_nan()).collect();
    assert!(!non_nan.is_empty());
    for sample in non_nan {
        assert!(sample.abs() < 5.0, "expected near-zero after zero-centering, got {sample}");
    }
}
