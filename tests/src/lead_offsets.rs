/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scenario 3: two leads with different start times end up left-padded and
//! length-aligned.

use ecg_core::geometry::Rectangle;
use ecg_core::lead::{Lead, LeadId};
use ecg_core::params::InputParameters;
use ecg_digitize::digitize;

use crate::flatline_chart;

#[test]
fn lead_with_later_start_time_is_left_padded_and_lengths_stay_aligned() {
    let image = flatline_chart(200, 240, 20, 60);

    let params = InputParameters::new(0.0, 25.0, 10.0)
        .with_lead(LeadId::I, Lead::new(Rectangle::new(0, 0, 200, 120), 0.0))
        .with_lead(LeadId::II, Lead::new(Rectangle::new(0, 120, 200, 120), 0.08));

    let output = digitize(&image, &params).expect("two offset leads digitize cleanly");

    let len_i = output.signals[&LeadId::I].len();
    let len_ii = output.signals[&LeadId::II].len();
    assert_eq!(len_i, len_ii, "both leads must share a common output length");

    // sampling_period = (1/20)*1*(1/25) = 0.002 s/px, so 0.08s is a 40-sample
    // left pad: Lead II's first 40 samples are the zero-fill, not trace.
    let ii_samples = output.signals[&LeadId::II].as_slice();
    assert!(ii_samples[..40].iter().all(|&s| s == 0.0), "expected a 40-sample zero left-pad");
}
