/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scenario 5: a crop with no dark pixels at all aborts the whole call
//! rather than returning a partial result.

use ecg_core::errors::DigitizeError;
use ecg_core::geometry::Rectangle;
use ecg_core::image::ColorImage;
use ecg_core::lead::{Lead, LeadId};
use ecg_core::params::InputParameters;
use ecg_digitize::digitize;

#[test]
fn an_entirely_white_image_aborts_with_all_signals_failed() {
    let image = ColorImage::fill([255, 255, 255], 200, 200);
    let params = InputParameters::new(0.0, 25.0, 10.0).with_lead(
        LeadId::I,
        Lead::new(Rectangle::new(0, 0, 200, 200), 0.0)
    );

    let result = digitize(&image, &params);
    assert!(matches!(result, Err(DigitizeError::AllSignalsFailed)));
}
