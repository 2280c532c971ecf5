/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scenario 4: a rotated synthetic grid's skew angle is recovered within a
//! couple of degrees of the true rotation.

use ecg_core::ops::rotate_color;
use ecg_vision::estimate_rotation_angle;

use crate::flatline_chart;

const WHITE: [u8; 3] = [255, 255, 255];

#[test]
fn five_degree_rotation_is_recovered_within_one_degree() {
    let grid = flatline_chart(300, 300, 20, 150);
    let rotated = rotate_color(&grid, 5.0, WHITE);

    let angle = estimate_rotation_angle(&rotated)
        .expect("a clearly rotated synthetic grid must yield an angle estimate");
    assert!((4.0..=6.0).contains(&angle), "expected an angle in [4, 6], got {angle}");
}
