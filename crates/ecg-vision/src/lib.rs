/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Vision algorithms specific to digitizing paper ECG tracings: grid
//! detection, autocorrelation-based period estimation, skew-angle
//! recovery, adaptive trace segmentation, and the Viterbi path search that
//! turns a binary trace mask into a 1-D signal.
//!
//! This crate knows about grids, traces and Viterbi paths; it does not know
//! about leads, input parameters or the overall digitization call — that
//! orchestration lives in `ecg-digitize`.

pub mod autocorrelation;
pub mod blur;
pub mod frequency;
pub mod grid;
pub mod hough;
pub mod morphology;
pub mod otsu;
pub mod rotation;
pub mod scaler;
pub mod signal_detector;
pub mod viterbi;

pub use autocorrelation::{autocorrelate, find_first_peak, Peak};
pub use frequency::{estimate_grid_frequency, FrequencyError};
pub use grid::{detect_grid, GridDetectionMethod};
pub use hough::{hough_lines, HoughLine};
pub use rotation::estimate_rotation_angle;
pub use signal_detector::{detect_signal, SignalDetectionMethod};
pub use viterbi::extract_signal;
