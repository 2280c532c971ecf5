/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core data model and image primitives for digitizing paper ECG tracings.
//!
//! This crate owns the immutable pixel buffers (`ColorImage`, `GrayscaleImage`,
//! `BinaryImage`), the basic operations on them (grayscale/binary conversion,
//! white-point normalization, crop, rotate, histogram), and the small value
//! types shared across the digitization pipeline: `Rectangle`, `Point`,
//! `LeadId`, `Lead`, `Signal` and `InputParameters`.
//!
//! It does not know how to detect a grid, segment a trace or run the Viterbi
//! search — those live in `ecg-vision`. This crate is the leaf layer.

pub mod errors;
pub mod geometry;
pub mod image;
pub mod lead;
pub mod ops;
pub mod params;
pub mod signal;

pub use errors::DigitizeError;
pub use geometry::{Point, Rectangle};
pub use image::{BinaryImage, ColorImage, GrayscaleImage, PixelBuffer};
pub use lead::{Lead, LeadId};
pub use params::InputParameters;
pub use signal::Signal;
