/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Ties `ecg-core`'s image primitives and `ecg-vision`'s detection /
//! extraction algorithms together into one call: hand it a decoded chart
//! image and a set of lead regions, get back aligned microvolt signals and
//! overlay previews.
//!
//! This crate does not know how to decode JPEG/PNG bytes into a
//! [`ecg_core::ColorImage`], parse a lead-map configuration file, or export
//! the resulting signals to disk — those are `ecg-cli`'s job. This crate's
//! only input is already-decoded pixels and already-parsed parameters.

pub mod pipeline;
pub mod preview;

pub use pipeline::{digitize, DigitizeOutput};
