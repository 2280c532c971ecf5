/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible while digitizing an ECG.
use std::fmt::{Debug, Display, Formatter};

/// All possible errors that can abort a digitization call.
///
/// This is the grandfather of digitization errors: per-lead failures (a
/// single lead's trace could not be extracted, or its grid period could not
/// be estimated) are tolerated silently by the pipeline and never surface
/// here — only the pipeline-level aggregate failures do.
pub enum DigitizeError {
    /// Caller supplied zero leads to digitize.
    EmptyLeadMap,
    /// Every lead's Viterbi extraction found no trace candidates at all.
    AllSignalsFailed,
    /// No lead's grid could be measured in either axis.
    GridNotDetectable,
    /// A rectangle did not fit inside the image it was meant to crop.
    RectangleOutOfBounds { rect: crate::geometry::Rectangle, image_width: usize, image_height: usize },
    /// Generic error with an owned message, for cases with no dedicated
    /// variant.
    GenericString(String),
    /// Generic error with a static message.
    GenericStr(&'static str)
}

impl Debug for DigitizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLeadMap => writeln!(f, "No leads were supplied for digitization"),
            Self::AllSignalsFailed => writeln!(
                f,
                "Every lead's signal extraction failed, no trace candidates were found anywhere"
            ),
            Self::GridNotDetectable => writeln!(
                f,
                "Unable to estimate grid frequency: no qualifying autocorrelation peak in either axis, for any lead"
            ),
            Self::RectangleOutOfBounds { rect, image_width, image_height } => writeln!(
                f,
                "Rectangle {rect:?} does not fit inside a {image_width}x{image_height} image"
            ),
            Self::GenericString(s) => writeln!(f, "{s}"),
            Self::GenericStr(s) => writeln!(f, "{s}")
        }
    }
}

impl Display for DigitizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for DigitizeError {}

impl From<String> for DigitizeError {
    fn from(s: String) -> Self {
        Self::GenericString(s)
    }
}

impl From<&'static str> for DigitizeError {
    fn from(s: &'static str) -> Self {
        Self::GenericStr(s)
    }
}
