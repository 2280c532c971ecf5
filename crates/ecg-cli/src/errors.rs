/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors specific to the CLI's own I/O and parsing, layered on top of
//! [`ecg_core::errors::DigitizeError`] the same way `zune-bin`'s workflow
//! layers its own failures on top of `zune_image::errors::ImgErrors`.

use std::fmt::{Debug, Display, Formatter};

use ecg_core::errors::DigitizeError;

pub enum CliError {
    /// A path given on the command line does not exist or could not be read.
    Io { path: String, source: std::io::Error },
    /// The input image's bytes matched neither the PNG nor the JPEG magic
    /// number.
    UnrecognizedImageFormat { path: String },
    /// A JPEG or PNG decoder rejected the input image.
    ImageDecode { path: String, reason: String },
    /// The lead-map config file was not valid JSON, or its numeric fields
    /// failed the plain-number check.
    Config { path: String, reason: String },
    /// [`DigitizeError`] wrapped to build a uniform exit path.
    Digitize(DigitizeError)
}

impl From<DigitizeError> for CliError {
    fn from(err: DigitizeError) -> Self {
        CliError::Digitize(err)
    }
}

impl Debug for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "could not read '{path}': {source}"),
            CliError::UnrecognizedImageFormat { path } => {
                write!(f, "'{path}' is neither a PNG nor a JPEG file")
            }
            CliError::ImageDecode { path, reason } => {
                write!(f, "could not decode '{path}': {reason}")
            }
            CliError::Config { path, reason } => {
                write!(f, "invalid lead-map config '{path}': {reason}")
            }
            CliError::Digitize(err) => write!(f, "{err:?}")
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for CliError {}
