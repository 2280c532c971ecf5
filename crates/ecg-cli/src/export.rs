/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Exporting digitized signals to the delimited text format of `spec.md`
//! §6, and overlay previews to PNG.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use ecg_core::image::{ColorImage, PixelBuffer};
use ecg_core::lead::LeadId;
use ecg_core::signal::Signal;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::EncoderOptions;
use zune_png::PngEncoder;

use crate::errors::CliError;

/// The caller-selectable field separator for the signal export format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    Space
}

impl Delimiter {
    const fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
            Delimiter::Space => ' '
        }
    }
}

/// Serialize every lead's signal in canonical `LeadId` ordinal order: one
/// line per sample index, fields separated by `delimiter`, no header, a
/// trailing newline on the last row.
///
/// # Errors
/// Returns [`CliError::Config`]-flavored validation is not performed here;
/// callers must ensure all signals share a common length (the pipeline
/// orchestrator guarantees this). Returns an I/O error if `path` cannot be
/// written.
pub fn write_signals(
    path: &Path, signals: &BTreeMap<LeadId, Signal>, delimiter: Delimiter
) -> Result<(), CliError> {
    let present: Vec<&LeadId> = LeadId::ALL.iter().filter(|id| signals.contains_key(id)).collect();
    let len = present.first().map_or(0, |id| signals[id].len());

    let sep = delimiter.as_char();
    let mut out = String::with_capacity(len * present.len() * 8);
    for row in 0..len {
        for (col, id) in present.iter().enumerate() {
            if col > 0 {
                out.push(sep);
            }
            let _ = write!(out, "{}", signals[*id].as_slice()[row]);
        }
        out.push('\n');
    }

    std::fs::write(path, out).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source
    })
}

/// BGR bytes back to RGB, the convention `zune-png`'s encoder expects.
fn bgr_to_rgb(image: &ColorImage) -> Vec<u8> {
    image.data().chunks_exact(3).flat_map(|bgr| [bgr[2], bgr[1], bgr[0]]).collect()
}

/// Write one PNG file per lead into `dir`, named `<lead>.png`.
///
/// # Errors
/// Returns [`CliError::Io`] if `dir` cannot be created or a file cannot be
/// written.
pub fn write_previews(dir: &Path, previews: &BTreeMap<LeadId, ColorImage>) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|source| CliError::Io { path: dir.display().to_string(), source })?;

    for (id, preview) in previews {
        let (width, height) = preview.dimensions();
        let rgb = bgr_to_rgb(preview);
        let options = EncoderOptions::new(width, height, ColorSpace::RGB, BitDepth::Eight);
        let encoded = PngEncoder::new(&rgb, options).encode();
        let file_path = dir.join(format!("{}.png", id.name()));
        std::fs::write(&file_path, encoded).map_err(|source| CliError::Io {
            path: file_path.display().to_string(),
            source
        })?;
    }
    Ok(())
}
