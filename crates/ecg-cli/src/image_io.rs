/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding a source chart image into [`ecg_core::ColorImage`].
//!
//! The core only ever sees already-decoded BGR pixels (`spec.md` §1); this
//! module is the one place in the workspace that knows about file formats,
//! mirroring how `zune-bin::file_io::ZuneFile` is the seam between on-disk
//! bytes and `zune_image::image::Image`. Only PNG and JPEG are recognized —
//! the two formats a phone photo or a flatbed scan of an ECG chart actually
//! arrives in.
use ecg_core::image::ColorImage;
use zune_core::colorspace::ColorSpace;
use zune_jpeg::JpegDecoder;
use zune_png::PngDecoder;

use crate::errors::CliError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Re-pack a decoded pixel buffer of `num_components` channels into BGR,
/// dropping alpha and broadcasting grayscale across all three channels.
fn to_bgr(pixels: &[u8], num_components: usize) -> Vec<u8> {
    match num_components {
        1 => pixels.iter().flat_map(|&l| [l, l, l]).collect(),
        3 => pixels.chunks_exact(3).flat_map(|rgb| [rgb[2], rgb[1], rgb[0]]).collect(),
        4 => pixels.chunks_exact(4).flat_map(|rgba| [rgba[2], rgba[1], rgba[0]]).collect(),
        n => pixels.chunks_exact(n).flat_map(|px| [px[0], px[0], px[0]]).collect()
    }
}

fn decode_jpeg(path: &str, bytes: &[u8]) -> Result<ColorImage, CliError> {
    let mut decoder = JpegDecoder::new(bytes);
    let pixels = decoder.decode().map_err(|e| CliError::ImageDecode {
        path:   path.to_string(),
        reason: format!("{e:?}")
    })?;
    let info = decoder.info().ok_or_else(|| CliError::ImageDecode {
        path:   path.to_string(),
        reason: "decoded successfully but exposed no image info".to_string()
    })?;
    let colorspace = decoder.get_output_colorspace();
    let bgr = to_bgr(&pixels, colorspace.num_components());
    ColorImage::new(info.width as usize, info.height as usize, bgr)
        .map_err(|e| CliError::ImageDecode { path: path.to_string(), reason: format!("{e:?}") })
}

fn decode_png(path: &str, bytes: &[u8]) -> Result<ColorImage, CliError> {
    let mut decoder = PngDecoder::new(bytes);
    decoder.decode_headers().map_err(|e| CliError::ImageDecode {
        path:   path.to_string(),
        reason: format!("{e:?}")
    })?;
    let (width, height) = decoder.get_dimensions().ok_or_else(|| CliError::ImageDecode {
        path:   path.to_string(),
        reason: "decoded headers but exposed no dimensions".to_string()
    })?;
    let colorspace = decoder.get_colorspace().unwrap_or(ColorSpace::RGB);
    let pixels = decoder.decode_raw().map_err(|e| CliError::ImageDecode {
        path:   path.to_string(),
        reason: format!("{e:?}")
    })?;
    let bgr = to_bgr(&pixels, colorspace.num_components());
    ColorImage::new(width, height, bgr)
        .map_err(|e| CliError::ImageDecode { path: path.to_string(), reason: format!("{e:?}") })
}

/// Sniff `bytes`' magic number and decode it as whichever of PNG/JPEG it
/// matches.
///
/// # Errors
/// Returns [`CliError::UnrecognizedImageFormat`] if `bytes` starts with
/// neither signature, or [`CliError::ImageDecode`] if the matching decoder
/// itself rejects the file.
pub fn decode(path: &str, bytes: &[u8]) -> Result<ColorImage, CliError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        decode_png(path, bytes)
    } else if bytes.starts_with(&JPEG_SIGNATURE) {
        decode_jpeg(path, bytes)
    } else {
        Err(CliError::UnrecognizedImageFormat { path: path.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unrecognized_magic_number() {
        let bytes = [0u8, 1, 2, 3, 4];
        assert!(matches!(
            decode("bogus.bin", &bytes),
            Err(CliError::UnrecognizedImageFormat { .. })
        ));
    }

    #[test]
    fn to_bgr_converts_rgb_triples() {
        let rgb = vec![10, 20, 30];
        let bgr = to_bgr(&rgb, 3);
        assert_eq!(bgr, vec![30, 20, 10]);
    }

    #[test]
    fn to_bgr_broadcasts_grayscale() {
        let gray = vec![42];
        let bgr = to_bgr(&gray, 1);
        assert_eq!(bgr, vec![42, 42, 42]);
    }

    #[test]
    fn to_bgr_drops_alpha() {
        let rgba = vec![10, 20, 30, 255];
        let bgr = to_bgr(&rgba, 4);
        assert_eq!(bgr, vec![30, 20, 10]);
    }
}
