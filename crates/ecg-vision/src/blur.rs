/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A uniform box blur, used as an optional pre-pass before non-adaptive
//! Otsu thresholding.

use ecg_core::image::{GrayscaleImage, PixelBuffer};

/// Convolve with a uniform `k x k` kernel, clamping to the nearest edge
/// pixel outside the image rather than zero-filling (zero-fill would
/// darken every border by averaging in black).
#[must_use]
pub fn blur(image: &GrayscaleImage, k: usize) -> GrayscaleImage {
    if k <= 1 {
        return image.clone();
    }
    let (width, height) = image.dimensions();
    let radius = (k / 2) as i64;
    let mut data = vec![0u8; width * height];

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut sum = 0.0f64;
            let mut count = 0.0f64;
            for dy in 0..k as i64 {
                for dx in 0..k as i64 {
                    let sx = (x - radius + dx).clamp(0, width as i64 - 1);
                    let sy = (y - radius + dy).clamp(0, height as i64 - 1);
                    sum += f64::from(image.pixel(sx as usize, sy as usize));
                    count += 1.0;
                }
            }
            data[y as usize * width + x as usize] = (sum / count).round().clamp(0.0, 255.0) as u8;
        }
    }
    GrayscaleImage::new(width, height, data).expect("blur preserves buffer length")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_of_uniform_image_is_unchanged() {
        let img = GrayscaleImage::fill(100, 5, 5);
        let blurred = blur(&img, 2);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(blurred.pixel(x, y), 100);
            }
        }
    }

    #[test]
    fn blur_smooths_a_single_spike() {
        let mut data = vec![0u8; 25];
        data[12] = 255;
        let img = GrayscaleImage::new(5, 5, data).unwrap();
        let blurred = blur(&img, 2);
        assert!(blurred.pixel(2, 2) < 255);
        assert!(blurred.pixel(2, 2) > 0);
    }

    #[test]
    fn blur_with_k_one_is_identity() {
        let img = GrayscaleImage::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        let blurred = blur(&img, 1);
        assert_eq!(blurred.data(), img.data());
    }
}
