/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A dense, NaN-sentinel 1-D signal indexed by pixel column.
use std::collections::HashMap;

/// A dense 1-D array of floating point samples, one per pixel column of the
/// crop it was extracted from.
///
/// Columns the Viterbi extractor could not place a point at (or interpolate
/// across) hold `f64::NAN` rather than being omitted, so `len()` always
/// equals the width of the originating crop (and, after alignment, the
/// common length shared by every lead).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Signal {
    samples: Vec<f64>
}

impl Signal {
    /// A signal of `len` samples, all missing.
    #[must_use]
    pub fn filled_with_nan(len: usize) -> Signal {
        Signal { samples: vec![f64::NAN; len] }
    }

    #[must_use]
    pub const fn from_vec(samples: Vec<f64>) -> Signal {
        Signal { samples }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }

    /// True if every sample is non-NaN.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.samples.iter().all(|s| !s.is_nan())
    }

    /// Index of the first non-NaN sample, if any.
    #[must_use]
    pub fn first_valid_index(&self) -> Option<usize> {
        self.samples.iter().position(|s| !s.is_nan())
    }

    /// The most frequent integer bin among the non-NaN samples, used to
    /// zero-center the trace: the baseline of a paper ECG dominates the
    /// histogram far more than any deflection does.
    ///
    /// Returns `None` if every sample is NaN.
    #[must_use]
    pub fn mode(&self) -> Option<f64> {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for &s in &self.samples {
            if !s.is_nan() {
                *counts.entry(s.round() as i64).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(bin, _)| bin as f64)
    }

    /// Subtract `value` from every non-NaN sample, in place.
    pub fn shift(&mut self, value: f64) {
        for s in &mut self.samples {
            if !s.is_nan() {
                *s -= value;
            }
        }
    }

    /// Multiply every non-NaN sample by `factor`, in place.
    pub fn scale(&mut self, factor: f64) {
        for s in &mut self.samples {
            if !s.is_nan() {
                *s *= factor;
            }
        }
    }

    /// Prepend `count` samples of `fill_value`.
    #[must_use]
    pub fn pad_left(&self, count: usize, fill_value: f64) -> Signal {
        let mut samples = Vec::with_capacity(count + self.samples.len());
        samples.resize(count, fill_value);
        samples.extend_from_slice(&self.samples);
        Signal { samples }
    }

    /// Append `count` samples of `fill_value`.
    #[must_use]
    pub fn pad_right(&self, count: usize, fill_value: f64) -> Signal {
        let mut samples = self.samples.clone();
        samples.resize(samples.len() + count, fill_value);
        Signal { samples }
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Signal { samples }
    }
}
