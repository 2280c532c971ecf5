/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The ten-step digitization pipeline: rotate, crop, extract, estimate grid,
//! scale, pad-align, preview.

use std::collections::BTreeMap;

use ecg_core::errors::DigitizeError;
use ecg_core::image::ColorImage;
use ecg_core::lead::LeadId;
use ecg_core::ops::{crop_color, rotate_color};
use ecg_core::params::InputParameters;
use ecg_core::signal::Signal;
use ecg_vision::grid::{detect_grid, GridDetectionMethod};
use ecg_vision::signal_detector::{detect_signal, SignalDetectionMethod};
use ecg_vision::{estimate_grid_frequency, extract_signal};

use crate::preview;

/// The background fill used when rotation uncovers image corners: ECG paper
/// is white, so white is the closest thing to a neutral border.
const ROTATION_BORDER: [u8; 3] = [255, 255, 255];

/// What [`digitize`] returns on success: per-lead aligned microvolt signals,
/// and per-lead overlay previews for every lead whose trace was extracted
/// (previews are only produced for leads that survived step 3, whether or
/// not that lead's own grid period could be estimated).
#[derive(Clone, Debug, PartialEq)]
pub struct DigitizeOutput {
    pub signals:  BTreeMap<LeadId, Signal>,
    pub previews: BTreeMap<LeadId, ColorImage>
}

/// One lead that made it through signal extraction: its crop (needed later
/// for the preview and for grid detection) and its raw, pixel-domain,
/// unscaled signal.
struct LeadExtraction {
    crop:       ColorImage,
    raw_signal: Signal
}

/// Apply `f` to every item in `items`, in parallel when the `rayon` feature
/// is enabled and sequentially otherwise. The two paths produce identical
/// results; which one runs is an implementation detail, not a change in
/// behavior.
fn map_items<T, R>(items: Vec<T>, f: impl Fn(T) -> R + Sync + Send) -> Vec<R>
where
    T: Send,
    R: Send
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        items.into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        items.into_iter().map(f).collect()
    }
}

/// Run the full digitization pipeline described in this crate's module
/// documentation over an already-decoded, already-rotated-or-not source
/// image and a set of lead parameters.
///
/// # Errors
/// Returns [`DigitizeError::EmptyLeadMap`] if `params.leads` is empty,
/// [`DigitizeError::AllSignalsFailed`] if every lead's Viterbi extraction
/// found no trace candidates, or [`DigitizeError::GridNotDetectable`] if no
/// lead's grid period could be estimated. A single lead's `Rectangle` not
/// fitting inside the (rotated) image also aborts the call, since that
/// signals a caller-supplied parameter is wrong rather than a lead that
/// merely failed to digitize.
pub fn digitize(
    image: &ColorImage, params: &InputParameters
) -> Result<DigitizeOutput, DigitizeError> {
    if params.leads.is_empty() {
        return Err(DigitizeError::EmptyLeadMap);
    }

    let rotated = rotate_color(image, params.rotation, ROTATION_BORDER);

    let lead_pairs: Vec<(LeadId, ecg_core::lead::Lead)> =
        params.leads.iter().map(|(&id, &lead)| (id, lead)).collect();
    let crops: Vec<(LeadId, Result<ColorImage, DigitizeError>)> =
        map_items(lead_pairs, |(id, lead)| (id, crop_color(&rotated, lead.rect)));

    // A rectangle that does not fit the rotated image is a parameter error,
    // not a per-lead extraction failure, and aborts the whole call.
    let mut crops_by_lead = BTreeMap::new();
    for (id, crop) in crops {
        crops_by_lead.insert(id, crop?);
    }

    let crop_pairs: Vec<(LeadId, ColorImage)> = crops_by_lead.into_iter().collect();
    let extraction_results: Vec<(LeadId, Option<LeadExtraction>)> =
        map_items(crop_pairs, |(id, crop)| {
            let mask = detect_signal(&crop, SignalDetectionMethod::default());
            let raw_signal = extract_signal(&mask);
            (id, raw_signal.map(|raw_signal| LeadExtraction { crop, raw_signal }))
        });

    let extractions: BTreeMap<LeadId, LeadExtraction> = extraction_results
        .into_iter()
        .filter_map(|(id, extraction)| extraction.map(|e| (id, e)))
        .collect();
    if extractions.is_empty() {
        return Err(DigitizeError::AllSignalsFailed);
    }

    let extraction_refs: Vec<(LeadId, &LeadExtraction)> =
        extractions.iter().map(|(&id, ext)| (id, ext)).collect();
    let frequency_results: Vec<(LeadId, Option<f64>)> = map_items(extraction_refs, |(id, ext)| {
        let grid_mask = detect_grid(&ext.crop, GridDetectionMethod::default());
        (id, estimate_grid_frequency(&grid_mask).ok())
    });

    let periods: Vec<f64> = frequency_results.into_iter().filter_map(|(_, p)| p).collect();
    if periods.is_empty() {
        return Err(DigitizeError::GridNotDetectable);
    }
    let mean_period = periods.iter().sum::<f64>() / periods.len() as f64;

    #[cfg(feature = "log")]
    log::debug!(
        "digitize: mean grid period {mean_period:.3}px across {} of {} leads",
        periods.len(),
        extractions.len()
    );

    let scale_pairs: Vec<(LeadId, Signal)> =
        extractions.iter().map(|(&id, ext)| (id, ext.raw_signal.clone())).collect();
    let scaled_results: Vec<(LeadId, Signal)> = map_items(scale_pairs, |(id, mut signal)| {
        ecg_vision::scaler::zero_center(&mut signal);
        ecg_vision::scaler::vertically_rescale(&mut signal, mean_period, params.volt_scale);
        (id, signal)
    });
    let scaled: BTreeMap<LeadId, Signal> = scaled_results.into_iter().collect();

    let sampling_period = ecg_vision::scaler::sampling_period(mean_period, params.time_scale);

    let pad_pairs: Vec<(LeadId, Signal)> = scaled.into_iter().collect();
    let left_padded_results: Vec<(LeadId, Signal)> = map_items(pad_pairs, |(id, signal)| {
        let start_time = params.leads[&id].start_time;
        let pad_count = (start_time / sampling_period).round().max(0.0) as usize;
        (id, signal.pad_left(pad_count, 0.0))
    });
    let left_padded: BTreeMap<LeadId, Signal> = left_padded_results.into_iter().collect();

    let max_len = left_padded.values().map(Signal::len).max().unwrap_or(0);
    let signals: BTreeMap<LeadId, Signal> = left_padded
        .into_iter()
        .map(|(id, signal)| {
            let pad_count = max_len - signal.len();
            (id, signal.pad_right(pad_count, 0.0))
        })
        .collect();

    let preview_refs: Vec<(LeadId, &LeadExtraction)> =
        extractions.iter().map(|(&id, ext)| (id, ext)).collect();
    let preview_results: Vec<(LeadId, ColorImage)> = map_items(preview_refs, |(id, ext)| {
        (id, preview::render(&ext.crop, &ext.raw_signal))
    });
    let previews: BTreeMap<LeadId, ColorImage> = preview_results.into_iter().collect();

    Ok(DigitizeOutput { signals, previews })
}
