/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The Viterbi-style shortest-path signal extractor: the heart of the
//! digitization pipeline. Turns a binary trace mask into a dense 1-D
//! signal by finding the minimum-cost left-to-right path through one
//! candidate point per column.

use ecg_core::image::BinaryImage;
use ecg_core::signal::Signal;
use ecg_core::Point;

const MINIMUM_LOOK_BACK: usize = 1;
const OPTIMAL_ENDING_WIDTH: usize = 20;
const DISTANCE_WEIGHT: f64 = 0.5;

/// One cell of the dynamic-programming table: the lowest cumulative cost
/// reaching this candidate point, which predecessor achieved it (`None` at
/// a seed), and the incoming direction at this point (used as the
/// "previous angle" term when scoring this point's own successors).
#[derive(Copy, Clone, Debug)]
struct PathEntry {
    cost:        f64,
    predecessor: Option<(usize, usize)>,
    angle_in:    f64
}

/// A column index and within-column rank, indexing into the candidate /
/// DP arenas together.
type Position = (usize, usize);

/// For each column, the midpoint of every maximal run of set pixels, top
/// to bottom.
///
/// A run left open when the column ends contributes no candidate — it is
/// never closed by a trailing unset pixel, so it is dropped.
fn candidate_points(mask: &BinaryImage) -> Vec<Vec<ecg_core::Point>> {
    let (width, height) = mask.dimensions();
    let mut by_column = Vec::with_capacity(width);
    for x in 0..width {
        let mut points = Vec::new();
        let mut run_start: Option<usize> = None;
        for y in 0..height {
            let set = mask.pixel(x, y);
            match (set, run_start) {
                (true, None) => run_start = Some(y),
                (false, Some(start)) => {
                    points.push(ecg_core::Point::new(x as f64, ((start + y) / 2) as f64));
                    run_start = None;
                }
                _ => {}
            }
        }
        by_column.push(points);
    }
    by_column
}

/// Angle of the ray from `from` to `to`, in degrees, measured against the
/// horizontal (asin of the normalized vertical offset).
fn angle_between(from: &ecg_core::Point, to: &ecg_core::Point) -> f64 {
    let d = from.distance_to(to);
    if d == 0.0 {
        return 0.0;
    }
    ((to.y - from.y) / d).asin().to_degrees()
}

/// How similar two angles are, in `[0, 1]`: `1.0` when equal, `0.0` when
/// opposite.
fn angle_similarity(a: f64, b: f64) -> f64 {
    (180.0 - (b - a).abs()) / 180.0
}

/// Cost of extending a path from `from` (whose incoming direction was
/// `incoming_angle`) to `to`: half Euclidean distance, half angular
/// discontinuity.
fn transition_cost(from: &ecg_core::Point, to: &ecg_core::Point, incoming_angle: f64) -> f64 {
    let distance = from.distance_to(to);
    let angle = angle_between(from, to);
    let angle_penalty = 1.0 - angle_similarity(angle, incoming_angle);
    distance * DISTANCE_WEIGHT + angle_penalty * (1.0 - DISTANCE_WEIGHT)
}

/// Gather already-processed candidates within `[left, right)`, where `left`
/// starts at `right.saturating_sub(look_back)` and expands one column
/// further left at a time if that window is empty, until it finds
/// candidates or reaches column 0.
fn gather_adjacent(
    candidates: &[Vec<ecg_core::Point>], dp: &[Vec<PathEntry>], right: usize, look_back: usize
) -> Vec<(f64, Position, f64)> {
    let flatten = |left: usize, right: usize| -> Vec<(f64, Position, f64)> {
        let mut out = Vec::new();
        for col in left..right {
            for (rank, _) in candidates[col].iter().enumerate() {
                let entry = dp[col][rank];
                out.push((entry.cost, (col, rank), entry.angle_in));
            }
        }
        out
    };

    let mut left = right.saturating_sub(look_back);
    let mut result = flatten(left, right);
    while result.is_empty() && left > 0 {
        left -= 1;
        result = flatten(left, right);
    }
    result
}

/// Linearly interpolate `y` for every integer column strictly between
/// `from` and `to`, writing into `signal` wherever it is still NaN.
fn interpolate_gap(signal: &mut [f64], from: &ecg_core::Point, to: &ecg_core::Point) {
    let from_idx = from.index();
    let to_idx = to.index();
    if to_idx <= from_idx + 1 {
        return;
    }
    let span = (to_idx - from_idx) as f64;
    for x in (from_idx + 1)..to_idx {
        let frac = (x - from_idx) as f64 / span;
        let idx = x as usize;
        if signal[idx].is_nan() {
            signal[idx] = from.y + frac * (to.y - from.y);
        }
    }
}

/// Extract a 1-D signal from a binary trace mask via the Viterbi path
/// search. Returns `None` if the mask has no candidate points anywhere.
#[must_use]
pub fn extract_signal(mask: &BinaryImage) -> Option<Signal> {
    let (width, _) = mask.dimensions();
    let candidates = candidate_points(mask);
    if candidates.iter().all(Vec::is_empty) {
        return None;
    }

    let mut dp: Vec<Vec<PathEntry>> = candidates.iter().map(|col| vec![PathEntry { cost: 0.0, predecessor: None, angle_in: 0.0 }; col.len()]).collect();

    for col in 0..width {
        for rank in 0..candidates[col].len() {
            let point = candidates[col][rank];
            let adjacent = gather_adjacent(&candidates, &dp, col, MINIMUM_LOOK_BACK);
            if adjacent.is_empty() {
                dp[col][rank] = PathEntry { cost: 0.0, predecessor: None, angle_in: 0.0 };
                continue;
            }
            let mut best_cost = f64::INFINITY;
            let mut best_pos = adjacent[0].1;
            for (pred_cost, pred_pos, pred_angle) in &adjacent {
                let pred_point = candidates[pred_pos.0][pred_pos.1];
                let total = pred_cost + transition_cost(&pred_point, &point, *pred_angle);
                if total < best_cost {
                    best_cost = total;
                    best_pos = *pred_pos;
                }
            }
            let best_point = candidates[best_pos.0][best_pos.1];
            dp[col][rank] = PathEntry {
                cost:        best_cost,
                predecessor: Some(best_pos),
                angle_in:    angle_between(&best_point, &point)
            };
        }
    }

    let ending_candidates = gather_adjacent(&candidates, &dp, width, OPTIMAL_ENDING_WIDTH);
    let (_, mut current, _) = ending_candidates
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .expect("at least one candidate exists since candidate_points was non-empty");

    let mut path = Vec::new();
    loop {
        path.push(candidates[current.0][current.1]);
        match dp[current.0][current.1].predecessor {
            Some(pred) => current = pred,
            None => break
        }
    }
    path.reverse();

    let mut samples = vec![f64::NAN; width];
    for pair in path.windows(2) {
        interpolate_gap(&mut samples, &pair[0], &pair[1]);
    }
    for point in &path {
        samples[point.index() as usize] = point.y;
    }

    Some(Signal::from_vec(samples))
}

#[cfg(test)]
mod tests {
    use ecg_core::image::BinaryImage;

    use super::*;

    fn flatline_mask(width: usize, height: usize, y: usize) -> BinaryImage {
        let mut data = vec![0u8; width * height];
        for x in 0..width {
            data[y * width + x] = 1;
        }
        BinaryImage::new(width, height, data).unwrap()
    }

    #[test]
    fn extracts_flat_horizontal_line_exactly() {
        let mask = flatline_mask(100, 50, 25);
        let signal = extract_signal(&mask).expect("mask has candidates");
        assert_eq!(signal.len(), 100);
        for &sample in signal.as_slice() {
            assert!((sample - 25.0).abs() < 1e-9);
        }
    }

    #[test]
    fn blank_mask_returns_none() {
        let mask = BinaryImage::fill(false, 50, 50);
        assert!(extract_signal(&mask).is_none());
    }

    #[test]
    fn single_isolated_pixel_produces_single_sample() {
        let mut data = vec![0u8; 10 * 10];
        data[5 * 10 + 4] = 1; // column 4, row 5
        let mask = BinaryImage::new(10, 10, data).unwrap();
        let signal = extract_signal(&mask).expect("one candidate exists");
        assert!((signal.as_slice()[4] - 5.0).abs() < 1e-9);
        assert_eq!(signal.as_slice().iter().filter(|s| !s.is_nan()).count(), 1);
    }

    #[test]
    fn trace_touching_top_edge_yields_finite_zero_samples() {
        let mask = flatline_mask(20, 20, 0);
        let signal = extract_signal(&mask).expect("mask has candidates");
        for &sample in signal.as_slice() {
            assert!((sample - 0.0).abs() < 1e-9);
        }
    }

    #[test]
    fn diagonal_line_is_tracked_within_one_pixel() {
        let width = 60;
        let height = 60;
        let mut data = vec![0u8; width * height];
        for x in 0..width {
            let y = x / 2;
            if y < height {
                data[y * width + x] = 1;
            }
        }
        let mask = BinaryImage::new(width, height, data).unwrap();
        let signal = extract_signal(&mask).expect("mask has candidates");
        for x in 0..width {
            let expected = (x / 2) as f64;
            if !signal.as_slice()[x].is_nan() {
                assert!((signal.as_slice()[x] - expected).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn trailing_run_touching_bottom_edge_produces_no_candidate() {
        let mut data = vec![0u8; 10 * 10];
        // column 3 is set from row 7 through row 9 (the bottom edge), with
        // no trailing zero pixel, so the run is never closed.
        for y in 7..10 {
            data[y * 10 + 3] = 1;
        }
        // column 5 has an isolated, closed run so the mask still yields a
        // signal overall.
        data[2 * 10 + 5] = 1;
        let mask = BinaryImage::new(10, 10, data).unwrap();
        let signal = extract_signal(&mask).expect("mask has candidates");
        assert!(signal.as_slice()[3].is_nan());
    }
}
