/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Parsing the CLI's JSON lead-map configuration into
//! [`ecg_core::InputParameters`].
//!
//! The format is deliberately much smaller than the GUI editor's project
//! file (out of scope per `spec.md` §1): a top-level rotation angle, the
//! two paper scales, and a map of lead name to rectangle + start time. Every
//! numeric field that a human is expected to hand-type is stored as a JSON
//! string rather than a number, and validated with [`is_plain_number`]
//! before being parsed — the same role the original implementation's
//! `scripts/utility.py::isFloat` played for its own hand-typed inputs.

use std::collections::BTreeMap;

use ecg_core::geometry::Rectangle;
use ecg_core::lead::{Lead, LeadId};
use ecg_core::params::InputParameters;
use serde::Deserialize;

use crate::errors::CliError;

/// Standard clinical paper speed, millimeters per second.
pub const DEFAULT_TIME_SCALE: f64 = 25.0;
/// Standard clinical voltage scale, millimeters per millivolt.
pub const DEFAULT_VOLTAGE_SCALE: f64 = 10.0;

/// A rectangle as written in the config file: plain JSON integers, since
/// these come from a region picked on screen rather than hand-typed.
#[derive(Deserialize)]
struct RectConfig {
    x:      usize,
    y:      usize,
    width:  usize,
    height: usize
}

#[derive(Deserialize)]
struct LeadConfig {
    rect: RectConfig,
    /// Hand-typed seconds offset, e.g. `"0.08"`. Validated with
    /// [`is_plain_number`] before being parsed.
    #[serde(rename = "startTime")]
    start_time: String
}

#[derive(Deserialize)]
struct DigitizeConfig {
    /// Hand-typed degrees, may carry a leading `-`.
    rotation: String,
    #[serde(rename = "timeScaleMmPerS")]
    time_scale_mm_per_s: Option<String>,
    #[serde(rename = "voltScaleMmPerMv")]
    volt_scale_mm_per_mv: Option<String>,
    leads: BTreeMap<String, LeadConfig>
}

/// Iteratively validate that `s` is a plain decimal numeral: an optional
/// leading `-`, at least one digit, and at most one `.` which must itself
/// be followed by at least one digit.
///
/// This is a two-state automaton (`seen_digit`, `period_allowed`) rather
/// than the character-by-character recursive descent the original
/// implementation used for the equivalent check — the recursion there was
/// tail-style and maps directly onto this loop.
#[must_use]
pub fn is_plain_number(s: &str) -> bool {
    let mut chars = s.chars().peekable();
    if chars.peek() == Some(&'-') {
        chars.next();
    }

    let mut seen_digit = false;
    let mut period_allowed = true;
    for c in chars {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && period_allowed {
            period_allowed = false;
        } else {
            return false;
        }
    }
    seen_digit
}

fn parse_number(path: &str, field: &str, raw: &str) -> Result<f64, CliError> {
    if !is_plain_number(raw) {
        return Err(CliError::Config {
            path:   path.to_string(),
            reason: format!("field '{field}' is not a plain decimal number: '{raw}'")
        });
    }
    raw.parse::<f64>().map_err(|e| CliError::Config {
        path:   path.to_string(),
        reason: format!("field '{field}' failed to parse despite passing validation: {e}")
    })
}

/// Parse a lead-map configuration document into [`InputParameters`].
///
/// # Errors
/// Returns [`CliError::Config`] if the document is not valid JSON for this
/// shape, if a lead name is not one of the twelve [`LeadId`] symbols, or if
/// any hand-typed numeric field fails [`is_plain_number`].
pub fn parse(path: &str, json: &str) -> Result<InputParameters, CliError> {
    let config: DigitizeConfig = serde_json::from_str(json).map_err(|e| CliError::Config {
        path:   path.to_string(),
        reason: e.to_string()
    })?;

    let rotation = parse_number(path, "rotation", &config.rotation)?;
    let time_scale = match config.time_scale_mm_per_s {
        Some(raw) => parse_number(path, "timeScaleMmPerS", &raw)?,
        None => DEFAULT_TIME_SCALE
    };
    let volt_scale = match config.volt_scale_mm_per_mv {
        Some(raw) => parse_number(path, "voltScaleMmPerMv", &raw)?,
        None => DEFAULT_VOLTAGE_SCALE
    };

    let mut params = InputParameters::new(rotation, time_scale, volt_scale);
    for (name, lead) in config.leads {
        let id = LeadId::from_name(&name).ok_or_else(|| CliError::Config {
            path:   path.to_string(),
            reason: format!("'{name}' is not a recognized lead name")
        })?;
        let start_time = parse_number(path, &format!("leads.{name}.startTime"), &lead.start_time)?;
        let rect = Rectangle::new(lead.rect.x, lead.rect.y, lead.rect.width, lead.rect.height);
        params = params.with_lead(id, Lead::new(rect, start_time));
    }

    if params.leads.is_empty() {
        return Err(CliError::Config {
            path:   path.to_string(),
            reason: "config named no leads".to_string()
        });
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number_accepts_integers_decimals_and_negatives() {
        assert!(is_plain_number("25"));
        assert!(is_plain_number("25.0"));
        assert!(is_plain_number("-5.25"));
        assert!(is_plain_number("0"));
    }

    #[test]
    fn plain_number_rejects_malformed_input() {
        assert!(!is_plain_number(""));
        assert!(!is_plain_number("-"));
        assert!(!is_plain_number("1.2.3"));
        assert!(!is_plain_number("1e5"));
        assert!(!is_plain_number("abc"));
        assert!(!is_plain_number("."));
    }

    #[test]
    fn parses_a_minimal_valid_config() {
        let json = r#"{
            "rotation": "0",
            "leads": {
                "I": { "rect": { "x": 0, "y": 0, "width": 100, "height": 50 }, "startTime": "0" },
                "II": { "rect": { "x": 0, "y": 50, "width": 100, "height": 50 }, "startTime": "0.08" }
            }
        }"#;
        let params = parse("test.json", json).expect("valid config parses");
        assert_eq!(params.time_scale, DEFAULT_TIME_SCALE);
        assert_eq!(params.volt_scale, DEFAULT_VOLTAGE_SCALE);
        assert_eq!(params.leads.len(), 2);
        assert!((params.leads[&LeadId::II].start_time - 0.08).abs() < 1e-9);
    }

    #[test]
    fn rejects_unrecognized_lead_name() {
        let json = r#"{
            "rotation": "0",
            "leads": { "VX": { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 }, "startTime": "0" } }
        }"#;
        assert!(parse("test.json", json).is_err());
    }

    #[test]
    fn rejects_malformed_numeric_field() {
        let json = r#"{
            "rotation": "3.14e0",
            "leads": { "I": { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 }, "startTime": "0" } }
        }"#;
        assert!(parse("test.json", json).is_err());
    }

    #[test]
    fn empty_lead_map_is_rejected() {
        let json = r#"{ "rotation": "0", "leads": {} }"#;
        assert!(parse("test.json", json).is_err());
    }
}
