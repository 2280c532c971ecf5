/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The parameters a caller supplies for one digitization call.

use std::collections::BTreeMap;

use crate::lead::{Lead, LeadId};

/// Everything the digitization pipeline needs besides the source image
/// itself: how much the paper is skewed, its time/voltage scales, and which
/// leads to extract.
///
/// `DEFAULT_TIME_SCALE`/`DEFAULT_VOLTAGE_SCALE` deliberately do not live
/// here — they belong to the caller-facing configuration layer (see
/// `ecg-cli`'s `config` module), not to the core, which only ever accepts
/// scales as explicit parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct InputParameters {
    /// Rotation to apply to the source image before cropping, in degrees.
    /// May be negative.
    pub rotation:   f64,
    /// Paper speed, millimeters per second. Must be positive.
    pub time_scale: f64,
    /// Paper voltage scale, millimeters per millivolt. Must be positive.
    pub volt_scale: f64,
    /// Which leads to digitize and where to find them. May be sparse (a
    /// subset of the twelve leads); an empty map is a caller error
    /// (`DigitizeError::EmptyLeadMap`).
    pub leads:      BTreeMap<LeadId, Lead>
}

impl InputParameters {
    #[must_use]
    pub fn new(rotation: f64, time_scale: f64, volt_scale: f64) -> InputParameters {
        InputParameters { rotation, time_scale, volt_scale, leads: BTreeMap::new() }
    }

    /// Add (or replace) a lead's region of interest and start time.
    #[must_use]
    pub fn with_lead(mut self, id: LeadId, lead: Lead) -> InputParameters {
        self.leads.insert(id, lead);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;

    #[test]
    fn builder_inserts_leads() {
        let params = InputParameters::new(0.0, 25.0, 10.0).with_lead(
            LeadId::II,
            Lead::new(Rectangle::new(0, 0, 100, 100), 0.0)
        );
        assert_eq!(params.leads.len(), 1);
        assert!(params.leads.contains_key(&LeadId::II));
    }
}
