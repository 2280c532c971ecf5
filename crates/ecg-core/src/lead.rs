/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The twelve standard ECG leads and the region-of-interest + timing
//! metadata the caller supplies for each.

use crate::geometry::Rectangle;

/// The twelve standardized electrical views of the heart recorded on a
/// standard 12-lead ECG chart.
///
/// The enum's declaration order is its canonical ordinal order: output
/// signals and export columns are always emitted `I, II, III, aVR, aVL,
/// aVF, V1..V6` regardless of the order leads were supplied in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadId {
    I,
    II,
    III,
    AVR,
    AVL,
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6
}

impl LeadId {
    /// All twelve leads in canonical ordinal order.
    pub const ALL: [LeadId; 12] = [
        LeadId::I,
        LeadId::II,
        LeadId::III,
        LeadId::AVR,
        LeadId::AVL,
        LeadId::AVF,
        LeadId::V1,
        LeadId::V2,
        LeadId::V3,
        LeadId::V4,
        LeadId::V5,
        LeadId::V6
    ];

    /// The lead's stable ordinal, 0–11, matching `ALL`'s indexing.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            LeadId::I => 0,
            LeadId::II => 1,
            LeadId::III => 2,
            LeadId::AVR => 3,
            LeadId::AVL => 4,
            LeadId::AVF => 5,
            LeadId::V1 => 6,
            LeadId::V2 => 7,
            LeadId::V3 => 8,
            LeadId::V4 => 9,
            LeadId::V5 => 10,
            LeadId::V6 => 11
        }
    }

    /// The symbolic name as printed in clinical reports, e.g. `"aVR"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LeadId::I => "I",
            LeadId::II => "II",
            LeadId::III => "III",
            LeadId::AVR => "aVR",
            LeadId::AVL => "aVL",
            LeadId::AVF => "aVF",
            LeadId::V1 => "V1",
            LeadId::V2 => "V2",
            LeadId::V3 => "V3",
            LeadId::V4 => "V4",
            LeadId::V5 => "V5",
            LeadId::V6 => "V6"
        }
    }

    /// Parse a lead name as printed by [`LeadId::name`]. Returns `None` for
    /// anything else.
    #[must_use]
    pub fn from_name(name: &str) -> Option<LeadId> {
        Self::ALL.into_iter().find(|lead| lead.name() == name)
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The region of interest and temporal offset for a single lead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lead {
    /// Where to crop this lead's trace out of the (rotated) source image.
    pub rect:       Rectangle,
    /// Seconds into the recording this lead's crop begins at, used to
    /// left-pad the extracted signal so all leads align temporally.
    pub start_time: f64
}

impl Lead {
    #[must_use]
    pub const fn new(rect: Rectangle, start_time: f64) -> Lead {
        Lead { rect, start_time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_stable_and_dense() {
        for (i, lead) in LeadId::ALL.iter().enumerate() {
            assert_eq!(lead.ordinal(), i);
        }
    }

    #[test]
    fn name_round_trips() {
        for lead in LeadId::ALL {
            assert_eq!(LeadId::from_name(lead.name()), Some(lead));
        }
        assert_eq!(LeadId::from_name("bogus"), None);
    }

    #[test]
    fn canonical_order_is_clinical_order() {
        let names: Vec<&str> = LeadId::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            vec!["I", "II", "III", "aVR", "aVL", "aVF", "V1", "V2", "V3", "V4", "V5", "V6"]
        );
    }
}
