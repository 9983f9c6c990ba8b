// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Hole features detected on part-studio geometry.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Classification, size codes and deduplication of holes

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Cylindrical faces at or above this diameter are not holes of interest.
pub const MAX_HOLE_DIAMETER_MM: f64 = 50.0;

/// Holes strictly below this diameter are treated as dowel-pin bores.
pub const PIN_CLASS_THRESHOLD_MM: f64 = 8.5;

/// ISO 273 medium-series clearance diameters, (thread, clearance mm).
const CLEARANCE_SERIES: &[(&str, f64)] = &[
    ("M3", 3.4),
    ("M4", 4.5),
    ("M5", 5.5),
    ("M6", 6.6),
    ("M8", 9.0),
    ("M10", 11.0),
    ("M12", 13.5),
    ("M14", 15.5),
    ("M16", 17.5),
    ("M20", 22.0),
    ("M24", 26.0),
    ("M30", 33.0),
    ("M36", 39.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoleClass {
    FastenerClearance,
    DowelPin,
}

impl HoleClass {
    pub fn from_diameter(diameter_mm: f64) -> Self {
        if diameter_mm < PIN_CLASS_THRESHOLD_MM {
            HoleClass::DowelPin
        } else {
            HoleClass::FastenerClearance
        }
    }

    /// Parse the tag emitted by the analysis script ("PIN" / "FASTENER").
    pub fn from_script_tag(tag: &str) -> Option<Self> {
        match tag {
            "PIN" => Some(HoleClass::DowelPin),
            "FASTENER" => Some(HoleClass::FastenerClearance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HoleClass::FastenerClearance => "fastener-clearance",
            HoleClass::DowelPin => "dowel-pin",
        }
    }
}

impl fmt::Display for HoleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HoleClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fastener" | "fastener-clearance" => Ok(HoleClass::FastenerClearance),
            "pin" | "dowel" | "dowel-pin" => Ok(HoleClass::DowelPin),
            other => Err(format!("unknown hole class '{}' (expected fastener or pin)", other)),
        }
    }
}

/// Point in the document's native length unit (metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates quantized to 4 decimal places, usable as a hash key.
    fn quantized(&self) -> (i64, i64, i64) {
        let q = |v: f64| (v * 10_000.0).round() as i64;
        (q(self.x), q(self.y), q(self.z))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleFeature {
    /// Diameter in millimetres, rounded to 2 decimals
    pub diameter: f64,
    pub part_name: String,
    pub hole_class: HoleClass,
    pub recommended_size_code: String,
    pub position: Position,
}

impl HoleFeature {
    /// Build a feature, rounding the diameter and deriving the size code.
    ///
    /// When the script did not report a class it is derived from the diameter.
    pub fn new(
        diameter_mm: f64,
        part_name: impl Into<String>,
        hole_class: Option<HoleClass>,
        position: Position,
    ) -> Self {
        let diameter = round_to(diameter_mm, 2);
        let hole_class = hole_class.unwrap_or_else(|| HoleClass::from_diameter(diameter));
        Self {
            diameter,
            part_name: part_name.into(),
            hole_class,
            recommended_size_code: recommended_size_code(hole_class, diameter),
            position,
        }
    }
}

/// Size code for the hardware that fits a hole.
///
/// Clearance holes resolve to the thread whose medium clearance is nearest;
/// pin bores report the nominal pin diameter (`D8` for an 8.0mm bore).
pub fn recommended_size_code(hole_class: HoleClass, diameter_mm: f64) -> String {
    match hole_class {
        HoleClass::DowelPin => format!("D{}", diameter_mm.round() as i64),
        HoleClass::FastenerClearance => CLEARANCE_SERIES
            .iter()
            .min_by(|a, b| {
                (a.1 - diameter_mm)
                    .abs()
                    .total_cmp(&(b.1 - diameter_mm).abs())
            })
            .map(|(thread, _)| thread.to_string())
            .unwrap_or_default(),
    }
}

/// Collapse features that describe the same physical hole.
///
/// Key is (position quantized to 4 decimals, class); the first occurrence wins
/// and input order is preserved.
pub fn dedup_holes(holes: Vec<HoleFeature>) -> Vec<HoleFeature> {
    let mut seen = HashSet::new();
    holes
        .into_iter()
        .filter(|hole| seen.insert((hole.position.quantized(), hole.hole_class)))
        .collect()
}

/// Hole tally for one part
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartHoleSummary {
    pub part_name: String,
    pub fastener_clearance: usize,
    pub dowel_pin: usize,
}

/// Count holes per part and class, parts in name order.
pub fn summarize_by_part(holes: &[HoleFeature]) -> Vec<PartHoleSummary> {
    let mut parts: BTreeMap<&str, PartHoleSummary> = BTreeMap::new();
    for hole in holes {
        let entry = parts
            .entry(hole.part_name.as_str())
            .or_insert_with(|| PartHoleSummary {
                part_name: hole.part_name.clone(),
                ..Default::default()
            });
        match hole.hole_class {
            HoleClass::FastenerClearance => entry.fastener_clearance += 1,
            HoleClass::DowelPin => entry.dowel_pin += 1,
        }
    }
    parts.into_values().collect()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
