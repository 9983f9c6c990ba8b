// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Script Template Engine
//!
//! Renders the embedded geometry-kernel scripts, using Handlebars for
//! placeholder substitution.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Turn the embedded hole-scan script into the submitted source
//! - **Integration:** `assets/hole_scan.fs` → featurescript endpoint
//!
//! # Supported Placeholders
//!
//! - `{{{part_filter}}}` - Part-name keyword as a quoted string literal
//! - `{{max_diameter_mm}}` - Largest diameter (exclusive) reported as a hole
//! - `{{pin_threshold_mm}}` - Diameters below this are tagged `PIN`

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::hole::{MAX_HOLE_DIAMETER_MM, PIN_CLASS_THRESHOLD_MM};

const HOLE_SCAN_TEMPLATE: &str = "hole_scan";
const HOLE_SCAN_SOURCE: &str = include_str!("../../assets/hole_scan.fs");

#[derive(Debug, Serialize)]
struct HoleScanContext {
    part_filter: String,
    max_diameter_mm: f64,
    pin_threshold_mm: f64,
}

pub struct ScriptTemplateEngine {
    handlebars: Handlebars<'static>,
}

impl ScriptTemplateEngine {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Every placeholder must be supplied
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(HOLE_SCAN_TEMPLATE, HOLE_SCAN_SOURCE)
            .context("Invalid hole scan script template")?;
        Ok(Self { handlebars })
    }

    /// Render the hole-scan script, restricted to parts whose name contains
    /// `part_filter` when one is given. The keyword is passed through
    /// verbatim; only `None` or `""` disables filtering.
    pub fn render_hole_scan(&self, part_filter: Option<&str>) -> Result<String> {
        let keyword = part_filter.unwrap_or_default();
        // JSON string literals are valid script string literals
        let part_filter = serde_json::to_string(keyword).context("Failed to quote part filter")?;

        let context = HoleScanContext {
            part_filter,
            max_diameter_mm: MAX_HOLE_DIAMETER_MM,
            pin_threshold_mm: PIN_CLASS_THRESHOLD_MM,
        };
        self.handlebars
            .render(HOLE_SCAN_TEMPLATE, &context)
            .context("Failed to render hole scan script")
    }
}
