// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Scan session
//!
//! Carries the last analysis result from the "analyze" step to the "insert"
//! step. Owned by the caller; one session per user flow.

use super::hole::{HoleClass, HoleFeature, Position};

#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    instruction: Option<String>,
    matched_keyword: Option<String>,
    holes: Vec<HoleFeature>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever the previous scan left behind.
    pub fn record_scan(
        &mut self,
        instruction: Option<String>,
        matched_keyword: Option<String>,
        holes: Vec<HoleFeature>,
    ) {
        self.instruction = instruction;
        self.matched_keyword = matched_keyword;
        self.holes = holes;
    }

    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    pub fn matched_keyword(&self) -> Option<&str> {
        self.matched_keyword.as_deref()
    }

    pub fn holes(&self) -> &[HoleFeature] {
        &self.holes
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// Target positions of pending holes, optionally restricted to one class.
    pub fn targets(&self, class: Option<HoleClass>) -> Vec<Position> {
        self.holes
            .iter()
            .filter(|h| class.map_or(true, |c| h.hole_class == c))
            .map(|h| h.position)
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
