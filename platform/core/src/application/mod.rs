// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application
//!
//! Workflows built on the platform port: hole analysis, template lookup,
//! instance diffing and batch placement.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Implements the remote workflows

pub mod batch_inserter;
pub mod geometry_analyzer;
pub mod instance_differ;
pub mod template_locator;
