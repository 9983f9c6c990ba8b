// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Holefit core
//!
//! Signed client for the remote CAD platform: hole analysis through the
//! remote geometry kernel and batch fastener placement in assemblies.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain types, workflows and the platform adapter

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
