// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! Adapters to the outside world: request signing, script rendering and the
//! HTTP client for the remote platform.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Implements domain ports

pub mod onshape_client;
pub mod script_template;
pub mod signing;
