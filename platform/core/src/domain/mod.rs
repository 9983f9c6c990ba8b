// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Value types and ports shared by the hole analysis and placement workflows.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements the platform-independent model

pub mod client_config;
pub mod credentials;
pub mod hole;
pub mod platform;
pub mod session;
pub mod tagged_value;
pub mod template;
