// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters implementing [`Host`](crate::types::Host) for concrete trees.

#[cfg(feature = "dom_adapter")]
pub mod dom;
