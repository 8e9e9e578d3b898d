// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Argument validation for the public operations.
//!
//! Any failing check rejects the whole call before any state mutation. Guards against
//! non-string selectors and non-callable handlers are unnecessary here because those shapes
//! are unrepresentable in the API; what remains observable is the event type name and (in
//! the engine) whether the owning element resolves to a live host element.

/// Whether `event_type` is a usable event type name: non-empty, no whitespace.
pub fn valid_event_type(event_type: &str) -> bool {
    !event_type.is_empty() && !event_type.chars().any(char::is_whitespace)
}
