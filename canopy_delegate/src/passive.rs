// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Passive-mode resolution: platform capability caching and per-registration inference.
//!
//! ## Overview
//!
//! Two separate questions are answered here:
//!
//! - does the platform honor the passive option at all? Probed from the host at most once per
//!   engine instance via [`PassiveProbe`], defaulting to unsupported.
//! - should a given registration be passive? Explicit option wins; otherwise inferred from
//!   the handler's [declaration](crate::types::Handler::preventing) — a handler that cancels
//!   events is non-passive, one that does not is passive. The resolved flag is fixed at add
//!   time and forms part of the registration key, so removals must resolve to the same value.
//!
//! When a registration is passive but the platform does not actually support passive
//! listeners (or the event's default is already prevented), the engine neutralizes
//! [`Event::prevent_default`](crate::types::Event::prevent_default) before invoking the
//! callback, preserving the passive contract.

use crate::types::{Handler, Host};

/// Cached once-per-engine answer to "does the platform honor the passive option?".
#[derive(Clone, Debug, Default)]
pub struct PassiveProbe {
    cached: Option<bool>,
}

impl PassiveProbe {
    /// Create an unprobed cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The platform answer, probing the host on first use and caching it afterwards.
    pub fn supported<H: Host>(&mut self, host: &H) -> bool {
        *self.cached.get_or_insert_with(|| host.passive_supported())
    }

    /// The cached answer, if the probe has run.
    pub fn cached(&self) -> Option<bool> {
        self.cached
    }
}

/// Resolve the passive flag for one registration.
///
/// An explicit option is used verbatim; otherwise the handler's declaration decides.
pub fn resolve<E, D>(explicit: Option<bool>, callback: &Handler<E, D>) -> bool {
    explicit.unwrap_or(!callback.prevents_default())
}
