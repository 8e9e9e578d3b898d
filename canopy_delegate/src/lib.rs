// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Delegate: selector-scoped event delegation for element trees.
//!
//! ## Overview
//!
//! Instead of attaching one native listener per interactive element, register
//! (event type, selector, callback) triples scoped to an ancestor element. The engine
//! installs a single native listener per (element, event type, passive) key on the host
//! tree and, when an event arrives, resolves the actual delegation target by walking from
//! the event target toward the owning element looking for the nearest selector match.
//!
//! ## Registration keys
//!
//! A registration is identified by its event type, selector string, callback identity
//! (shared [`Handler`] allocation), once flag, owning element, and resolved passive flag.
//! Removal via [`Delegate::off`] must reproduce all of them; a lookup that finds nothing
//! is silently a no-op.
//!
//! ## Passive listeners
//!
//! The passive flag is part of the key and is resolved at registration time: an explicit
//! [`Options::passive`] wins, otherwise it is inferred from the handler's declaration
//! ([`Handler::new`] is passive, [`Handler::preventing`] is not). On platforms that do not
//! honor the passive option, the engine preserves the passive contract itself by
//! neutralizing [`Event::prevent_default`] before passive callbacks run.
//!
//! ## One-shot handlers
//!
//! [`Options::once`] removes the registration after its first invocation, detaching the
//! native listener when it was the last entry for its key.
//!
//! ## Hosts
//!
//! The engine is generic over [`Host`], the contract a UI tree implements: structure
//! queries for target resolution plus a native listener registry. The `dom_adapter`
//! feature implements it for the `canopy_dom` element tree.
//!
//! ## Minimal usage
//!
//! ```
//! use canopy_delegate::{Delegate, Handler, Host, Options};
//!
//! /// Wire a delegated click handler onto any host tree.
//! fn install<H: Host>(host: &mut H, delegate: &mut Delegate<H>) {
//!     let save = Handler::new(|target, _event| {
//!         // react to the click resolved to `target`
//!         let _ = target;
//!     });
//!     delegate.on(host, "click", "button.save", &save, Options::default());
//!
//!     // Synthetic events travel the same dispatch path as native ones.
//!     delegate.emit(host, "click", None, None);
//!
//!     delegate.off(host, "click", "button.save", &save, Options::default());
//! }
//! # struct Nowhere;
//! # impl Host for Nowhere {
//! #     type Element = u32;
//! #     fn root(&self) -> u32 { 0 }
//! #     fn is_element(&self, _: u32) -> bool { true }
//! #     fn parent_of(&self, _: u32) -> Option<u32> { None }
//! #     fn matches(&self, _: u32, _: &str) -> bool { false }
//! #     fn attach_native(&mut self, _: u32, _: &str, _: bool) -> Option<canopy_delegate::NativeHandle> {
//! #         Some(canopy_delegate::NativeHandle::new(0))
//! #     }
//! #     fn detach_native(&mut self, _: u32, _: &str, _: bool, _: canopy_delegate::NativeHandle) -> bool { true }
//! #     fn attached(&self, _: u32, _: &str) -> Vec<(canopy_delegate::NativeHandle, bool)> { Vec::new() }
//! # }
//! # install(&mut Nowhere, &mut Delegate::new());
//! ```

pub mod adapters;
pub mod engine;
pub mod passive;
pub mod store;
pub mod types;
pub mod validate;

pub use engine::Delegate;
pub use types::{Event, EventFlags, Handler, Host, NativeHandle, Options};
