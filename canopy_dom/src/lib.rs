// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy DOM: a generational element tree for event delegation hosts.
//!
//! This crate is the concrete host side of the Canopy stack. It represents a hierarchy of
//! elements with tag/id/class data, answers minimal CSS-style selector queries against a single
//! element, and keeps per-element native listener bookkeeping (with a passive flag per listener)
//! so that delegation layers can install exactly one native listener per key and verify that
//! invariant from tests.
//!
//! It does not dispatch events itself. Propagation and handler invocation live in
//! `canopy_delegate`, which walks this tree through its `Host` trait (enable its `dom_adapter`
//! feature to wire the two together).
//!
//! ## API overview
//!
//! - [`Dom`]: container managing elements and the native listener registry.
//! - [`ElementData`]: per-element tag, id, and classes.
//! - [`NodeId`]: generational handle of an element.
//! - [`ListenerId`]: handle of an attached native listener, minted in attach order.
//! - [`selector`]: the matching rules for `tag`/`*`/`#id`/`.class` compounds and
//!   comma-separated lists.
//!
//! ## Minimal usage
//!
//! ```
//! use canopy_dom::{Dom, ElementData};
//!
//! let mut dom = Dom::new();
//! let toolbar = dom.insert(None, ElementData::new("div").with_id("toolbar"));
//! let save = dom.insert(Some(toolbar), ElementData::new("button").with_class("primary"));
//!
//! assert!(dom.matches(save, "button.primary"));
//! assert_eq!(dom.parent_of(save), Some(toolbar));
//!
//! let handle = dom.attach_listener(toolbar, "click", false).unwrap();
//! assert_eq!(dom.listeners(toolbar, "click"), vec![(handle, false)]);
//!
//! // Removing a subtree invalidates ids and drops its listeners.
//! dom.remove(toolbar);
//! assert!(!dom.is_alive(save));
//! assert_eq!(dom.total_listener_count(), 0);
//! ```

pub mod selector;
pub mod tree;
pub mod types;

pub use tree::Dom;
pub use types::{ElementData, ListenerId, NodeId};
