// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] implementation for the [`canopy_dom`] element tree.
//!
//! [`NodeId`]s are already small copyable generational keys, and the tree's listener registry
//! mints [`ListenerId`]s from a monotonic counter, so both sides of the contract map directly:
//! the listener id's raw counter value becomes the [`NativeHandle`].

use canopy_dom::{Dom, ListenerId, NodeId};

use crate::types::{Host, NativeHandle};

impl Host for Dom {
    type Element = NodeId;

    fn root(&self) -> NodeId {
        Dom::root(self)
    }

    fn is_element(&self, el: NodeId) -> bool {
        self.is_alive(el)
    }

    fn parent_of(&self, el: NodeId) -> Option<NodeId> {
        Dom::parent_of(self, el)
    }

    fn matches(&self, el: NodeId, selector: &str) -> bool {
        Dom::matches(self, el, selector)
    }

    fn attach_native(&mut self, el: NodeId, event_type: &str, passive: bool) -> Option<NativeHandle> {
        self.attach_listener(el, event_type, passive)
            .map(|id| NativeHandle::new(id.raw()))
    }

    fn detach_native(
        &mut self,
        el: NodeId,
        _event_type: &str,
        _passive: bool,
        handle: NativeHandle,
    ) -> bool {
        self.detach_listener(el, ListenerId::from_raw(handle.raw()))
    }

    fn attached(&self, el: NodeId, event_type: &str) -> Vec<(NativeHandle, bool)> {
        self.listeners(el, event_type)
            .into_iter()
            .map(|(id, passive)| (NativeHandle::new(id.raw()), passive))
            .collect()
    }

    fn passive_supported(&self) -> bool {
        self.passive_honored()
    }
}
