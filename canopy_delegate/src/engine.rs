// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegation engine: the add/remove/dispatch protocol over the registration store.
//!
//! ## Overview
//!
//! [`Delegate::on`] and [`Delegate::off`] mutate the [`Store`](crate::store::Store) and keep
//! exactly one native listener installed per present (element, event type, passive) key.
//! [`Delegate::dispatch`] is the native-event entry point: it walks the propagation chain from
//! the target up through its ancestors and services each attached key from the store.
//! [`Delegate::emit`] builds a bubbling, cancelable synthetic event and feeds it to the same
//! dispatch path.
//!
//! ## Ordering
//!
//! - Entries under one key fire in registration order.
//! - Keys on one element fire in native-attach order.
//! - Elements are visited inner → outer (target first).
//!
//! ## Failure signaling
//!
//! No errors propagate: malformed arguments are logged and reported as `false`, removals that
//! find nothing are silently `false`, and platform gaps around passive listeners are absorbed
//! by neutralizing the event's cancelation (see [`passive`](crate::passive)).

use log::warn;

use crate::passive::{self, PassiveProbe};
use crate::store::{Entry, RemoveOutcome, Store};
use crate::types::{Event, Handler, Host, NativeHandle, Options};
use crate::validate;

/// Selector-scoped event delegation over a host tree.
///
/// Each engine owns its registration store and its passive capability cache; independent
/// engines over the same host do not share state.
pub struct Delegate<H: Host, D = ()> {
    store: Store<H::Element, D>,
    probe: PassiveProbe,
}

impl<H: Host, D> core::fmt::Debug for Delegate<H, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Delegate")
            .field("store", &self.store)
            .field("probe", &self.probe)
            .finish()
    }
}

impl<H: Host, D> Default for Delegate<H, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host, D> Delegate<H, D> {
    /// Create an engine with an empty store and an unprobed passive capability cache.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            probe: PassiveProbe::new(),
        }
    }

    /// Register a delegated listener.
    ///
    /// `selector` scopes the registration to matching descendants of the owning element
    /// (`options.element`, defaulting to the host root); the empty selector matches every
    /// event target. The first registration for a (element, event type, passive) key installs
    /// one native listener; later ones append to it.
    ///
    /// Returns `true` on registration, `false` (with a warning logged) on invalid arguments.
    /// Once validation passes, appending never fails.
    pub fn on(
        &mut self,
        host: &mut H,
        event_type: &str,
        selector: &str,
        callback: &Handler<H::Element, D>,
        options: Options<H::Element>,
    ) -> bool {
        if !validate::valid_event_type(event_type) {
            warn!("couldn't attach listener: invalid event type {event_type:?}");
            return false;
        }
        let element = options.element.unwrap_or_else(|| host.root());
        if !host.is_element(element) {
            warn!("couldn't attach listener: {element:?} is not a live element");
            return false;
        }
        let passive = passive::resolve(options.passive, callback);
        let entry = Entry {
            selector: selector.to_owned(),
            callback: callback.clone(),
            once: options.once,
        };
        if self.store.bucket(element, event_type, passive).is_some() {
            let appended = self.store.append(element, event_type, passive, entry);
            debug_assert!(appended, "bucket vanished between lookup and append");
            return true;
        }
        let Some(handle) = host.attach_native(element, event_type, passive) else {
            warn!("couldn't attach listener: native attach failed on {element:?}");
            return false;
        };
        self.store.create(element, event_type, passive, handle, entry);
        true
    }

    /// Remove a listener previously registered with [`Delegate::on`].
    ///
    /// The (event type, selector, callback identity, once, element) must match the
    /// registration exactly, and the passive flag must resolve to the same value it resolved
    /// to at add time. Removing the last entry for a key detaches its native listener and
    /// deletes the key.
    ///
    /// Returns `true` iff an entry was removed. A lookup that finds nothing is silently
    /// `false`; malformed arguments are logged.
    pub fn off(
        &mut self,
        host: &mut H,
        event_type: &str,
        selector: &str,
        callback: &Handler<H::Element, D>,
        options: Options<H::Element>,
    ) -> bool {
        if !validate::valid_event_type(event_type) {
            warn!("couldn't detach listener: invalid event type {event_type:?}");
            return false;
        }
        let element = options.element.unwrap_or_else(|| host.root());
        if !host.is_element(element) {
            warn!("couldn't detach listener: {element:?} is not a live element");
            return false;
        }
        let passive = passive::resolve(options.passive, callback);
        match self
            .store
            .remove(element, event_type, passive, selector, callback, options.once)
        {
            RemoveOutcome::NotFound => false,
            RemoveOutcome::Removed => true,
            RemoveOutcome::RemovedLast(handle) => {
                host.detach_native(element, event_type, passive, handle);
                true
            }
        }
    }

    /// Construct and dispatch a bubbling, cancelable synthetic event carrying `detail` from
    /// `element` (the host root if `None`).
    ///
    /// Returns `true` once dispatched, regardless of what listeners do with the event, and
    /// `false` (silently, with no side effects) on invalid arguments.
    pub fn emit(
        &mut self,
        host: &mut H,
        event_type: &str,
        element: Option<H::Element>,
        detail: Option<D>,
    ) -> bool {
        if !validate::valid_event_type(event_type) {
            return false;
        }
        let element = element.unwrap_or_else(|| host.root());
        if !host.is_element(element) {
            return false;
        }
        let mut event = Event::custom(event_type, element, detail);
        self.dispatch(host, &mut event);
        true
    }

    /// Dispatch a native event through the delegation store.
    ///
    /// The propagation chain is the target and, if the event bubbles, its ancestors up to the
    /// root. At each element, the host's attached native listeners for the event type are
    /// taken in attach order, and each one's entry list is re-read from the store at this
    /// point in time (not frozen at install time).
    pub fn dispatch(&mut self, host: &mut H, event: &mut Event<H::Element, D>) {
        let event_type = event.event_type.clone();
        let mut chain = vec![event.target];
        if event.bubbles() {
            let mut cur = event.target;
            while let Some(parent) = host.parent_of(cur) {
                chain.push(parent);
                cur = parent;
            }
        }
        for owner in chain {
            event.current_target = Some(owner);
            for (handle, passive) in host.attached(owner, &event_type) {
                self.run_key(host, owner, &event_type, passive, handle, event);
            }
        }
        event.current_target = None;
    }

    /// Drop registrations whose owning element is no longer alive in the host.
    ///
    /// The host discards native listeners together with their element, so this only reclaims
    /// bookkeeping. Returns the number of entries dropped.
    pub fn purge(&mut self, host: &H) -> usize {
        self.store.purge(|el| host.is_element(el))
    }

    /// Total number of delegated registrations currently held.
    pub fn registration_count(&self) -> usize {
        self.store.entry_count()
    }

    /// The registration store, for inspection.
    pub fn store(&self) -> &Store<H::Element, D> {
        &self.store
    }

    // Service one (element, event type, passive) key for the event being dispatched.
    fn run_key(
        &mut self,
        host: &mut H,
        owner: H::Element,
        event_type: &str,
        passive: bool,
        handle: NativeHandle,
        event: &mut Event<H::Element, D>,
    ) {
        let Some(bucket) = self.store.bucket(owner, event_type, passive) else {
            return;
        };
        debug_assert_eq!(
            bucket.handle, handle,
            "store and host listener bookkeeping diverged"
        );
        // Snapshot: one-shot removal below must not skip or duplicate sibling entries.
        let entries = bucket.entries.clone();
        for entry in &entries {
            let target = if entry.selector.is_empty() {
                Some(event.target)
            } else {
                host.closest_within(event.target, &entry.selector, owner)
            };
            let Some(target) = target else {
                continue;
            };
            if passive && (!self.probe.supported(host) || event.default_prevented()) {
                event.neutralize_cancelation();
            }
            entry.callback.call(target, event);
            if entry.once
                && let RemoveOutcome::RemovedLast(h) = self.store.remove(
                    owner,
                    event_type,
                    passive,
                    &entry.selector,
                    &entry.callback,
                    true,
                )
            {
                host.detach_native(owner, event_type, passive, h);
            }
        }
    }
}
