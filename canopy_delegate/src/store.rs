// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration store: the nested (element → event type → passive lane) bookkeeping.
//!
//! ## Overview
//!
//! Each present (element, event type, passive) key holds a [`Bucket`]: the ordered list of
//! delegated entries plus the handle of the single native listener installed for that key.
//! The store maintains two structural invariants:
//!
//! - a present bucket is never empty;
//! - removing the last entry of a bucket removes the whole key, and any type or element maps
//!   left empty by that removal are deleted too — no empty leftover structures.
//!
//! The store is an explicit object owned by each [`Delegate`](crate::engine::Delegate)
//! instance; there is no process-wide registry, so independent engines can coexist (for
//! example in tests). Element keys are plain copyable ids and hold no strong reference to the
//! host's backing storage; [`Store::purge`] drops buckets whose element no longer resolves.

use std::collections::HashMap;
use std::hash::Hash;

use crate::types::{Handler, NativeHandle};

/// A single delegated registration.
pub struct Entry<E, D = ()> {
    /// Selector scoping the registration. Empty matches every event target.
    pub selector: String,
    /// The user callback. Identity (not closure contents) is compared on removal.
    pub callback: Handler<E, D>,
    /// Whether the registration is removed after its first invocation.
    pub once: bool,
}

impl<E, D> Clone for Entry<E, D> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            callback: self.callback.clone(),
            once: self.once,
        }
    }
}

impl<E, D> core::fmt::Debug for Entry<E, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entry")
            .field("selector", &self.selector)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

impl<E, D> Entry<E, D> {
    /// Whether this entry is the same registration as (selector, callback, once).
    ///
    /// All three must match: selector by equality, callback by shared allocation, and the
    /// once flag exactly.
    pub fn is_same_registration(
        &self,
        selector: &str,
        callback: &Handler<E, D>,
        once: bool,
    ) -> bool {
        self.selector == selector && self.callback.same_callback(callback) && self.once == once
    }
}

/// Entry list and native listener handle for one (element, event type, passive) key.
pub struct Bucket<E, D = ()> {
    /// Delegated entries in registration order (the invocation order at dispatch).
    pub entries: Vec<Entry<E, D>>,
    /// Handle of the single native listener installed for this key.
    pub handle: NativeHandle,
}

impl<E, D> core::fmt::Debug for Bucket<E, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bucket")
            .field("entries", &self.entries.len())
            .field("handle", &self.handle)
            .finish()
    }
}

/// Outcome of [`Store::remove`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RemoveOutcome {
    /// No bucket for the key, or no entry matched.
    NotFound,
    /// An entry was removed; the bucket still has entries.
    Removed,
    /// The last entry was removed; the key is gone and the native listener with this handle
    /// must be detached by the caller.
    RemovedLast(NativeHandle),
}

// Passive lanes: index 0 = non-passive, index 1 = passive.
type Lanes<E, D> = [Option<Bucket<E, D>>; 2];

/// The delegation bookkeeping structure.
///
/// See the [module docs](self) for the invariants.
pub struct Store<E, D = ()> {
    elements: HashMap<E, HashMap<String, Lanes<E, D>>>,
}

impl<E, D> core::fmt::Debug for Store<E, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("elements", &self.elements.len())
            .field("entries", &self.entry_count())
            .finish()
    }
}

impl<E, D> Default for Store<E, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, D> Store<E, D> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    const fn lane(passive: bool) -> usize {
        passive as usize
    }

    /// Whether no registrations exist at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements with at least one registration.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Total number of delegated entries across all keys.
    pub fn entry_count(&self) -> usize {
        self.elements
            .values()
            .flat_map(HashMap::values)
            .flat_map(|lanes| lanes.iter().flatten())
            .map(|bucket| bucket.entries.len())
            .sum()
    }
}

impl<E: Copy + Eq + Hash, D> Store<E, D> {
    /// The bucket for (element, event type, passive), if present.
    pub fn bucket(&self, el: E, event_type: &str, passive: bool) -> Option<&Bucket<E, D>> {
        self.elements
            .get(&el)?
            .get(event_type)?
            .get(Self::lane(passive))?
            .as_ref()
    }

    /// Create the bucket for a key with its first entry and the freshly installed native
    /// listener handle. The key must not already be present.
    pub fn create(
        &mut self,
        el: E,
        event_type: &str,
        passive: bool,
        handle: NativeHandle,
        entry: Entry<E, D>,
    ) {
        let lanes = self
            .elements
            .entry(el)
            .or_default()
            .entry(event_type.to_owned())
            .or_default();
        let slot = &mut lanes[Self::lane(passive)];
        debug_assert!(slot.is_none(), "bucket already exists for this key");
        *slot = Some(Bucket {
            entries: vec![entry],
            handle,
        });
    }

    /// Append an entry to an existing bucket, preserving registration order.
    ///
    /// Returns `false` (and drops nothing into the store) if the key has no bucket.
    pub fn append(&mut self, el: E, event_type: &str, passive: bool, entry: Entry<E, D>) -> bool {
        match self.bucket_mut(el, event_type, passive) {
            Some(bucket) => {
                bucket.entries.push(entry);
                true
            }
            None => false,
        }
    }

    /// Remove the first entry matching (selector, callback identity, once) under the key.
    ///
    /// When the removed entry was the last one, the key is deleted together with any type and
    /// element maps it leaves empty, and the native listener handle is reported so the caller
    /// can detach it.
    pub fn remove(
        &mut self,
        el: E,
        event_type: &str,
        passive: bool,
        selector: &str,
        callback: &Handler<E, D>,
        once: bool,
    ) -> RemoveOutcome {
        let Some(bucket) = self.bucket_mut(el, event_type, passive) else {
            return RemoveOutcome::NotFound;
        };
        let Some(index) = bucket
            .entries
            .iter()
            .position(|e| e.is_same_registration(selector, callback, once))
        else {
            return RemoveOutcome::NotFound;
        };
        if bucket.entries.len() > 1 {
            bucket.entries.remove(index);
            return RemoveOutcome::Removed;
        }
        let handle = bucket.handle;
        self.drop_key(el, event_type, passive);
        RemoveOutcome::RemovedLast(handle)
    }

    /// A snapshot of the entries for a key, for traversal that must tolerate removal of the
    /// entries being traversed.
    pub fn snapshot(&self, el: E, event_type: &str, passive: bool) -> Option<Vec<Entry<E, D>>> {
        self.bucket(el, event_type, passive)
            .map(|bucket| bucket.entries.clone())
    }

    /// Drop all buckets whose element no longer satisfies `is_alive`.
    ///
    /// The host discards native listeners together with their element, so there is nothing to
    /// detach; this only reclaims the bookkeeping. Returns the number of entries dropped.
    pub fn purge(&mut self, is_alive: impl Fn(E) -> bool) -> usize {
        let mut dropped = 0;
        self.elements.retain(|&el, types| {
            if is_alive(el) {
                return true;
            }
            dropped += types
                .values()
                .flat_map(|lanes| lanes.iter().flatten())
                .map(|bucket| bucket.entries.len())
                .sum::<usize>();
            false
        });
        dropped
    }

    fn bucket_mut(&mut self, el: E, event_type: &str, passive: bool) -> Option<&mut Bucket<E, D>> {
        self.elements
            .get_mut(&el)?
            .get_mut(event_type)?
            .get_mut(Self::lane(passive))?
            .as_mut()
    }

    // Delete a key and any empty parents it leaves behind.
    fn drop_key(&mut self, el: E, event_type: &str, passive: bool) {
        let Some(types) = self.elements.get_mut(&el) else {
            return;
        };
        if let Some(lanes) = types.get_mut(event_type) {
            lanes[Self::lane(passive)] = None;
            if lanes.iter().all(Option::is_none) {
                types.remove(event_type);
            }
        }
        if types.is_empty() {
            self.elements.remove(&el);
        }
    }
}
