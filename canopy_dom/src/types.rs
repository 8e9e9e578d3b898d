// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: element identifiers, listener identifiers, and element data.

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Dom::is_alive`](crate::tree::Dom::is_alive) to check whether a `NodeId` still refers to a
/// live element. Stale `NodeId`s never alias a different live element because the generation must
/// match.
///
/// Because a `NodeId` is only an index, holding one (for example as a key in a delegation store)
/// does not keep the element's backing slot alive: once the element is removed the id simply stops
/// resolving.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a native listener attached to an element.
///
/// Ids are minted from a per-tree monotonic counter, so they also encode attach order:
/// a listener attached later has a larger id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Rebuild an id from its raw counter value (see [`ListenerId::raw`]).
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value backing this id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Element description: tag name, optional id, and class list.
///
/// This is the data the [selector matcher](crate::selector) tests against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, e.g. `"button"`.
    pub tag: String,
    /// Optional element id, matched by `#id` selectors.
    pub id: Option<String>,
    /// Class list, matched by `.class` selectors.
    pub classes: Vec<String>,
}

impl ElementData {
    /// Create element data with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
        }
    }

    /// Set the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class to the class list.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
