// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, element data, and the native listener registry.

use crate::selector;
use crate::types::{ElementData, ListenerId, NodeId};

/// Top-level element tree.
///
/// Elements live in a slot arena with generation counters. Removing an element frees its slot;
/// slots are reused with a bumped generation so stale [`NodeId`]s never alias a live element.
///
/// The tree owns the document root, created at construction. The root cannot be removed, which
/// gives delegation layers a stable default element to scope listeners to.
pub struct Dom {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    next_listener_id: u64,
}

impl core::fmt::Debug for Dom {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Dom")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("listeners", &self.total_listener_count())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct NativeListener {
    id: ListenerId,
    event_type: String,
    passive: bool,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: ElementData,
    listeners: Vec<NativeListener>, // attach order
}

impl Node {
    fn new(generation: u32, data: ElementData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
            listeners: Vec::new(),
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a tree containing only the document root (tag `html`).
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            next_listener_id: 0,
        };
        dom.root = dom.alloc(ElementData::new("html"));
        dom
    }

    /// The document root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Insert a new element as a child of `parent` (or of the root if `None`).
    ///
    /// A stale `parent` falls back to the root.
    pub fn insert(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let parent = parent.filter(|&p| self.is_alive(p)).unwrap_or(self.root);
        let id = self.alloc(data);
        self.link_parent(id, parent);
        id
    }

    /// Remove an element and its whole subtree, including any attached listeners.
    ///
    /// Removing the root or a stale id is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
    }

    /// Reparent `id` under `new_parent` (or under the root if `None`).
    ///
    /// No-op for the root or stale ids. Caller must not reparent a node under its own subtree.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if id == self.root || !self.is_alive(id) {
            return;
        }
        let new_parent = new_parent.filter(|&p| self.is_alive(p)).unwrap_or(self.root);
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        self.link_parent(id, new_parent);
    }

    /// Parent of `id`, or `None` for the root or a stale id.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of `id` in insertion order (empty for stale ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element data for `id`, if alive.
    pub fn data(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).map(|n| &n.data)
    }

    /// Whether `id` is alive and matches the [selector](crate::selector) string.
    ///
    /// The empty selector matches nothing here; "match everything" is a delegation-layer
    /// convention applied before selector matching.
    pub fn matches(&self, id: NodeId, sel: &str) -> bool {
        self.node(id).is_some_and(|n| selector::matches(&n.data, sel))
    }

    /// Attach a native listener for `event_type` to `id`, returning its handle.
    ///
    /// Returns `None` if `id` is stale. Listener handles are minted in attach order.
    /// The passive option is honored (see [`Dom::passive_honored`]).
    pub fn attach_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        passive: bool,
    ) -> Option<ListenerId> {
        let listener_id = ListenerId(self.next_listener_id);
        let node = self.node_mut(id)?;
        node.listeners.push(NativeListener {
            id: listener_id,
            event_type: event_type.to_owned(),
            passive,
        });
        self.next_listener_id += 1;
        Some(listener_id)
    }

    /// Detach the native listener with the given handle from `id`.
    ///
    /// Returns `true` if a listener was removed.
    pub fn detach_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|l| l.id != listener);
        node.listeners.len() != before
    }

    /// Native listeners for `event_type` on `id`, in attach order.
    pub fn listeners(&self, id: NodeId, event_type: &str) -> Vec<(ListenerId, bool)> {
        self.node(id)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|l| l.event_type == event_type)
                    .map(|l| (l.id, l.passive))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of native listeners attached to `id`, across all event types.
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.node(id).map(|n| n.listeners.len()).unwrap_or(0)
    }

    /// Number of native listeners attached anywhere in the tree.
    pub fn total_listener_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .map(|n| n.listeners.len())
            .sum()
    }

    /// Whether this host honors the passive option on attached listeners.
    ///
    /// Always `true` for this tree; test doubles emulating legacy platforms report `false`.
    pub fn passive_honored(&self) -> bool {
        true
    }

    fn alloc(&mut self, data: ElementData) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new((self.nodes.len() - 1) as u32, generation)
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.remove_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_exists_and_cannot_be_removed() {
        let mut dom = Dom::new();
        let root = dom.root();
        assert!(dom.is_alive(root));
        assert_eq!(dom.data(root).map(|d| d.tag.as_str()), Some("html"));
        dom.remove(root);
        assert!(dom.is_alive(root));
    }

    #[test]
    fn insert_links_to_parent_in_order() {
        let mut dom = Dom::new();
        let section = dom.insert(None, ElementData::new("section"));
        let a = dom.insert(Some(section), ElementData::new("a"));
        let b = dom.insert(Some(section), ElementData::new("b"));
        assert_eq!(dom.parent_of(section), Some(dom.root()));
        assert_eq!(dom.children(section), &[a, b]);
        assert_eq!(dom.parent_of(a), Some(section));
    }

    #[test]
    fn remove_frees_subtree_and_listeners() {
        let mut dom = Dom::new();
        let section = dom.insert(None, ElementData::new("section"));
        let child = dom.insert(Some(section), ElementData::new("span"));
        dom.attach_listener(child, "click", false);
        assert_eq!(dom.total_listener_count(), 1);

        dom.remove(section);
        assert!(!dom.is_alive(section));
        assert!(!dom.is_alive(child));
        assert!(dom.children(dom.root()).is_empty());
        assert_eq!(dom.total_listener_count(), 0);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut dom = Dom::new();
        let a = dom.insert(None, ElementData::new("a"));
        dom.remove(a);
        let b = dom.insert(None, ElementData::new("b"));
        // Same slot, different generation: the stale id stays dead.
        assert_ne!(a, b);
        assert!(!dom.is_alive(a));
        assert!(dom.is_alive(b));
        assert!(dom.data(a).is_none());
    }

    #[test]
    fn reparent_moves_subtree() {
        let mut dom = Dom::new();
        let a = dom.insert(None, ElementData::new("a"));
        let b = dom.insert(None, ElementData::new("b"));
        let child = dom.insert(Some(a), ElementData::new("span"));
        dom.reparent(child, Some(b));
        assert_eq!(dom.parent_of(child), Some(b));
        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), &[child]);
    }

    #[test]
    fn matches_consults_element_data() {
        let mut dom = Dom::new();
        let el = dom.insert(None, ElementData::new("button").with_class("wide"));
        assert!(dom.matches(el, "button.wide"));
        assert!(!dom.matches(el, "input"));
        assert!(!dom.matches(el, ""));
        dom.remove(el);
        assert!(!dom.matches(el, "button.wide"));
    }

    #[test]
    fn listeners_filter_by_type_in_attach_order() {
        let mut dom = Dom::new();
        let el = dom.insert(None, ElementData::new("div"));
        let click_a = dom.attach_listener(el, "click", false).unwrap();
        let scroll = dom.attach_listener(el, "scroll", true).unwrap();
        let click_b = dom.attach_listener(el, "click", true).unwrap();

        assert_eq!(
            dom.listeners(el, "click"),
            vec![(click_a, false), (click_b, true)]
        );
        assert_eq!(dom.listeners(el, "scroll"), vec![(scroll, true)]);
        assert_eq!(dom.listener_count(el), 3);
    }

    #[test]
    fn detach_removes_only_the_handle() {
        let mut dom = Dom::new();
        let el = dom.insert(None, ElementData::new("div"));
        let a = dom.attach_listener(el, "click", false).unwrap();
        let b = dom.attach_listener(el, "click", false).unwrap();
        assert!(dom.detach_listener(el, a));
        assert!(!dom.detach_listener(el, a));
        assert_eq!(dom.listeners(el, "click"), vec![(b, false)]);
    }

    #[test]
    fn stale_ids_are_inert() {
        let mut dom = Dom::new();
        let el = dom.insert(None, ElementData::new("div"));
        dom.remove(el);
        assert!(dom.attach_listener(el, "click", false).is_none());
        assert!(!dom.detach_listener(el, ListenerId(0)));
        assert!(dom.listeners(el, "click").is_empty());
        assert_eq!(dom.listener_count(el), 0);
        // Inserting under a stale parent falls back to the root.
        let orphan = dom.insert(Some(el), ElementData::new("p"));
        assert_eq!(dom.parent_of(orphan), Some(dom.root()));
    }
}
