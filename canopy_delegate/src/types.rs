// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for delegation: events, handlers, registration options, and the host contract.
//!
//! ## Overview
//!
//! These types describe the delegation protocol and its inputs/outputs.
//! They are referenced by the [`engine`](crate::engine) and the [`store`](crate::store), and
//! implemented (in the case of [`Host`]) by concrete UI trees such as the one behind the
//! `dom_adapter` feature.

use std::rc::Rc;

use bitflags::bitflags;

/// Opaque handle of a native listener installed by the engine through [`Host::attach_native`].
///
/// The engine records the handle in its registration store and passes it back to
/// [`Host::detach_native`] when the last delegated entry for a key is removed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NativeHandle(u64);

impl NativeHandle {
    /// Wrap a raw host-side listener identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host-side listener identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

bitflags! {
    /// Event state bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// The event propagates from the target up through its ancestors.
        const BUBBLES = 0b0000_0001;
        /// The event's default action can be prevented.
        const CANCELABLE = 0b0000_0010;
        /// A handler has prevented the default action.
        const DEFAULT_PREVENTED = 0b0000_0100;
        /// [`Event::prevent_default`] has been neutralized into a no-op (passive contract).
        const CANCEL_NEUTRALIZED = 0b0000_1000;
    }
}

/// A native or synthetic event traveling through the delegation engine.
///
/// `E` is the host's element key; `D` is the opaque payload type attached by
/// [`Delegate::emit`](crate::engine::Delegate::emit).
#[derive(Clone, Debug)]
pub struct Event<E, D = ()> {
    /// Event type name, e.g. `"click"`.
    pub event_type: String,
    /// Element the event originated from.
    pub target: E,
    /// Element whose listeners are currently being serviced (set during dispatch).
    pub current_target: Option<E>,
    /// Payload attached by the emitter, if any.
    pub detail: Option<D>,
    flags: EventFlags,
}

impl<E, D> Event<E, D> {
    /// Create a bubbling, cancelable event with no payload.
    pub fn new(event_type: impl Into<String>, target: E) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            current_target: None,
            detail: None,
            flags: EventFlags::BUBBLES | EventFlags::CANCELABLE,
        }
    }

    /// Create a bubbling, cancelable custom event carrying `detail`.
    pub fn custom(event_type: impl Into<String>, target: E, detail: Option<D>) -> Self {
        let mut event = Self::new(event_type, target);
        event.detail = detail;
        event
    }

    /// Disable bubbling; the event is delivered only to listeners owned by the target.
    #[must_use]
    pub fn non_bubbling(mut self) -> Self {
        self.flags.remove(EventFlags::BUBBLES);
        self
    }

    /// Disable cancelation; [`Event::prevent_default`] becomes a no-op.
    #[must_use]
    pub fn non_cancelable(mut self) -> Self {
        self.flags.remove(EventFlags::CANCELABLE);
        self
    }

    /// Whether the event propagates up through ancestors.
    pub fn bubbles(&self) -> bool {
        self.flags.contains(EventFlags::BUBBLES)
    }

    /// Whether the default action can be prevented.
    pub fn cancelable(&self) -> bool {
        self.flags.contains(EventFlags::CANCELABLE)
    }

    /// Whether a handler has prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Prevent the default action.
    ///
    /// No-op when the event is not cancelable or when cancelation has been neutralized for a
    /// passive registration.
    pub fn prevent_default(&mut self) {
        if self.cancelable() && !self.flags.contains(EventFlags::CANCEL_NEUTRALIZED) {
            self.flags.insert(EventFlags::DEFAULT_PREVENTED);
        }
    }

    /// Whether [`Event::prevent_default`] has been made a no-op on this event object.
    pub fn cancelation_neutralized(&self) -> bool {
        self.flags.contains(EventFlags::CANCEL_NEUTRALIZED)
    }

    // Permanent for this event object, matching the passive contract: once a passive handler
    // has run on a platform without real passive support, nobody may cancel through it.
    pub(crate) fn neutralize_cancelation(&mut self) {
        self.flags.insert(EventFlags::CANCEL_NEUTRALIZED);
    }
}

/// A delegated event callback.
///
/// Handlers are cheaply cloneable; all clones share one underlying closure, and that shared
/// allocation is the handler's identity for removal purposes (see [`Handler::same_callback`]).
///
/// A handler that intends to call [`Event::prevent_default`] must be built with
/// [`Handler::preventing`]; the declaration drives passive inference (see
/// [`passive`](crate::passive)). Rust cannot inspect a closure's source text, so the
/// declaration is explicit rather than inferred.
pub struct Handler<E, D = ()> {
    func: Rc<dyn Fn(E, &mut Event<E, D>)>,
    prevents_default: bool,
}

impl<E, D> Clone for Handler<E, D> {
    fn clone(&self) -> Self {
        Self {
            func: Rc::clone(&self.func),
            prevents_default: self.prevents_default,
        }
    }
}

impl<E, D> core::fmt::Debug for Handler<E, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handler")
            .field("prevents_default", &self.prevents_default)
            .finish_non_exhaustive()
    }
}

impl<E, D> Handler<E, D> {
    /// Wrap a callback that does not cancel events. Inferred passive by default.
    pub fn new(func: impl Fn(E, &mut Event<E, D>) + 'static) -> Self {
        Self {
            func: Rc::new(func),
            prevents_default: false,
        }
    }

    /// Wrap a callback that calls [`Event::prevent_default`]. Inferred non-passive by default.
    pub fn preventing(func: impl Fn(E, &mut Event<E, D>) + 'static) -> Self {
        Self {
            func: Rc::new(func),
            prevents_default: true,
        }
    }

    /// Whether this handler declares that it cancels events.
    pub fn prevents_default(&self) -> bool {
        self.prevents_default
    }

    /// Whether `self` and `other` share the same underlying closure.
    pub fn same_callback(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }

    /// Invoke the callback with the resolved delegation target and the event.
    pub fn call(&self, target: E, event: &mut Event<E, D>) {
        (self.func)(target, event);
    }
}

/// Options for [`Delegate::on`](crate::engine::Delegate::on) and
/// [`Delegate::off`](crate::engine::Delegate::off).
///
/// A removal must be made with the same `once` flag, `element`, and (explicit or inferred)
/// passive decision as the registration it targets, or it silently finds nothing.
#[derive(Clone, Debug)]
pub struct Options<E> {
    /// Remove the registration automatically after its first invocation.
    pub once: bool,
    /// Owning element the native listener is attached to. Defaults to the host root.
    pub element: Option<E>,
    /// Explicit passive flag. `None` infers from the handler's declaration.
    pub passive: Option<bool>,
}

impl<E> Default for Options<E> {
    fn default() -> Self {
        Self {
            once: false,
            element: None,
            passive: None,
        }
    }
}

impl<E> Options<E> {
    /// Mark the registration one-shot.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Scope the registration to `element` instead of the host root.
    #[must_use]
    pub fn on_element(mut self, element: E) -> Self {
        self.element = Some(element);
        self
    }

    /// Force the passive flag instead of inferring it from the handler.
    #[must_use]
    pub fn passive(mut self, passive: bool) -> Self {
        self.passive = Some(passive);
        self
    }
}

/// Contract a UI tree implements to host delegated listeners.
///
/// The engine consumes structure queries (`parent_of`, `matches`) to resolve delegation
/// targets, and the native listener registry (`attach_native` / `detach_native` / `attached`)
/// to maintain its one-listener-per-key invariant. Implementations keep listeners in attach
/// order; dispatch visits them in that order.
pub trait Host {
    /// Element key. A small copyable id; identity is reference identity, so keys held by the
    /// delegation store must not keep the element's backing resource alive (generational ids
    /// satisfy this).
    type Element: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// The default owning element for registrations and emissions.
    fn root(&self) -> Self::Element;

    /// Whether `el` currently refers to a live element.
    fn is_element(&self, el: Self::Element) -> bool;

    /// Parent of `el`, or `None` at the root (or for stale keys).
    fn parent_of(&self, el: Self::Element) -> Option<Self::Element>;

    /// Whether `el` matches the selector string. The empty selector matches nothing here;
    /// the engine short-circuits it before selector matching.
    fn matches(&self, el: Self::Element, selector: &str) -> bool;

    /// Attach a native listener for `event_type` with the given passive option.
    ///
    /// Returns `None` if `el` is not a live element.
    fn attach_native(
        &mut self,
        el: Self::Element,
        event_type: &str,
        passive: bool,
    ) -> Option<NativeHandle>;

    /// Detach a native listener previously returned by [`Host::attach_native`].
    ///
    /// The same passive option used at attach time is passed back. Returns `true` if a
    /// listener was removed.
    fn detach_native(
        &mut self,
        el: Self::Element,
        event_type: &str,
        passive: bool,
        handle: NativeHandle,
    ) -> bool;

    /// Native listeners for `event_type` on `el`, as (handle, passive) pairs in attach order.
    fn attached(&self, el: Self::Element, event_type: &str) -> Vec<(NativeHandle, bool)>;

    /// Whether the platform honors the passive option on native listeners.
    ///
    /// Defaults to unsupported; the engine probes this once and caches the answer (see
    /// [`passive`](crate::passive)).
    fn passive_supported(&self) -> bool {
        false
    }

    /// Nearest ancestor-or-self of `start` matching `selector`, without escaping past
    /// `boundary` (the owning element of the delegated registration).
    fn closest_within(
        &self,
        start: Self::Element,
        selector: &str,
        boundary: Self::Element,
    ) -> Option<Self::Element> {
        let mut cur = Some(start);
        while let Some(el) = cur {
            if self.matches(el, selector) {
                return Some(el);
            }
            if el == boundary {
                break;
            }
            cur = self.parent_of(el);
        }
        None
    }
}
