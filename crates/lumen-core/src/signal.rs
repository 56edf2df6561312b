//! Host-provided values that change over time.
//!
//! The terminal binding writes viewport size and the reduced-motion
//! preference into [`Signal`]s; renderers only ever read them through
//! [`Signal::current_value`] or a [`Subscription`], so nothing below the
//! binary knows which host produced the value.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug)]
struct Slot<T> {
    value: T,
    version: u64,
}

/// A single-threaded observable value.
///
/// Cloning yields another handle to the same value.
#[derive(Debug)]
pub struct Signal<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone + PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot { value, version: 0 })),
        }
    }

    /// Store a new value. Setting an equal value is not a change.
    pub fn set(&self, value: T) {
        let mut slot = self.slot.borrow_mut();
        if slot.value != value {
            slot.value = value;
            slot.version += 1;
        }
    }

    pub fn current_value(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Observe changes made after this call.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            slot: Rc::downgrade(&self.slot),
            seen: self.slot.borrow().version,
        }
    }
}

/// A polling view onto a [`Signal`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription<T> {
    slot: Weak<RefCell<Slot<T>>>,
    seen: u64,
}

impl<T: Clone> Subscription<T> {
    /// Returns the latest value if it changed since the last call.
    ///
    /// Intermediate values are coalesced. Once every [`Signal`] handle is
    /// gone this always returns `None`.
    pub fn changed(&mut self) -> Option<T> {
        let slot = self.slot.upgrade()?;
        let slot = slot.borrow();
        if slot.version == self.seen {
            return None;
        }
        self.seen = slot.version;
        Some(slot.value.clone())
    }
}
