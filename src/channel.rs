//! Ordered multi-subscriber event channel.
//!
//! A [`Channel`] stores reference-counted slots of any (possibly unsized)
//! callable type `F` and invokes them synchronously, in connection order.
//!
//! # Delivery
//!
//! `emit` snapshots the slot list before calling anything and releases every
//! internal borrow while a slot runs. A slot may therefore connect, disconnect
//! (itself or others) or emit again on the same channel:
//!
//! - a slot disconnected during a pass is not invoked for the rest of it;
//! - a slot connected during a pass is first invoked by the next pass.

mod slots;

use std::{cell::RefCell, rc::Rc};

use smallvec::SmallVec;
pub use slots::Slots;

use crate::subscription::ChannelSubscription;

pub(crate) type SlotList<F> = RefCell<Slots<Rc<F>>>;

/// Registry side of a slot list, used by subscription handles.
///
/// Erases the slot type so one handle type serves every channel.
pub(crate) trait SlotRegistry {
  fn release(&self, id: usize) -> bool;
  fn holds(&self, id: usize) -> bool;
}

impl<F: ?Sized> SlotRegistry for SlotList<F> {
  fn release(&self, id: usize) -> bool {
    // The removed slot is dropped after the borrow ends; its captures may
    // touch this channel again.
    let removed = self.borrow_mut().remove(id);
    removed.is_some()
  }

  fn holds(&self, id: usize) -> bool { self.borrow().contains(id) }
}

/// An ordered list of slots notified synchronously.
///
/// # Type Parameters
///
/// - `F`: The slot type, usually a `dyn Fn(..)` trait object.
pub struct Channel<F: ?Sized> {
  slots: Rc<SlotList<F>>,
}

impl<F: ?Sized> Default for Channel<F> {
  fn default() -> Self { Self { slots: Rc::new(RefCell::new(Slots::default())) } }
}

impl<F: ?Sized + 'static> Channel<F> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Append `slot` to the channel and return a handle that can disconnect it.
  pub fn connect(&self, slot: Rc<F>) -> ChannelSubscription {
    let id = self.slots.borrow_mut().add(slot);
    tracing::trace!(id, subscribers = self.len(), "slot connected");
    let registry: Rc<dyn SlotRegistry> = self.slots.clone();
    ChannelSubscription::new(Rc::downgrade(&registry), id)
  }

  /// Disconnect the slot behind `subscription`.
  ///
  /// Returns `false` when the handle was already disconnected or belongs to
  /// another channel.
  pub fn disconnect(&self, subscription: &ChannelSubscription) -> bool {
    let registry: Rc<dyn SlotRegistry> = self.slots.clone();
    subscription.is_bound_to(&registry) && subscription.disconnect()
  }

  /// Invoke `call` on every connected slot, in connection order.
  pub fn emit(&self, mut call: impl FnMut(&F)) {
    let pass: SmallVec<[(usize, Rc<F>); 2]> = self
      .slots
      .borrow()
      .entries()
      .map(|(id, slot)| (id, slot.clone()))
      .collect();

    for (id, slot) in pass {
      let live = self.slots.holds(id);
      if live {
        call(&slot);
      }
    }
  }

  /// Number of connected slots.
  #[inline]
  pub fn len(&self) -> usize { self.slots.borrow().len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.slots.borrow().is_empty() }
}
