//! Subscription handles returned when a reaction is connected.

use std::{
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};

use crate::channel::SlotRegistry;

/// A handle to cancel an active subscription.
pub trait Subscription {
  /// Disconnect the reaction. No further notification reaches it.
  fn unsubscribe(self);

  /// Returns `true` once the reaction is no longer connected.
  fn is_closed(&self) -> bool;
}

/// Handle to one slot of one channel.
///
/// The handle holds a weak reference to the channel's slot list: it never
/// keeps the observable alive. Once the observable is dropped the handle is
/// inert and `unsubscribe` is a no-op. Dropping the handle does not
/// disconnect; use [`unsubscribe_when_dropped`] for that.
///
/// [`unsubscribe_when_dropped`]: ChannelSubscription::unsubscribe_when_dropped
#[derive(Clone)]
pub struct ChannelSubscription {
  registry: Weak<dyn SlotRegistry>,
  id: usize,
}

impl ChannelSubscription {
  pub(crate) fn new(registry: Weak<dyn SlotRegistry>, id: usize) -> Self { Self { registry, id } }

  /// Disconnect without consuming the handle.
  ///
  /// Returns `true` if this call removed the slot. Safe to call from inside
  /// the reaction being disconnected.
  pub fn disconnect(&self) -> bool {
    match self.registry.upgrade() {
      Some(registry) => {
        let released = registry.release(self.id);
        if released {
          tracing::trace!(id = self.id, "slot disconnected");
        }
        released
      }
      None => false,
    }
  }

  /// Returns `true` while the slot is still connected to a live channel.
  pub fn is_connected(&self) -> bool {
    self
      .registry
      .upgrade()
      .is_some_and(|registry| registry.holds(self.id))
  }

  /// Activates "RAII" behavior for this subscription: the reaction is
  /// disconnected as soon as the returned guard goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// the reaction is disconnected immediately.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard::new(self) }

  pub(crate) fn is_bound_to(&self, registry: &Rc<dyn SlotRegistry>) -> bool {
    std::ptr::eq(self.registry.as_ptr() as *const (), Rc::as_ptr(registry) as *const ())
  }
}

impl Subscription for ChannelSubscription {
  #[inline]
  fn unsubscribe(self) { self.disconnect(); }

  #[inline]
  fn is_closed(&self) -> bool { !self.is_connected() }
}

impl Debug for ChannelSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ChannelSubscription")
      .field("id", &self.id)
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }

  /// Give up the guard without unsubscribing.
  pub fn into_inner(mut self) -> Option<T> { self.0.take() }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}
