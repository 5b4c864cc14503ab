//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Tagged-union primitive
pub use crate::alternatives::{Alternative, Alternatives, MatchMut, MatchRef};
// Event channel
pub use crate::channel::Channel;
// Errors
pub use crate::error::WrongAlternative;
// Reaction adapter
pub use crate::reaction::{
  change_slot, range_slot, Bare, ChangeSlot, Observed, RangeReaction, RangeSlot, Reaction,
  WithOwner, WithSnapshot, WithTarget,
};
// Subscription
pub use crate::subscription::*;
// Observable variant
pub use crate::variant::{Derived, Embedded, Itself, ObservableVariant, SelfKind, VariantSlot};
