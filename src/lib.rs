//! # observable-variant: an observable tagged union
//!
//! [`ObservableVariant`] wraps a closed set of alternatives and notifies
//! subscribers whenever it is assigned, and separately whenever the assignment
//! switches the active alternative.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use observable_variant::{alternatives, prelude::*};
//!
//! alternatives! {
//!   #[derive(Clone, Debug, PartialEq)]
//!   pub enum Scalar {
//!     #[default]
//!     Int(i32),
//!     Text(String),
//!   }
//! }
//!
//! let value = ObservableVariant::<Scalar>::default();
//! let log = Rc::new(RefCell::new(String::new()));
//!
//! value.on_value_changed({
//!   let log = log.clone();
//!   move || log.borrow_mut().push('V')
//! });
//! value.on_alternative_changed({
//!   let log = log.clone();
//!   move || log.borrow_mut().push('T')
//! });
//!
//! value.set(5_i32);
//! value.set(String::from("hi"));
//! assert_eq!(*log.borrow(), "VTV");
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Alternatives`] | The tagged-union primitive, declared with [`alternatives!`] |
//! | [`ObservableVariant`] | Observable wrapper with value / alternative channels |
//! | [`Reaction`] | A subscriber callable in any of the four accepted shapes |
//! | [`Embedded`] | Lets reactions receive an aggregate that owns the variant |
//! | [`ChannelSubscription`] | Handle to disconnect a reaction |
//!
//! ## Threading
//!
//! Everything here is single-threaded (`Rc`/`RefCell`); notifications are
//! delivered synchronously on the caller's thread before `set` returns.
//!
//! [`Alternatives`]: alternatives::Alternatives
//! [`ObservableVariant`]: variant::ObservableVariant
//! [`Reaction`]: reaction::Reaction
//! [`Embedded`]: variant::Embedded
//! [`ChannelSubscription`]: subscription::ChannelSubscription

pub mod alternatives;
pub mod channel;
pub mod error;
pub mod prelude;
pub mod reaction;
pub mod subscription;
pub mod variant;

// Re-export the prelude module
pub use prelude::*;
