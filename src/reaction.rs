//! Arity-adaptive reaction adapter.
//!
//! A reaction is any callable a subscriber hands to an observable. Rather than
//! forcing one full signature on every subscriber, a reaction may be written
//! in any of four shapes, from most to least informative:
//!
//! | Shape | Signature | Receives |
//! |-------|-----------|----------|
//! | [`WithTarget`] | `Fn(&Owner, &Target)` | the observed object itself |
//! | [`WithSnapshot`] | `Fn(&Owner, Rc<Target::Snapshot>)` | a shared snapshot of the plain value behind an observable target |
//! | [`WithOwner`] | `Fn(&Owner)` | only the owning object |
//! | [`Bare`] | `Fn()` | nothing |
//!
//! The shape is a type parameter of [`Reaction`], so it is resolved by trait
//! selection when the reaction is connected and costs nothing per call. The
//! four signatures never overlap: the shapes differ in arity, and the two
//! binary shapes differ in how the second argument is passed (a borrow of the
//! target against an owned `Rc` snapshot). That holds even for an [`Observed`]
//! type whose snapshot is the type itself. A callable matching none of the
//! shapes is rejected at compile time. Whatever a reaction returns is
//! discarded.
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//!
//! use observable_variant::reaction::{change_slot, Observed};
//!
//! struct Counter(Rc<u32>);
//!
//! impl Observed for Counter {
//!   type Snapshot = u32;
//!   fn snapshot(&self) -> Rc<u32> { self.0.clone() }
//! }
//!
//! let seen = Rc::new(Cell::new(0));
//! let slot = change_slot::<(), Counter, _, _>({
//!   let seen = seen.clone();
//!   move |_: &(), value: Rc<u32>| seen.set(*value)
//! });
//!
//! slot(&(), &Counter(Rc::new(7)));
//! assert_eq!(seen.get(), 7);
//! ```
//!
//! A callable of any other shape does not compile:
//!
//! ```compile_fail
//! use std::rc::Rc;
//!
//! use observable_variant::reaction::{change_slot, Observed};
//!
//! struct Counter(Rc<u32>);
//!
//! impl Observed for Counter {
//!   type Snapshot = u32;
//!   fn snapshot(&self) -> Rc<u32> { self.0.clone() }
//! }
//!
//! let _ = change_slot::<(), Counter, _, _>(|_: &(), _: &Counter, _: usize| {});
//! ```
//!
//! Position-aware events use [`RangeReaction`], which has a single shape.

mod range;

use std::{marker::PhantomData, rc::Rc};

pub use range::{range_slot, RangeReaction, RangeSlot};

/// An observable that can hand out a plain, non-observable snapshot of
/// itself.
///
/// Reactions written in the [`WithSnapshot`] shape receive the snapshot, so
/// they cannot reach the observable's mutation surface by accident.
pub trait Observed {
  type Snapshot: ?Sized;

  fn snapshot(&self) -> Rc<Self::Snapshot>;
}

/// `Fn(&Owner, &Target) -> Out`
pub struct WithTarget<Out = ()>(PhantomData<fn() -> Out>);

/// `Fn(&Owner, Rc<Target::Snapshot>) -> Out`
pub struct WithSnapshot<Out = ()>(PhantomData<fn() -> Out>);

/// `Fn(&Owner) -> Out`
pub struct WithOwner<Out = ()>(PhantomData<fn() -> Out>);

/// `Fn() -> Out`
pub struct Bare<Out = ()>(PhantomData<fn() -> Out>);

/// A subscriber callable written in one of the accepted `Shape`s.
///
/// Implemented for every matching `Fn`; never implement it by hand.
pub trait Reaction<Owner: ?Sized, Target: ?Sized, Shape>: 'static {
  fn react(&self, owner: &Owner, target: &Target);
}

impl<F, Owner, Target, Out> Reaction<Owner, Target, WithTarget<Out>> for F
where
  F: Fn(&Owner, &Target) -> Out + 'static,
  Owner: ?Sized,
  Target: ?Sized,
{
  #[inline]
  fn react(&self, owner: &Owner, target: &Target) { self(owner, target); }
}

impl<F, Owner, Target, Out> Reaction<Owner, Target, WithSnapshot<Out>> for F
where
  F: Fn(&Owner, Rc<Target::Snapshot>) -> Out + 'static,
  Owner: ?Sized,
  Target: Observed + ?Sized,
{
  #[inline]
  fn react(&self, owner: &Owner, target: &Target) { self(owner, target.snapshot()); }
}

impl<F, Owner, Target, Out> Reaction<Owner, Target, WithOwner<Out>> for F
where
  F: Fn(&Owner) -> Out + 'static,
  Owner: ?Sized,
  Target: ?Sized,
{
  #[inline]
  fn react(&self, owner: &Owner, _: &Target) { self(owner); }
}

impl<F, Owner, Target, Out> Reaction<Owner, Target, Bare<Out>> for F
where
  F: Fn() -> Out + 'static,
  Owner: ?Sized,
  Target: ?Sized,
{
  #[inline]
  fn react(&self, _: &Owner, _: &Target) { self(); }
}

/// The normalized form every change reaction is stored as.
pub type ChangeSlot<Owner, Target> = dyn Fn(&Owner, &Target);

/// Adapt `reaction` to the uniform [`ChangeSlot`] call shape.
pub fn change_slot<Owner, Target, Shape, R>(reaction: R) -> Rc<ChangeSlot<Owner, Target>>
where
  Owner: ?Sized + 'static,
  Target: ?Sized + 'static,
  R: Reaction<Owner, Target, Shape>,
{
  Rc::new(move |owner: &Owner, target: &Target| reaction.react(owner, target))
}
