//! Observable tagged union with value and alternative change notification.
//!
//! # Design
//!
//! [`ObservableVariant<V, K>`] holds a value of the closed alternative set `V`
//! and two channels:
//!
//! - **value changed**: raised on every assignment;
//! - **alternative changed**: raised only when the assignment switched the
//!   active alternative, and always before the value-changed channel.
//!
//! Reactions are connected through the [reaction adapter](crate::reaction),
//! so each may take the owner and the variant, the owner and a snapshot of the
//! value, just the owner, or nothing. `K` selects the owner type: the variant
//! itself ([`Itself`]) or an embedding aggregate ([`Derived`]).
//!
//! # Reentrancy
//!
//! `set` takes `&self` and releases every internal borrow before delivering,
//! so a reaction may assign to the same or another variant. The nested
//! assignment runs its own notification chain to completion before the outer
//! one continues. Reactions that unconditionally reassign the variant that
//! notified them recurse without bound.
//!
//! # Failure Modes
//!
//! - **Panicking reaction**: the panic propagates to the caller of `set` and
//!   the rest of that notification pass is skipped. The new value is already
//!   stored and both channels remain usable.

mod self_kind;

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

pub use self_kind::{Derived, Embedded, Itself, SelfKind};

use crate::{
  alternatives::{Alternative, Alternatives, MatchMut, MatchRef},
  channel::Channel,
  error::WrongAlternative,
  reaction::{change_slot, ChangeSlot, Observed, Reaction},
  subscription::ChannelSubscription,
};

/// The reaction type stored by both channels of an [`ObservableVariant`].
pub type VariantSlot<V, K> = ChangeSlot<<K as SelfKind<V>>::Owner, ObservableVariant<V, K>>;

/// A tagged union that notifies subscribers when it is assigned.
///
/// # Invariants
///
/// 1. Exactly one alternative is active; the variant is never empty.
/// 2. Construction does not notify.
/// 3. Every `set` raises value-changed exactly once.
/// 4. A `set` raises alternative-changed iff the discriminant before and after
///    the assignment differ, and always before value-changed.
/// 5. Reactions run in connection order.
pub struct ObservableVariant<V, K = Itself>
where
  V: Alternatives,
  K: SelfKind<V>,
{
  value: RefCell<Rc<V>>,
  value_changed: Channel<VariantSlot<V, K>>,
  alternative_changed: Channel<VariantSlot<V, K>>,
}

impl<V, K> ObservableVariant<V, K>
where
  V: Alternatives,
  K: SelfKind<V>,
{
  /// Create an observable holding `value`.
  #[must_use]
  pub fn new(value: impl Into<V>) -> Self {
    Self {
      value: RefCell::new(Rc::new(value.into())),
      value_changed: Channel::new(),
      alternative_changed: Channel::new(),
    }
  }

  /// Index of the active alternative.
  #[inline]
  pub fn which(&self) -> usize { self.value.borrow().which() }

  /// Type name of the active alternative.
  #[inline]
  pub fn alternative_name(&self) -> &'static str { self.value.borrow().alternative_name() }

  /// Always `false`: some alternative is active at all times.
  #[inline]
  pub fn is_empty(&self) -> bool { false }

  /// Snapshot of the current value.
  ///
  /// The snapshot is unaffected by later assignments and reading it never
  /// notifies.
  #[inline]
  pub fn observed(&self) -> Rc<V> { self.value.borrow().clone() }

  /// Run `visitor` against the current value.
  pub fn visit<R>(&self, visitor: impl FnOnce(&V) -> R) -> R {
    let value = self.observed();
    visitor(&value)
  }

  /// Run `visitor` against the current value with mutable access.
  ///
  /// In-place edits are not assignments: nothing is notified. The value is
  /// copied first if a snapshot of it is still alive, hence `V: Clone`; for
  /// alternatives that cannot be cloned use
  /// [`try_visit_mut`](Self::try_visit_mut).
  pub fn visit_mut<R>(&mut self, visitor: impl FnOnce(&mut V) -> R) -> R
  where
    V: Clone,
  {
    visitor(Rc::make_mut(self.value.get_mut()))
  }

  /// Like [`visit_mut`](Self::visit_mut), without requiring `V: Clone`.
  ///
  /// Returns `None`, leaving the value untouched, while a snapshot from
  /// [`observed`](Self::observed) or a snapshot-shaped reaction is alive.
  pub fn try_visit_mut<R>(&mut self, visitor: impl FnOnce(&mut V) -> R) -> Option<R> {
    Rc::get_mut(self.value.get_mut()).map(visitor)
  }

  /// Dispatch to the handler of the active alternative.
  ///
  /// `handlers` is a tuple with one closure per alternative, in declaration
  /// order. A missing or misplaced handler fails to compile:
  ///
  /// ```compile_fail
  /// use observable_variant::{alternatives, prelude::*};
  ///
  /// alternatives! {
  ///   pub enum Token {
  ///     #[default]
  ///     Number(i64),
  ///     Word(String),
  ///     Symbol(char),
  ///   }
  /// }
  ///
  /// let token = ObservableVariant::<Token>::default();
  /// let _ = token.match_ref((|_: &i64| 0, |w: &String| w.len()));
  /// ```
  pub fn match_ref<H, R>(&self, handlers: H) -> R
  where
    V: MatchRef<H, R>,
  {
    self.observed().match_ref(handlers)
  }

  /// Mutable counterpart of [`match_ref`](Self::match_ref). Does not notify.
  pub fn match_mut<H, R>(&mut self, handlers: H) -> R
  where
    V: MatchMut<H, R> + Clone,
  {
    Rc::make_mut(self.value.get_mut()).match_mut(handlers)
  }

  /// Clone out the value if `T` is the active alternative.
  pub fn get<T: Clone>(&self) -> Option<T>
  where
    V: Alternative<T>,
  {
    self.value.borrow().get().cloned()
  }

  /// Like [`get`](Self::get), reporting which alternative was active on
  /// failure.
  pub fn try_get<T: Clone>(&self) -> Result<T, WrongAlternative>
  where
    V: Alternative<T>,
  {
    let value = self.value.borrow();
    value.get().cloned().ok_or_else(|| WrongAlternative {
      expected: std::any::type_name::<T>(),
      active: value.alternative_name(),
    })
  }

  /// Returns `true` if `T` is the active alternative.
  pub fn holds<T>(&self) -> bool
  where
    V: Alternative<T>,
  {
    Alternative::<T>::holds(&**self.value.borrow())
  }

  /// Connect `reaction` to every assignment.
  ///
  /// `reaction` may be written as any of:
  ///
  /// - `Fn(&Owner, &ObservableVariant<V, K>)`
  /// - `Fn(&Owner, Rc<V>)`
  /// - `Fn(&Owner)`
  /// - `Fn()`
  ///
  /// where `Owner` is the variant itself, or the embedding type for
  /// [`Derived`] variants. Return values are discarded. Any other signature
  /// is rejected:
  ///
  /// ```compile_fail
  /// use observable_variant::{alternatives, prelude::*};
  ///
  /// alternatives! {
  ///   pub enum Byte {
  ///     #[default]
  ///     Raw(u8),
  ///     Ascii(char),
  ///   }
  /// }
  ///
  /// let byte = ObservableVariant::<Byte>::default();
  /// byte.on_value_changed(|x: &u8| println!("{x}"));
  /// ```
  pub fn on_value_changed<Shape, R>(&self, reaction: R) -> ChannelSubscription
  where
    R: Reaction<K::Owner, Self, Shape>,
  {
    self.value_changed.connect(change_slot::<_, _, Shape, _>(reaction))
  }

  /// Connect `reaction` to assignments that switch the active alternative.
  ///
  /// Accepts the same shapes as [`on_value_changed`](Self::on_value_changed).
  pub fn on_alternative_changed<Shape, R>(&self, reaction: R) -> ChannelSubscription
  where
    R: Reaction<K::Owner, Self, Shape>,
  {
    self.alternative_changed.connect(change_slot::<_, _, Shape, _>(reaction))
  }

  /// Number of reactions connected to the value-changed channel.
  #[inline]
  pub fn value_changed_count(&self) -> usize { self.value_changed.len() }

  /// Number of reactions connected to the alternative-changed channel.
  #[inline]
  pub fn alternative_changed_count(&self) -> usize { self.alternative_changed.len() }

  pub(crate) fn assign(&self, owner: &K::Owner, value: V) {
    let previous = std::mem::replace(&mut *self.value.borrow_mut(), Rc::new(value));
    let before = previous.which();
    let after = self.which();
    // Dropping the old value may run arbitrary code; keep it outside the
    // borrow above and before any reaction sees the new value.
    drop(previous);

    let alternative_changed = before != after;
    tracing::trace!(
      before,
      after,
      alternative_changed,
      value_subscribers = self.value_changed.len(),
      alternative_subscribers = self.alternative_changed.len(),
      "variant assigned"
    );

    if alternative_changed {
      self.alternative_changed.emit(|slot| slot(owner, self));
    }
    self.value_changed.emit(|slot| slot(owner, self));
  }
}

impl<V: Alternatives> ObservableVariant<V, Itself> {
  /// Replace the held value and notify.
  ///
  /// Alternative-changed reactions run first, if the active alternative
  /// changed; value-changed reactions always run afterwards. Both complete
  /// before `set` returns.
  pub fn set(&self, value: impl Into<V>) { self.assign(self, value.into()) }
}

impl<V, K> Observed for ObservableVariant<V, K>
where
  V: Alternatives,
  K: SelfKind<V>,
{
  type Snapshot = V;

  #[inline]
  fn snapshot(&self) -> Rc<V> { self.observed() }
}

impl<V, K> Default for ObservableVariant<V, K>
where
  V: Alternatives + Default,
  K: SelfKind<V>,
{
  fn default() -> Self { Self::new(V::default()) }
}

impl<V, K> From<V> for ObservableVariant<V, K>
where
  V: Alternatives,
  K: SelfKind<V>,
{
  fn from(value: V) -> Self { Self::new(value) }
}

impl<V, K> Debug for ObservableVariant<V, K>
where
  V: Alternatives + Debug,
  K: SelfKind<V>,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ObservableVariant")
      .field("value", &*self.value.borrow())
      .field("which", &self.which())
      .field("value_changed_count", &self.value_changed_count())
      .field("alternative_changed_count", &self.alternative_changed_count())
      .finish()
  }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    panic::{catch_unwind, AssertUnwindSafe},
  };

  use super::*;
  use crate::subscription::Subscription;

  crate::alternatives! {
    #[derive(Clone, Debug, PartialEq)]
    enum Scalar {
      #[default]
      Int(i32),
      Text(String),
    }
  }

  type Obs = ObservableVariant<Scalar>;
  type Log = Rc<RefCell<String>>;

  fn push(log: &Log, tag: &'static str) -> impl Fn() + 'static {
    let log = log.clone();
    move || log.borrow_mut().push_str(tag)
  }

  #[test]
  fn construction_picks_the_alternative() {
    assert_eq!(Obs::default().which(), 0);
    assert_eq!(*Obs::default().observed(), Scalar::Int(0));
    assert_eq!(Obs::new(String::from("a")).which(), 1);
    assert_eq!(Obs::from(Scalar::Int(3)).get::<i32>(), Some(3));
    assert!(!Obs::default().is_empty());
  }

  #[test]
  fn same_alternative_only_notifies_value_changed() {
    let obs = Obs::default();
    let log = Log::default();
    obs.on_value_changed(push(&log, "V"));
    obs.on_alternative_changed(push(&log, "T"));

    obs.set(5_i32);
    assert_eq!(*log.borrow(), "V");

    obs.set(String::from("hi"));
    assert_eq!(*log.borrow(), "VTV");

    obs.set(String::from("again"));
    assert_eq!(*log.borrow(), "VTVV");
  }

  #[test]
  fn alternative_changed_completes_before_value_changed() {
    let obs = Obs::default();
    let log = Log::default();
    obs.on_value_changed(push(&log, "v1"));
    obs.on_alternative_changed(push(&log, "t1"));
    obs.on_value_changed(push(&log, "v2"));
    obs.on_alternative_changed(push(&log, "t2"));

    obs.set(String::from("x"));
    assert_eq!(*log.borrow(), "t1t2v1v2");
  }

  #[test]
  fn construction_does_not_notify() {
    let log = Log::default();
    let obs = Obs::new(7_i32);
    obs.on_value_changed(push(&log, "V"));
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn reactions_see_the_new_value() {
    let obs = Obs::default();
    let seen = Rc::new(RefCell::new(vec![]));
    obs.on_value_changed({
      let seen = seen.clone();
      move |_: &Obs, value: Rc<Scalar>| seen.borrow_mut().push((*value).clone())
    });
    obs.on_value_changed({
      let seen = seen.clone();
      move |owner: &Obs, target: &Obs| {
        assert!(std::ptr::eq(owner, target));
        seen.borrow_mut().push((*target.observed()).clone())
      }
    });

    obs.set(1_i32);
    assert_eq!(*seen.borrow(), [Scalar::Int(1), Scalar::Int(1)]);
  }

  #[test]
  fn owner_shape_receives_the_variant() {
    let obs = Obs::default();
    let which = Rc::new(Cell::new(usize::MAX));
    obs.on_alternative_changed({
      let which = which.clone();
      move |owner: &Obs| which.set(owner.which())
    });

    obs.set(String::new());
    assert_eq!(which.get(), 1);
  }

  #[test]
  fn disconnected_reaction_is_not_invoked() {
    let obs = Obs::default();
    let log = Log::default();
    let value = obs.on_value_changed(push(&log, "V"));
    obs.on_alternative_changed(push(&log, "T"));

    value.unsubscribe();
    obs.set(String::from("x"));
    obs.set(1_i32);

    assert_eq!(*log.borrow(), "TT");
    assert_eq!(obs.value_changed_count(), 0);
    assert_eq!(obs.alternative_changed_count(), 1);
  }

  #[test]
  fn reaction_can_disconnect_itself() {
    let obs = Obs::default();
    let log = Log::default();
    let own: Rc<RefCell<Option<ChannelSubscription>>> = Rc::default();

    obs.on_value_changed(push(&log, "a"));
    let sub = obs.on_value_changed({
      let own = own.clone();
      let log = log.clone();
      move || {
        log.borrow_mut().push_str("b");
        if let Some(sub) = own.borrow().as_ref() {
          sub.disconnect();
        }
      }
    });
    *own.borrow_mut() = Some(sub);
    obs.on_value_changed(push(&log, "c"));

    obs.set(1_i32);
    obs.set(2_i32);
    assert_eq!(*log.borrow(), "abcac");
  }

  #[test]
  fn reentrant_set_runs_nested_chain_first() {
    let obs = Rc::new(Obs::default());
    let log = Log::default();

    obs.on_alternative_changed({
      let log = log.clone();
      move |owner: &Obs| {
        log.borrow_mut().push_str("T");
        // Switch back to an integer once, from inside the notification.
        if owner.holds::<String>() {
          owner.set(42_i32);
        }
      }
    });
    obs.on_value_changed({
      let log = log.clone();
      move |_: &Obs, value: Rc<Scalar>| {
        let tag = match *value {
          Scalar::Int(_) => "Vi",
          Scalar::Text(_) => "Vs",
        };
        log.borrow_mut().push_str(tag);
      }
    });

    obs.set(String::from("s"));

    // Outer set: T -> nested set(42): T, Vi -> outer value-changed sees 42.
    assert_eq!(*log.borrow(), "TTViVi");
    assert_eq!(obs.get::<i32>(), Some(42));
  }

  #[test]
  fn panicking_reaction_propagates_and_leaves_variant_usable() {
    let obs = Obs::default();
    let log = Log::default();
    obs.on_value_changed(|| panic!("boom"));
    obs.on_value_changed(push(&log, "after"));

    let result = catch_unwind(AssertUnwindSafe(|| obs.set(3_i32)));
    assert!(result.is_err());
    assert_eq!(obs.get::<i32>(), Some(3));
    assert!(log.borrow().is_empty());

    let result = catch_unwind(AssertUnwindSafe(|| obs.set(4_i32)));
    assert!(result.is_err());
    assert_eq!(obs.get::<i32>(), Some(4));
  }

  #[test]
  fn snapshots_outlive_assignment() {
    let obs = Obs::new(1_i32);
    let before = obs.observed();
    obs.set(String::from("later"));

    assert_eq!(*before, Scalar::Int(1));
    assert_eq!(*obs.observed(), Scalar::Text("later".into()));
  }

  #[test]
  fn visit_and_match() {
    let mut obs = Obs::new(String::from("abc"));
    assert_eq!(obs.visit(|v| v.which()), 1);
    assert_eq!(obs.match_ref((|_: &i32| 0, |s: &String| s.len())), 3);

    let log = Log::default();
    obs.on_value_changed(push(&log, "V"));
    obs.match_mut((|i: &mut i32| *i += 1, |s: &mut String| s.push('d')));
    obs.visit_mut(|v| {
      if let Scalar::Text(s) = v {
        s.push('e');
      }
    });

    assert_eq!(obs.get::<String>().as_deref(), Some("abcde"));
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn visit_mut_copies_when_a_snapshot_is_held() {
    let mut obs = Obs::new(1_i32);
    let held = obs.observed();
    obs.visit_mut(|v| *v = Scalar::Int(2));

    assert_eq!(*held, Scalar::Int(1));
    assert_eq!(obs.get::<i32>(), Some(2));
  }

  #[test]
  fn try_visit_mut_refuses_while_a_snapshot_is_held() {
    let mut obs = Obs::new(1_i32);
    let held = obs.observed();
    assert_eq!(obs.try_visit_mut(|v| *v = Scalar::Int(2)), None);
    assert_eq!(obs.get::<i32>(), Some(1));

    drop(held);
    assert_eq!(obs.try_visit_mut(|v| v.which()), Some(0));
  }

  #[test]
  fn reactions_may_return_values() {
    let obs = Obs::default();
    let last = Rc::new(Cell::new(usize::MAX));
    obs.on_value_changed({
      let last = last.clone();
      move |owner: &Obs| last.replace(owner.which())
    });

    obs.set(String::from("a"));
    assert_eq!(last.get(), 1);
    obs.set(0_i32);
    assert_eq!(last.get(), 0);
  }

  #[test]
  fn try_get_reports_the_active_alternative() {
    let obs = Obs::new(1_i32);
    assert_eq!(obs.try_get::<i32>(), Ok(1));

    let err = obs.try_get::<String>().unwrap_err();
    assert_eq!(err.active, "i32");
    assert!(err.expected.ends_with("String"));
    assert!(err.to_string().contains("`i32` is active"));
  }

  #[test]
  fn debug_shows_value_and_counts() {
    let obs = Obs::new(5_i32);
    obs.on_value_changed(|| {});
    let text = format!("{obs:?}");
    assert!(text.contains("Int(5)"));
    assert!(text.contains("value_changed_count: 1"));
  }

  struct Panel {
    title: &'static str,
    content: ObservableVariant<Scalar, Derived<Panel>>,
  }

  impl Embedded for Panel {
    type Alternatives = Scalar;
    fn observable(&self) -> &ObservableVariant<Scalar, Derived<Panel>> { &self.content }
  }

  #[test]
  fn derived_owner_is_passed_to_reactions() {
    let panel = Panel { title: "status", content: ObservableVariant::default() };
    let log = Rc::new(RefCell::new(vec![]));

    panel.content.on_alternative_changed({
      let log = log.clone();
      move |panel: &Panel| log.borrow_mut().push(format!("{} switched", panel.title))
    });
    panel.content.on_value_changed({
      let log = log.clone();
      move |panel: &Panel, value: Rc<Scalar>| {
        log.borrow_mut().push(format!("{} = {value:?}", panel.title))
      }
    });

    panel.set(String::from("ready"));
    panel.set(String::from("done"));

    assert_eq!(
      *log.borrow(),
      [
        "status switched",
        "status = Text(\"ready\")",
        "status = Text(\"done\")",
      ]
    );
  }

  #[test]
  fn derived_target_shape_sees_the_embedded_variant() {
    let panel = Panel { title: "p", content: ObservableVariant::new(1_i32) };
    let hits = Rc::new(Cell::new(0));
    panel.content.on_value_changed({
      let hits = hits.clone();
      move |panel: &Panel, content: &ObservableVariant<Scalar, Derived<Panel>>| {
        assert!(std::ptr::eq(&panel.content, content));
        hits.set(hits.get() + content.get::<i32>().unwrap_or_default());
      }
    });

    panel.set(2_i32);
    panel.set(3_i32);
    assert_eq!(hits.get(), 5);
  }
}
