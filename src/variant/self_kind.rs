use std::marker::PhantomData;

use super::ObservableVariant;
use crate::alternatives::Alternatives;

/// Selects the type reactions see as the owner of an [`ObservableVariant`].
pub trait SelfKind<V>: 'static {
  type Owner: 'static;
}

/// The observable variant is its own owner. This is the default.
pub struct Itself;

/// Reactions see `D`, an aggregate that embeds the observable variant.
///
/// `D` opts in by implementing [`Embedded`].
pub struct Derived<D>(PhantomData<fn() -> D>);

impl<V: Alternatives> SelfKind<V> for Itself {
  type Owner = ObservableVariant<V, Itself>;
}

impl<V: Alternatives, D: 'static> SelfKind<V> for Derived<D> {
  type Owner = D;
}

/// An aggregate that owns an observable variant and wants its reactions to
/// receive the aggregate instead of the bare variant.
///
/// Implementors must return their own field from [`observable`] and keep
/// the provided [`set`], which passes `self` along as the owner. Nothing
/// checks either: an implementation that hands out a variant held by some
/// other aggregate stays memory safe, but its reactions then receive an
/// owner that does not contain the variant they observe.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use observable_variant::{alternatives, prelude::*};
///
/// alternatives! {
///   #[derive(Debug, PartialEq)]
///   pub enum Status {
///     #[default]
///     Idle(()),
///     Busy(u32),
///   }
/// }
///
/// #[derive(Default)]
/// struct Job {
///   name: &'static str,
///   status: ObservableVariant<Status, Derived<Job>>,
/// }
///
/// impl Embedded for Job {
///   type Alternatives = Status;
///   fn observable(&self) -> &ObservableVariant<Status, Derived<Job>> { &self.status }
/// }
///
/// let job = Job { name: "build", ..Job::default() };
/// let log = Rc::new(RefCell::new(vec![]));
/// job.status.on_value_changed({
///   let log = log.clone();
///   move |job: &Job| log.borrow_mut().push(job.name)
/// });
///
/// job.set(42_u32);
/// assert_eq!(*log.borrow(), ["build"]);
/// ```
///
/// [`observable`]: Embedded::observable
/// [`set`]: Embedded::set
pub trait Embedded: Sized + 'static {
  type Alternatives: Alternatives;

  /// The observable variant embedded in `self`.
  fn observable(&self) -> &ObservableVariant<Self::Alternatives, Derived<Self>>;

  /// Assign a new value to the embedded variant and notify its reactions
  /// with `self` as the owner.
  fn set<T>(&self, value: T)
  where
    T: Into<Self::Alternatives>,
  {
    self.observable().assign(self, value.into())
  }
}
