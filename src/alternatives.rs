//! The tagged-union primitive an observable variant wraps.
//!
//! A closed set of alternatives is an ordinary Rust `enum` with one
//! single-field tuple variant per alternative type. The [`alternatives!`]
//! macro declares such an enum and implements the traits below for it:
//!
//! - [`Alternatives`]: discriminant and runtime name of the active alternative;
//! - [`Alternative<T>`]: typed access and conversion for each alternative `T`;
//! - [`MatchRef`] / [`MatchMut`]: exhaustive dispatch over a tuple of handlers,
//!   one per alternative, in declaration order.
//!
//! ```rust
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
//! let value = Scalar::default();
//! assert_eq!(value.which(), 0);
//! assert_eq!(Alternative::<i32>::get(&value), Some(&0));
//!
//! let value = Scalar::from(String::from("hi"));
//! let len = value.match_ref((|i: &i32| *i as usize, |s: &String| s.len()));
//! assert_eq!(len, 2);
//! ```
//!
//! Types must be distinct, since every alternative gets its own `From` impl.
//! The handler tuples support up to sixteen alternatives.
//!
//! [`alternatives!`]: crate::alternatives!

/// A closed set of alternative types, exactly one of which is active.
pub trait Alternatives: Sized + 'static {
  /// Number of alternatives.
  const COUNT: usize;

  /// Zero-based index of the active alternative, in declaration order.
  fn which(&self) -> usize;

  /// Type name of the active alternative.
  fn alternative_name(&self) -> &'static str;
}

/// Typed access to the alternative of type `T`.
pub trait Alternative<T>: Alternatives + From<T> {
  /// Discriminant of `T`.
  const INDEX: usize;

  fn get(&self) -> Option<&T>;

  fn get_mut(&mut self) -> Option<&mut T>;

  #[inline]
  fn holds(&self) -> bool { self.which() == Self::INDEX }
}

/// Exhaustive dispatch by shared reference over a tuple of handlers `H`.
///
/// Leaving out a handler, or ordering them differently from the
/// alternatives, fails to compile:
///
/// ```compile_fail
/// use observable_variant::{alternatives, prelude::*};
///
/// alternatives! {
///   pub enum Scalar {
///     Int(i32),
///     Text(String),
///   }
/// }
///
/// let value = Scalar::from(1_i32);
/// let _ = value.match_ref((|s: &String| s.len(), |i: &i32| *i as usize));
/// ```
pub trait MatchRef<H, R> {
  fn match_ref(&self, handlers: H) -> R;
}

/// Exhaustive dispatch by mutable reference over a tuple of handlers `H`.
pub trait MatchMut<H, R> {
  fn match_mut(&mut self, handlers: H) -> R;
}

/// Declare a closed set of alternatives.
///
/// Each variant must be a single-field tuple variant. Marking the first
/// variant `#[default]` implements `Default` with that alternative's default
/// value.
#[macro_export]
macro_rules! alternatives {
  (
    $(#[$meta:meta])*
    $vis:vis enum $name:ident {
      #[default]
      $first:ident($first_ty:ty)
      $(, $alt:ident($ty:ty))* $(,)?
    }
  ) => {
    $crate::alternatives! {
      $(#[$meta])*
      $vis enum $name { $first($first_ty) $(, $alt($ty))* }
    }

    impl ::core::default::Default for $name {
      fn default() -> Self { $name::$first(<$first_ty as ::core::default::Default>::default()) }
    }
  };
  (
    $(#[$meta:meta])*
    $vis:vis enum $name:ident { $($alt:ident($ty:ty)),+ $(,)? }
  ) => {
    $(#[$meta])*
    $vis enum $name { $($alt($ty)),+ }

    impl $crate::alternatives::Alternatives for $name {
      const COUNT: usize = [$(::core::stringify!($alt)),+].len();

      fn which(&self) -> usize {
        match self {
          $($name::$alt(_) => <Self as $crate::alternatives::Alternative<$ty>>::INDEX),+
        }
      }

      fn alternative_name(&self) -> &'static str {
        match self {
          $($name::$alt(_) => ::core::any::type_name::<$ty>()),+
        }
      }
    }

    $(
      impl ::core::convert::From<$ty> for $name {
        #[inline]
        fn from(value: $ty) -> Self { $name::$alt(value) }
      }
    )+

    $crate::__alternative_impls!($name; 0usize; $($alt($ty))+);
    $crate::__alternatives_match!(
      $name; [];
      [__F0 __F1 __F2 __F3 __F4 __F5 __F6 __F7 __F8 __F9 __F10 __F11 __F12 __F13 __F14 __F15];
      $($alt($ty))+
    );
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __alternative_impls {
  ($name:ident; $index:expr;) => {};
  ($name:ident; $index:expr; $alt:ident($ty:ty) $($rest:tt)*) => {
    impl $crate::alternatives::Alternative<$ty> for $name {
      const INDEX: usize = $index;

      #[inline]
      #[allow(unreachable_patterns)]
      fn get(&self) -> ::core::option::Option<&$ty> {
        match self {
          $name::$alt(value) => ::core::option::Option::Some(value),
          _ => ::core::option::Option::None,
        }
      }

      #[inline]
      #[allow(unreachable_patterns)]
      fn get_mut(&mut self) -> ::core::option::Option<&mut $ty> {
        match self {
          $name::$alt(value) => ::core::option::Option::Some(value),
          _ => ::core::option::Option::None,
        }
      }
    }

    $crate::__alternative_impls!($name; $index + 1; $($rest)*);
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __alternatives_match {
  ($name:ident; [$($f:ident $alt:ident($ty:ty))*]; [$($pool:ident)*];) => {
    #[allow(non_camel_case_types, non_snake_case)]
    impl<__R, $($f),*> $crate::alternatives::MatchRef<($($f,)*), __R> for $name
    where
      $($f: ::core::ops::FnOnce(&$ty) -> __R),*
    {
      fn match_ref(&self, handlers: ($($f,)*)) -> __R {
        let ($($f,)*) = handlers;
        match self {
          $($name::$alt(value) => $f(value)),*
        }
      }
    }

    #[allow(non_camel_case_types, non_snake_case)]
    impl<__R, $($f),*> $crate::alternatives::MatchMut<($($f,)*), __R> for $name
    where
      $($f: ::core::ops::FnOnce(&mut $ty) -> __R),*
    {
      fn match_mut(&mut self, handlers: ($($f,)*)) -> __R {
        let ($($f,)*) = handlers;
        match self {
          $($name::$alt(value) => $f(value)),*
        }
      }
    }
  };
  (
    $name:ident; [$($done:tt)*]; [$next:ident $($pool:ident)*];
    $alt:ident($ty:ty) $($rest:tt)*
  ) => {
    $crate::__alternatives_match!($name; [$($done)* $next $alt($ty)]; [$($pool)*]; $($rest)*);
  };
}
