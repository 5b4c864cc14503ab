use thiserror::Error;

/// Typed access asked for an alternative that is not the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected alternative `{expected}`, but `{active}` is active")]
pub struct WrongAlternative {
  /// Type name of the requested alternative.
  pub expected: &'static str,
  /// Type name of the active alternative.
  pub active: &'static str,
}
