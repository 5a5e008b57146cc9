//! Error types for cryptographic operations.
//!
//! One enum covers the whole workspace: the streaming hashers, the MAC, and
//! the KDF all fail for a small set of argument and lifecycle reasons, and
//! callers usually want to match on the kind rather than parse a message.

use core::fmt;

/// Failure kinds shared by every algorithm crate in the workspace.
///
/// Errors are returned to the immediate caller; there is no local recovery
/// and no retry. A state that reports [`Error::InvalidState`] stays unusable
/// until it is re-initialised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
  /// Digest length outside 1..=64, or key length outside its legal range.
  InvalidLength,
  /// Parameter block whose digest-length byte is outside 1..=64.
  InvalidParam,
  /// Empty key where one is required.
  InvalidKey,
  /// Argument outside its domain: zero rounds, empty output, or an output
  /// request beyond the derivation ceiling.
  InvalidArgument,
  /// Operation on a state that was already finalised or never initialised.
  InvalidState,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::InvalidLength => "invalid digest or key length",
      Self::InvalidParam => "invalid parameter block",
      Self::InvalidKey => "invalid key",
      Self::InvalidArgument => "invalid argument",
      Self::InvalidState => "state already finalised or not initialised",
    })
  }
}

impl core::error::Error for Error {}
