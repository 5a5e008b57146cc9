//! Message authentication code trait.

use crate::Error;

/// Keyed message authentication producing a fixed-size tag.
///
/// Shaped like [`crate::Digest`] with a keyed constructor. `finalize`
/// consumes the value for the same reason: the tag emission wipes the keyed
/// sub-states.
pub trait Mac: Clone + Sized {
  /// Tag size in bytes.
  const TAG_SIZE: usize;

  /// The tag output type, typically `[u8; N]`.
  type Tag: AsRef<[u8]>;

  /// Create a MAC state from a key.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidKey`] for keys the construction rejects.
  fn new(key: &[u8]) -> Result<Self, Error>;

  /// Absorb additional message bytes.
  fn update(&mut self, data: &[u8]);

  /// Finalize, emitting the tag and wiping the keyed state.
  #[must_use]
  fn finalize(self) -> Self::Tag;

  /// Compute the tag for `data` under `key` in one shot.
  ///
  /// # Errors
  ///
  /// Propagates the constructor's error.
  #[inline]
  fn mac(key: &[u8], data: &[u8]) -> Result<Self::Tag, Error> {
    let mut m = Self::new(key)?;
    m.update(data);
    Ok(m.finalize())
  }
}
