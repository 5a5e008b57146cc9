//! Cryptographic digest trait.

/// Cryptographic hash function producing a fixed-size digest.
///
/// Unlike the usual incremental-hash shape, `finalize` consumes the hasher:
/// implementations in this workspace wipe their chaining value, counters,
/// and residual buffer when the digest is emitted, so there is no meaningful
/// state left to keep.
pub trait Digest: Clone + Sized {
  /// Digest size in bytes.
  const OUTPUT_SIZE: usize;

  /// The digest output type, typically `[u8; N]`.
  type Output: AsRef<[u8]>;

  /// Create a new hasher in its initial state.
  #[must_use]
  fn new() -> Self;

  /// Absorb additional message bytes.
  fn update(&mut self, data: &[u8]);

  /// Finalize, emitting the digest and wiping the internal state.
  #[must_use]
  fn finalize(self) -> Self::Output;

  /// Compute the digest of `data` in one shot.
  #[inline]
  #[must_use]
  fn digest(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }
}
