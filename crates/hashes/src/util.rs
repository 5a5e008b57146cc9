//! Secure-memory helpers and little-endian block loading.

use subtle::ConstantTimeEq as _;
use zeroize::Zeroize as _;

/// Overwrite `buf` with zeros in a way the compiler may not elide.
///
/// A no-op on empty input. Delegates to `zeroize`, which fences the store so
/// the wipe survives optimisation even when the buffer is dead afterwards.
#[inline]
pub fn secure_zero(buf: &mut [u8]) {
  buf.zeroize();
}

/// Constant-time equality of two byte slices.
///
/// Returns true iff `a` and `b` have the same length and the same contents.
/// For equal lengths the comparison accumulates over every byte regardless
/// of where the first difference sits; two empty slices are equal.
#[inline]
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Read a 128-byte block as 16 little-endian 64-bit words.
#[inline(always)]
#[must_use]
pub(crate) fn load_block_words(block: &[u8; 128]) -> [u64; 16] {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (word, chunk) in m.iter_mut().zip(chunks) {
    *word = u64::from_le_bytes(*chunk);
  }
  m
}
