//! Compression kernel inventory.
//!
//! Every kernel implements the same pure function over one 128-byte block
//! and is bit-exact with the portable reference. [`super::dispatch`] picks
//! one at first use; [`super::kernel_test`] can drive each admitted kernel
//! directly.

use platform::Caps;

use super::BLOCK_LEN;
use super::portable;

#[cfg(target_arch = "aarch64")]
use super::aarch64;
#[cfg(target_arch = "x86_64")]
use super::x86_64;

/// Shared compression signature: chaining value, message block, byte
/// counter halves, finalisation flag.
pub(crate) type CompressFn = fn(&mut [u64; 8], &[u8; BLOCK_LEN], u64, u64, bool);

/// Identifier for a compression kernel.
///
/// Discriminants start at 1; the dispatcher reserves 0 for "unresolved".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum KernelId {
  Portable = 1,
  X64 = 2,
  Avx2 = 3,
  Avx512 = 4,
  Neon = 5,
}

/// Kernels that can be selected on this architecture.
#[cfg(target_arch = "x86_64")]
pub const ALL: &[KernelId] = &[KernelId::Portable, KernelId::X64, KernelId::Avx2, KernelId::Avx512];
#[cfg(target_arch = "aarch64")]
pub const ALL: &[KernelId] = &[KernelId::Portable, KernelId::Neon];
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub const ALL: &[KernelId] = &[KernelId::Portable];

impl KernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::X64 => "x86-64",
      Self::Avx2 => "avx2",
      Self::Avx512 => "avx512",
      Self::Neon => "neon",
    }
  }

  #[inline]
  #[must_use]
  pub(crate) const fn tag(self) -> u8 {
    self as u8
  }

  #[inline]
  #[must_use]
  pub(crate) const fn from_tag(tag: u8) -> Option<Self> {
    match tag {
      1 => Some(Self::Portable),
      2 => Some(Self::X64),
      3 => Some(Self::Avx2),
      4 => Some(Self::Avx512),
      5 => Some(Self::Neon),
      _ => None,
    }
  }
}

/// Capabilities a kernel needs before it may run.
#[inline]
#[must_use]
pub const fn required_caps(id: KernelId) -> Caps {
  match id {
    KernelId::Portable | KernelId::X64 => Caps::NONE,
    KernelId::Avx2 => platform::caps::AVX2,
    KernelId::Avx512 => platform::caps::AVX512_READY,
    KernelId::Neon => platform::caps::NEON,
  }
}

/// The compression function backing a kernel id.
///
/// Vector kernels exist only on their architecture; elsewhere their ids
/// fall back to the portable function (the dispatcher never hands them
/// out there, but the table stays total).
#[must_use]
pub(crate) fn compress_fn(id: KernelId) -> CompressFn {
  match id {
    KernelId::Portable => portable::compress,
    KernelId::X64 => portable::compress_unrolled,
    #[cfg(target_arch = "x86_64")]
    KernelId::Avx2 => x86_64::compress_avx2,
    #[cfg(target_arch = "x86_64")]
    KernelId::Avx512 => x86_64::compress_avx512,
    #[cfg(target_arch = "aarch64")]
    KernelId::Neon => aarch64::compress_neon,
    #[cfg(not(target_arch = "x86_64"))]
    KernelId::Avx2 | KernelId::Avx512 => portable::compress,
    #[cfg(not(target_arch = "aarch64"))]
    KernelId::Neon => portable::compress,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tags_roundtrip() {
    for &id in ALL {
      assert_eq!(KernelId::from_tag(id.tag()), Some(id));
    }
    assert_eq!(KernelId::from_tag(0), None);
    assert_eq!(KernelId::from_tag(6), None);
  }

  #[test]
  fn names_are_unique() {
    for (i, a) in ALL.iter().enumerate() {
      for b in ALL.iter().skip(i + 1) {
        assert_ne!(a.as_str(), b.as_str());
      }
    }
  }

  #[test]
  fn scalar_kernels_need_no_caps() {
    assert!(required_caps(KernelId::Portable).is_empty());
    assert!(required_caps(KernelId::X64).is_empty());
    assert!(!required_caps(KernelId::Avx2).is_empty());
  }
}
