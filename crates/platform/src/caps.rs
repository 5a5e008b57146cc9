//! CPU capability representation.
//!
//! [`Caps`] is a compact bitset of the instruction-set extensions the
//! workspace dispatches on. Each named constant is a single feature; kernel
//! requirements are unions of them, checked with [`Caps::has`].

/// Feature bitset: what instructions can run on this machine.
///
/// `Caps` is `Copy`, `Send`, and `Sync`; it can be freely shared across
/// threads. The dispatcher relies on one invariant the probe maintains:
/// if [`Caps::avx512f`] is set then [`Caps::avx2`] is set as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(u32);

/// AVX2 with OS YMM state support.
pub const AVX2: Caps = Caps::from_bit(0);
/// AVX-512 Foundation with OS ZMM/opmask state support.
pub const AVX512F: Caps = Caps::from_bit(1);
/// AVX-512 Vector Length extensions.
pub const AVX512VL: Caps = Caps::from_bit(2);
/// AVX-512 VBMI2 (funnel shifts).
pub const AVX512VBMI2: Caps = Caps::from_bit(3);
/// AArch64 Advanced SIMD.
pub const NEON: Caps = Caps::from_bit(4);

/// Everything the AVX-512 kernel needs.
pub const AVX512_READY: Caps = AVX512F.union(AVX512VL).union(AVX512VBMI2);

impl Caps {
  /// No capabilities (portable baseline).
  pub const NONE: Self = Self(0);

  #[inline]
  #[must_use]
  const fn from_bit(bit: u32) -> Self {
    Self(1 << bit)
  }

  #[inline]
  #[must_use]
  pub(crate) const fn from_bits(bits: u32) -> Self {
    Self(bits)
  }

  #[inline]
  #[must_use]
  pub(crate) const fn bits(self) -> u32 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Features in `self` that are not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// Check if no features are present.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  #[inline]
  #[must_use]
  pub const fn avx2(self) -> bool {
    self.has(AVX2)
  }

  #[inline]
  #[must_use]
  pub const fn avx512f(self) -> bool {
    self.has(AVX512F)
  }

  #[inline]
  #[must_use]
  pub const fn avx512vl(self) -> bool {
    self.has(AVX512VL)
  }

  #[inline]
  #[must_use]
  pub const fn avx512vbmi2(self) -> bool {
    self.has(AVX512VBMI2)
  }

  #[inline]
  #[must_use]
  pub const fn neon(self) -> bool {
    self.has(NEON)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}
