//! One-time CPU feature detection.
//!
//! The probe runs at most once per process. With `std` the result lives in a
//! `OnceLock`; without it, in an atomic cell with a resolved flag. Both
//! paths tolerate racing first readers: the probe is idempotent and every
//! winner stores the same record.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::caps::{self, Caps};

// Bit 31 marks a stored value; caps use the low bits only.
const SET: u32 = 1 << 31;

static OVERRIDE: AtomicU32 = AtomicU32::new(0);

/// Get the detected CPU capabilities.
///
/// Repeated calls return the identical record. If an override is in effect
/// (see [`set_caps_override`]) it is returned instead of probing.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  let ov = OVERRIDE.load(Ordering::Acquire);
  if ov & SET != 0 {
    return Caps::from_bits(ov & !SET);
  }
  cached()
}

/// Set or clear the capabilities override.
///
/// When set, [`caps`] returns the override instead of detecting. Intended
/// for tests that pin the portable fallback or simulate a feature set; call
/// it before the first hash so kernel selection observes it.
pub fn set_caps_override(value: Option<Caps>) {
  let encoded = match value {
    Some(c) => SET | c.bits(),
    None => 0,
  };
  OVERRIDE.store(encoded, Ordering::Release);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE.load(Ordering::Acquire) & SET != 0
}

#[cfg(feature = "std")]
fn cached() -> Caps {
  use std::sync::OnceLock;

  static DETECTED: OnceLock<Caps> = OnceLock::new();
  *DETECTED.get_or_init(probe)
}

#[cfg(not(feature = "std"))]
fn cached() -> Caps {
  static DETECTED: AtomicU32 = AtomicU32::new(0);

  let stored = DETECTED.load(Ordering::Acquire);
  if stored & SET != 0 {
    return Caps::from_bits(stored & !SET);
  }
  let detected = probe();
  DETECTED.store(SET | detected.bits(), Ordering::Release);
  detected
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-architecture probes
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime x86_64 probe: CPUID leaf 7 sub-leaf 0 for the instruction sets,
/// then XCR0 to clear anything the OS does not save.
#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn probe() -> Caps {
  use core::arch::x86_64::{__cpuid, __cpuid_count, _xgetbv};

  if cfg!(miri) {
    return Caps::NONE;
  }

  // XCR0 state components required before a vector extension is usable.
  const XCR0_AVX: u64 = 0x06; // XMM + YMM
  const XCR0_AVX512: u64 = 0xE0; // opmask + ZMM_Hi256 + Hi16_ZMM

  // SAFETY: CPUID is available on every x86_64 processor.
  let leaf0 = unsafe { __cpuid(0) };
  if leaf0.eax < 7 {
    return Caps::NONE;
  }

  // SAFETY: leaves 1 and 7 exist, checked against the max leaf above.
  let leaf1 = unsafe { __cpuid(1) };
  let leaf7 = unsafe { __cpuid_count(7, 0) };

  let mut caps = Caps::NONE;
  if leaf7.ebx & (1 << 5) != 0 {
    caps |= caps::AVX2;
  }
  if leaf7.ebx & (1 << 16) != 0 {
    caps |= caps::AVX512F;
  }
  if leaf7.ebx & (1 << 31) != 0 {
    caps |= caps::AVX512VL;
  }
  if leaf7.ecx & (1 << 6) != 0 {
    caps |= caps::AVX512VBMI2;
  }

  // OSXSAVE (leaf 1 ECX bit 27) means XGETBV is usable and XCR0 reflects
  // what the OS saves on context switch. Without it, assume nothing.
  let osxsave = leaf1.ecx & (1 << 27) != 0;
  let xcr0 = if osxsave {
    // SAFETY: XGETBV with ECX=0 is valid when OSXSAVE is set.
    unsafe { _xgetbv(0) }
  } else {
    0
  };

  let os_avx = xcr0 & XCR0_AVX == XCR0_AVX;
  let os_avx512 = os_avx && xcr0 & XCR0_AVX512 == XCR0_AVX512;

  if !os_avx {
    caps = caps.difference(caps::AVX2);
  }
  if !os_avx512 {
    caps = caps.difference(caps::AVX512_READY);
  }

  // Dispatcher invariant: AVX-512F implies AVX2.
  if caps.avx512f() && !caps.avx2() {
    caps = caps.difference(caps::AVX512_READY);
  }

  caps
}

/// NEON is baseline on AArch64.
#[cfg(target_arch = "aarch64")]
fn probe() -> Caps {
  if cfg!(miri) {
    return Caps::NONE;
  }
  caps::NEON
}

// 32-bit ARM has no reliable runtime NEON probe; stay conservative. All
// other architectures run the portable kernel.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> Caps {
  Caps::NONE
}
