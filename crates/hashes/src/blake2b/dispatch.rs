//! Kernel selection, resolved once per process.
//!
//! A single atomic cell holds either 0 ("unresolved") or the tag of the
//! chosen kernel. The first reader resolves against the CPU capabilities
//! and publishes with release ordering; later readers load with acquire.
//! Racing first readers are benign: resolution is idempotent, so every
//! winner stores the same tag. The first resolution wins for the lifetime
//! of the process.

use core::sync::atomic::{AtomicU8, Ordering};

use super::kernels::{self, CompressFn, KernelId};

static ACTIVE: AtomicU8 = AtomicU8::new(0);

/// The compression function all streaming states use.
#[inline]
#[must_use]
pub(crate) fn active() -> CompressFn {
  kernels::compress_fn(active_id())
}

#[inline]
#[must_use]
pub(crate) fn active_id() -> KernelId {
  match KernelId::from_tag(ACTIVE.load(Ordering::Acquire)) {
    Some(id) => id,
    None => {
      let id = resolve();
      ACTIVE.store(id.tag(), Ordering::Release);
      id
    }
  }
}

/// Name of the kernel the dispatcher has selected (resolving it if needed).
#[must_use]
pub fn kernel_name() -> &'static str {
  active_id().as_str()
}

#[cfg(all(target_arch = "x86_64", not(feature = "force-portable")))]
fn resolve() -> KernelId {
  let caps = platform::caps();
  if caps.has(platform::caps::AVX512_READY) {
    KernelId::Avx512
  } else if caps.has(platform::caps::AVX2) {
    KernelId::Avx2
  } else {
    KernelId::X64
  }
}

#[cfg(all(target_arch = "aarch64", not(feature = "force-portable")))]
fn resolve() -> KernelId {
  if platform::caps().neon() {
    KernelId::Neon
  } else {
    KernelId::Portable
  }
}

#[cfg(any(
  feature = "force-portable",
  not(any(target_arch = "x86_64", target_arch = "aarch64"))
))]
fn resolve() -> KernelId {
  KernelId::Portable
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selection_is_stable() {
    let first = active_id();
    for _ in 0..16 {
      assert_eq!(active_id(), first);
    }
    assert_eq!(kernel_name(), first.as_str());
  }

  #[test]
  fn selected_kernel_is_admissible() {
    let id = active_id();
    assert!(platform::caps().has(kernels::required_caps(id)));
  }

  #[cfg(feature = "force-portable")]
  #[test]
  fn force_portable_pins_the_portable_kernel() {
    assert_eq!(active_id(), KernelId::Portable);
  }
}
