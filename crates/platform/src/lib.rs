//! CPU detection and capabilities for b2kit.
//!
//! This crate is the single source of truth for runtime CPU feature
//! detection across the workspace. It answers one question: which
//! compression kernels can legally run on this machine?
//!
//! # Main Entry Point
//!
//! ```
//! let caps = platform::caps();
//!
//! if caps.avx2() {
//!   // the AVX2 kernel is safe to select
//! }
//! ```
//!
//! # Design
//!
//! 1. **One probe per process**: detection runs once and is cached; repeated
//!    reads return the identical record.
//! 2. **OS gating**: CPUID reports what the CPU supports, not what the OS
//!    saves on context switch. The x86 probe reads XCR0 and clears vector
//!    features the OS will not preserve.
//! 3. **Miri-safe**: under Miri the probe reports no capabilities, so tests
//!    exercise the portable kernel.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::Caps;
pub use detect::{caps, has_override, set_caps_override};
