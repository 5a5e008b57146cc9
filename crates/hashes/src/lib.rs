//! BLAKE2b and the keyed constructions built on it.
//!
//! This crate implements the BLAKE2b hash family (RFC 7693) with
//! runtime-dispatched compression kernels, plus HMAC-BLAKE2b-512 (RFC 2104)
//! and PBKDF2-HMAC-BLAKE2b-512 (RFC 2898). It is `no_std` compatible; the
//! `std` feature only affects how the CPU probe caches its result.
//!
//! # Modules
//!
//! - [`blake2b`] - parameter blocks, streaming hashers, one-shot digests.
//! - [`hmac`] - HMAC-BLAKE2b-512 streaming MAC and one-shot tag.
//! - [`pbkdf2`] - PBKDF2-HMAC-BLAKE2b-512 key derivation.
//! - [`util`] - secure wiping and constant-time comparison.
//!
//! # Secret lifetime
//!
//! Every state that has absorbed key material wipes itself on finalisation
//! and on drop. Finalising consumes the hasher, so a digested state cannot
//! be touched again.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod blake2b;
pub mod hmac;
pub mod pbkdf2;
pub mod util;

pub use blake2b::{Blake2b, Blake2b512, ParamBlock};
pub use hmac::HmacBlake2b512;
pub use traits::{Digest, Error, Mac};
