//! Compact BLAKE2b cryptography with hardware acceleration.
//!
//! `b2kit` provides the BLAKE2b hash family (RFC 7693) together with
//! HMAC-BLAKE2b-512 and PBKDF2-HMAC-BLAKE2b-512, with automatic CPU
//! feature detection and kernel selection. `no_std` compatible.
//!
//! # Quick Start
//!
//! ```
//! use b2kit::{Blake2b512, Digest};
//!
//! // One-shot hashing
//! let digest = Blake2b512::digest(b"hello world");
//!
//! // Streaming
//! let mut hasher = Blake2b512::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), digest);
//! ```
//!
//! Keyed hashing, MACs, and key derivation:
//!
//! ```
//! use b2kit::{blake2b, hmac, pbkdf2};
//!
//! let mut keyed = [0u8; 32];
//! blake2b::keyed_hash_into(&mut keyed, b"my key", b"message").unwrap();
//!
//! let tag = hmac::mac(b"my key", b"message").unwrap();
//! assert!(hmac::verify(b"my key", b"message", &tag).unwrap());
//!
//! let mut derived = [0u8; 32];
//! pbkdf2::derive_into(&mut derived, b"password", b"salt", 10_000).unwrap();
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Caches the CPU probe in a `OnceLock` |
//! | `force-portable` | No | Pin the portable kernel, bypass the probe |
#![cfg_attr(not(feature = "std"), no_std)]

pub use hashes::{
  Blake2b, Blake2b512, HmacBlake2b512, ParamBlock, blake2b, hmac, pbkdf2,
  util::{constant_time_eq, secure_zero},
};
pub use platform::{Caps, caps};
pub use traits::{Digest, Error, Mac};
