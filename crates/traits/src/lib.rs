//! Core traits for the b2kit workspace.
//!
//! This crate provides the contracts the algorithm crates conform to. It is
//! `no_std` compatible and has zero dependencies.
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Digest`] | Streaming cryptographic hashes | BLAKE2b-512 |
//! | [`Mac`] | Keyed message authentication | HMAC-BLAKE2b-512 |
//!
//! Both traits consume the hasher on `finalize`: every implementation in this
//! workspace wipes its internal state when a digest is produced, so a
//! finalized value has nothing left to offer.
//!
//! # Error Types
//!
//! - [`Error`] - argument and state-machine failures shared by all crates
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
mod mac;

pub use digest::Digest;
pub use error::Error;
pub use mac::Mac;
