//! HMAC-BLAKE2b-512 (RFC 2104 with B = 128, L = 64).
//!
//! The state is a pair of BLAKE2b-512 streams: after init the inner one has
//! absorbed exactly one ipad block and the outer one exactly one opad
//! block. Updates feed the inner stream; finalisation hashes the inner
//! digest through the outer stream.
//!
//! Empty keys are rejected. RFC 2104 technically permits them, but an
//! empty key here is almost always a caller bug; anyone who really wants
//! HMAC-of-empty-key semantics can pass a single zero byte, which pads to
//! the same key block.

#![allow(clippy::indexing_slicing)] // pad blocks have a fixed 128-byte layout

use traits::{Error, Mac};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::blake2b::{self, BLOCK_LEN, State};
use crate::util::{constant_time_eq, secure_zero};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// Tag size in bytes.
pub const TAG_LEN: usize = 64;

/// Streaming HMAC-BLAKE2b-512.
///
/// ```
/// use hashes::hmac::HmacBlake2b512;
///
/// let mut mac = HmacBlake2b512::new(b"key").unwrap();
/// mac.update(b"The quick brown fox ");
/// mac.update(b"jumps over the lazy dog");
/// let tag = mac.finalize();
/// # let _ = tag;
/// ```
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct HmacBlake2b512 {
  inner: State,
  outer: State,
}

impl HmacBlake2b512 {
  /// Derive the pad schedule from `key` and absorb one padded block into
  /// each sub-state.
  ///
  /// Keys longer than the 128-byte block are first hashed down to 64
  /// bytes, per RFC 2104.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidKey`] for an empty key.
  pub fn new(key: &[u8]) -> Result<Self, Error> {
    if key.is_empty() {
      return Err(Error::InvalidKey);
    }

    let mut pad = [0u8; BLOCK_LEN];
    if key.len() > BLOCK_LEN {
      let mut digest = blake2b::hash512(key);
      pad[..digest.len()].copy_from_slice(&digest);
      secure_zero(&mut digest);
    } else {
      pad[..key.len()].copy_from_slice(key);
    }

    let mut inner = State::with_param(&blake2b::PARAM_512);
    let mut outer = State::with_param(&blake2b::PARAM_512);

    for b in pad.iter_mut() {
      *b ^= IPAD;
    }
    inner.absorb(&pad);

    // Flip the ipad bytes straight to opad without rebuilding the key.
    for b in pad.iter_mut() {
      *b ^= IPAD ^ OPAD;
    }
    outer.absorb(&pad);

    secure_zero(&mut pad);
    Ok(Self { inner, outer })
  }

  /// Absorb message bytes into the inner stream.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.inner.absorb(data);
  }

  /// Finalise: the tag is the outer hash of the inner digest. Both
  /// sub-states are wiped.
  #[must_use]
  pub fn finalize(mut self) -> [u8; TAG_LEN] {
    let mut inner_digest = [0u8; TAG_LEN];
    self.inner.emit(&mut inner_digest);
    self.outer.absorb(&inner_digest);

    let mut tag = [0u8; TAG_LEN];
    self.outer.emit(&mut tag);
    secure_zero(&mut inner_digest);
    tag
  }

  /// Finalise into the front of `out`; returns the number of bytes
  /// written.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidLength`] if `out` holds fewer than 64 bytes.
  pub fn finalize_into(self, out: &mut [u8]) -> Result<usize, Error> {
    if out.len() < TAG_LEN {
      return Err(Error::InvalidLength);
    }
    let mut tag = self.finalize();
    out[..TAG_LEN].copy_from_slice(&tag);
    secure_zero(&mut tag);
    Ok(TAG_LEN)
  }
}

impl Mac for HmacBlake2b512 {
  const TAG_SIZE: usize = TAG_LEN;
  type Tag = [u8; TAG_LEN];

  #[inline]
  fn new(key: &[u8]) -> Result<Self, Error> {
    Self::new(key)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Self::update(self, data);
  }

  #[inline]
  fn finalize(self) -> Self::Tag {
    Self::finalize(self)
  }
}

/// One-shot HMAC-BLAKE2b-512.
///
/// # Errors
///
/// [`Error::InvalidKey`] for an empty key.
pub fn mac(key: &[u8], data: &[u8]) -> Result<[u8; TAG_LEN], Error> {
  let mut m = HmacBlake2b512::new(key)?;
  m.update(data);
  Ok(m.finalize())
}

/// Constant-time verification of a received tag.
///
/// `tag` may be truncated; it is compared against the same-length prefix of
/// the computed tag, in time independent of where a mismatch sits.
///
/// # Errors
///
/// [`Error::InvalidKey`] for an empty key, [`Error::InvalidLength`] for an
/// empty or over-long `tag`.
pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool, Error> {
  if tag.is_empty() || tag.len() > TAG_LEN {
    return Err(Error::InvalidLength);
  }
  let mut computed = mac(key, data)?;
  let ok = constant_time_eq(&computed[..tag.len()], tag);
  secure_zero(&mut computed);
  Ok(ok)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_key_is_rejected() {
    assert_eq!(HmacBlake2b512::new(&[]).unwrap_err(), Error::InvalidKey);
    assert_eq!(mac(&[], b"data").unwrap_err(), Error::InvalidKey);
  }

  #[test]
  fn matches_manual_construction() {
    // HMAC(K, m) = H(opad-block || H(ipad-block || m)) for a short key.
    let key = b"test key";
    let msg = b"test message";

    let mut ipad = [IPAD; BLOCK_LEN];
    let mut opad = [OPAD; BLOCK_LEN];
    for (i, &k) in key.iter().enumerate() {
      ipad[i] ^= k;
      opad[i] ^= k;
    }

    let mut inner = State::with_param(&blake2b::PARAM_512);
    inner.absorb(&ipad);
    inner.absorb(msg);
    let mut inner_digest = [0u8; 64];
    inner.emit(&mut inner_digest);

    let mut outer = State::with_param(&blake2b::PARAM_512);
    outer.absorb(&opad);
    outer.absorb(&inner_digest);
    let mut expected = [0u8; 64];
    outer.emit(&mut expected);

    assert_eq!(mac(key, msg).unwrap(), expected);
  }

  #[test]
  fn long_keys_are_hashed_down() {
    // A key longer than one block is replaced by its 64-byte digest.
    let key = [0x42u8; 200];
    let digest = blake2b::hash512(&key);
    assert_eq!(mac(&key, b"m").unwrap(), mac(&digest, b"m").unwrap());
  }

  #[test]
  fn block_sized_key_is_not_hashed() {
    let key = [0x42u8; BLOCK_LEN];
    let digest = blake2b::hash512(&key);
    assert_ne!(mac(&key, b"m").unwrap(), mac(&digest, b"m").unwrap());
  }

  #[test]
  fn finalize_into_needs_64_bytes() {
    let m = HmacBlake2b512::new(b"k").unwrap();
    let mut short = [0u8; 63];
    assert_eq!(m.finalize_into(&mut short).unwrap_err(), Error::InvalidLength);
  }

  #[test]
  fn verify_accepts_and_rejects() {
    let key = b"verification key";
    let data = b"payload";
    let tag = mac(key, data).unwrap();

    assert!(verify(key, data, &tag).unwrap());
    assert!(verify(key, data, &tag[..32]).unwrap());

    let mut bad = tag;
    bad[0] ^= 1;
    assert!(!verify(key, data, &bad).unwrap());
    assert!(!verify(key, b"other payload", &tag).unwrap());

    assert_eq!(verify(key, data, &[]).unwrap_err(), Error::InvalidLength);
  }

  #[test]
  fn mac_trait_roundtrip() {
    let via_trait = <HmacBlake2b512 as traits::Mac>::mac(b"key", b"data").unwrap();
    assert_eq!(via_trait, mac(b"key", b"data").unwrap());
  }
}
