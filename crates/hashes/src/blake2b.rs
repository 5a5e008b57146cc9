//! BLAKE2b (RFC 7693).
//!
//! The hash is organised in three layers:
//!
//! - the compression kernels (selected once per process by the dispatch
//!   cell), each a pure function over one 128-byte block;
//! - the raw streaming [`State`], which mirrors the RFC state machine:
//!   chaining value, 128-bit byte counter, residual buffer;
//! - the typed hashers [`Blake2b`] and [`Blake2b512`], which own a state
//!   plus whatever is needed to [`Blake2b::reset`] it, and wipe themselves
//!   on finalisation and on drop.

#![allow(clippy::indexing_slicing)] // parameter blocks and buffers use fixed layouts

use traits::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::util::secure_zero;

pub(crate) mod kernels;

mod dispatch;
mod portable;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use dispatch::kernel_name;
pub use kernels::KernelId;

/// Message block size in bytes.
pub const BLOCK_LEN: usize = 128;
/// Maximum digest length in bytes.
pub const MAX_OUT_LEN: usize = 64;
/// Maximum key length in bytes.
pub const MAX_KEY_LEN: usize = 64;
/// Salt field size in bytes.
pub const SALT_LEN: usize = 16;
/// Personalisation field size in bytes.
pub const PERSONAL_LEN: usize = 16;

/// Initialisation vector (the SHA-512 IV, RFC 7693 §2.6).
pub(crate) const IV: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

/// Message schedule (RFC 7693 §2.7). Rounds 10 and 11 repeat rows 0 and 1.
pub(crate) const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

/// Parameter block for unkeyed BLAKE2b-512 in sequential mode.
pub(crate) const PARAM_512: [u8; 64] = {
  let mut p = [0u8; 64];
  p[0] = 64; // digest_length
  p[2] = 1; // fanout
  p[3] = 1; // depth
  p
};

fn default_param(outlen: usize, keylen: usize) -> Result<[u8; 64], Error> {
  if outlen == 0 || outlen > MAX_OUT_LEN {
    return Err(Error::InvalidLength);
  }
  debug_assert!(keylen <= MAX_KEY_LEN);
  let mut param = [0u8; 64];
  param[0] = outlen as u8;
  param[1] = keylen as u8;
  param[2] = 1;
  param[3] = 1;
  Ok(param)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameter block builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for the 64-byte RFC 7693 parameter block (sequential mode).
///
/// Bytes 0..=3 are digest length, key length, fanout, and depth; bytes
/// 32..48 carry the salt and 48..64 the personalisation tag. Tree fields
/// stay zero.
///
/// ```
/// use hashes::blake2b::{Blake2b, ParamBlock};
///
/// let param = ParamBlock::new(32).unwrap().personal(b"b2kit-demo-tag\0\0");
/// let hasher = Blake2b::from_param(param.as_bytes()).unwrap();
/// # let _ = hasher;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ParamBlock {
  bytes: [u8; 64],
}

impl ParamBlock {
  /// Start a parameter block with the given digest length.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidLength`] if `outlen` is outside 1..=64.
  pub fn new(outlen: usize) -> Result<Self, Error> {
    Ok(Self {
      bytes: default_param(outlen, 0)?,
    })
  }

  /// Set the 16-byte salt.
  #[must_use]
  pub fn salt(mut self, salt: &[u8; SALT_LEN]) -> Self {
    self.bytes[32..48].copy_from_slice(salt);
    self
  }

  /// Set the 16-byte personalisation tag.
  #[must_use]
  pub fn personal(mut self, personal: &[u8; PERSONAL_LEN]) -> Self {
    self.bytes[48..64].copy_from_slice(personal);
    self
  }

  /// The wire-format parameter block.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 64] {
    &self.bytes
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw streaming state
// ─────────────────────────────────────────────────────────────────────────────

/// The raw BLAKE2b state machine.
///
/// This is the lowest public layer: init, update, final, nothing else. The
/// digest length is fixed by the parameter block at init. Finalising wipes
/// the state; any later [`State::update`] or [`State::finalize_into`]
/// reports [`Error::InvalidState`] until the value is re-initialised. Most
/// callers want [`Blake2b`], which adds keyed init and reset on top.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct State {
  h: [u64; 8],
  t: [u64; 2],
  buf: [u8; BLOCK_LEN],
  buflen: usize,
  outlen: u8,
}

impl State {
  /// Initialise from a caller-supplied 64-byte parameter block.
  ///
  /// Only byte 0 (the digest length) is validated; every other combination
  /// is meaningful in sequential mode.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidParam`] if byte 0 is outside 1..=64.
  pub fn init_from_param(param: &[u8; 64]) -> Result<Self, Error> {
    if param[0] == 0 || param[0] as usize > MAX_OUT_LEN {
      return Err(Error::InvalidParam);
    }
    Ok(Self::with_param(param))
  }

  /// Build the initial chaining value: the parameter block, read as eight
  /// little-endian words, XORed into the IV.
  pub(crate) fn with_param(param: &[u8; 64]) -> Self {
    debug_assert!(param[0] >= 1 && param[0] as usize <= MAX_OUT_LEN);
    let mut h = IV;
    let (words, _) = param.as_chunks::<8>();
    for (word, chunk) in h.iter_mut().zip(words) {
      *word ^= u64::from_le_bytes(*chunk);
    }
    Self {
      h,
      t: [0; 2],
      buf: [0u8; BLOCK_LEN],
      buflen: 0,
      outlen: param[0],
    }
  }

  /// Digest length fixed at init, or 0 for a consumed state.
  #[inline]
  #[must_use]
  pub fn outlen(&self) -> usize {
    self.outlen as usize
  }

  #[inline]
  fn is_live(&self) -> bool {
    self.outlen != 0
  }

  /// Advance the 128-bit byte counter before a compression.
  #[inline]
  fn advance(&mut self, n: usize) {
    let (lo, carry) = self.t[0].overflowing_add(n as u64);
    self.t[0] = lo;
    self.t[1] = self.t[1].wrapping_add(u64::from(carry));
  }

  /// Absorb message bytes.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidState`] if the state was finalised or never
  /// initialised. Zero-length input is a no-op and never fails.
  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    if data.is_empty() {
      return Ok(());
    }
    if !self.is_live() {
      return Err(Error::InvalidState);
    }
    self.absorb(data);
    Ok(())
  }

  /// Finalise, writing `outlen` digest bytes to the front of `out`.
  ///
  /// On success the state is wiped and returns the number of bytes written.
  /// On failure no output bytes are produced.
  ///
  /// # Errors
  ///
  /// - [`Error::InvalidState`] if the state was finalised or never
  ///   initialised.
  /// - [`Error::InvalidLength`] if `out` is shorter than the digest.
  pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, Error> {
    if !self.is_live() {
      return Err(Error::InvalidState);
    }
    let outlen = self.outlen as usize;
    if out.len() < outlen {
      return Err(Error::InvalidLength);
    }

    let mut staging = [0u8; MAX_OUT_LEN];
    self.emit(&mut staging);
    out[..outlen].copy_from_slice(&staging[..outlen]);
    secure_zero(&mut staging);
    Ok(outlen)
  }

  /// Infallible absorb; callers guarantee the state is live.
  pub(crate) fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }
    let compress = dispatch::active();

    if self.buflen != 0 {
      let take = core::cmp::min(BLOCK_LEN - self.buflen, data.len());
      self.buf[self.buflen..self.buflen + take].copy_from_slice(&data[..take]);
      self.buflen += take;
      data = &data[take..];

      // A full buffered block is compressed only once further input is in
      // hand; the last block of the stream must wait for the final flag.
      if self.buflen == BLOCK_LEN && !data.is_empty() {
        self.advance(BLOCK_LEN);
        compress(&mut self.h, &self.buf, self.t[0], self.t[1], false);
        self.buflen = 0;
      } else {
        return;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    if !blocks.is_empty() {
      // With no trailing partial block, hold the last full block back.
      let (bulk, held) = if rest.is_empty() {
        (&blocks[..blocks.len() - 1], Some(&blocks[blocks.len() - 1]))
      } else {
        (blocks, None)
      };

      for block in bulk {
        self.advance(BLOCK_LEN);
        compress(&mut self.h, block, self.t[0], self.t[1], false);
      }

      if let Some(last) = held {
        self.buf.copy_from_slice(last);
        self.buflen = BLOCK_LEN;
      }
    }

    if !rest.is_empty() {
      self.buf[..rest.len()].copy_from_slice(rest);
      self.buflen = rest.len();
    }
  }

  /// Infallible finalisation: pad, compress with the final flag, emit all
  /// eight words little-endian, wipe the state.
  pub(crate) fn emit(&mut self, staging: &mut [u8; MAX_OUT_LEN]) {
    self.advance(self.buflen);
    self.buf[self.buflen..].fill(0);

    let compress = dispatch::active();
    compress(&mut self.h, &self.buf, self.t[0], self.t[1], true);

    for (chunk, word) in staging.chunks_exact_mut(8).zip(self.h.iter()) {
      chunk.copy_from_slice(&word.to_le_bytes());
    }
    self.zeroize();
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed hashers
// ─────────────────────────────────────────────────────────────────────────────

/// BLAKE2b hasher with a configurable digest length and optional key.
///
/// Owns the parameter block and, for keyed instances, the zero-padded key
/// block, so [`Blake2b::reset`] can restart the stream without the caller
/// re-supplying secrets. Everything is wiped on finalisation and on drop.
///
/// ```
/// use hashes::blake2b::Blake2b;
///
/// let mut h = Blake2b::new(32).unwrap();
/// h.update(b"abc").unwrap();
/// let mut out = [0u8; 32];
/// h.finalize_into(&mut out).unwrap();
/// ```
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct Blake2b {
  state: State,
  param: [u8; 64],
  key_block: [u8; BLOCK_LEN],
  keyed: bool,
}

impl Blake2b {
  /// Create an unkeyed hasher with the given digest length.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidLength`] if `outlen` is outside 1..=64.
  pub fn new(outlen: usize) -> Result<Self, Error> {
    let param = default_param(outlen, 0)?;
    Ok(Self {
      state: State::with_param(&param),
      param,
      key_block: [0u8; BLOCK_LEN],
      keyed: false,
    })
  }

  /// Create a keyed hasher (RFC 7693 keyed mode).
  ///
  /// The key is zero-padded to one 128-byte block and absorbed immediately;
  /// the padded block is retained for [`Blake2b::reset`].
  ///
  /// # Errors
  ///
  /// [`Error::InvalidLength`] if `outlen` is outside 1..=64 or the key is
  /// empty or longer than 64 bytes.
  pub fn new_keyed(outlen: usize, key: &[u8]) -> Result<Self, Error> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
      return Err(Error::InvalidLength);
    }
    let param = default_param(outlen, key.len())?;
    let mut key_block = [0u8; BLOCK_LEN];
    key_block[..key.len()].copy_from_slice(key);

    let mut state = State::with_param(&param);
    state.absorb(&key_block);
    Ok(Self {
      state,
      param,
      key_block,
      keyed: true,
    })
  }

  /// Create a hasher from a caller-supplied 64-byte parameter block.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidParam`] if byte 0 is outside 1..=64.
  pub fn from_param(param: &[u8; 64]) -> Result<Self, Error> {
    Ok(Self {
      state: State::init_from_param(param)?,
      param: *param,
      key_block: [0u8; BLOCK_LEN],
      keyed: false,
    })
  }

  /// Digest length in bytes.
  #[inline]
  #[must_use]
  pub fn outlen(&self) -> usize {
    self.param[0] as usize
  }

  /// Absorb message bytes.
  ///
  /// # Errors
  ///
  /// Never fails on a value obtained from one of the constructors; the
  /// `Result` mirrors the raw [`State`] contract.
  #[inline]
  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    self.state.update(data)
  }

  /// Finalise, writing the digest to the front of `out` and consuming the
  /// hasher. Returns the number of bytes written.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidLength`] if `out` is shorter than the digest length.
  /// The output buffer is untouched on failure.
  pub fn finalize_into(mut self, out: &mut [u8]) -> Result<usize, Error> {
    self.state.finalize_into(out)
  }

  /// Restart the stream with the original parameters.
  ///
  /// Observably equivalent to constructing a fresh instance: the stored
  /// parameter block is re-applied and, for keyed hashers, the stored
  /// padded key block is re-absorbed.
  pub fn reset(&mut self) {
    self.state = State::with_param(&self.param);
    if self.keyed {
      self.state.absorb(&self.key_block);
    }
  }
}

/// Fixed BLAKE2b-512 hasher implementing [`traits::Digest`].
///
/// ```
/// use hashes::Blake2b512;
/// use traits::Digest as _;
///
/// let digest = Blake2b512::digest(b"abc");
/// assert_eq!(digest[0], 0xba);
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2b512 {
  state: State,
}

impl Blake2b512 {
  /// Create a hasher in its initial state.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self {
      state: State::with_param(&PARAM_512),
    }
  }
}

impl Default for Blake2b512 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl traits::Digest for Blake2b512 {
  const OUTPUT_SIZE: usize = 64;
  type Output = [u8; 64];

  #[inline]
  fn new() -> Self {
    Self::new()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state.absorb(data);
  }

  fn finalize(mut self) -> Self::Output {
    let mut out = [0u8; 64];
    self.state.emit(&mut out);
    out
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot entry points
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot unkeyed hash; the digest length is `out.len()`.
///
/// # Errors
///
/// [`Error::InvalidLength`] if `out.len()` is outside 1..=64.
pub fn hash_into(out: &mut [u8], data: &[u8]) -> Result<usize, Error> {
  let mut h = Blake2b::new(out.len())?;
  h.update(data)?;
  h.finalize_into(out)
}

/// One-shot keyed hash; the digest length is `out.len()`.
///
/// # Errors
///
/// [`Error::InvalidLength`] if `out.len()` or the key length is out of
/// range.
pub fn keyed_hash_into(out: &mut [u8], key: &[u8], data: &[u8]) -> Result<usize, Error> {
  let mut h = Blake2b::new_keyed(out.len(), key)?;
  h.update(data)?;
  h.finalize_into(out)
}

/// One-shot BLAKE2b-512.
#[must_use]
pub fn hash512(data: &[u8]) -> [u8; 64] {
  let mut state = State::with_param(&PARAM_512);
  state.absorb(data);
  let mut out = [0u8; 64];
  state.emit(&mut out);
  out
}

#[cfg(test)]
mod tests {
  use traits::Error;

  use super::*;

  #[test]
  fn counter_advances_before_each_compress() {
    // 256 bytes: exactly two blocks. The second block must be compressed
    // with the final flag and t = 256, which only happens when the last
    // full block is held back during update.
    let data = [0x5Au8; 256];
    let streaming = {
      let mut h = Blake2b512::new();
      h.state.absorb(&data);
      assert_eq!(h.state.buflen, BLOCK_LEN);
      assert_eq!(h.state.t, [128, 0]);
      let mut out = [0u8; 64];
      h.state.emit(&mut out);
      out
    };
    assert_eq!(streaming, hash512(&data));
  }

  #[test]
  fn update_never_compresses_the_last_byte() {
    let mut h = Blake2b512::new();
    h.state.absorb(&[0u8; BLOCK_LEN]);
    // One full block buffered, none compressed yet.
    assert_eq!(h.state.buflen, BLOCK_LEN);
    assert_eq!(h.state.t, [0, 0]);

    h.state.absorb(&[0u8; 1]);
    // The buffered block was flushed to make room.
    assert_eq!(h.state.buflen, 1);
    assert_eq!(h.state.t, [128, 0]);
  }

  #[test]
  fn state_is_wiped_after_finalize() {
    let mut state = State::with_param(&PARAM_512);
    state.absorb(b"wipe me");
    let mut out = [0u8; 64];
    state.emit(&mut out);

    assert_eq!(state.h, [0u64; 8]);
    assert_eq!(state.t, [0u64; 2]);
    assert_eq!(state.buf, [0u8; BLOCK_LEN]);
    assert_eq!(state.buflen, 0);
    assert_eq!(state.outlen, 0);
  }

  #[test]
  fn consumed_state_rejects_operations() {
    let mut state = State::init_from_param(&PARAM_512).unwrap();
    state.update(b"abc").unwrap();
    let mut out = [0u8; 64];
    state.finalize_into(&mut out).unwrap();

    assert_eq!(state.update(b"more"), Err(Error::InvalidState));
    assert_eq!(state.finalize_into(&mut out), Err(Error::InvalidState));
    // Zero-length update stays a no-op even on a dead state.
    assert_eq!(state.update(&[]), Ok(()));

    // Re-init brings it back.
    state = State::init_from_param(&PARAM_512).unwrap();
    assert!(state.update(b"abc").is_ok());
  }

  #[test]
  fn finalize_rejects_short_output() {
    let mut state = State::init_from_param(&PARAM_512).unwrap();
    let mut short = [0u8; 63];
    assert_eq!(state.finalize_into(&mut short), Err(Error::InvalidLength));
    // The failure left the state usable.
    let mut out = [0u8; 64];
    assert_eq!(state.finalize_into(&mut out), Ok(64));
  }

  #[test]
  fn init_validates_lengths() {
    assert_eq!(Blake2b::new(0).unwrap_err(), Error::InvalidLength);
    assert_eq!(Blake2b::new(65).unwrap_err(), Error::InvalidLength);
    assert_eq!(Blake2b::new_keyed(64, &[]).unwrap_err(), Error::InvalidLength);
    assert_eq!(
      Blake2b::new_keyed(64, &[0u8; 65]).unwrap_err(),
      Error::InvalidLength
    );

    let mut param = PARAM_512;
    param[0] = 0;
    assert_eq!(State::init_from_param(&param).unwrap_err(), Error::InvalidParam);
    assert_eq!(Blake2b::from_param(&param).unwrap_err(), Error::InvalidParam);
    param[0] = 65;
    assert_eq!(State::init_from_param(&param).unwrap_err(), Error::InvalidParam);
  }

  #[test]
  fn reset_matches_fresh_unkeyed() {
    let mut h = Blake2b::new(48).unwrap();
    h.update(b"garbage that must not leak into the next digest").unwrap();
    h.reset();
    h.update(b"abc").unwrap();
    let mut a = [0u8; 48];
    h.finalize_into(&mut a).unwrap();

    let mut fresh = Blake2b::new(48).unwrap();
    fresh.update(b"abc").unwrap();
    let mut b = [0u8; 48];
    fresh.finalize_into(&mut b).unwrap();

    assert_eq!(a, b);
  }

  #[test]
  fn reset_matches_fresh_keyed() {
    let key = [7u8; 32];
    let mut h = Blake2b::new_keyed(64, &key).unwrap();
    h.update(b"first stream").unwrap();
    h.reset();
    h.update(b"second stream").unwrap();
    let mut a = [0u8; 64];
    h.finalize_into(&mut a).unwrap();

    let mut fresh = Blake2b::new_keyed(64, &key).unwrap();
    fresh.update(b"second stream").unwrap();
    let mut b = [0u8; 64];
    fresh.finalize_into(&mut b).unwrap();

    assert_eq!(a, b);
  }

  #[test]
  fn oneshot_entry_points_agree() {
    let data = b"one-shot agreement";
    let mut via_into = [0u8; 64];
    assert_eq!(hash_into(&mut via_into, data), Ok(64));
    assert_eq!(via_into, hash512(data));

    let key = [3u8; 16];
    let mut keyed_oneshot = [0u8; 64];
    assert_eq!(keyed_hash_into(&mut keyed_oneshot, &key, data), Ok(64));

    let mut streamed = Blake2b::new_keyed(64, &key).unwrap();
    streamed.update(data).unwrap();
    let mut keyed_streamed = [0u8; 64];
    streamed.finalize_into(&mut keyed_streamed).unwrap();
    assert_eq!(keyed_oneshot, keyed_streamed);
  }

  #[test]
  fn hash_into_rejects_bad_output_lengths() {
    assert_eq!(hash_into(&mut [], b"x").unwrap_err(), Error::InvalidLength);
    let mut too_long = [0u8; 65];
    assert_eq!(hash_into(&mut too_long, b"x").unwrap_err(), Error::InvalidLength);
  }
}
