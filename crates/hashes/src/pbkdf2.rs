//! PBKDF2-HMAC-BLAKE2b-512 (RFC 2898 / RFC 8018).
//!
//! ```text
//! DK = T1 || T2 || ... || T_ceil(outlen/64)
//! Ti = U1 ^ U2 ^ ... ^ Uc
//! U1 = PRF(password, salt || INT_32_BE(i))
//! Uj = PRF(password, U_{j-1})
//! ```
//!
//! The PRF key schedule (ipad/opad absorption) depends only on the
//! password, so it is computed once and each PRF invocation clones the
//! post-pad states instead of re-deriving them. The clones, the cached
//! base, and the `U`/`T` registers are all wiped.

#![allow(clippy::indexing_slicing)] // PRF blocks have a fixed 64-byte layout

use traits::Error;

use crate::hmac::HmacBlake2b512;
use crate::util::secure_zero;

/// PRF output size in bytes.
const PRF_LEN: usize = 64;

/// Derive `out.len()` bytes of key material from a password and salt.
///
/// The block index is big-endian and starts at 1; everything else in the
/// construction is little-endian BLAKE2b. Identical arguments always
/// produce identical output, and a shorter request is a prefix of a longer
/// one.
///
/// ```
/// use hashes::pbkdf2;
///
/// let mut key = [0u8; 32];
/// pbkdf2::derive_into(&mut key, b"password", b"salt", 1_000).unwrap();
/// # let _ = key;
/// ```
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `out` is empty, `rounds` is zero, the
/// request exceeds the RFC 2898 ceiling of (2^32 - 1) * 64 bytes, or the
/// password is empty (the PRF rejects empty keys).
pub fn derive_into(out: &mut [u8], password: &[u8], salt: &[u8], rounds: u32) -> Result<(), Error> {
  if out.is_empty() || rounds == 0 {
    return Err(Error::InvalidArgument);
  }
  if out.len() as u128 > u128::from(u32::MAX) * PRF_LEN as u128 {
    return Err(Error::InvalidArgument);
  }

  let base = HmacBlake2b512::new(password).map_err(|_| Error::InvalidArgument)?;

  let mut u = [0u8; PRF_LEN];
  let mut t = [0u8; PRF_LEN];

  for (i, chunk) in out.chunks_mut(PRF_LEN).enumerate() {
    // Block indices start at 1; the ceiling check keeps this in range.
    let index = (i as u32).wrapping_add(1);

    let mut prf = base.clone();
    prf.update(salt);
    prf.update(&index.to_be_bytes());
    u = prf.finalize();
    t.copy_from_slice(&u);

    for _ in 1..rounds {
      let mut prf = base.clone();
      prf.update(&u);
      u = prf.finalize();
      for (acc, byte) in t.iter_mut().zip(u.iter()) {
        *acc ^= byte;
      }
    }

    chunk.copy_from_slice(&t[..chunk.len()]);
    secure_zero(&mut u);
    secure_zero(&mut t);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hmac;

  #[test]
  fn rejects_degenerate_arguments() {
    let mut out = [0u8; 16];
    assert_eq!(
      derive_into(&mut [], b"pw", b"salt", 1).unwrap_err(),
      Error::InvalidArgument
    );
    assert_eq!(
      derive_into(&mut out, b"pw", b"salt", 0).unwrap_err(),
      Error::InvalidArgument
    );
    assert_eq!(
      derive_into(&mut out, b"", b"salt", 1).unwrap_err(),
      Error::InvalidArgument
    );
  }

  #[test]
  fn one_round_single_block_is_one_prf_call() {
    // With c = 1, T1 = PRF(password, salt || INT_32_BE(1)).
    let mut derived = [0u8; 64];
    derive_into(&mut derived, b"password", b"salt", 1).unwrap();

    let mut m = hmac::HmacBlake2b512::new(b"password").unwrap();
    m.update(b"salt");
    m.update(&1u32.to_be_bytes());
    assert_eq!(derived, m.finalize());
  }

  #[test]
  fn two_rounds_xor_the_prf_chain() {
    let mut derived = [0u8; 64];
    derive_into(&mut derived, b"password", b"salt", 2).unwrap();

    let mut m = hmac::HmacBlake2b512::new(b"password").unwrap();
    m.update(b"salt");
    m.update(&1u32.to_be_bytes());
    let u1 = m.finalize();
    let u2 = hmac::mac(b"password", &u1).unwrap();

    let mut expected = [0u8; 64];
    for (e, (a, b)) in expected.iter_mut().zip(u1.iter().zip(u2.iter())) {
      *e = a ^ b;
    }
    assert_eq!(derived, expected);
  }

  #[test]
  fn second_block_uses_the_next_index() {
    let mut two_blocks = [0u8; 128];
    derive_into(&mut two_blocks, b"password", b"salt", 1).unwrap();

    let mut m = hmac::HmacBlake2b512::new(b"password").unwrap();
    m.update(b"salt");
    m.update(&2u32.to_be_bytes());
    assert_eq!(two_blocks[64..], m.finalize());
  }

  #[test]
  fn shorter_requests_are_prefixes() {
    let mut long = [0u8; 100];
    derive_into(&mut long, b"pw", b"salt", 3).unwrap();

    for &n in &[1usize, 16, 63, 64, 65, 99] {
      let mut short = [0u8; 100];
      derive_into(&mut short[..n], b"pw", b"salt", 3).unwrap();
      assert_eq!(short[..n], long[..n], "n={n}");
    }
  }
}
